use std::num::ParseIntError;
use bitflags::bitflags;
use derive_more::*;
use crate::{TileKind, Tileset};

/// Largest level, in blocks.
pub const MAX_LEVEL_WIDTH: usize = 256;
pub const MAX_LEVEL_HEIGHT: usize = 256;

bitflags! {
    /// What a block holds besides its floor or wall texture.
    #[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Hash)]
    pub struct BlockContent: u8 {
        const NONE  = 0b00000000;
        const WALL  = 0b00000001;
    }
}

/// One cell of a scene layer.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Block {
    pub tile_id: u32,
    pub content: BlockContent,
}

/// Grid of tile ids painted with a tileset, read from a "<n>_Scene.csv" export.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SceneLayer {
    pub width: usize,
    pub height: usize,
    blocks: Vec<Block>,
}

impl SceneLayer {

    /// Parses a comma separated grid of tile ids, one row per line.
    /// Every id must belong to the tileset, and all rows must be the same length.
    pub fn parse(csv: &str, tileset: &Tileset) -> Result<Self, LevelError> {
        Self::parse_bounded(csv, tileset, MAX_LEVEL_WIDTH, MAX_LEVEL_HEIGHT)
    }

    pub fn parse_bounded(csv: &str, tileset: &Tileset, max_width: usize, max_height: usize) -> Result<Self, LevelError> {
        let mut width = 0;
        let mut height = 0;
        let mut blocks = Vec::new();
        let rows = csv.lines().map(str::trim).filter(|row| !row.is_empty());
        for (y, row) in rows.enumerate() {
            if y >= max_height {
                return Err(LevelError::TooLarge { max_width, max_height });
            }
            let row = row.strip_suffix(',').unwrap_or(row);
            let mut row_width = 0;
            for (x, cell) in row.split(',').enumerate() {
                if x >= max_width {
                    return Err(LevelError::TooLarge { max_width, max_height });
                }
                let cell = cell.trim();
                let id: i64 = cell
                    .parse()
                    .map_err(|source| LevelError::InvalidNumber { x, y, source })?;
                let tile = u32::try_from(id)
                    .ok()
                    .and_then(|id| tileset.get(id))
                    .ok_or(LevelError::UnknownTile { x, y, id })?;
                let content = match tile.kind {
                    TileKind::Wall => BlockContent::WALL,
                    TileKind::Floor => BlockContent::NONE,
                };
                blocks.push(Block { tile_id: tile.id, content });
                row_width += 1;
            }
            if y == 0 {
                width = row_width;
            }
            else if row_width != width {
                return Err(LevelError::RaggedRow { y, expected: width, found: row_width });
            }
            height += 1;
        }
        if blocks.is_empty() {
            return Err(LevelError::Empty);
        }
        log::debug!("Level size : {width}x{height} blocks.");
        Ok(Self { width, height, blocks })
    }

    /// Block at the given coordinates, None when out of bounds.
    pub fn block(&self, x: usize, y: usize) -> Option<&Block> {
        if x >= self.width || y >= self.height { return None }
        self.blocks.get(y * self.width + x)
    }

    /// Out of bounds counts as wall.
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        match self.block(x, y) {
            Some(block) => block.content.contains(BlockContent::WALL),
            None => true,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

#[derive(Error, Display, Debug)]
pub enum LevelError {
    #[display(fmt="Block ({x}, {y}) is not a number: {source}")]
    InvalidNumber { x: usize, y: usize, source: ParseIntError },
    #[display(fmt="Block ({x}, {y}) ID is bad : {id}")]
    UnknownTile { x: usize, y: usize, id: i64 },
    #[display(fmt="Row {y} has {found} blocks, expected {expected}")]
    RaggedRow { y: usize, expected: usize, found: usize },
    #[display(fmt="Level exceeds {max_width}x{max_height} blocks")]
    TooLarge { max_width: usize, max_height: usize },
    #[display(fmt="Level has no blocks")]
    Empty,
}

#[cfg(test)]
mod test {
    use crate::level::{BlockContent, LevelError, SceneLayer};
    use crate::tileset::scene::scene_tileset;

    #[test]
    fn parse() {
        let tileset = scene_tileset();
        let csv = "17,17,17\n17,8,22\n13,0,23\n";
        let layer = SceneLayer::parse(csv, &tileset).unwrap();
        assert_eq!(3, layer.width);
        assert_eq!(3, layer.height);

        let exit = layer.block(1, 1).unwrap();
        assert_eq!(8, exit.tile_id);
        assert_eq!(BlockContent::NONE, exit.content);
        assert!(layer.is_wall(2, 1));
        assert!(!layer.is_wall(0, 2));
        assert!(layer.is_wall(3, 0));
        assert!(layer.block(0, 3).is_none());
    }

    #[test]
    fn accepts_crlf_and_trailing_commas() {
        let tileset = scene_tileset();
        let layer = SceneLayer::parse("1, 2,\r\n3, 4,\r\n", &tileset).unwrap();
        assert_eq!((2, 2), (layer.width, layer.height));
        assert_eq!(4, layer.block(1, 1).unwrap().tile_id);
    }

    #[test]
    fn errors() {
        let tileset = scene_tileset();
        assert!(matches!(
            SceneLayer::parse("0,24", &tileset),
            Err(LevelError::UnknownTile { x: 1, y: 0, id: 24 })
        ));
        assert!(matches!(
            SceneLayer::parse("0,-1", &tileset),
            Err(LevelError::UnknownTile { id: -1, .. })
        ));
        assert!(matches!(
            SceneLayer::parse("0,x", &tileset),
            Err(LevelError::InvalidNumber { x: 1, y: 0, .. })
        ));
        assert!(matches!(
            SceneLayer::parse("0,1\n2", &tileset),
            Err(LevelError::RaggedRow { y: 1, expected: 2, found: 1 })
        ));
        assert!(matches!(SceneLayer::parse("\n\n", &tileset), Err(LevelError::Empty)));
        assert!(matches!(
            SceneLayer::parse_bounded("0,0,0", &tileset, 2, 2),
            Err(LevelError::TooLarge { .. })
        ));
        assert!(matches!(
            SceneLayer::parse_bounded("0\n0\n0", &tileset, 2, 2),
            Err(LevelError::TooLarge { .. })
        ));
    }
}
