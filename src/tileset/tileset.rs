use derive_more::*;
use crate::tileset::parse::{self, TsxParseError};
use crate::{AssetLoader, AssetPath, HashMap, TileDefinition, TileKind};

/// Loader for a .tsx file.
/// Outputs a [`Tileset`] whose image paths resolve against the loaded file.
pub struct TsxLoader;
impl AssetLoader for TsxLoader {
    type AssetType = Tileset;

    fn load(&self, bytes: &[u8], path: &AssetPath) -> anyhow::Result<Tileset> {
        let parsed_tileset = parse::Tileset::parse_bytes(bytes)?;
        let tileset = Tileset::from_parsed(parsed_tileset, Some(path.clone()))?;
        log::info!("Loaded tileset '{}' with {} tiles from {path}", tileset.name, tileset.len());
        Ok(tileset)
    }

    fn extensions(&self) -> &[&str] {
        &["tsx"]
    }
}

/// Read-only registry of tiles, indexed by tile id.
/// Tiles are kept sorted by id.
#[derive(Clone, Default, Debug)]
pub struct Tileset {
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Count declared by the descriptor, if any.
    pub tile_count: Option<u32>,
    /// Descriptor the tileset was read from.
    pub origin: Option<AssetPath>,
    tiles: Vec<TileDefinition>,
    id_to_index: HashMap<u32, usize>,
}

impl Tileset {

    /// Builds a tileset from tiles in any order.
    /// Fails if two tiles share an id.
    pub fn new(
        name: impl Into<String>,
        tile_width: u32,
        tile_height: u32,
        tiles: impl IntoIterator<Item = TileDefinition>,
    ) -> Result<Self, TilesetError> {
        let mut tiles: Vec<TileDefinition> = tiles.into_iter().collect();
        tiles.sort_by_key(|tile| tile.id);
        if let Some(pair) = tiles.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(TilesetError::DuplicateTileId { id: pair[0].id });
        }
        let tile_count = Some(tiles.len() as u32);
        Ok(Self::from_sorted(name.into(), tile_width, tile_height, tile_count, tiles))
    }

    /// Tiles must already be sorted and unique.
    pub(crate) fn from_sorted(
        name: String,
        tile_width: u32,
        tile_height: u32,
        tile_count: Option<u32>,
        tiles: Vec<TileDefinition>,
    ) -> Self {
        let id_to_index = tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (tile.id, index))
            .collect();
        Self {
            name,
            tile_width,
            tile_height,
            tile_count,
            origin: None,
            tiles,
            id_to_index,
        }
    }

    /// Parses the contents of a .tsx file.
    pub fn parse_str(xml_source: &str, origin: Option<AssetPath>) -> Result<Self, TilesetError> {
        let parsed_tileset = parse::Tileset::parse_str(xml_source)?;
        Self::from_parsed(parsed_tileset, origin)
    }

    /// Converts the raw descriptor mapping into a registry.
    /// Image dimensions default to the tileset's tile size when the descriptor omits them.
    pub fn from_parsed(parsed_tileset: parse::Tileset, origin: Option<AssetPath>) -> Result<Self, TilesetError> {
        if parsed_tileset.image.is_some() {
            return Err(TilesetError::UnsupportedAtlas { name: parsed_tileset.name });
        }
        let tile_width = parsed_tileset.tile_width;
        let tile_height = parsed_tileset.tile_height;
        let mut tiles = Vec::with_capacity(parsed_tileset.tiles.len());
        for parsed_tile in parsed_tileset.tiles {
            let Some(image) = parsed_tile.image else {
                return Err(TilesetError::MissingImage { id: parsed_tile.id });
            };
            let kind = TileKind::from_class(&parsed_tile.class)
                .unwrap_or_else(|| TileKind::from_image_path(&image.source));
            tiles.push(TileDefinition {
                id: parsed_tile.id,
                width: image.width.unwrap_or(tile_width),
                height: image.height.unwrap_or(tile_height),
                image_path: image.source,
                kind,
            });
        }
        let declared_count = parsed_tileset.tile_count;
        let mut tileset = Self::new(parsed_tileset.name, tile_width, tile_height, tiles)?;
        tileset.tile_count = declared_count;
        tileset.origin = origin;
        Ok(tileset)
    }

    /// Looks up a tile by id.
    pub fn get(&self, id: u32) -> Option<&TileDefinition> {
        let index = *self.id_to_index.get(&id)?;
        self.tiles.get(index)
    }

    /// Looks up a tile by id, failing if it is not part of this tileset.
    pub fn tile(&self, id: u32) -> Result<&TileDefinition, TilesetError> {
        self.get(id).ok_or(TilesetError::TileNotFound { id })
    }

    pub fn contains(&self, id: u32) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Tiles sorted by id.
    pub fn tiles(&self) -> &[TileDefinition] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileDefinition> {
        self.tiles.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.tiles.iter().map(|tile| tile.id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Path of a tile's bitmap, resolved against the descriptor's directory.
    /// Without an origin, the path is returned as written.
    pub fn resolve_image_path(&self, tile: &TileDefinition) -> String {
        match &self.origin {
            Some(origin) => origin.resolve(&tile.image_path),
            None => tile.image_path.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a Tileset {
    type Item = &'a TileDefinition;
    type IntoIter = std::slice::Iter<'a, TileDefinition>;
    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

#[derive(Error, Display, From, Debug)]
pub enum TilesetError {
    #[display(fmt="{_0}")]
    ParseError(TsxParseError),
    #[display(fmt="Tile id {id} appears more than once")]
    #[from(ignore)]
    DuplicateTileId { id: u32 },
    #[display(fmt="Tile {id} has no image")]
    #[from(ignore)]
    MissingImage { id: u32 },
    #[display(fmt="Tileset '{name}' uses a single atlas image, only image collections are supported")]
    #[from(ignore)]
    UnsupportedAtlas { name: String },
    #[display(fmt="Tile {id} not found")]
    #[from(ignore)]
    TileNotFound { id: u32 },
}

#[cfg(test)]
mod test {
    use crate::{AssetPath, TileDefinition, TileKind, Tileset, TilesetError};

    const TWO_TILES: &str =
r#"<tileset name="Test" tilewidth="64" tileheight="64" tilecount="2">
 <tile id="1">
  <image source="../Textures/Wall_Stone_0.bmp"/>
 </tile>
 <tile id="0" class="wall">
  <image width="32" height="32" source="../Textures/Floor_Clay_0.bmp"/>
 </tile>
</tileset>"#;

    #[test]
    fn lookup() {
        let tileset = Tileset::parse_str(TWO_TILES, None).unwrap();
        assert_eq!(2, tileset.len());
        assert_eq!(vec![0, 1], tileset.ids().collect::<Vec<_>>());

        let tile = tileset.get(1).unwrap();
        assert_eq!("../Textures/Wall_Stone_0.bmp", tile.image_path);
        assert_eq!((64, 64), (tile.width, tile.height));
        assert_eq!(TileKind::Wall, tile.kind);

        // Class wins over the file name.
        let tile = tileset.get(0).unwrap();
        assert_eq!((32, 32), (tile.width, tile.height));
        assert_eq!(TileKind::Wall, tile.kind);

        assert!(tileset.get(2).is_none());
        assert!(matches!(tileset.tile(2), Err(TilesetError::TileNotFound { id: 2 })));
        assert!(tileset.contains(1));
    }

    #[test]
    fn duplicate_ids() {
        let tiles = [
            TileDefinition::new(3, "a.bmp", 64, 64, TileKind::Floor),
            TileDefinition::new(3, "b.bmp", 64, 64, TileKind::Floor),
        ];
        let result = Tileset::new("Dupes", 64, 64, tiles);
        assert!(matches!(result, Err(TilesetError::DuplicateTileId { id: 3 })));
    }

    #[test]
    fn missing_image_and_atlas() {
        let no_image = Tileset::parse_str(r#"<tileset><tile id="0"/></tileset>"#, None);
        assert!(matches!(no_image, Err(TilesetError::MissingImage { id: 0 })));

        let atlas = Tileset::parse_str(r#"<tileset name="A"><image source="a.png"/></tileset>"#, None);
        assert!(matches!(atlas, Err(TilesetError::UnsupportedAtlas { .. })));
    }

    #[test]
    fn resolve_against_origin() {
        let origin = AssetPath::parse("Development_Resources/Scene.tsx", Some("file")).unwrap();
        let tileset = Tileset::parse_str(TWO_TILES, Some(origin)).unwrap();
        let tile = tileset.tile(1).unwrap();
        assert_eq!("Textures/Wall_Stone_0.bmp", tileset.resolve_image_path(tile));

        let unrooted = Tileset::parse_str(TWO_TILES, None).unwrap();
        assert_eq!("../Textures/Wall_Stone_0.bmp", unrooted.resolve_image_path(tile));
    }
}
