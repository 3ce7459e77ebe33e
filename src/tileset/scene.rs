//! The "Scene" tileset every level is painted with.
use crate::{AssetPath, AssetSource, EmbeddedProtocol, TileDefinition, TileKind, Tileset, TsxLoader};

/// Width and height in pixels of every scene tile.
pub const SCENE_TILE_SIZE: u32 = 64;

/// Ids below this are floors, the rest are walls.
pub const SCENE_FIRST_WALL_ID: u32 = 17;

/// The descriptor as authored in the map editor.
pub const SCENE_TSX: &str = include_str!("../../assets/Scene.tsx");

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SceneTile {
    pub id: u32,
    pub source: &'static str,
}

impl SceneTile {
    pub fn kind(&self) -> TileKind {
        if self.id < SCENE_FIRST_WALL_ID { TileKind::Floor } else { TileKind::Wall }
    }
}

pub static SCENE_TILES: [SceneTile; 24] = [
    SceneTile { id: 0, source: "../Textures/Floor_Clay_0.bmp" },
    SceneTile { id: 1, source: "../Textures/Floor_Dirt_0.bmp" },
    SceneTile { id: 2, source: "../Textures/Floor_Dirt_1.bmp" },
    SceneTile { id: 3, source: "../Textures/Floor_Grass_0.bmp" },
    SceneTile { id: 4, source: "../Textures/Floor_Grass_1.bmp" },
    SceneTile { id: 5, source: "../Textures/Floor_Gravel_0.bmp" },
    SceneTile { id: 6, source: "../Textures/Floor_Gravel_1.bmp" },
    SceneTile { id: 7, source: "../Textures/Floor_Metal_Grid_0.bmp" },
    SceneTile { id: 8, source: "../Textures/Floor_Level_Exit.bmp" },
    SceneTile { id: 9, source: "../Textures/Floor_Metal_Plate_0.bmp" },
    SceneTile { id: 10, source: "../Textures/Floor_Metal_Plate_1.bmp" },
    SceneTile { id: 11, source: "../Textures/Floor_Sand_0.bmp" },
    SceneTile { id: 12, source: "../Textures/Floor_Snow_0.bmp" },
    SceneTile { id: 13, source: "../Textures/Floor_Stone_0.bmp" },
    SceneTile { id: 14, source: "../Textures/Floor_Stone_1.bmp" },
    SceneTile { id: 15, source: "../Textures/Floor_Stone_2.bmp" },
    SceneTile { id: 16, source: "../Textures/Floor_Stone_3.bmp" },
    SceneTile { id: 17, source: "../Textures/Wall_Stone_0.bmp" },
    SceneTile { id: 18, source: "../Textures/Wall_Stone_1.bmp" },
    SceneTile { id: 19, source: "../Textures/Wall_Stone_2.bmp" },
    SceneTile { id: 20, source: "../Textures/Wall_Stone_3.bmp" },
    SceneTile { id: 21, source: "../Textures/Wall_Stone_4.bmp" },
    SceneTile { id: 22, source: "../Textures/Wall_Bricks_0.bmp" },
    SceneTile { id: 23, source: "../Textures/Wall_Bricks_1.bmp" },
];

/// Builds the scene registry from [`SCENE_TILES`].
pub fn scene_tileset() -> Tileset {
    let tiles = SCENE_TILES
        .iter()
        .map(|tile| TileDefinition::new(tile.id, tile.source, SCENE_TILE_SIZE, SCENE_TILE_SIZE, tile.kind()))
        .collect();
    Tileset::from_sorted(String::from("Scene"), SCENE_TILE_SIZE, SCENE_TILE_SIZE, Some(SCENE_TILES.len() as u32), tiles)
}

/// Loads [`SCENE_TSX`] as if it had been read from `origin`.
/// Image paths of the result resolve against that location.
pub fn load_scene_descriptor(origin: &AssetPath) -> anyhow::Result<Tileset> {
    let location = origin.without_protocol();
    let mut source = AssetSource::new();
    source.add_protocol(EmbeddedProtocol::new().with(location.clone(), SCENE_TSX), true);
    source.load(&TsxLoader, &location)
}
