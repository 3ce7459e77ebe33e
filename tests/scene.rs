use scene_tileset::level::SceneLayer;
use scene_tileset::tileset::scene::{load_scene_descriptor, scene_tileset, SCENE_TSX};
use scene_tileset::{AssetSource, Config, FileProtocol, TileKind, TsxLoader, ValidationRules};

#[test]
fn load_descriptor_from_disk() {
    let mut source = AssetSource::new();
    source.add_protocol(FileProtocol, true);
    let tileset = source.load(&TsxLoader, "assets/Scene.tsx").unwrap();

    assert_eq!("Scene", tileset.name);
    assert_eq!(24, tileset.len());
    assert_eq!((0..24).collect::<Vec<u32>>(), tileset.ids().collect::<Vec<_>>());
    assert_eq!(Ok(()), tileset.validate(&ValidationRules::default()));

    let exit = tileset.tile(8).unwrap();
    assert_eq!("../Textures/Floor_Level_Exit.bmp", exit.image_path);
    assert_eq!((64, 64), (exit.width, exit.height));
    assert_eq!("Textures/Floor_Level_Exit.bmp", tileset.resolve_image_path(exit));
}

#[test]
fn built_in_table_agrees_with_descriptor() {
    let config = Config::default();
    let loaded = load_scene_descriptor(&config.scene_origin().unwrap()).unwrap();
    let built_in = scene_tileset();

    assert_eq!(built_in.tiles(), loaded.tiles());
    assert_eq!("Textures/Wall_Bricks_1.bmp", loaded.resolve_image_path(loaded.tile(23).unwrap()));
    assert_eq!(SCENE_TSX, loaded.to_tsx());
    assert!(loaded.get(24).is_none());
}

#[test]
fn paint_a_room() {
    let tileset = scene_tileset();
    let room = "\
22,22,22,22
22,13,8,22
22,22,22,22
";
    let layer = SceneLayer::parse(room, &tileset).unwrap();
    assert_eq!((4, 3), (layer.width, layer.height));
    assert!(layer.is_wall(0, 0));
    assert!(!layer.is_wall(2, 1));
    assert_eq!(TileKind::Floor, tileset.tile(layer.block(2, 1).unwrap().tile_id).unwrap().kind);
}
