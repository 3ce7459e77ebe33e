use anyhow::{bail, Context};
use scene_tileset::level::SceneLayer;
use scene_tileset::tileset::scene::load_scene_descriptor;
use scene_tileset::texture::{verify_images, TileTextures};
use scene_tileset::{AssetSource, Config, FileProtocol, Tileset, TsxLoader};

const USAGE: &str = "usage: scene_tileset [TSX] [--config FILE] [--verify-images] [--load-textures] [--level CSV]";

#[derive(Default)]
struct Args {
    tsx: Option<String>,
    config: Option<String>,
    verify_images: bool,
    load_textures: bool,
    level: Option<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(args.next().context(USAGE)?),
                "--level" => parsed.level = Some(args.next().context(USAGE)?),
                "--verify-images" => parsed.verify_images = true,
                "--load-textures" => parsed.load_textures = true,
                "-h" | "--help" => bail!(USAGE),
                flag if flag.starts_with("--") => bail!("unknown flag '{flag}'\n{USAGE}"),
                _ if parsed.tsx.is_none() => parsed.tsx = Some(arg),
                _ => bail!(USAGE),
            }
        }
        Ok(parsed)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    #[cfg(feature = "profile")]
    let _chrome_guard = {
        use tracing_subscriber::prelude::*;
        let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new().build();
        tracing_subscriber::registry().with(chrome_layer).init();
        guard
    };

    let args = Args::parse(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("Failed to read config '{path}'"))?,
        None => Config::default(),
    };

    // Loads tileset
    let tileset = match &args.tsx {
        Some(path) => {
            let mut source = AssetSource::new();
            source.add_protocol(FileProtocol, true);
            source.load(&TsxLoader, path)?
        },
        None => load_scene_descriptor(&config.scene_origin()?)?,
    };
    print_tileset(&tileset);

    // Checks descriptor, then bitmaps
    let mut failed = false;
    if let Err(errors) = tileset.validate(&config.validation_rules()) {
        log::error!("{errors}");
        failed = true;
    }
    if args.verify_images {
        let issues = verify_images(&tileset);
        if issues.is_empty() {
            println!("All {} bitmaps match their tiles", tileset.len());
        }
        else {
            log::error!("{} bitmap(s) do not match their tiles", issues.len());
            failed = true;
        }
    }
    if args.load_textures {
        let textures = TileTextures::load(&tileset, config.color_key)?;
        println!("Loaded {} textures", textures.len());
    }

    // Checks a level painted with the tileset
    if let Some(level_path) = &args.level {
        let csv = std::fs::read_to_string(level_path)
            .with_context(|| format!("Could not open '{level_path}'"))?;
        match SceneLayer::parse_bounded(&csv, &tileset, config.max_level_width, config.max_level_height) {
            Ok(layer) => {
                let walls = layer.blocks().iter().filter(|block| !block.content.is_empty()).count();
                println!("Level {level_path}: {}x{} blocks, {walls} walls", layer.width, layer.height);
            },
            Err(err) => {
                log::error!("{level_path}: {err}");
                failed = true;
            },
        }
    }

    if failed {
        bail!("Tileset '{}' has problems, see log above", tileset.name);
    }
    Ok(())
}

fn print_tileset(tileset: &Tileset) {
    println!("Tileset '{}' ({}x{}, {} tiles)", tileset.name, tileset.tile_width, tileset.tile_height, tileset.len());
    for tile in tileset {
        println!(
            "{:>4}  {:<5}  {}x{}  {}",
            tile.id,
            tile.kind.name(),
            tile.width,
            tile.height,
            tile.image_path,
        );
    }
}
