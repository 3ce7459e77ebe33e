use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::level::{MAX_LEVEL_HEIGHT, MAX_LEVEL_WIDTH};
use crate::texture::DEFAULT_COLOR_KEY;
use crate::tileset::scene::SCENE_TILE_SIZE;
use crate::{AssetError, AssetPath, ValidationRules};

/// Settings shared by the tileset tools.
/// Missing keys fall back to the values the game ships with.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Game root, holding the "Textures", "Levels" and "Development_Resources" directories.
    pub game_dir: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub image_extension: String,
    /// RGB color made transparent on load. None keeps bitmaps opaque.
    pub color_key: Option<[u8; 3]>,
    pub max_level_width: usize,
    pub max_level_height: usize,
    pub require_contiguous_ids: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game_dir: String::from("."),
            tile_width: SCENE_TILE_SIZE,
            tile_height: SCENE_TILE_SIZE,
            image_extension: String::from("bmp"),
            color_key: Some(DEFAULT_COLOR_KEY),
            max_level_width: MAX_LEVEL_WIDTH,
            max_level_height: MAX_LEVEL_HEIGHT,
            require_contiguous_ids: true,
        }
    }
}

impl Config {

    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(source)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&source)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            image_extension: self.image_extension.clone(),
            require_contiguous_ids: self.require_contiguous_ids,
        }
    }

    /// Where the built-in Scene descriptor would be authored.
    /// Its "../Textures/" image paths resolve from here.
    pub fn scene_origin(&self) -> Result<AssetPath, AssetError> {
        let game_dir = self.game_root();
        AssetPath::parse(&format!("{game_dir}/Development_Resources/Scene.tsx"), Some("file"))
    }

    /// Path of the scene layer of a level.
    pub fn level_scene_path(&self, level_number: u32) -> String {
        let game_dir = self.game_root();
        format!("{game_dir}/Levels/{level_number}_Scene.csv")
    }

    /// Game directory without trailing slashes. Empty means the working directory.
    /// Left empty after trimming only for the filesystem root.
    fn game_root(&self) -> &str {
        if self.game_dir.is_empty() { "." } else { self.game_dir.trim_end_matches('/') }
    }
}
