use derive_more::*;
use image::RgbaImage;
use rayon::prelude::*;
use tracing::instrument;
use crate::{HashMap, TileDefinition, Tileset};

/// Color made fully transparent when textures are loaded.
pub const DEFAULT_COLOR_KEY: [u8; 3] = [0x00, 0xFF, 0x00];

/// Problem found when checking a tile's bitmap against its descriptor entry.
#[derive(Clone, Eq, PartialEq, Display, Debug)]
pub enum ImageIssue {
    #[display(fmt="Tile {id}: could not read '{path}' ({reason})")]
    Unreadable { id: u32, path: String, reason: String },
    #[display(fmt="Tile {id}: '{path}' is {actual_width}x{actual_height}, expected {width}x{height}")]
    DimensionMismatch { id: u32, path: String, width: u32, height: u32, actual_width: u32, actual_height: u32 },
}

/// Checks that every bitmap exists and has the dimensions its tile declares.
/// Only image headers are read.
#[instrument(skip_all, fields(tileset = %tileset.name))]
pub fn verify_images(tileset: &Tileset) -> Vec<ImageIssue> {
    let issues: Vec<ImageIssue> = tileset
        .tiles()
        .par_iter()
        .filter_map(|tile| {
            let path = tileset.resolve_image_path(tile);
            match image::image_dimensions(&path) {
                Ok((actual_width, actual_height)) => {
                    if (actual_width, actual_height) == (tile.width, tile.height) { return None }
                    Some(ImageIssue::DimensionMismatch {
                        id: tile.id,
                        path,
                        width: tile.width,
                        height: tile.height,
                        actual_width,
                        actual_height,
                    })
                },
                Err(err) => Some(ImageIssue::Unreadable { id: tile.id, path, reason: err.to_string() }),
            }
        })
        .collect();
    for issue in &issues {
        log::warn!("{issue}");
    }
    issues
}

/// Decoded bitmaps of a tileset, keyed by tile id.
#[derive(Default, Debug)]
pub struct TileTextures {
    textures: HashMap<u32, RgbaImage>,
}

impl TileTextures {

    /// Decodes every bitmap of the tileset in parallel.
    /// Pixels matching the color key become transparent.
    #[instrument(skip_all, fields(tileset = %tileset.name))]
    pub fn load(tileset: &Tileset, color_key: Option<[u8; 3]>) -> Result<Self, TextureError> {
        let textures = tileset
            .tiles()
            .par_iter()
            .map(|tile| load_texture(tileset, tile, color_key).map(|texture| (tile.id, texture)))
            .collect::<Result<HashMap<u32, RgbaImage>, TextureError>>()?;
        log::debug!("Loaded {} textures for tileset '{}'", textures.len(), tileset.name);
        Ok(Self { textures })
    }

    pub fn get(&self, id: u32) -> Option<&RgbaImage> {
        self.textures.get(&id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn load_texture(tileset: &Tileset, tile: &TileDefinition, color_key: Option<[u8; 3]>) -> Result<RgbaImage, TextureError> {
    let path = tileset.resolve_image_path(tile);
    let mut texture = match image::open(&path) {
        Ok(image) => image.to_rgba8(),
        Err(source) => return Err(TextureError::ImageError { id: tile.id, path, source }),
    };
    if texture.dimensions() != (tile.width, tile.height) {
        let (actual_width, actual_height) = texture.dimensions();
        return Err(TextureError::DimensionMismatch { id: tile.id, path, actual_width, actual_height });
    }
    if let Some(color_key) = color_key {
        apply_color_key(&mut texture, color_key);
    }
    Ok(texture)
}

/// Makes every pixel of the given color fully transparent.
pub fn apply_color_key(texture: &mut RgbaImage, color_key: [u8; 3]) {
    for pixel in texture.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if [r, g, b] == color_key {
            pixel.0[3] = 0;
        }
    }
}

#[derive(Error, Display, Debug)]
pub enum TextureError {
    #[display(fmt="Failed to load texture of tile {id} from '{path}': {source}")]
    ImageError { id: u32, path: String, source: image::ImageError },
    #[display(fmt="Texture of tile {id} at '{path}' is {actual_width}x{actual_height}")]
    DimensionMismatch { id: u32, path: String, actual_width: u32, actual_height: u32 },
}
