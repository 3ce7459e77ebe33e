use std::path::Path;

/// A single tile of an image collection tileset.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct TileDefinition {
    /// ID of tile local to its tileset
    pub id: u32,
    /// Path to the bitmap, relative to the descriptor the tile was authored in.
    pub image_path: String,
    pub width: u32,
    pub height: u32,
    pub kind: TileKind,
}

impl TileDefinition {
    pub fn new(id: u32, image_path: impl Into<String>, width: u32, height: u32, kind: TileKind) -> Self {
        Self {
            id,
            image_path: image_path.into(),
            width,
            height,
            kind,
        }
    }

    /// File name of the bitmap without directories or extension.
    pub fn image_stem(&self) -> Option<&str> {
        Path::new(&self.image_path).file_stem()?.to_str()
    }
}

/// How a tile behaves once placed in a level.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Hash)]
pub enum TileKind {
    /// Walkable ground.
    #[default]
    Floor,
    /// Blocks movement and bullets.
    Wall,
}

impl TileKind {

    /// Maps a tile class to its kind.
    /// Unknown classes yield None.
    pub fn from_class(class: &str) -> Option<Self> {
        match class.to_ascii_lowercase().as_str() {
            "floor" => Some(Self::Floor),
            "wall" => Some(Self::Wall),
            _ => None,
        }
    }

    /// Infers the kind of a tile with no usable class from its bitmap name.
    /// Wall textures are named "Wall_<material>_<n>".
    pub fn from_image_path(image_path: &str) -> Self {
        let stem = Path::new(image_path)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        if stem.starts_with("Wall_") { Self::Wall } else { Self::Floor }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Wall => "wall",
        }
    }

    pub fn collides(self) -> bool {
        self == Self::Wall
    }
}
