pub mod parse;
pub mod scene;
mod tile;
mod tileset;
mod validate;
mod write;

pub use tile::*;
pub use tileset::*;
pub use validate::*;
