mod asset;
mod config;
pub mod level;
pub mod texture;
pub mod tileset;
mod util;

pub use asset::*;
pub use config::*;
pub use tileset::*;
pub use util::*;
