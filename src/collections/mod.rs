pub mod tileset;

pub use tileset::TileSet;
