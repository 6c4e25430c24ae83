pub mod canvas;
pub mod color;
pub mod config;
pub mod grid;
pub mod render;
pub mod term;

/// Signed cell coordinate. Any value is valid, lookups wrap around the grid.
pub type CellOffset = i64;

/// Size of a surface, in device pixels.
pub type PixelSize = u32;
