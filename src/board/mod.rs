pub mod geometry;
pub mod state;

pub use geometry::{COLS, ROWS};
pub use state::BoardState;
