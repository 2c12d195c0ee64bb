pub mod actor;
pub mod geometry;
pub mod hero;
pub mod shot;
pub mod sprite;
pub mod tile;
