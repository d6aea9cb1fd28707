pub mod check;
pub mod preset;
pub mod render;
