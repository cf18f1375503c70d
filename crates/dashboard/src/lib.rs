pub mod client;
pub mod format;
pub mod normalize;
pub mod refresh;
pub mod render;
