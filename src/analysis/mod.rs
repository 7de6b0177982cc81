pub mod saturation;
pub mod summary;
