pub mod feed;
pub mod geometry;
pub mod landmarks;
pub mod mapping;
