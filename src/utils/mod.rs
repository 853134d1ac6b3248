pub mod objectid;
pub mod render;
