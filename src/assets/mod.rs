pub mod color;
pub mod dotted_map;
pub mod land;
