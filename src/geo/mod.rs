pub mod path;
pub mod projection;
