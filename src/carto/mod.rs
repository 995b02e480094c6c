pub mod colour;
pub mod datum;
pub mod projection;
pub mod render;
