pub mod atlas;
pub mod carto;
pub mod config;
pub mod engine;
pub mod error;
pub mod sampler;
pub mod scene;
pub mod sun;
pub mod units;
pub mod vars;

pub use engine::Engine;
pub use error::Error;
