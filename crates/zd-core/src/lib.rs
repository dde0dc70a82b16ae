pub mod error;
pub mod model;
pub mod palette;

pub use error::ConfigError;
pub use model::*;
