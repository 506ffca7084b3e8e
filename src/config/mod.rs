mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CarouselConfig, Config, CountdownConfig, StateConfig, UiConfig};
