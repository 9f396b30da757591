//! Configuration module

mod error;
mod relay;
mod site;

pub use error::ConfigError;
pub use relay::{FormFields, RelayConfig, DEFAULT_RELAY_TIMEOUT};
pub use site::HighlightConfig;
pub use site::LinksConfig;
pub use site::SiteConfig;
