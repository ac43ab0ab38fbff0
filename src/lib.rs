pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod profiles;
pub mod utils;

pub use adapters::{storage::LocalStorage, xpath::XmlDocument};
pub use config::{CliConfig, RunSettings};
pub use core::{engine::ConversionEngine, feed::FeedGenerator, feed::FeedStats};
pub use profiles::{builtin::Source, QueryProfile};
pub use utils::error::{MensaError, Result};
