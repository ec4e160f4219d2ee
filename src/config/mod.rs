pub mod settings;

pub use settings::{AppConfig, ProxySettings, ServerSettings, StatsSettings};
