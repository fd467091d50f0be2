//! Configuration loading and providers

pub mod loader;
pub mod settings_provider;

pub use loader::{load as load_config, load_from_env, load_from_file};
pub use settings_provider::ConfigSettingsProvider;
