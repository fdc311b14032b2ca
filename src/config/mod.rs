pub mod cli;
pub mod toml_config;

pub use cli::{Cli, Command, LocalStorage};
pub use toml_config::{LogFormat, TomlConfig};
