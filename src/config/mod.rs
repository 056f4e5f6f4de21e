//! Configuration module.
//!
//! Defaults, TOML file, environment and CLI flags are merged into a
//! [`ResolvedConfig`], which is then projected into the explicit settings
//! value each component takes at construction.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_log_path, load_config_with_precedence,
    merge_config, ConfigError, ConfigFile, ResolvedConfig,
};
