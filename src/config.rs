pub mod keybindings;
pub mod styles;

use std::path::PathBuf;

use color_eyre::eyre::Result;
use config::ConfigError;
use serde::Deserialize;

use crate::utils;

pub use keybindings::KeyBindings;
pub use styles::Styles;

const CONFIG: &str = include_str!("../.config/config.json5");

/// Batch size used when the config file does not set one.
pub const DEFAULT_BATCH_SIZE: usize = 10;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub styles: Styles,
    /// Owner key of the program space whose games are listed.
    #[serde(default)]
    pub authority: String,
    /// Ledger indexer endpoint.
    #[serde(default)]
    pub rpc_url: String,
    #[serde(default)]
    pub batch_size: usize,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        let default_config: Config = json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))?;
        let data_dir = utils::get_data_dir();
        let config_dir = utils::get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_str().unwrap_or_default())?
            .set_default("_config_dir", config_dir.to_str().unwrap_or_default())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::error!("No configuration file found");
            return Err(ConfigError::Message(String::from(
                "No configuration file found",
            )));
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        for (mode, default_bindings) in default_config.keybindings.iter() {
            let user_bindings = cfg.keybindings.entry(*mode).or_default();
            for (key, cmd) in default_bindings.iter() {
                user_bindings
                    .entry(key.clone())
                    .or_insert_with(|| cmd.clone());
            }
        }
        for (mode, default_styles) in default_config.styles.iter() {
            let user_styles = cfg.styles.entry(*mode).or_default();
            for (style_key, style) in default_styles.iter() {
                user_styles
                    .entry(style_key.clone())
                    .or_insert_with(|| *style);
            }
        }

        if cfg.authority.is_empty() {
            return Err(ConfigError::NotFound(String::from("authority")));
        }

        if cfg.rpc_url.is_empty() {
            cfg.rpc_url = default_config.rpc_url.clone();
        }

        if cfg.batch_size == 0 {
            cfg.batch_size = DEFAULT_BATCH_SIZE;
        }

        Ok(cfg)
    }

    /// A config for offline use: sample authority, embedded defaults for
    /// everything else, no config file required.
    pub fn offline() -> Result<Self, ConfigError> {
        let mut cfg: Config = json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))?;
        cfg.authority =
            String::from("0ff1ce0ff1ce0ff1ce0ff1ce0ff1ce0ff1ce0ff1ce0ff1ce0ff1ce0ff1ce0ff1");
        if cfg.batch_size == 0 {
            cfg.batch_size = DEFAULT_BATCH_SIZE;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::action::Action;
    use crate::mode::Mode;

    #[test]
    fn test_embedded_defaults_parse() {
        let cfg: Config = json5::from_str(CONFIG).expect("default config must parse");
        assert!(!cfg.rpc_url.is_empty());
        assert_eq!(cfg.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(
            cfg.keybindings
                .get(&Mode::Home)
                .expect("Home bindings")
                .get(&vec![KeyEvent::new(
                    KeyCode::Char('q'),
                    KeyModifiers::empty()
                )]),
            Some(&Action::Quit)
        );
    }

    #[test]
    fn test_offline_config_has_authority() {
        let cfg = Config::offline().expect("offline config");
        assert!(!cfg.authority.is_empty());
    }
}
