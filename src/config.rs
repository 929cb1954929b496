use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub env_vars: HashMap<String, String>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "> ".to_string(),
            env_vars: HashMap::new(),
        }
    }

    /// `$LSH_CONFIG` if set, otherwise `$HOME/.lshrc`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os("LSH_CONFIG") {
            return Some(PathBuf::from(path));
        }
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".lshrc"))
    }

    /// Loads the config at [`ConfigLoader::default_path`]. A missing file is
    /// not an error.
    pub fn load_default() -> Result<Config, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(path),
            _ => Ok(Self::default_config()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = std::fs::read_to_string(path)?;
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!("line {}: no '=' found: {}", lineno + 1, line)));
            };

            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                k if k.starts_with("env.") => {
                    let var = &k["env.".len()..];
                    if var.is_empty() {
                        return Err(ConfigError::Parse(format!("line {}: empty variable name", lineno + 1)));
                    }
                    config.env_vars.insert(var.to_string(), value.to_string());
                }
                k => return Err(ConfigError::Parse(format!("line {}: unknown key: {}", lineno + 1, k))),
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config: {0}")]
    Io(#[from] io::Error),
    #[error("config: {0}")]
    Parse(String),
}
