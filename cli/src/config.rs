use std::{
    fs, io,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{self, WrapErr};
use cube_core::DEFAULT_SCRAMBLE_LENGTH;
use log::debug;
use serde::Deserialize;

/// Settings read from `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Moves per scramble when `--moves` is not given
    pub scramble_length: usize,
    /// Where the cube is saved between runs
    pub state_file: Option<PathBuf>,
    /// Written into newly created saves
    pub owner: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
            state_file: None,
            owner: None,
        }
    }
}

impl Config {
    /// Load the config from `path`, or from the default location if `path` is `None`. A missing
    /// file at the default location gives the defaults; a missing file that was asked for is an
    /// error.
    pub fn load(path: Option<&Path>) -> eyre::Result<Config> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Config::default()),
            },
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(err) => {
                return Err(err)
                    .wrap_err_with(|| format!("Could not read config {}", path.display()));
            }
        };

        Config::from_toml_str(&text).wrap_err_with(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(text)
    }

    /// The state file from the config, falling back to the user's data directory
    pub fn state_path(&self) -> Option<PathBuf> {
        self.state_file
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("cubist").join("state.json")))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cubist").join("config.toml"))
}
