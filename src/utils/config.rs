use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "verbump.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BumpSection {
    /// Increment token used when `--type` is not given.
    #[serde(rename = "type")]
    pub kind: String,
    pub backup: bool,
    pub verbose: bool,
}

impl Default for BumpSection {
    fn default() -> Self {
        BumpSection {
            kind: "patch".to_string(),
            backup: true,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSection {
    /// Extra directory names skipped while searching for `__init__.py`.
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub bump: BumpSection,
    pub search: SearchSection,
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Loads an explicit config file, or the nearest `verbump.toml` above `cwd`.
    ///
    /// ### Parameters
    /// - `explicit`: Path given with `--config`; must exist when set.
    /// - `cwd`: Directory the upward search starts from.
    ///
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Config, String> {
        let path = match explicit {
            Some(p) => {
                if !p.is_file() {
                    return Err(format!("Config file not found at '{}'", p.display()));
                }
                p.to_path_buf()
            }
            None => match find_config_from(cwd) {
                Some(p) => p,
                None => return Ok(Config::default()),
            },
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let mut config = Config::from_toml(&content)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
        config.source = Some(path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Config, String> {
        toml::from_str::<Config>(content).map_err(|e| e.to_string())
    }
}

/// Walks upward from `start` to the first directory holding a `verbump.toml`.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}
