use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use polarize_core::PlayerLevel;

use crate::state::ensure_polarize_home;

pub const TOKEN_ENV: &str = "POLARIZE_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSection,
    pub currency: CurrencySection,
    pub level: LevelSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    /// Bearer token for the tracker; `POLARIZE_TOKEN` takes precedence
    pub token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySection {
    pub rates_url: String,
    /// Fetch live rates; when false only the built-in table is used
    pub live: bool,
}

/// Level used when the tracker cannot be asked
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSection {
    pub level: String,
    pub normal_limit: f64,
    pub phase_limit: f64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: "https://tracker.polarize.gg/api/v1".to_string(),
            token: None,
            timeout_secs: 10,
        }
    }
}

impl Default for CurrencySection {
    fn default() -> Self {
        Self {
            rates_url: "https://open.er-api.com/v6/latest/USD".to_string(),
            live: true,
        }
    }
}

impl Default for LevelSection {
    fn default() -> Self {
        let fallback = PlayerLevel::fallback();
        Self {
            level: fallback.level,
            normal_limit: fallback.normal_limit,
            phase_limit: fallback.phase_limit,
        }
    }
}

impl LevelSection {
    pub fn to_player_level(&self) -> PlayerLevel {
        PlayerLevel::new(self.level.clone(), self.normal_limit, self.phase_limit)
    }
}

impl Config {
    /// Token from the environment first, then the config file
    pub fn token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.api.token.clone())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_polarize_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
