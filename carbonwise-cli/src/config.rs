use anyhow::{Context, Result};
use carbonwise_advice::AdviceConfig;
use carbonwise_advice::client::{DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::state::{carbonwise_home, ensure_carbonwise_home};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub advice: AdviceSection,
    pub ingest: IngestSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceSection {
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Unset means wait for the endpoint as long as it takes.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSection {
    /// Drop PDF lines with an unparsable amount instead of failing the statement.
    pub skip_bad_amounts: bool,
}

impl Default for AdviceSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: None,
        }
    }
}

impl AdviceSection {
    pub fn to_advice_config(&self) -> AdviceConfig {
        AdviceConfig {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Where the config lives; nothing is created.
pub fn config_path() -> Result<PathBuf> {
    Ok(carbonwise_home()?.join(CONFIG_FILE))
}

/// The config file is optional: no home directory means defaults.
pub fn load_config() -> Result<Config> {
    load_config_in(carbonwise_home())
}

fn load_config_in(home: Result<PathBuf>) -> Result<Config> {
    match home {
        Ok(dir) => load_config_from(&dir.join(CONFIG_FILE)),
        Err(e) => {
            debug!("no config location ({e:#}); using defaults");
            Ok(Config::default())
        }
    }
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_carbonwise_home()?.join(CONFIG_FILE);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
