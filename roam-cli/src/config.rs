use anyhow::{Context, Result};
use roam_budget::BudgetThresholds;
use roam_ingest::EnvelopeRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_roam_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub budget: BudgetThresholds,
    /// Where trip collections are looked up inside response envelopes
    pub ingest: EnvelopeRules,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_roam_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
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

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    println!("# {}", config_path()?.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [budget]
            over_ratio = 1.25

            [log]
            filter = "roam_ingest=debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.budget.near_ratio, 0.9);
        assert_eq!(cfg.budget.over_ratio, 1.25);
        assert_eq!(cfg.ingest, EnvelopeRules::trips());
        assert_eq!(cfg.log.filter, "roam_ingest=debug");
    }

    #[test]
    fn test_empty_config_is_default() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_default_config_round_trips() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, Config::default());
        assert!(s.contains("container_keys"));
    }

    #[test]
    fn test_custom_envelope_keys() {
        let cfg: Config = toml::from_str(
            r#"
            [ingest]
            container_keys = ["packages"]
            domain_suffix = "_packages"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.ingest.container_keys, ["packages"]);
        assert_eq!(cfg.ingest.domain_suffix, "_packages");
    }
}
