use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use trailmate_core::{DEFAULT_PHONE_PATTERN, PenaltyTable, Scorer, TrailCatalog, Validator};

use crate::state::ensure_trailmate_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: PenaltyTable,
    pub validation: ValidationSection,
    pub catalog: CatalogSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSection {
    /// Regex the emergency phone number must match.
    pub phone_pattern: String,
}

impl Default for ValidationSection {
    fn default() -> Self {
        Self {
            phone_pattern: DEFAULT_PHONE_PATTERN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Trail catalog TOML; the built-in catalog is used when unset.
    pub path: Option<String>,
}

impl Config {
    pub fn scorer(&self) -> Scorer {
        Scorer::new(self.scoring.clone())
    }

    pub fn validator(&self) -> Result<Validator> {
        Validator::new(&self.validation.phone_pattern).context("validation.phone_pattern")
    }

    pub fn catalog(&self) -> Result<TrailCatalog> {
        match &self.catalog.path {
            Some(p) => TrailCatalog::load(p),
            None => TrailCatalog::builtin(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_trailmate_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[scoring]
medical_condition = 25

[validation]
phone_pattern = '^0\d{9}$'
"#,
        )
        .unwrap();
        assert_eq!(cfg.scoring.medical_condition, 25);
        assert_eq!(cfg.scoring.no_backup_plan, 10);
        assert_eq!(cfg.catalog.path, None);
        assert!(cfg.validator().unwrap().is_valid_phone("0712345678"));
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.scoring, PenaltyTable::default());
        assert_eq!(back.validation.phone_pattern, DEFAULT_PHONE_PATTERN);
    }

    #[test]
    fn test_bad_pattern_is_an_error() {
        let cfg = Config {
            validation: ValidationSection {
                phone_pattern: "([".to_string(),
            },
            ..Config::default()
        };
        assert!(cfg.validator().is_err());
    }

    #[test]
    fn test_load_config_from_trailmate_home() {
        let home = std::env::temp_dir().join(format!("trailmate-home-{}", std::process::id()));
        // SAFETY: the only test in this crate that reads or writes TRAILMATE_HOME.
        unsafe { std::env::set_var("TRAILMATE_HOME", &home) };

        assert_eq!(config_path().unwrap(), home.join("config.toml"));
        assert_eq!(load_config().unwrap().scoring, PenaltyTable::default());

        init_config().unwrap();
        assert!(home.join("config.toml").exists());

        fs::write(
            home.join("config.toml"),
            "[scoring]\nunder_packed = 30\n\n[catalog]\npath = \"trails.toml\"\n",
        )
        .unwrap();
        let cfg = load_config().unwrap();
        assert_eq!(cfg.scoring.under_packed, 30);
        assert_eq!(cfg.catalog.path.as_deref(), Some("trails.toml"));
        assert_eq!(cfg.validation.phone_pattern, DEFAULT_PHONE_PATTERN);

        unsafe { std::env::remove_var("TRAILMATE_HOME") };
        fs::remove_dir_all(&home).ok();
    }
}
