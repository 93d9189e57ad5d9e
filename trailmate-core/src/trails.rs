//! Trail catalog and recommendations.
//!
//! The catalog is configuration data (TOML), never mutated after load.
//! Two lookups are offered:
//! - score bands: a literal table of trails per score threshold
//! - difficulty filter: the trekker's risk tier caps the trail difficulty

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::scoring::RiskTier;

const BUILTIN_CATALOG: &str = include_str!("../data/trails.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "high")]
    High,
}

impl Difficulty {
    /// Hardest difficulty allowed for a trekker in `tier`.
    pub fn ceiling_for(tier: RiskTier) -> Self {
        match tier {
            RiskTier::High => Difficulty::Low,
            RiskTier::Moderate => Difficulty::Moderate,
            RiskTier::Low => Difficulty::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Low => "Low",
            Difficulty::Moderate => "Moderate",
            Difficulty::High => "High",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub name: String,
    pub difficulty: Difficulty,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
}

/// Trails recommended for scores at or above `min_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min_score: u32,
    pub trails: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailCatalog {
    pub version: u32,
    pub trails: Vec<Trail>,
    pub bands: Vec<ScoreBand>,
}

impl TrailCatalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG).context("parse built-in trail catalog")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&s).with_context(|| format!("parse {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let catalog: TrailCatalog = toml::from_str(s)?;
        catalog.check()?;
        Ok(catalog)
    }

    fn check(&self) -> Result<()> {
        let mut names = HashSet::new();
        for t in &self.trails {
            if !names.insert(t.name.trim().to_ascii_lowercase()) {
                bail!("duplicate trail {:?}", t.name);
            }
        }

        if self.bands.is_empty() {
            bail!("catalog has no score bands");
        }
        for pair in self.bands.windows(2) {
            if pair[0].min_score <= pair[1].min_score {
                bail!(
                    "score bands must descend: {} then {}",
                    pair[0].min_score,
                    pair[1].min_score
                );
            }
        }
        if let Some(last) = self.bands.last() {
            if last.min_score != 0 {
                bail!("lowest score band must start at 0, got {}", last.min_score);
            }
        }

        for band in &self.bands {
            for name in &band.trails {
                if !names.contains(&name.trim().to_ascii_lowercase()) {
                    bail!("band {} lists unknown trail {:?}", band.min_score, name);
                }
            }
        }
        Ok(())
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn find(&self, name: &str) -> Option<&Trail> {
        self.trails.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }

    /// First band whose threshold `score` reaches.
    pub fn band_for(&self, score: u32) -> Option<&ScoreBand> {
        self.bands.iter().find(|b| score >= b.min_score)
    }

    /// Trails from the score band table, in table order.
    pub fn recommend_by_score(&self, score: u32) -> Vec<&Trail> {
        self.band_for(score)
            .map(|band| band.trails.iter().filter_map(|n| self.find(n)).collect())
            .unwrap_or_default()
    }

    /// Trails no harder than `tier` allows, in catalog order.
    pub fn recommend_for_tier(&self, tier: RiskTier) -> Vec<&Trail> {
        let ceiling = Difficulty::ceiling_for(tier);
        self.trails
            .iter()
            .filter(|t| t.difficulty <= ceiling)
            .collect()
    }
}
