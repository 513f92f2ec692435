//! Session-scoped disambiguation choices.
//!
//! A key is initialised at most once and afterwards only changes through an
//! explicit `save`. Per-dataset overrides shadow the session value for that
//! dataset only.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SymbolError;
use crate::symbols::corrections::{AmbiguousFamily, FamilyChoice};
use crate::symbols::numeric_date::{DateFormat, Granularity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKey {
    FirstMar01,
    FirstMar02,
    DateFormat,
    Granularity,
}

impl DecisionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstMar01 => "first_mar01",
            Self::FirstMar02 => "first_mar02",
            Self::DateFormat => "date_format",
            Self::Granularity => "granularity",
        }
    }

    pub fn for_family(family: AmbiguousFamily) -> Self {
        match family {
            AmbiguousFamily::Mar01 => Self::FirstMar01,
            AmbiguousFamily::Mar02 => Self::FirstMar02,
        }
    }

    /// Command-line flag that supplies this decision.
    pub fn flag(self) -> &'static str {
        match self {
            Self::FirstMar01 => "--first-mar01",
            Self::FirstMar02 => "--first-mar02",
            Self::DateFormat => "--date-format",
            Self::Granularity => "--granularity",
        }
    }

    /// Checks that `value` is acceptable for this key and returns its canonical spelling.
    pub fn canonical_value(self, value: &str) -> Result<String, SymbolError> {
        match self {
            Self::FirstMar01 | Self::FirstMar02 => {
                let choice = FamilyChoice::from_str(value)?;
                let family = match self {
                    Self::FirstMar01 => AmbiguousFamily::Mar01,
                    _ => AmbiguousFamily::Mar02,
                };
                if choice.family() != family {
                    return Err(SymbolError::InvalidChoice {
                        key: self.as_str().to_string(),
                        value: value.to_string(),
                        expected: family
                            .options()
                            .iter()
                            .map(|c| c.symbol())
                            .collect::<Vec<_>>()
                            .join(", "),
                    });
                }
                Ok(choice.symbol().to_string())
            }
            Self::DateFormat => Ok(DateFormat::from_str(value)?.as_str().to_string()),
            Self::Granularity => Ok(Granularity::from_str(value)?.as_str().to_string()),
        }
    }
}

impl fmt::Display for DecisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionKey {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first_mar01" => Ok(Self::FirstMar01),
            "first_mar02" => Ok(Self::FirstMar02),
            "date_format" => Ok(Self::DateFormat),
            "granularity" => Ok(Self::Granularity),
            _ => Err(SymbolError::UnknownDecisionKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    values: BTreeMap<DecisionKey, String>,
    #[serde(default)]
    overrides: BTreeMap<String, BTreeMap<DecisionKey, String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` only if it has never been set. Returns whether it was set.
    pub fn initialise(&mut self, key: DecisionKey, value: &str) -> Result<bool, SymbolError> {
        if self.values.contains_key(&key) {
            return Ok(false);
        }
        let value = key.canonical_value(value)?;
        self.values.insert(key, value);
        Ok(true)
    }

    /// Explicit user choice; overwrites any previous value.
    pub fn save(&mut self, key: DecisionKey, value: &str) -> Result<(), SymbolError> {
        let value = key.canonical_value(value)?;
        self.values.insert(key, value);
        Ok(())
    }

    pub fn save_for(&mut self, dataset: &str, key: DecisionKey, value: &str) -> Result<(), SymbolError> {
        let value = key.canonical_value(value)?;
        self.overrides
            .entry(dataset.to_string())
            .or_default()
            .insert(key, value);
        Ok(())
    }

    /// Built-in defaults, applied without touching existing keys.
    pub fn initialise_defaults(&mut self) {
        let defaults = [
            (DecisionKey::FirstMar01, "MTARC1"),
            (DecisionKey::FirstMar02, "MTARC2"),
            (DecisionKey::DateFormat, "yyyy-dd-mm"),
            (DecisionKey::Granularity, "month-day"),
        ];
        for (key, value) in defaults {
            // Defaults are valid by construction.
            let _ = self.initialise(key, value);
        }
    }

    pub fn get(&self, dataset: &str, key: DecisionKey) -> Option<&str> {
        self.overrides
            .get(dataset)
            .and_then(|o| o.get(&key))
            .or_else(|| self.values.get(&key))
            .map(|s| s.as_str())
    }

    pub fn family_choice(&self, dataset: &str, family: AmbiguousFamily) -> Result<Option<FamilyChoice>, SymbolError> {
        self.get(dataset, DecisionKey::for_family(family))
            .map(FamilyChoice::from_str)
            .transpose()
    }

    pub fn date_format(&self, dataset: &str) -> Result<Option<DateFormat>, SymbolError> {
        self.get(dataset, DecisionKey::DateFormat)
            .map(DateFormat::from_str)
            .transpose()
    }

    pub fn granularity(&self, dataset: &str) -> Result<Option<Granularity>, SymbolError> {
        self.get(dataset, DecisionKey::Granularity)
            .map(Granularity::from_str)
            .transpose()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        let session: Session = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse session {}", path.display()))?;
        for (key, value) in session
            .values
            .iter()
            .chain(session.overrides.values().flat_map(|o| o.iter()))
        {
            key.canonical_value(value)
                .with_context(|| format!("invalid session entry in {}", path.display()))?;
        }
        Ok(session)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Parses a `DATASET:KEY=VALUE` per-dataset decision.
pub fn parse_choice(spec: &str) -> Result<(String, DecisionKey, String), SymbolError> {
    let malformed = || SymbolError::InvalidChoice {
        key: "choice".to_string(),
        value: spec.to_string(),
        expected: "DATASET:KEY=VALUE".to_string(),
    };
    let (dataset, rest) = spec.split_once(':').ok_or_else(malformed)?;
    let (key, value) = rest.split_once('=').ok_or_else(malformed)?;
    if dataset.trim().is_empty() || value.trim().is_empty() {
        return Err(malformed());
    }
    let key = DecisionKey::from_str(key)?;
    Ok((dataset.trim().to_string(), key, value.trim().to_string()))
}
