//! Header rename mappings.
//!
//! A [`ColumnMapping`] substitutes replacement names for header columns,
//! preserving position and passing unmapped names through unchanged. It can
//! be loaded from a JSON file (`{"old": "new"}`) or built from repeatable
//! `--map old=new` arguments.

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ColumnMapping {
    renames: BTreeMap<String, String>,
}

impl ColumnMapping {
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening mapping file {path:?}"))?;
        let reader = BufReader::new(file);
        let mapping = serde_json::from_reader(reader).context("Parsing mapping JSON")?;
        Ok(mapping)
    }

    /// Builds a mapping from `old=new` pairs, rejecting malformed entries
    /// and duplicate source names.
    pub fn from_pairs(pairs: &[String]) -> Result<Self> {
        let mut mapping = ColumnMapping::default();
        for pair in pairs {
            let Some((from, to)) = pair.split_once('=') else {
                bail!("Invalid column mapping '{pair}' (expected old=new)");
            };
            let (from, to) = (from.trim(), to.trim());
            if from.is_empty() || to.is_empty() {
                bail!("Invalid column mapping '{pair}' (empty name)");
            }
            if mapping
                .renames
                .insert(from.to_string(), to.to_string())
                .is_some()
            {
                bail!("Duplicate column mapping for '{from}'");
            }
        }
        Ok(mapping)
    }

    /// Merges `other` into this mapping; entries from `other` win.
    pub fn merge(&mut self, other: ColumnMapping) {
        self.renames.extend(other.renames);
    }

    /// Rewrites header names in place order, substituting mapped names and
    /// keeping unmapped names as-is.
    pub fn apply(&self, headers: &[String]) -> Vec<String> {
        headers
            .iter()
            .map(|name| self.renames.get(name).cloned().unwrap_or_else(|| name.clone()))
            .collect()
    }
}
