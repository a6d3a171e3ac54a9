//! Scenario files: recorded variants, lookahead and download history

use anyhow::{bail, Context};
use kino_abr::{EstimatorConfig, Format, HistoryEntry, SegmentDescriptor};
use serde::Deserialize;
use std::collections::HashMap;

/// A variant as written in a scenario file
#[derive(Debug, Deserialize)]
pub struct VariantSpec {
    pub name: String,
    #[serde(default)]
    pub bitrate: Option<u64>,
}

/// A downloaded chunk as written in a scenario file, referring to its
/// variant by name
#[derive(Debug, Deserialize)]
pub struct ChunkSpec {
    pub format: String,
    pub start_us: u64,
    pub end_us: u64,
    #[serde(default)]
    pub byte_length: Option<u64>,
}

/// Scenario file contents
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub formats: Vec<VariantSpec>,
    #[serde(default)]
    pub lookahead: HashMap<String, Vec<SegmentDescriptor>>,
    #[serde(default)]
    pub history: Vec<ChunkSpec>,
    #[serde(default)]
    pub config: Option<EstimatorConfig>,
}

/// Scenario with variant names bound to format identities
#[derive(Debug)]
pub struct ResolvedScenario {
    pub names: Vec<String>,
    pub formats: Vec<Format>,
    pub sequences: Vec<Vec<SegmentDescriptor>>,
    pub history: Vec<HistoryEntry>,
    pub config: EstimatorConfig,
}

impl Scenario {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid scenario JSON")
    }

    /// Bind every variant name to one `Format` so history entries and
    /// lookahead share identities
    pub fn resolve(mut self) -> anyhow::Result<ResolvedScenario> {
        let mut by_name: HashMap<String, Format> = HashMap::new();
        let mut names = Vec::with_capacity(self.formats.len());
        let mut formats = Vec::with_capacity(self.formats.len());

        for spec in &self.formats {
            let format = Format::new(spec.bitrate).labeled(spec.name.clone());
            if by_name.insert(spec.name.clone(), format.clone()).is_some() {
                bail!("Duplicate variant name: {}", spec.name);
            }
            names.push(spec.name.clone());
            formats.push(format);
        }

        if let Some(unknown) = self.lookahead.keys().find(|name| !by_name.contains_key(*name)) {
            bail!("Lookahead refers to unknown variant: {}", unknown);
        }
        let sequences = names
            .iter()
            .map(|name| self.lookahead.remove(name).unwrap_or_default())
            .collect();

        let history = self
            .history
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                let format = by_name.get(&chunk.format).with_context(|| {
                    format!("History chunk {} refers to unknown variant: {}", i, chunk.format)
                })?;
                HistoryEntry::new(
                    format.clone(),
                    chunk.start_us,
                    chunk.end_us,
                    chunk.byte_length,
                )
                .with_context(|| format!("History chunk {} is invalid", i))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(ResolvedScenario {
            names,
            formats,
            sequences,
            history,
            config: self.config.unwrap_or_default(),
        })
    }
}
