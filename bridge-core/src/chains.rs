//! Static per-chain metadata
//!
//! The chain table is declarative config: the SDK ships presets for the
//! well-known networks and accepts replacement tables from TOML for
//! networks it does not know about.

use crate::types::ChainName;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static metadata for one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Chain name, the registry and config key
    pub name: ChainName,
    /// Human-readable display name
    pub display: String,
    /// SS58 address prefix
    pub ss58_prefix: u16,
    /// Parachain id, absent for relay chains
    pub para_chain_id: Option<u32>,
    /// Native token symbol
    pub native_token: String,
    /// Native token decimals
    pub native_decimals: u32,
}

/// Lookup table of chain metadata keyed by chain name
#[derive(Debug, Clone, Default)]
pub struct ChainTable {
    chains: HashMap<ChainName, Chain>,
}

#[derive(Debug, Deserialize)]
struct ChainsFile {
    chain: Vec<Chain>,
}

impl ChainTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-populated with the well-known networks
    pub fn presets() -> Self {
        let mut table = Self::new();
        for chain in preset_chains() {
            table.insert(chain);
        }
        table
    }

    /// Parse a table from TOML (`[[chain]]` array of tables)
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: ChainsFile = toml::from_str(raw)?;
        let mut table = Self::new();
        for chain in file.chain {
            table.insert(chain);
        }
        Ok(table)
    }

    /// Insert or replace a chain entry
    pub fn insert(&mut self, chain: Chain) {
        self.chains.insert(chain.name.clone(), chain);
    }

    /// Get chain metadata if present
    pub fn get(&self, name: &ChainName) -> Option<&Chain> {
        self.chains.get(name)
    }

    /// Get chain metadata or fail with `ChainNotFound`
    pub fn require(&self, name: &ChainName) -> Result<&Chain> {
        self.get(name).ok_or_else(|| Error::ChainNotFound {
            chain: name.clone(),
        })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

fn chain(
    name: &str,
    display: &str,
    ss58_prefix: u16,
    para_chain_id: Option<u32>,
    native_token: &str,
    native_decimals: u32,
) -> Chain {
    Chain {
        name: ChainName::new(name),
        display: display.to_string(),
        ss58_prefix,
        para_chain_id,
        native_token: native_token.to_string(),
        native_decimals,
    }
}

fn preset_chains() -> Vec<Chain> {
    vec![
        chain("polkadot", "Polkadot", 0, None, "DOT", 10),
        chain("kusama", "Kusama", 2, None, "KSM", 12),
        chain("statemint", "Statemint", 0, Some(1000), "DOT", 10),
        chain("statemine", "Statemine", 2, Some(1000), "KSM", 12),
        chain("acala", "Acala", 10, Some(2000), "ACA", 12),
        chain("karura", "Karura", 8, Some(2000), "KAR", 12),
        chain("bifrost", "Bifrost", 6, Some(2001), "BNC", 12),
        chain("khala", "Khala", 30, Some(2004), "PHA", 12),
        chain("moonriver", "Moonriver", 1285, Some(2023), "MOVR", 18),
        chain("basilisk", "Basilisk", 10041, Some(2090), "BSX", 12),
        chain("kintsugi", "Kintsugi", 2092, Some(2092), "KINT", 12),
        chain("interlay", "Interlay", 2032, Some(2032), "INTR", 10),
    ]
}
