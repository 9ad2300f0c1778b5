//! Static per-(chain, token) fee and existential-deposit config
//!
//! Keyed by the *destination* chain: an entry answers "what does it cost,
//! and what must remain, when this token lands on that chain". Raw amounts
//! are minor units; `decimals` defaults to 12, and the deposit and fee
//! fields are independently optional within an otherwise-present entry.

use crate::amount::{self, DEFAULT_DECIMALS};
use crate::types::{ChainName, TokenBalance};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fee config for one token on one destination chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFeeConfig {
    /// Bridge fee in raw minor units, defaults to 0
    pub fee: Option<u128>,
    /// Existential deposit in raw minor units, defaults to 0
    pub existential_deposit: Option<u128>,
    /// Token decimals, defaults to 12
    pub decimals: Option<u32>,
}

impl TokenFeeConfig {
    fn decimals(&self) -> u32 {
        self.decimals.unwrap_or(DEFAULT_DECIMALS)
    }
}

/// Lookup table of fee config keyed by (destination chain, token)
#[derive(Debug, Clone, Default)]
pub struct FeeTable {
    entries: HashMap<(ChainName, String), TokenFeeConfig>,
}

#[derive(Debug, Deserialize)]
struct FeeEntry {
    chain: ChainName,
    token: String,
    // Raw minor units are string-encoded: TOML integers cap at i64.
    #[serde(default, deserialize_with = "raw_units")]
    fee: Option<u128>,
    #[serde(default, deserialize_with = "raw_units")]
    existential_deposit: Option<u128>,
    decimals: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct FeesFile {
    token: Vec<FeeEntry>,
}

fn raw_units<'de, D>(deserializer: D) -> std::result::Result<Option<u128>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Deserialize::deserialize(deserializer)?;
    raw.map(|value| value.parse::<u128>().map_err(serde::de::Error::custom))
        .transpose()
}

impl FeeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-populated with the well-known lanes
    pub fn presets() -> Self {
        let mut table = Self::new();
        for (chain, token, config) in preset_fees() {
            table.insert(chain, token, config);
        }
        table
    }

    /// Parse a table from TOML (`[[token]]` array of tables)
    ///
    /// `fee` and `existential_deposit` are raw minor units in string form,
    /// since TOML has no integer wide enough for them.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: FeesFile = toml::from_str(raw)?;
        let mut table = Self::new();
        for entry in file.token {
            let config = TokenFeeConfig {
                fee: entry.fee,
                existential_deposit: entry.existential_deposit,
                decimals: entry.decimals,
            };
            table.insert(entry.chain, entry.token, config);
        }
        Ok(table)
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, chain: ChainName, token: impl Into<String>, config: TokenFeeConfig) {
        self.entries.insert((chain, token.into()), config);
    }

    /// Get the entry for (destination chain, token) if present
    pub fn get(&self, chain: &ChainName, token: &str) -> Option<&TokenFeeConfig> {
        self.entries.get(&(chain.clone(), token.to_string()))
    }

    /// Get the entry or fail immediately with `TokenConfigNotFound`
    pub fn require(&self, chain: &ChainName, token: &str) -> Result<&TokenFeeConfig> {
        self.get(chain, token).ok_or_else(|| Error::TokenConfigNotFound {
            token: token.to_string(),
            chain: chain.clone(),
        })
    }

    /// Existential deposit of `token` on `chain`, as a decimals-aware amount
    pub fn existential_deposit(&self, chain: &ChainName, token: &str) -> Result<TokenBalance> {
        let config = self.require(chain, token)?;
        Ok(TokenBalance {
            token: token.to_string(),
            balance: amount::from_raw(
                config.existential_deposit.unwrap_or(0),
                config.decimals(),
            )?,
        })
    }

    /// Bridge fee charged when `token` lands on `chain`
    pub fn bridge_fee(&self, chain: &ChainName, token: &str) -> Result<TokenBalance> {
        let config = self.require(chain, token)?;
        Ok(TokenBalance {
            token: token.to_string(),
            balance: amount::from_raw(config.fee.unwrap_or(0), config.decimals())?,
        })
    }

    /// Iterate over all (chain, token) keys
    pub fn keys(&self) -> impl Iterator<Item = &(ChainName, String)> {
        self.entries.keys()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry(fee: u128, existential_deposit: u128, decimals: u32) -> TokenFeeConfig {
    TokenFeeConfig {
        fee: Some(fee),
        existential_deposit: Some(existential_deposit),
        decimals: Some(decimals),
    }
}

fn preset_fees() -> Vec<(ChainName, &'static str, TokenFeeConfig)> {
    vec![
        // relay chains
        (
            ChainName::new("polkadot"),
            "DOT",
            entry(469_417_452, 10_000_000_000, 10),
        ),
        (
            ChainName::new("kusama"),
            "KSM",
            entry(79_999_999, 333_333_333, 12),
        ),
        // asset hubs
        (
            ChainName::new("statemint"),
            "DOT",
            entry(47_000_000, 1_000_000_000, 10),
        ),
        (
            ChainName::new("statemine"),
            "KSM",
            entry(10_666_664, 33_333_333, 12),
        ),
        (
            ChainName::new("statemine"),
            "USDT",
            entry(1_183, 1_000, 6),
        ),
        // acala / karura
        (
            ChainName::new("acala"),
            "DOT",
            entry(3_721_109, 100_000_000, 10),
        ),
        (
            ChainName::new("acala"),
            "AUSD",
            entry(3_721_109_059, 100_000_000_000, 12),
        ),
        (
            ChainName::new("karura"),
            "KSM",
            entry(79_999_999, 100_000_000, 12),
        ),
        (
            ChainName::new("karura"),
            "LKSM",
            entry(589_618_748, 500_000_000, 12),
        ),
        (
            ChainName::new("karura"),
            "KUSD",
            entry(2_626_579_278, 10_000_000_000, 12),
        ),
        // other parachains
        (
            ChainName::new("bifrost"),
            "KSM",
            entry(64_000_000, 100_000_000, 12),
        ),
        (
            // decimals omitted on purpose, PHA uses the default 12
            ChainName::new("khala"),
            "PHA",
            TokenFeeConfig {
                fee: Some(64_000_000_000),
                existential_deposit: Some(40_000_000_000),
                decimals: None,
            },
        ),
        (
            // Moonriver accounts have no existential deposit
            ChainName::new("moonriver"),
            "MOVR",
            TokenFeeConfig {
                fee: Some(80_000_000_000_000_000),
                existential_deposit: None,
                decimals: Some(18),
            },
        ),
        (
            ChainName::new("basilisk"),
            "BSX",
            entry(22_000_000_000, 1_000_000_000_000, 12),
        ),
        (
            ChainName::new("kintsugi"),
            "KINT",
            TokenFeeConfig {
                fee: Some(170_666_666),
                existential_deposit: None,
                decimals: Some(12),
            },
        ),
        (
            ChainName::new("interlay"),
            "INTR",
            TokenFeeConfig {
                fee: Some(21_787_000),
                existential_deposit: None,
                decimals: Some(10),
            },
        ),
    ]
}
