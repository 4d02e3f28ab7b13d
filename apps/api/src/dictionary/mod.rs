//! Skill dictionaries: static per-domain tables of canonical keys and aliases.
//!
//! The built-in tables are embedded at compile time from `data/dictionaries/`.
//! Callers pick the domains they need and hand the concatenated slice to the
//! extractors; nothing here is mutated after startup.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::extract::normalize::normalize_tag;

const CLOUD_JSON: &str = include_str!("../../data/dictionaries/cloud.json");
const SRE_JSON: &str = include_str!("../../data/dictionaries/sre.json");
const MLOPS_JSON: &str = include_str!("../../data/dictionaries/mlops.json");

fn default_weight() -> f64 {
    1.0
}

/// One distinguishable skill or technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryItem {
    /// Canonical id, unique across the dictionaries used in one call.
    pub key: String,
    /// Alternate surface forms, in declaration order.
    #[serde(default)]
    pub aliases: Vec<String>,
    pub category: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl DictionaryItem {
    pub fn new(key: &str, aliases: &[&str], category: &str) -> Self {
        Self {
            key: key.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            category: category.to_string(),
            weight: default_weight(),
        }
    }
}

/// Dictionary domain. Doubles as the bullet style selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Cloud,
    Sre,
    Mlops,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Cloud, Domain::Sre, Domain::Mlops];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Cloud => "cloud",
            Domain::Sre => "sre",
            Domain::Mlops => "mlops",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cloud" => Ok(Domain::Cloud),
            "sre" => Ok(Domain::Sre),
            "mlops" => Ok(Domain::Mlops),
            other => Err(format!("unknown domain '{other}' (expected cloud, sre or mlops)")),
        }
    }
}

/// Item count per domain, for the catalog listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DomainSummary {
    pub domain: Domain,
    pub item_count: usize,
    pub categories: Vec<String>,
}

/// All loaded dictionaries, keyed by domain.
#[derive(Debug, Clone)]
pub struct DictionaryCatalog {
    tables: HashMap<Domain, Vec<DictionaryItem>>,
}

impl DictionaryCatalog {
    /// Parses the embedded cloud/sre/mlops tables.
    pub fn builtin() -> Result<Self> {
        let mut tables = HashMap::new();
        for (domain, raw) in [
            (Domain::Cloud, CLOUD_JSON),
            (Domain::Sre, SRE_JSON),
            (Domain::Mlops, MLOPS_JSON),
        ] {
            let items: Vec<DictionaryItem> = serde_json::from_str(raw)
                .with_context(|| format!("Failed to parse built-in {domain} dictionary"))?;
            info!("Loaded {} dictionary: {} items", domain, items.len());
            tables.insert(domain, items);
        }

        let catalog = Self { tables };
        for conflict in find_conflicts(&catalog.select(&Domain::ALL)) {
            warn!("Dictionary conflict: {conflict}");
        }
        Ok(catalog)
    }

    /// Concatenates the requested domains in the given order. An empty
    /// selection means every domain.
    pub fn select(&self, domains: &[Domain]) -> Vec<DictionaryItem> {
        let domains: &[Domain] = if domains.is_empty() {
            &Domain::ALL
        } else {
            domains
        };

        let mut seen = Vec::with_capacity(domains.len());
        let mut items = Vec::new();
        for domain in domains {
            if seen.contains(domain) {
                continue;
            }
            seen.push(*domain);
            if let Some(table) = self.tables.get(domain) {
                items.extend(table.iter().cloned());
            }
        }
        items
    }

    pub fn summaries(&self) -> Vec<DomainSummary> {
        Domain::ALL
            .iter()
            .map(|domain| {
                let table = self.tables.get(domain).map(Vec::as_slice).unwrap_or(&[]);
                let mut categories: Vec<String> = Vec::new();
                for item in table {
                    if !categories.contains(&item.category) {
                        categories.push(item.category.clone());
                    }
                }
                DomainSummary {
                    domain: *domain,
                    item_count: table.len(),
                    categories,
                }
            })
            .collect()
    }
}

/// Reports duplicate keys and aliases shared by different items. Shared
/// aliases are tolerated (first item wins at resolution time) but worth a log line.
pub fn find_conflicts(items: &[DictionaryItem]) -> Vec<String> {
    let mut conflicts = Vec::new();
    let mut owners: HashMap<String, &str> = HashMap::new();

    for item in items {
        let mut terms = vec![normalize_tag(&item.key)];
        terms.extend(item.aliases.iter().map(|a| normalize_tag(a)));

        for term in terms {
            match owners.get(&term) {
                Some(owner) if *owner != item.key.as_str() => conflicts.push(format!(
                    "term '{term}' of '{}' already belongs to '{owner}'",
                    item.key
                )),
                Some(_) => {}
                None => {
                    owners.insert(term, item.key.as_str());
                }
            }
        }
    }

    conflicts
}
