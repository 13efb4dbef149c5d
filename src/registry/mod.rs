//! Site registry
//!
//! This module turns the flat state mapping into `Site` records and back:
//! - Parsing the ordered `sites` list
//! - Resolving and validating each site's URL
//! - Writing updated hash and down entries back to the mapping

pub mod keys;
mod site;

pub use site::{resolve_url, Site, StoredHash};

use crate::store::Properties;
use crate::ConfigError;
use keys::{DEBUG_KEY, SITES_KEY};
use std::collections::{HashMap, HashSet};

/// Returns true if the `debug` key is present, whatever its value
pub fn debug_enabled(properties: &Properties) -> bool {
    properties.contains(DEBUG_KEY)
}

/// Splits the `sites` entry into names
///
/// Tokens are trimmed and otherwise taken literally: order is preserved and
/// duplicates and empty tokens are kept. Returns `None` if the key is absent.
pub fn parse_site_names(properties: &Properties) -> Option<Vec<String>> {
    properties
        .get(SITES_KEY)
        .map(|list| list.split(',').map(|name| name.trim().to_string()).collect())
}

/// The sites to check in one run
///
/// Records are unique per name; `order` keeps the list as written, so a name
/// listed twice is checked twice against the same record.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    order: Vec<String>,
    sites: HashMap<String, Site>,
}

impl SiteRegistry {
    /// Builds the registry from the state mapping
    ///
    /// If `sites` is absent it is initialized to an empty string before
    /// failing. Every listed site must resolve to a valid URL; the first
    /// failure aborts.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::NoSites`] - `sites` is absent or blank
    /// * [`ConfigError::MissingUrl`], [`ConfigError::MalformedUrl`],
    ///   [`ConfigError::UnsupportedScheme`] - A site's URL is unusable
    pub fn load(properties: &mut Properties) -> Result<Self, ConfigError> {
        let order = match parse_site_names(properties) {
            Some(names) => names,
            None => {
                properties.set(SITES_KEY, "");
                return Err(ConfigError::NoSites);
            }
        };

        if order.len() == 1 && order[0].is_empty() {
            return Err(ConfigError::NoSites);
        }

        let mut sites = HashMap::new();
        for name in &order {
            if !sites.contains_key(name) {
                sites.insert(name.clone(), Site::load(properties, name)?);
            }
        }

        Ok(Self { order, sites })
    }

    /// Site names in check order, duplicates included
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Unique sites in order of first appearance
    pub fn sites(&self) -> Vec<&Site> {
        let mut seen = HashSet::new();
        self.order
            .iter()
            .filter(|name| seen.insert(*name))
            .filter_map(|name| self.sites.get(name))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Site> {
        self.sites.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Site> {
        self.sites.get_mut(name)
    }

    /// Number of unique sites
    pub fn unique_count(&self) -> usize {
        self.sites.len()
    }

    /// Writes every site's hash and down entries back to the mapping
    pub fn store_into(&self, properties: &mut Properties) {
        for site in self.sites.values() {
            site.store_into(properties);
        }
    }
}
