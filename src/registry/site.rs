use crate::checker::Fingerprint;
use crate::registry::keys::{down_key, hash_key, url_key, UNAVAILABLE_SENTINEL};
use crate::store::Properties;
use crate::ConfigError;
use url::Url;

/// Last known content state of a site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredHash {
    /// Fingerprint of the body seen at the last successful fetch
    Digest(Fingerprint),

    /// The site was first checked while unreachable
    Unavailable,
}

impl StoredHash {
    /// Parses a stored `hash_<name>` value
    pub fn from_stored(value: &str) -> Self {
        if value == UNAVAILABLE_SENTINEL {
            Self::Unavailable
        } else {
            Self::Digest(Fingerprint::from_hex(value))
        }
    }

    /// Value written to the state file
    pub fn as_stored(&self) -> &str {
        match self {
            Self::Digest(fingerprint) => fingerprint.as_str(),
            Self::Unavailable => UNAVAILABLE_SENTINEL,
        }
    }

    /// Returns true if this is the same content as `fingerprint`
    pub fn matches(&self, fingerprint: &Fingerprint) -> bool {
        match self {
            Self::Digest(stored) => stored == fingerprint,
            Self::Unavailable => false,
        }
    }
}

/// A watched website and its last known state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Unique name from the `sites` list
    pub name: String,

    /// Fetch target
    pub url: Url,

    /// Last known fingerprint; `None` until the first check
    pub hash: Option<StoredHash>,

    /// True if the last check found the site unreachable
    pub down: bool,
}

impl Site {
    /// Reads a site record from its `url_`, `hash_` and `down_` entries
    ///
    /// # Errors
    ///
    /// * [`ConfigError::MissingUrl`] - No `url_<name>` entry
    /// * [`ConfigError::MalformedUrl`] - The URL does not parse
    /// * [`ConfigError::UnsupportedScheme`] - The URL is not http or https
    pub fn load(properties: &Properties, name: &str) -> Result<Self, ConfigError> {
        let url = resolve_url(properties, name)?;
        let hash = properties.get(&hash_key(name)).map(StoredHash::from_stored);
        let down = properties.get(&down_key(name)) == Some("true");

        Ok(Self {
            name: name.to_string(),
            url,
            hash,
            down,
        })
    }

    /// Writes the `hash_` and `down_` entries back
    ///
    /// The `url_` entry is never rewritten.
    pub fn store_into(&self, properties: &mut Properties) {
        if let Some(hash) = &self.hash {
            properties.set(hash_key(&self.name), hash.as_stored());
        }
        properties.set(down_key(&self.name), if self.down { "true" } else { "false" });
    }
}

/// Looks up and parses `url_<name>`
pub fn resolve_url(properties: &Properties, name: &str) -> Result<Url, ConfigError> {
    let raw = properties
        .get(&url_key(name))
        .ok_or_else(|| ConfigError::MissingUrl {
            site: name.to_string(),
        })?;

    let url = Url::parse(raw).map_err(|source| ConfigError::MalformedUrl {
        site: name.to_string(),
        url: raw.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            site: name.to_string(),
            url: raw.to_string(),
        });
    }

    Ok(url)
}
