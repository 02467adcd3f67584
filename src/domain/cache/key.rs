//! Canonical cache keys

use std::collections::BTreeMap;
use std::fmt;

/// Placeholder for a filter the caller left unset
const ANY: &str = "*";

/// `namespace:primary:name=value...` with parts ordered by name, so two
/// queries with the same criteria always produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    namespace: &'static str,
    primary: String,
    parts: BTreeMap<&'static str, String>,
}

impl CacheKey {
    pub fn new(namespace: &'static str, primary: impl Into<String>) -> Self {
        Self {
            namespace,
            primary: primary.into(),
            parts: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.parts.insert(name, value.to_string());
        self
    }

    /// Like `with`, recording `*` when the value is absent
    pub fn with_optional<T: fmt::Display>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self.with(name, ANY),
        }
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.primary)?;
        for (name, value) in &self.parts {
            write!(f, ":{}={}", name, value)?;
        }
        Ok(())
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.to_string()
    }
}
