use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Namespace applied to identifiers written without an explicit `namespace:` prefix.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Identifies an item type in the registry. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemTypeId(pub u32);

/// A namespaced resource identifier, written `namespace:path`.
///
/// Namespaces may contain `[a-z0-9_.-]`; paths additionally allow `/`.
/// Both parts must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    namespace: String,
    path: String,
}

/// Errors produced when constructing or parsing an [`Identifier`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("empty namespace in identifier '{0}'")]
    EmptyNamespace(String),
    #[error("empty path in identifier '{0}'")]
    EmptyPath(String),
    #[error("invalid character {ch:?} in namespace of '{raw}'")]
    InvalidNamespace { raw: String, ch: char },
    #[error("invalid character {ch:?} in path of '{raw}'")]
    InvalidPath { raw: String, ch: char },
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl Identifier {
    /// Build an identifier from its two parts, validating both.
    pub fn new(namespace: &str, path: &str) -> Result<Self, IdentifierError> {
        let raw = || format!("{namespace}:{path}");
        if namespace.is_empty() {
            return Err(IdentifierError::EmptyNamespace(raw()));
        }
        if path.is_empty() {
            return Err(IdentifierError::EmptyPath(raw()));
        }
        if let Some(ch) = namespace.chars().find(|&c| !is_namespace_char(c)) {
            return Err(IdentifierError::InvalidNamespace { raw: raw(), ch });
        }
        if let Some(ch) = path.chars().find(|&c| !is_path_char(c)) {
            return Err(IdentifierError::InvalidPath { raw: raw(), ch });
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Parse `namespace:path`, falling back to `default_namespace` when the
    /// string carries no `:`.
    pub fn parse_or(raw: &str, default_namespace: &str) -> Result<Self, IdentifierError> {
        match raw.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(default_namespace, raw),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_or(s, DEFAULT_NAMESPACE)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Identifier allocation
// ---------------------------------------------------------------------------

/// Hands out `namespace:category/id_<n>` identifiers for synthesized rules.
///
/// The counter starts at 0 and increases by one per call. It is only reset
/// explicitly via [`IdAllocator::reset`], which the generator does at the start
/// of every pass, so identifiers never repeat within a pass.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    namespace: String,
    prefix: String,
    next: u64,
}

impl IdAllocator {
    pub fn new(namespace: &str, category: &str) -> Result<Self, IdentifierError> {
        let prefix = format!("{category}/id_");
        // Validate once so that every generated identifier is well-formed.
        Identifier::new(namespace, &format!("{prefix}0"))?;
        Ok(Self {
            namespace: namespace.to_string(),
            prefix,
            next: 0,
        })
    }

    /// Allocate the next identifier in the sequence.
    pub fn next_id(&mut self) -> Identifier {
        let id = Identifier {
            namespace: self.namespace.clone(),
            path: format!("{}{}", self.prefix, self.next),
        };
        self.next += 1;
        id
    }

    /// Restart the sequence at `id_0`.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Number of identifiers issued since the last reset.
    pub fn issued(&self) -> u64 {
        self.next
    }

    /// Recover the sequence number from an identifier this allocator produced.
    pub fn sequence_of(&self, id: &Identifier) -> Option<u64> {
        if id.namespace != self.namespace {
            return None;
        }
        id.path.strip_prefix(&self.prefix)?.parse().ok()
    }
}
