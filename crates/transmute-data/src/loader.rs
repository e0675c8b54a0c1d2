//! Format detection, file discovery, and deserialization helpers shared by
//! the descriptor parser, rule files, and generator configuration.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use transmute_core::id::{Identifier, IdentifierError, ItemTypeId};
use transmute_core::registry::TypeResolver;
use transmute_core::table::RuleTableError;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a single document or data file.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization or schema error occurred.
    #[error("parse error in {origin}: {detail}")]
    Parse { origin: String, detail: String },

    /// The document's byte stream could not be read to the end.
    #[error("failed to read {origin}: {source}")]
    Read {
        origin: String,
        source: std::io::Error,
    },

    /// The source does not know the requested resource.
    #[error("unknown resource {resource}")]
    UnknownResource { resource: Identifier },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {origin}")]
    UnresolvedRef {
        origin: String,
        name: String,
        expected_kind: &'static str,
    },

    /// A name is not a well-formed identifier.
    #[error("invalid identifier in {origin}: {source}")]
    InvalidIdentifier {
        origin: String,
        source: IdentifierError,
    },

    /// An amount is negative or does not fit in a rule.
    #[error("amount {amount} of entry {index} in {origin} is out of range")]
    InvalidAmount {
        origin: String,
        index: usize,
        amount: i64,
    },

    /// The rule table rejected a rule.
    #[error(transparent)]
    RuleTable(#[from] RuleTableError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats, in discovery precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Ron, Format::Toml, Format::Json];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Ron => "ron",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }
}

/// The format of `path`, judged by its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let ext = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .into_iter()
        .find(|f| Some(f.extension()) == ext)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Find `{base_name}.{ron,toml,json}` in `dir`.
///
/// `Ok(None)` when there is none; `ConflictingFormats` when more than one
/// format is present.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut present = Format::ALL
        .into_iter()
        .map(|f| dir.join(format!("{base_name}.{}", f.extension())))
        .filter(|p| p.exists());

    match (present.next(), present.next()) {
        (Some(a), Some(b)) => Err(DataLoadError::ConflictingFormats { a, b }),
        (found, _) => Ok(found),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        origin: path.display().to_string(),
        detail: detail.to_string(),
    }
}

/// Deserialize `content` written in `format`, naming `path` in errors.
fn from_str_as<T: DeserializeOwned>(format: Format, content: &str, path: &Path) -> Result<T, DataLoadError> {
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(path, e)),
    }
}

fn read_with_format(path: &Path) -> Result<(Format, String), DataLoadError> {
    let format = detect_format(path)?;
    Ok((format, std::fs::read_to_string(path)?))
}

/// Read and deserialize a RON, JSON, or TOML file.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let (format, content) = read_with_format(path)?;
    from_str_as(format, &content, path)
}

/// Read a list of `T`. RON and JSON files hold the list itself; TOML files
/// hold it under `toml_key`, since a TOML document must be a table.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let (format, content) = read_with_format(path)?;
    if format != Format::Toml {
        return from_str_as(format, &content, path);
    }

    let mut table: toml::Table = from_str_as(format, &content, path)?;
    table
        .remove(toml_key)
        .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}'")))?
        .try_into()
        .map_err(|e: toml::de::Error| parse_error(path, e))
}

// ===========================================================================
// Name resolution
// ===========================================================================

/// Parse `name` as an identifier (applying `default_namespace` when it has no
/// `:`) and resolve it to an item type.
pub fn resolve_item<R: TypeResolver + ?Sized>(
    resolver: &R,
    name: &str,
    default_namespace: &str,
    origin: &str,
) -> Result<ItemTypeId, DataLoadError> {
    let id = Identifier::parse_or(name, default_namespace).map_err(|source| {
        DataLoadError::InvalidIdentifier {
            origin: origin.to_string(),
            source,
        }
    })?;
    resolver
        .resolve(&id)
        .ok_or_else(|| DataLoadError::UnresolvedRef {
            origin: origin.to_string(),
            name: id.to_string(),
            expected_kind: "item",
        })
}

// ===========================================================================
// Tests
// ===========================================================================
