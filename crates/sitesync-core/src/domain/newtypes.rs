//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for account identifiers, cursors, and upstream
//! paths. Each newtype ensures data validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::SyncError;

// ============================================================================
// AccountId
// ============================================================================

/// Numeric identifier of a tenant's upstream cloud-storage account.
///
/// Webhook payloads carry these either as JSON numbers or as numeric
/// strings depending on the payload variant, so deserialization accepts
/// both. The `Display` form (plain decimal) is used as the cursor-store key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| SyncError::InvalidAccountId(format!("{s:?}: {e}")))
    }
}

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accepts both 42 and "42".
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrString {
            Number(i64),
            String(String),
        }

        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(Self(n)),
            NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

// ============================================================================
// Cursor
// ============================================================================

/// Opaque resumption token into an account's upstream change stream.
///
/// Non-empty by construction: the cursor store distinguishes "absent" from
/// "present" with `Option<Cursor>`, and an empty string is never a valid
/// resumption point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cursor(String);

impl Cursor {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Cursor {
    type Error = SyncError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(SyncError::InvalidCursorValue(
                "cursor must not be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.0
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SitePath
// ============================================================================

/// Path of a file-system object in the upstream account.
///
/// Always starts with `/`. The first path segment is the tenant "domain"
/// used for the ownership check; the full path, verbatim, is the
/// destination object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SitePath(String);

impl SitePath {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first path segment after the leading separator, or `None` when
    /// the path has no second segment (a single top-level file has no
    /// domain and is never owned).
    ///
    /// `/acme/report.csv` → `Some("acme")`; `/report.csv` → `None`;
    /// `/acme/` → `Some("acme")`.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        let rest = &self.0[1..];
        let sep = rest.find('/')?;
        if sep == 0 {
            // "//foo" has an empty first segment
            return None;
        }
        Some(&rest[..sep])
    }

    /// File extension of the final segment, if any.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.0.rsplit('/').next()?;
        let dot = name.rfind('.')?;
        if dot == 0 || dot + 1 == name.len() {
            return None;
        }
        Some(&name[dot + 1..])
    }
}

impl TryFrom<String> for SitePath {
    type Error = SyncError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(SyncError::InvalidPath("path must not be empty".to_string()));
        }
        if !value.starts_with('/') {
            return Err(SyncError::InvalidPath(format!(
                "path must start with '/': {value}"
            )));
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for SitePath {
    type Error = SyncError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl From<SitePath> for String {
    fn from(path: SitePath) -> Self {
        path.0
    }
}

impl Display for SitePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
