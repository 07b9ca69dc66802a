//! Error classification
//!
//! Engine errors are surfaced as typed results; this module defines the
//! coarse classification callers use to decide how to react (show a
//! message, offer refresh-and-retry, or report storage trouble).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse error classification for engine failures.
///
/// - `Validation`: the request itself is wrong (state ordering violated,
///   required data missing). Retrying unchanged will fail again.
/// - `Conflict`: concurrent modification detected (table already occupied,
///   order already in the target state). The caller should refresh and retry.
/// - `Persistence`: the backing store rejected or failed the write. No
///   partial state change is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    Conflict,
    Persistence,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Persistence => write!(f, "PERSISTENCE"),
        }
    }
}
