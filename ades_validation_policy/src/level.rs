// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::PolicyError;
use std::fmt;
use std::str::FromStr;

/// Severity applied when a policy check does not hold.
///
/// Only [`Level::Fail`] terminates a chain of checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Ignore,
    Inform,
    Warn,
    Fail,
}

impl Level {
    /// Stable policy identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Level::Ignore => "IGNORE",
            Level::Inform => "INFORM",
            Level::Warn => "WARN",
            Level::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Level {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IGNORE" => Ok(Level::Ignore),
            "INFORM" => Ok(Level::Inform),
            "WARN" => Ok(Level::Warn),
            "FAIL" => Ok(Level::Fail),
            other => Err(PolicyError::UnknownLevel(other.to_string())),
        }
    }
}

/// Constraint categories of the cryptographic policy section that may carry their own level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintCategory {
    Global,
    AcceptableEncryptionAlgorithm,
    AcceptableDigestAlgorithm,
    MinimumKeySize,
    ExpirationDate,
    /// Level used for expiration checks once the validation time is after the
    /// cryptographic suite update date.
    PostUpdateExpirationDate,
}

impl ConstraintCategory {
    pub const ALL: [ConstraintCategory; 6] = [
        ConstraintCategory::Global,
        ConstraintCategory::AcceptableEncryptionAlgorithm,
        ConstraintCategory::AcceptableDigestAlgorithm,
        ConstraintCategory::MinimumKeySize,
        ConstraintCategory::ExpirationDate,
        ConstraintCategory::PostUpdateExpirationDate,
    ];
}
