// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::TrustError;
use std::fmt;
use std::str::FromStr;

/// Usage context a trust decision is made for.
///
/// Queries without a context consider every context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Context {
    Signature,
    Timestamp,
    Revocation,
}

impl Context {
    pub fn id(&self) -> &'static str {
        match self {
            Context::Signature => "SIGNATURE",
            Context::Timestamp => "TIMESTAMP",
            Context::Revocation => "REVOCATION",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Context {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SIGNATURE" => Ok(Context::Signature),
            "TIMESTAMP" => Ok(Context::Timestamp),
            "REVOCATION" => Ok(Context::Revocation),
            other => Err(TrustError::UnknownContext(other.to_string())),
        }
    }
}
