// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Transitional algorithm aliases.
//!
//! Older policies only list `RSA`. Until they declare `RSASSA-PSS` explicitly, a PSS lookup
//! that finds nothing may fall back to the `RSA` rows of the same list. Everything about
//! this migration lives here; evaluators opt out with `without_legacy_aliases`.

use crate::algorithms::EncryptionAlgorithm;
use tracing::warn;

/// The legacy equivalent of `algorithm`, if one exists.
pub(crate) fn legacy_alias(algorithm: EncryptionAlgorithm) -> Option<EncryptionAlgorithm> {
    match algorithm {
        EncryptionAlgorithm::RsassaPss => Some(EncryptionAlgorithm::Rsa),
        _ => None,
    }
}

/// Rows of `entries` matching the legacy alias of `algorithm`.
///
/// Only consulted when no row matched `algorithm` itself.
pub(crate) fn alias_matches<'a, T>(
    entries: &'a [T],
    name_of: impl Fn(&T) -> &str,
    algorithm: EncryptionAlgorithm,
) -> Option<(EncryptionAlgorithm, Vec<&'a T>)> {
    let alias = legacy_alias(algorithm)?;
    let matches: Vec<&T> = entries
        .iter()
        .filter(|e| name_of(*e) == alias.name())
        .collect();
    if matches.is_empty() {
        return None;
    }

    warn!(
        requested = algorithm.name(),
        alias = alias.name(),
        "no '{}' algorithm is defined within the validation policy, accepting '{}' entries instead; set the constraint explicitly",
        algorithm.name(),
        alias.name()
    );
    Some((alias, matches))
}
