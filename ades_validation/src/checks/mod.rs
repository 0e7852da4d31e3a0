// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Check variants and the catalog of standard checks built from them.

pub mod certificate;
pub mod cryptographic;
pub mod revocation;
pub mod trust;

pub use certificate::{
    certificate_validity_check, certificate_values_check, CertificateCheck,
    CertificateValuesConstraint, ANY_VALUE,
};
pub use cryptographic::{
    cryptographic_checks, CryptographicCheck, CryptographicPosition, CryptographicRule,
    CryptographicSubject,
};
pub use revocation::{
    revocation_data_consistent_check, RevocationCheck, RevocationDatum, RevocationKind,
};
pub use trust::{prospective_chain_check, trusted_certificate_check, TrustCheck};

use chrono::{DateTime, Utc};

/// Rendering of dates inside additional information.
pub(crate) fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S (UTC)").to_string()
}
