// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test-only fixtures shared by the validation crates.
//!
//! Keeps date construction, certificate tokens and a representative policy in one place so
//! integration tests stay short.

use ades_validation_policy::{
    ConstraintCategory, ConstraintModel, ConstraintModelBuilder, DigestAlgorithm,
    EncryptionAlgorithm, Level,
};
use ades_validation_trust::CertificateToken;
use chrono::{DateTime, TimeZone, Utc};

/// Midnight UTC of the given day.
///
/// Panics on an invalid calendar date; callers are tests.
pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// A certificate valid from 2015-01-01 to 2035-01-01 whose identity derives from `label`.
pub fn certificate(label: &str) -> CertificateToken {
    certificate_valid_between(label, utc(2015, 1, 1), utc(2035, 1, 1))
}

pub fn certificate_valid_between(
    label: &str,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
) -> CertificateToken {
    CertificateToken::new(
        format!("encoded:{label}").into_bytes(),
        format!("CN={label}"),
        not_before,
        not_after,
    )
    .with_issuer(format!("CN={label} Issuer"))
    .with_serial_number(label.len().to_string())
}

/// A leaf certificate with an RSA key and a SHA256withRSA issuer signature.
pub fn rsa_certificate(label: &str, key_size: u32) -> CertificateToken {
    certificate(label)
        .with_public_key(EncryptionAlgorithm::Rsa, key_size)
        .with_signature_algorithm(DigestAlgorithm::Sha256, EncryptionAlgorithm::Rsa, key_size)
}

/// Builder pre-filled with a policy resembling the common default validation policy.
///
/// Digests SHA224 to SHA512 and SHA3-256 are accepted. SHA256 expires on 2030-01-01.
/// RSA keys of 1024 bits expire 2013-01-01, 1900 bits 2022-01-01, 3000 bits 2026-01-01
/// and 4096 bits 2030-01-01.
pub fn default_constraint_model_builder() -> ConstraintModelBuilder {
    ConstraintModel::builder()
        .level(Level::Fail)
        .category_level(ConstraintCategory::ExpirationDate, Level::Fail)
        .acceptable_digest_algorithms([
            DigestAlgorithm::Sha224,
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha384,
            DigestAlgorithm::Sha512,
            DigestAlgorithm::Sha3_256,
        ])
        .acceptable_encryption_algorithms([
            EncryptionAlgorithm::Rsa,
            EncryptionAlgorithm::Dsa,
            EncryptionAlgorithm::Ecdsa,
            EncryptionAlgorithm::PlainEcdsa,
        ])
        .minimum_key_size(EncryptionAlgorithm::Rsa, 1900)
        .minimum_key_size(EncryptionAlgorithm::Dsa, 1900)
        .minimum_key_size(EncryptionAlgorithm::Ecdsa, 256)
        .minimum_key_size(EncryptionAlgorithm::PlainEcdsa, 256)
        .expiration(DigestAlgorithm::Sha224, "2026-01-01")
        .expiration(DigestAlgorithm::Sha256, "2030-01-01")
        .expiration(DigestAlgorithm::Sha384, "2030-01-01")
        .expiration(DigestAlgorithm::Sha512, "2030-01-01")
        .expiration(DigestAlgorithm::Sha3_256, "2030-01-01")
        .expiration_for_key_size(EncryptionAlgorithm::Rsa, 1024, "2013-01-01")
        .expiration_for_key_size(EncryptionAlgorithm::Rsa, 1900, "2022-01-01")
        .expiration_for_key_size(EncryptionAlgorithm::Rsa, 3000, "2026-01-01")
        .expiration_for_key_size(EncryptionAlgorithm::Rsa, 4096, "2030-01-01")
        .expiration_for_key_size(EncryptionAlgorithm::Ecdsa, 256, "2030-01-01")
}

pub fn default_constraint_model() -> ConstraintModel {
    default_constraint_model_builder()
        .build()
        .unwrap_or_else(|e| panic!("default test policy must build: {e}"))
}
