// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Cryptographic suitability checks.
//!
//! The sequence built by [`cryptographic_checks`] mirrors the order a validation report lists
//! them: encryption algorithm, digest algorithm, key size, then the two expiration checks.

use crate::check::{CheckContext, CheckItem, CheckOutcome};
use crate::checks::format_date;
use crate::indication::{Indication, SubIndication};
use crate::message::MessageTag;
use ades_validation_policy::{
    AlgorithmMatch, ConstraintCategory, CryptographicConstraintEvaluator, DigestAlgorithm,
    EncryptionAlgorithm, Level,
};
use ades_validation_trust::CertificateToken;
use chrono::{DateTime, Utc};
use std::fmt;

/// Token whose algorithms are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptographicPosition {
    Signature,
    SigningCertificate,
    CaCertificate,
    Timestamp,
    Revocation,
}

impl CryptographicPosition {
    pub fn id(&self) -> &'static str {
        match self {
            CryptographicPosition::Signature => "SIGNATURE",
            CryptographicPosition::SigningCertificate => "SIGNING_CERTIFICATE",
            CryptographicPosition::CaCertificate => "CA_CERTIFICATE",
            CryptographicPosition::Timestamp => "TIMESTAMP",
            CryptographicPosition::Revocation => "REVOCATION",
        }
    }
}

impl fmt::Display for CryptographicPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Algorithms used to produce a signature.
///
/// The key size stays textual, as reported by the token; non-numeric text never satisfies a
/// key size constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptographicSubject {
    pub digest: DigestAlgorithm,
    pub encryption: EncryptionAlgorithm,
    pub key_size: String,
}

impl CryptographicSubject {
    pub fn new(
        digest: DigestAlgorithm,
        encryption: EncryptionAlgorithm,
        key_size: impl Into<String>,
    ) -> Self {
        Self {
            digest,
            encryption,
            key_size: key_size.into(),
        }
    }

    /// The issuer signature of `certificate`, when known.
    pub fn from_certificate(certificate: &CertificateToken) -> Option<Self> {
        certificate
            .signature_algorithm
            .map(|s| Self::new(s.digest, s.encryption, s.key_size.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptographicRule {
    /// The encryption algorithm is listed as acceptable under its own name.
    EncryptionAlgorithmListed(EncryptionAlgorithm),
    /// The encryption algorithm is only acceptable through its legacy equivalent.
    LegacyEncryptionAlgorithmAlias(EncryptionAlgorithm),
    DigestAlgorithmAcceptable(DigestAlgorithm),
    PublicKeySizeAcceptable {
        algorithm: EncryptionAlgorithm,
        key_size: String,
    },
    DigestAlgorithmNotExpired(DigestAlgorithm),
    EncryptionAlgorithmNotExpired {
        algorithm: EncryptionAlgorithm,
        key_size: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptographicCheck {
    pub position: CryptographicPosition,
    pub rule: CryptographicRule,
}

impl CryptographicCheck {
    pub fn new(position: CryptographicPosition, rule: CryptographicRule) -> Self {
        Self { position, rule }
    }

    pub fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let crypto = ctx.crypto;
        let outcome = match &self.rule {
            CryptographicRule::EncryptionAlgorithmListed(algorithm) => {
                CheckOutcome::from_bool(crypto.is_encryption_algorithm_listed(*algorithm))
                    .with_info(algorithm.name())
            }
            CryptographicRule::LegacyEncryptionAlgorithmAlias(algorithm) => {
                match crypto.encryption_algorithm_match(*algorithm) {
                    AlgorithmMatch::LegacyAlias(alias) => CheckOutcome::passed()
                        .with_info(format!("{} accepted as {}", algorithm, alias)),
                    AlgorithmMatch::Exact | AlgorithmMatch::NoMatch => CheckOutcome::failed(),
                }
            }
            CryptographicRule::DigestAlgorithmAcceptable(algorithm) => {
                CheckOutcome::from_bool(crypto.is_digest_algorithm_reliable(*algorithm))
                    .with_info(algorithm.name())
            }
            CryptographicRule::PublicKeySizeAcceptable {
                algorithm,
                key_size,
            } => {
                let passed =
                    crypto.is_encryption_algorithm_with_key_size_text_reliable(*algorithm, key_size);
                let info = match crypto.minimum_key_size(*algorithm) {
                    Some(minimum) => format!("{algorithm} key size {key_size}, minimum {minimum}"),
                    None => format!("{algorithm} key size {key_size}, no minimum defined"),
                };
                CheckOutcome::from_bool(passed).with_info(with_alias_note(
                    info,
                    *algorithm,
                    crypto.minimum_key_size_match(*algorithm),
                ))
            }
            CryptographicRule::DigestAlgorithmNotExpired(algorithm) => not_expired(
                algorithm.name(),
                crypto.digest_expiration_date(*algorithm),
                ctx.validation_time,
            ),
            CryptographicRule::EncryptionAlgorithmNotExpired {
                algorithm,
                key_size,
            } => {
                let mut outcome = not_expired(
                    &format!("{algorithm} {key_size}"),
                    crypto.expiration_date_for_key_size_text(*algorithm, key_size),
                    ctx.validation_time,
                );
                outcome.additional_info = outcome.additional_info.map(|info| {
                    with_alias_note(info, *algorithm, crypto.expiration_match(*algorithm))
                });
                outcome
            }
        };
        prefix_position(outcome, self.position)
    }
}

/// Without an expiration date the algorithm never expires.
fn not_expired(
    label: &str,
    expiration: Option<DateTime<Utc>>,
    validation_time: DateTime<Utc>,
) -> CheckOutcome {
    match expiration {
        Some(date) => CheckOutcome::from_bool(date >= validation_time)
            .with_info(format!("{label} expires {}", format_date(date))),
        None => CheckOutcome::passed().with_info(format!("{label} has no expiration date")),
    }
}

/// Name the legacy rows when they decided instead of the algorithm's own.
fn with_alias_note(info: String, algorithm: EncryptionAlgorithm, found: AlgorithmMatch) -> String {
    match found {
        AlgorithmMatch::LegacyAlias(alias) => format!("{info}, {algorithm} accepted as {alias}"),
        AlgorithmMatch::Exact | AlgorithmMatch::NoMatch => info,
    }
}

fn prefix_position(mut outcome: CheckOutcome, position: CryptographicPosition) -> CheckOutcome {
    if let Some(info) = outcome.additional_info.take() {
        outcome.additional_info = Some(format!("{position}: {info}"));
    }
    outcome
}

/// Standard cryptographic checks for `subject` at `position`.
///
/// A check is only included when the policy defines a level for it. Expiration checks use the
/// post-update level once `validation_time` is after the suite update date.
pub fn cryptographic_checks(
    subject: &CryptographicSubject,
    position: CryptographicPosition,
    evaluator: &CryptographicConstraintEvaluator,
    validation_time: DateTime<Utc>,
) -> Vec<CheckItem> {
    let check = |rule| CryptographicCheck::new(position, rule);
    let constraints_failure = Some(SubIndication::CryptoConstraintsFailure);
    let expired_no_poe = Some(SubIndication::CryptoConstraintsFailureNoPoe);
    let mut items = Vec::new();

    if let Some(level) = evaluator.level(ConstraintCategory::AcceptableEncryptionAlgorithm) {
        items.push(
            CheckItem::new(
                check(CryptographicRule::EncryptionAlgorithmListed(subject.encryption)),
                MessageTag::EncryptionAlgorithmAcceptable,
                MessageTag::EncryptionAlgorithmAcceptableAnswer,
                level,
            )
            .failure(Indication::Indeterminate, constraints_failure)
            .with_fallback(
                check(CryptographicRule::LegacyEncryptionAlgorithmAlias(
                    subject.encryption,
                )),
                MessageTag::LegacyEncryptionAlgorithmAlias,
            ),
        );
    }

    if let Some(level) = evaluator.level(ConstraintCategory::AcceptableDigestAlgorithm) {
        items.push(
            CheckItem::new(
                check(CryptographicRule::DigestAlgorithmAcceptable(subject.digest)),
                MessageTag::DigestAlgorithmAcceptable,
                MessageTag::DigestAlgorithmAcceptableAnswer,
                level,
            )
            .failure(Indication::Indeterminate, constraints_failure),
        );
    }

    if let Some(level) = evaluator.level(ConstraintCategory::MinimumKeySize) {
        items.push(
            CheckItem::new(
                check(CryptographicRule::PublicKeySizeAcceptable {
                    algorithm: subject.encryption,
                    key_size: subject.key_size.clone(),
                }),
                MessageTag::PublicKeySizeAcceptable,
                MessageTag::PublicKeySizeAcceptableAnswer,
                level,
            )
            .failure(Indication::Indeterminate, constraints_failure),
        );
    }

    if let Some(level) = evaluator.expiration_level_at(validation_time) {
        items.push(
            CheckItem::new(
                check(CryptographicRule::DigestAlgorithmNotExpired(subject.digest)),
                MessageTag::DigestAlgorithmNotExpired,
                MessageTag::DigestAlgorithmNotExpiredAnswer,
                level,
            )
            .failure(Indication::Indeterminate, expired_no_poe),
        );
        items.push(
            CheckItem::new(
                check(CryptographicRule::EncryptionAlgorithmNotExpired {
                    algorithm: subject.encryption,
                    key_size: subject.key_size.clone(),
                }),
                MessageTag::EncryptionAlgorithmNotExpired,
                MessageTag::EncryptionAlgorithmNotExpiredAnswer,
                level,
            )
            .failure(Indication::Indeterminate, expired_no_poe),
        );
    }

    items
}
