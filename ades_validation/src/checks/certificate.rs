// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::check::{CheckContext, CheckItem, CheckOutcome};
use crate::checks::format_date;
use crate::indication::{Indication, SubIndication};
use crate::message::MessageTag;
use ades_validation_policy::Level;
use ades_validation_trust::CertificateToken;

/// Expected value meaning "any value, as long as one is present".
pub const ANY_VALUE: &str = "*";

/// Expected certificate extensions and policies.
///
/// A certificate satisfies the constraint when it carries one of the expected extensions or
/// one of the expected policies. An empty list never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateValuesConstraint {
    pub extensions: Vec<String>,
    pub policies: Vec<String>,
}

impl CertificateValuesConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extension(mut self, oid: impl Into<String>) -> Self {
        self.extensions.push(oid.into());
        self
    }

    pub fn policy(mut self, oid: impl Into<String>) -> Self {
        self.policies.push(oid.into());
        self
    }

    pub fn is_satisfied_by(&self, certificate: &CertificateToken) -> bool {
        values_match(&certificate.extension_oids, &self.extensions)
            || values_match(&certificate.policy_oids, &self.policies)
    }
}

#[derive(Debug, Clone)]
pub enum CertificateCheck {
    /// The validation time is within `[notBefore, notAfter]`.
    ValidityRange { certificate: CertificateToken },
    /// An expected extension or an expected policy is present.
    Values {
        certificate: CertificateToken,
        constraint: CertificateValuesConstraint,
    },
}

impl CertificateCheck {
    pub fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        match self {
            CertificateCheck::ValidityRange { certificate } => {
                CheckOutcome::from_bool(certificate.is_valid_at(ctx.validation_time)).with_info(
                    format!(
                        "validation time {}, certificate validity {} - {}",
                        format_date(ctx.validation_time),
                        format_date(certificate.not_before),
                        format_date(certificate.not_after)
                    ),
                )
            }
            CertificateCheck::Values {
                certificate,
                constraint,
            } => CheckOutcome::from_bool(constraint.is_satisfied_by(certificate)).with_info(
                format!(
                    "extensions [{}], policies [{}]",
                    certificate.extension_oids.join(", "),
                    certificate.policy_oids.join(", ")
                ),
            ),
        }
    }
}

fn values_match(values: &[String], expected: &[String]) -> bool {
    if expected.is_empty() || values.is_empty() {
        return false;
    }
    expected.iter().any(|e| e == ANY_VALUE) || values.iter().any(|v| expected.contains(v))
}

/// Is the validation time inside the certificate validity range.
pub fn certificate_validity_check(certificate: CertificateToken, level: Level) -> CheckItem {
    CheckItem::new(
        CertificateCheck::ValidityRange { certificate },
        MessageTag::CertificateValidityRange,
        MessageTag::CertificateValidityRangeAnswer,
        level,
    )
    .failure(Indication::Indeterminate, Some(SubIndication::OutOfBoundsNoPoe))
}

/// Does the certificate carry an expected extension or policy ([`ANY_VALUE`] accepts any).
pub fn certificate_values_check(
    certificate: CertificateToken,
    constraint: CertificateValuesConstraint,
    level: Level,
) -> CheckItem {
    CheckItem::new(
        CertificateCheck::Values {
            certificate,
            constraint,
        },
        MessageTag::CertificateValuesMatch,
        MessageTag::CertificateValuesMatchAnswer,
        level,
    )
    .failure(
        Indication::Indeterminate,
        Some(SubIndication::ChainConstraintsFailure),
    )
}
