// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Consistency of revocation data with the certificate it is about.
//!
//! Revocation data is consistent when it was issued inside the certificate validity range,
//! or when the issuer keeps revocation information for expired certificates since a cutoff
//! date that is itself inside the range.

use crate::check::{CheckContext, CheckItem, CheckOutcome};
use crate::checks::format_date;
use crate::indication::{Indication, SubIndication};
use crate::message::MessageTag;
use ades_validation_policy::Level;
use ades_validation_trust::CertificateToken;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationKind {
    Crl,
    Ocsp,
}

/// Already-extracted facts of one CRL or OCSP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationDatum {
    pub id: String,
    pub kind: RevocationKind,
    pub this_update: DateTime<Utc>,
    /// `expiredCertsOnCRL` CRL extension.
    pub expired_certs_on_crl: Option<DateTime<Utc>>,
    /// `archiveCutoff` OCSP extension.
    pub archive_cutoff: Option<DateTime<Utc>>,
}

impl RevocationDatum {
    pub fn crl(id: impl Into<String>, this_update: DateTime<Utc>) -> Self {
        Self::new(id, RevocationKind::Crl, this_update)
    }

    pub fn ocsp(id: impl Into<String>, this_update: DateTime<Utc>) -> Self {
        Self::new(id, RevocationKind::Ocsp, this_update)
    }

    fn new(id: impl Into<String>, kind: RevocationKind, this_update: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            kind,
            this_update,
            expired_certs_on_crl: None,
            archive_cutoff: None,
        }
    }

    pub fn with_expired_certs_on_crl(mut self, date: DateTime<Utc>) -> Self {
        self.expired_certs_on_crl = Some(date);
        self
    }

    pub fn with_archive_cutoff(mut self, date: DateTime<Utc>) -> Self {
        self.archive_cutoff = Some(date);
        self
    }

    /// Cutoff carried by the revocation data itself; only the extension matching the kind
    /// counts.
    fn embedded_cutoff(&self) -> Option<(DateTime<Utc>, MessageTag, &'static str)> {
        match self.kind {
            RevocationKind::Crl => self
                .expired_certs_on_crl
                .map(|d| (d, MessageTag::RevocationConsistentCrl, "expiredCertsOnCRL")),
            RevocationKind::Ocsp => self
                .archive_cutoff
                .map(|d| (d, MessageTag::RevocationConsistentOcsp, "archiveCutOff")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RevocationCheck {
    pub certificate: CertificateToken,
    pub revocation: RevocationDatum,
    /// `ExpiredCertsRevocationInfo` of the trusted service that issued the certificate.
    pub expired_certs_revocation_info: Option<DateTime<Utc>>,
}

/// Which explanation applies, and the date it is about.
struct Assessment {
    consistent: bool,
    explanation: MessageTag,
    /// The cutoff compared with `notAfter`, with its label.
    cutoff: Option<(&'static str, DateTime<Utc>)>,
}

impl RevocationCheck {
    pub fn evaluate(&self, _ctx: &CheckContext<'_>) -> CheckOutcome {
        let assessment = self.assess();
        let mut info = format!(
            "{}: thisUpdate {}",
            assessment.explanation.text(),
            format_date(self.revocation.this_update)
        );
        if let Some((label, date)) = assessment.cutoff {
            info.push_str(&format!(", {label} {}", format_date(date)));
        }
        info.push_str(&format!(
            ", certificate validity {} - {}",
            format_date(self.certificate.not_before),
            format_date(self.certificate.not_after)
        ));
        CheckOutcome::from_bool(assessment.consistent).with_info(info)
    }

    /// Stable key of the explanation reported as additional information.
    pub fn explanation(&self) -> MessageTag {
        self.assess().explanation
    }

    fn assess(&self) -> Assessment {
        let this_update = self.revocation.this_update;
        if this_update < self.certificate.not_before {
            return Assessment {
                consistent: false,
                explanation: MessageTag::RevocationThisUpdateBefore,
                cutoff: None,
            };
        }

        let (date, explanation, cutoff) = match self.revocation.embedded_cutoff().or_else(|| {
            self.expired_certs_revocation_info.map(|d| {
                (
                    d,
                    MessageTag::RevocationConsistentTl,
                    "ExpiredCertsRevocationInfo",
                )
            })
        }) {
            Some((date, tag, label)) => (date, tag, Some((label, date))),
            None => (this_update, MessageTag::RevocationConsistent, None),
        };

        if date <= self.certificate.not_after {
            Assessment {
                consistent: true,
                explanation,
                cutoff,
            }
        } else {
            Assessment {
                consistent: false,
                explanation: MessageTag::RevocationNotAfterAfter,
                cutoff,
            }
        }
    }
}

/// Is the revocation data about `certificate` consistent with its validity range.
pub fn revocation_data_consistent_check(
    certificate: CertificateToken,
    revocation: RevocationDatum,
    expired_certs_revocation_info: Option<DateTime<Utc>>,
    level: Level,
) -> CheckItem {
    CheckItem::new(
        RevocationCheck {
            certificate,
            revocation,
            expired_certs_revocation_info,
        },
        MessageTag::RevocationDataConsistent,
        MessageTag::RevocationDataConsistentAnswer,
        level,
    )
    .failure(Indication::Indeterminate, Some(SubIndication::TryLater))
}
