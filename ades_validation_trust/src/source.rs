// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Trusted certificate sources.
//!
//! A source answers two questions for a certificate: is it a member, and during which
//! windows (per usage context) is it trusted. Sources are owned by their producer (a trusted
//! list loader, a keystore) and only read by the verifier.

use crate::certificate::CertificateToken;
use crate::context::Context;
use crate::ids::CertificateId;
use crate::trust_time::{CertificateTrustTime, TrustTimeRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

pub trait TrustedCertificateSource: Send + Sync {
    /// Stable source name for diagnostics.
    fn name(&self) -> &'static str;

    fn contains(&self, certificate: &CertificateToken) -> bool;

    /// Trust windows of `certificate` applicable to `context` (`None` = every context).
    ///
    /// Empty for certificates the source does not contain.
    fn trust_times(
        &self,
        certificate: &CertificateToken,
        context: Option<Context>,
    ) -> Vec<CertificateTrustTime>;
}

pub type TrustedCertificateSourceRef = Arc<dyn TrustedCertificateSource>;

/// A plain set of trust anchors, each trusted at any time and in any context.
#[derive(Debug, Clone, Default)]
pub struct CommonTrustedCertificateSource {
    certificates: BTreeMap<CertificateId, CertificateToken>,
}

impl CommonTrustedCertificateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_certificates(certificates: impl IntoIterator<Item = CertificateToken>) -> Self {
        let mut source = Self::new();
        for certificate in certificates {
            source.add_certificate(certificate);
        }
        source
    }

    pub fn add_certificate(&mut self, certificate: CertificateToken) {
        self.certificates.insert(certificate.id(), certificate);
    }

    pub fn certificates(&self) -> impl Iterator<Item = &CertificateToken> {
        self.certificates.values()
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}

impl TrustedCertificateSource for CommonTrustedCertificateSource {
    fn name(&self) -> &'static str {
        "common"
    }

    fn contains(&self, certificate: &CertificateToken) -> bool {
        self.certificates.contains_key(&certificate.id())
    }

    fn trust_times(
        &self,
        certificate: &CertificateToken,
        _context: Option<Context>,
    ) -> Vec<CertificateTrustTime> {
        if self.contains(certificate) {
            vec![CertificateTrustTime::unbounded()]
        } else {
            Vec::new()
        }
    }
}

/// Trust anchors coming from trusted lists, with per-context trust windows.
///
/// A certificate may be listed with no window at all; it is then a member that is never
/// trusted.
#[derive(Debug, Clone, Default)]
pub struct TrustedListsCertificateSource {
    records: BTreeMap<CertificateId, (CertificateToken, Vec<TrustTimeRecord>)>,
}

impl TrustedListsCertificateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record of the source.
    pub fn set_trust_time_by_certificates(
        &mut self,
        records: impl IntoIterator<Item = (CertificateToken, Vec<TrustTimeRecord>)>,
    ) {
        self.records.clear();
        for (certificate, windows) in records {
            self.records
                .entry(certificate.id())
                .or_insert_with(|| (certificate, Vec::new()))
                .1
                .extend(windows);
        }
    }

    pub fn add_trust_time(&mut self, certificate: CertificateToken, record: TrustTimeRecord) {
        self.records
            .entry(certificate.id())
            .or_insert_with(|| (certificate, Vec::new()))
            .1
            .push(record);
    }

    /// Records of `certificate` regardless of context.
    pub fn records(&self, certificate: &CertificateToken) -> &[TrustTimeRecord] {
        self.records
            .get(&certificate.id())
            .map(|(_, records)| records.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TrustedCertificateSource for TrustedListsCertificateSource {
    fn name(&self) -> &'static str {
        "trusted_lists"
    }

    fn contains(&self, certificate: &CertificateToken) -> bool {
        self.records.contains_key(&certificate.id())
    }

    fn trust_times(
        &self,
        certificate: &CertificateToken,
        context: Option<Context>,
    ) -> Vec<CertificateTrustTime> {
        self.records(certificate)
            .iter()
            .filter(|record| record.applies_to(context))
            .map(|record| record.window)
            .collect()
    }
}
