// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::certificate::CertificateToken;
use crate::context::Context;
use crate::source::TrustedCertificateSourceRef;
use crate::trust_time::CertificateTrustTime;
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::debug;

/// Options controlling trust anchor decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustAnchorOptions {
    /// When true a trust anchor is trusted only inside its trust windows. When false only the
    /// start of the windows is enforced.
    pub use_sunset_date: bool,
    /// Treat every certificate as trusted in the timestamp context.
    pub accept_timestamp_untrusted_certificate_chains: bool,
    /// Treat every certificate as trusted in the revocation context.
    pub accept_revocation_untrusted_certificate_chains: bool,
}

impl Default for TrustAnchorOptions {
    fn default() -> Self {
        Self {
            use_sunset_date: true,
            accept_timestamp_untrusted_certificate_chains: false,
            accept_revocation_untrusted_certificate_chains: false,
        }
    }
}

/// Decides whether certificates and chains are anchored in trust.
///
/// Build it once, then share it (`&TrustAnchorVerifier` or `Arc`) between validations. The
/// `set_*` methods need `&mut self`, so reconfiguration cannot overlap with queries.
///
/// Without any source nothing is trusted.
#[derive(Clone, Default)]
pub struct TrustAnchorVerifier {
    sources: Vec<TrustedCertificateSourceRef>,
    options: TrustAnchorOptions,
}

impl fmt::Debug for TrustAnchorVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&'static str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("TrustAnchorVerifier")
            .field("sources", &names)
            .field("options", &self.options)
            .finish()
    }
}

impl TrustAnchorVerifier {
    pub fn new(sources: Vec<TrustedCertificateSourceRef>, options: TrustAnchorOptions) -> Self {
        Self { sources, options }
    }

    pub fn builder() -> TrustAnchorVerifierBuilder {
        TrustAnchorVerifierBuilder::new()
    }

    pub fn options(&self) -> TrustAnchorOptions {
        self.options
    }

    pub fn sources(&self) -> &[TrustedCertificateSourceRef] {
        self.sources.as_slice()
    }

    /// Replace all configured sources with `source`.
    pub fn set_trusted_certificate_source(&mut self, source: TrustedCertificateSourceRef) {
        self.sources = vec![source];
    }

    pub fn add_trusted_certificate_source(&mut self, source: TrustedCertificateSourceRef) {
        self.sources.push(source);
    }

    pub fn set_use_sunset_date(&mut self, use_sunset_date: bool) {
        self.options.use_sunset_date = use_sunset_date;
    }

    pub fn set_accept_timestamp_untrusted_certificate_chains(&mut self, accept: bool) {
        self.options.accept_timestamp_untrusted_certificate_chains = accept;
    }

    pub fn set_accept_revocation_untrusted_certificate_chains(&mut self, accept: bool) {
        self.options.accept_revocation_untrusted_certificate_chains = accept;
    }

    /// Trust at `time`, considering every usage context.
    pub fn is_trusted_at_time(&self, certificate: &CertificateToken, time: DateTime<Utc>) -> bool {
        self.decide(certificate, time, None)
    }

    pub fn is_trusted_at_time_in_context(
        &self,
        certificate: &CertificateToken,
        time: DateTime<Utc>,
        context: Context,
    ) -> bool {
        self.decide(certificate, time, Some(context))
    }

    /// A chain is trusted as soon as one of its certificates is.
    pub fn is_trusted_certificate_chain(
        &self,
        chain: &[CertificateToken],
        time: DateTime<Utc>,
    ) -> bool {
        chain.iter().any(|c| self.is_trusted_at_time(c, time))
    }

    pub fn is_trusted_certificate_chain_in_context(
        &self,
        chain: &[CertificateToken],
        time: DateTime<Utc>,
        context: Context,
    ) -> bool {
        chain
            .iter()
            .any(|c| self.is_trusted_at_time_in_context(c, time, context))
    }

    fn accepts_untrusted(&self, context: Option<Context>) -> bool {
        match context {
            Some(Context::Timestamp) => self.options.accept_timestamp_untrusted_certificate_chains,
            Some(Context::Revocation) => {
                self.options.accept_revocation_untrusted_certificate_chains
            }
            Some(Context::Signature) | None => false,
        }
    }

    fn decide(
        &self,
        certificate: &CertificateToken,
        time: DateTime<Utc>,
        context: Option<Context>,
    ) -> bool {
        if self.accepts_untrusted(context) {
            return true;
        }

        let mut member = false;
        let mut windows: Vec<CertificateTrustTime> = Vec::new();
        for source in &self.sources {
            if source.contains(certificate) {
                member = true;
                windows.extend(source.trust_times(certificate, context));
            }
        }
        if !member {
            return false;
        }

        let trusted = if self.options.use_sunset_date {
            windows.iter().any(|w| w.is_trusted_at_time(time))
        } else {
            earliest_start(&windows).is_some_and(|start| start.map_or(true, |s| s <= time))
        };

        debug!(
            certificate = %certificate.id(),
            context = context.map(|c| c.id()).unwrap_or("ALL"),
            windows = windows.len(),
            trusted,
            "trust anchor decision"
        );
        trusted
    }
}

/// Earliest start among `windows`; `Some(None)` when one of them has an open start.
fn earliest_start(windows: &[CertificateTrustTime]) -> Option<Option<DateTime<Utc>>> {
    let first = windows.first()?;
    Some(windows.iter().skip(1).fold(first.start(), |earliest, w| {
        match (earliest, w.start()) {
            (None, _) | (_, None) => None,
            (Some(a), Some(b)) => Some(a.min(b)),
        }
    }))
}

#[derive(Default)]
pub struct TrustAnchorVerifierBuilder {
    verifier: TrustAnchorVerifier,
}

impl TrustAnchorVerifierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trusted certificate source. Sources are combined as a union.
    pub fn trusted_certificate_source(mut self, source: TrustedCertificateSourceRef) -> Self {
        self.verifier.sources.push(source);
        self
    }

    pub fn options(mut self, options: TrustAnchorOptions) -> Self {
        self.verifier.options = options;
        self
    }

    pub fn use_sunset_date(mut self, use_sunset_date: bool) -> Self {
        self.verifier.options.use_sunset_date = use_sunset_date;
        self
    }

    pub fn accept_timestamp_untrusted_certificate_chains(mut self, accept: bool) -> Self {
        self.verifier.options.accept_timestamp_untrusted_certificate_chains = accept;
        self
    }

    pub fn accept_revocation_untrusted_certificate_chains(mut self, accept: bool) -> Self {
        self.verifier.options.accept_revocation_untrusted_certificate_chains = accept;
        self
    }

    pub fn build(self) -> TrustAnchorVerifier {
        self.verifier
    }
}
