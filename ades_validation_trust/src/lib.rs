// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Trust anchor verification.
//!
//! Decides whether a certificate, or a chain of certificates, is anchored in trust at a
//! given instant and for a given usage [`context::Context`]. Trust comes from one or more
//! [`source::TrustedCertificateSource`]s; the [`verifier::TrustAnchorVerifier`] combines
//! them with its configured options.
//!
//! Everything here is a pure query over configuration fixed before validation starts.

pub mod certificate;
pub mod context;
pub mod error;
pub mod ids;
pub mod source;
pub mod trust_time;
pub mod verifier;

pub use certificate::CertificateToken;
pub use context::Context;
pub use ids::CertificateId;
pub use source::{
    CommonTrustedCertificateSource, TrustedCertificateSource, TrustedCertificateSourceRef,
    TrustedListsCertificateSource,
};
pub use trust_time::{CertificateTrustTime, TrustTimeRecord};
pub use verifier::{TrustAnchorOptions, TrustAnchorVerifier, TrustAnchorVerifierBuilder};
