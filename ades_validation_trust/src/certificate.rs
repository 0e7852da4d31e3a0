// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::ids::CertificateId;
use ades_validation_policy::{DigestAlgorithm, EncryptionAlgorithm};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Public key carried by a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKeyInfo {
    pub algorithm: EncryptionAlgorithm,
    pub key_size: u32,
}

/// Algorithms of the issuer signature over a certificate.
///
/// `key_size` is the size of the issuer key that produced the signature, 0 when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureAlgorithmInfo {
    pub digest: DigestAlgorithm,
    pub encryption: EncryptionAlgorithm,
    pub key_size: u32,
}

/// An already-decoded certificate.
///
/// The encoded bytes are kept only to derive the [`CertificateId`]; every property used by
/// policy checks is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateToken {
    id: CertificateId,
    encoded: Arc<[u8]>,
    pub subject: String,
    pub issuer: String,
    pub serial_number: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub public_key: Option<PublicKeyInfo>,
    pub signature_algorithm: Option<SignatureAlgorithmInfo>,
    pub extension_oids: Vec<String>,
    pub policy_oids: Vec<String>,
}

impl CertificateToken {
    pub fn new(
        encoded: impl Into<Vec<u8>>,
        subject: impl Into<String>,
        not_before: DateTime<Utc>,
        not_after: DateTime<Utc>,
    ) -> Self {
        let encoded: Arc<[u8]> = Arc::from(encoded.into());
        Self {
            id: CertificateId::of_encoded(&encoded),
            encoded,
            subject: subject.into(),
            issuer: String::new(),
            serial_number: String::new(),
            not_before,
            not_after,
            public_key: None,
            signature_algorithm: None,
            extension_oids: Vec::new(),
            policy_oids: Vec::new(),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = serial_number.into();
        self
    }

    pub fn with_public_key(mut self, algorithm: EncryptionAlgorithm, key_size: u32) -> Self {
        self.public_key = Some(PublicKeyInfo {
            algorithm,
            key_size,
        });
        self
    }

    pub fn with_signature_algorithm(
        mut self,
        digest: DigestAlgorithm,
        encryption: EncryptionAlgorithm,
        key_size: u32,
    ) -> Self {
        self.signature_algorithm = Some(SignatureAlgorithmInfo {
            digest,
            encryption,
            key_size,
        });
        self
    }

    pub fn with_extension_oid(mut self, oid: impl Into<String>) -> Self {
        self.extension_oids.push(oid.into());
        self
    }

    pub fn with_policy_oid(mut self, oid: impl Into<String>) -> Self {
        self.policy_oids.push(oid.into());
        self
    }

    pub fn id(&self) -> CertificateId {
        self.id
    }

    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn is_self_issued(&self) -> bool {
        !self.issuer.is_empty() && self.subject == self.issuer
    }

    /// `time` falls within `[notBefore, notAfter]`.
    pub fn is_valid_at(&self, time: DateTime<Utc>) -> bool {
        self.not_before <= time && time <= self.not_after
    }
}
