// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use sha2::{Digest, Sha256};
use std::fmt;

/// Stable identity of a certificate: SHA-256 over its encoded bytes.
///
/// Two tokens carrying the same bytes are the same certificate for every trust lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CertificateId(pub [u8; 32]);

impl CertificateId {
    pub fn of_encoded(encoded: &[u8]) -> Self {
        let digest = Sha256::digest(encoded);
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        CertificateId(out)
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.to_hex())
    }
}
