// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Algorithm identifiers as they appear in validation policies.

use crate::error::PolicyError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DigestAlgorithm {
    Md2,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Shake128,
    Shake256,
    Ripemd160,
    Whirlpool,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 15] = [
        DigestAlgorithm::Md2,
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
        DigestAlgorithm::Sha3_224,
        DigestAlgorithm::Sha3_256,
        DigestAlgorithm::Sha3_384,
        DigestAlgorithm::Sha3_512,
        DigestAlgorithm::Shake128,
        DigestAlgorithm::Shake256,
        DigestAlgorithm::Ripemd160,
        DigestAlgorithm::Whirlpool,
    ];

    /// Policy name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md2 => "MD2",
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA1",
            DigestAlgorithm::Sha224 => "SHA224",
            DigestAlgorithm::Sha256 => "SHA256",
            DigestAlgorithm::Sha384 => "SHA384",
            DigestAlgorithm::Sha512 => "SHA512",
            DigestAlgorithm::Sha3_224 => "SHA3-224",
            DigestAlgorithm::Sha3_256 => "SHA3-256",
            DigestAlgorithm::Sha3_384 => "SHA3-384",
            DigestAlgorithm::Sha3_512 => "SHA3-512",
            DigestAlgorithm::Shake128 => "SHAKE128",
            DigestAlgorithm::Shake256 => "SHAKE256",
            DigestAlgorithm::Ripemd160 => "RIPEMD160",
            DigestAlgorithm::Whirlpool => "WHIRLPOOL",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| PolicyError::UnknownDigestAlgorithm(s.to_string()))
    }
}

impl From<DigestAlgorithm> for String {
    fn from(value: DigestAlgorithm) -> Self {
        value.name().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EncryptionAlgorithm {
    Rsa,
    RsassaPss,
    Dsa,
    Ecdsa,
    PlainEcdsa,
    X25519,
    X448,
    EdDsa,
    Hmac,
}

impl EncryptionAlgorithm {
    pub const ALL: [EncryptionAlgorithm; 9] = [
        EncryptionAlgorithm::Rsa,
        EncryptionAlgorithm::RsassaPss,
        EncryptionAlgorithm::Dsa,
        EncryptionAlgorithm::Ecdsa,
        EncryptionAlgorithm::PlainEcdsa,
        EncryptionAlgorithm::X25519,
        EncryptionAlgorithm::X448,
        EncryptionAlgorithm::EdDsa,
        EncryptionAlgorithm::Hmac,
    ];

    /// Policy name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            EncryptionAlgorithm::Rsa => "RSA",
            EncryptionAlgorithm::RsassaPss => "RSASSA-PSS",
            EncryptionAlgorithm::Dsa => "DSA",
            EncryptionAlgorithm::Ecdsa => "ECDSA",
            EncryptionAlgorithm::PlainEcdsa => "PLAIN-ECDSA",
            EncryptionAlgorithm::X25519 => "X25519",
            EncryptionAlgorithm::X448 => "X448",
            EncryptionAlgorithm::EdDsa => "EdDSA",
            EncryptionAlgorithm::Hmac => "HMAC",
        }
    }
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncryptionAlgorithm {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| PolicyError::UnknownEncryptionAlgorithm(s.to_string()))
    }
}

impl From<EncryptionAlgorithm> for String {
    fn from(value: EncryptionAlgorithm) -> Self {
        value.name().to_string()
    }
}
