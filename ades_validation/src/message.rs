// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Stable message identifiers.
//!
//! Report consumers key on [`MessageTag::id`]; the English text is only a default rendering.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTag {
    // cryptographic constraints
    EncryptionAlgorithmAcceptable,
    EncryptionAlgorithmAcceptableAnswer,
    DigestAlgorithmAcceptable,
    DigestAlgorithmAcceptableAnswer,
    PublicKeySizeAcceptable,
    PublicKeySizeAcceptableAnswer,
    DigestAlgorithmNotExpired,
    DigestAlgorithmNotExpiredAnswer,
    EncryptionAlgorithmNotExpired,
    EncryptionAlgorithmNotExpiredAnswer,
    LegacyEncryptionAlgorithmAlias,

    // certificate chain
    CertificateChainAnchored,
    CertificateChainAnchoredAnswer,
    CertificateTrusted,
    CertificateTrustedAnswer,
    CertificateValidityRange,
    CertificateValidityRangeAnswer,
    CertificateValuesMatch,
    CertificateValuesMatchAnswer,

    // revocation
    RevocationDataConsistent,
    RevocationDataConsistentAnswer,
    RevocationConsistent,
    RevocationConsistentCrl,
    RevocationConsistentOcsp,
    RevocationConsistentTl,
    RevocationThisUpdateBefore,
    RevocationNotAfterAfter,

    /// Caller-defined message for custom checks.
    Custom {
        id: &'static str,
        text: &'static str,
    },
}

impl MessageTag {
    pub fn id(&self) -> &'static str {
        match self {
            MessageTag::EncryptionAlgorithmAcceptable => "ASCCM_EAA",
            MessageTag::EncryptionAlgorithmAcceptableAnswer => "ASCCM_EAA_ANS",
            MessageTag::DigestAlgorithmAcceptable => "ASCCM_DAA",
            MessageTag::DigestAlgorithmAcceptableAnswer => "ASCCM_DAA_ANS",
            MessageTag::PublicKeySizeAcceptable => "ASCCM_APKSA",
            MessageTag::PublicKeySizeAcceptableAnswer => "ASCCM_APKSA_ANS",
            MessageTag::DigestAlgorithmNotExpired => "ASCCM_DAED",
            MessageTag::DigestAlgorithmNotExpiredAnswer => "ASCCM_DAED_ANS",
            MessageTag::EncryptionAlgorithmNotExpired => "ASCCM_EAED",
            MessageTag::EncryptionAlgorithmNotExpiredAnswer => "ASCCM_EAED_ANS",
            MessageTag::LegacyEncryptionAlgorithmAlias => "ASCCM_EAA_LEGACY",
            MessageTag::CertificateChainAnchored => "BBB_XCV_CCCBB",
            MessageTag::CertificateChainAnchoredAnswer => "BBB_XCV_CCCBB_ANS",
            MessageTag::CertificateTrusted => "BBB_XCV_ICTA",
            MessageTag::CertificateTrustedAnswer => "BBB_XCV_ICTA_ANS",
            MessageTag::CertificateValidityRange => "BBB_XCV_ICTIVRSC",
            MessageTag::CertificateValidityRangeAnswer => "BBB_XCV_ICTIVRSC_ANS",
            MessageTag::CertificateValuesMatch => "BBB_XCV_ICVM",
            MessageTag::CertificateValuesMatchAnswer => "BBB_XCV_ICVM_ANS",
            MessageTag::RevocationDataConsistent => "BBB_XCV_IRDC",
            MessageTag::RevocationDataConsistentAnswer => "BBB_XCV_IRDC_ANS",
            MessageTag::RevocationConsistent => "REVOCATION_CONSISTENT",
            MessageTag::RevocationConsistentCrl => "REVOCATION_CONSISTENT_CRL",
            MessageTag::RevocationConsistentOcsp => "REVOCATION_CONSISTENT_OCSP",
            MessageTag::RevocationConsistentTl => "REVOCATION_CONSISTENT_TL",
            MessageTag::RevocationThisUpdateBefore => "REVOCATION_THIS_UPDATE_BEFORE",
            MessageTag::RevocationNotAfterAfter => "REVOCATION_NOT_AFTER_AFTER",
            MessageTag::Custom { id, .. } => id,
        }
    }

    /// Default English rendering.
    pub fn text(&self) -> &'static str {
        match self {
            MessageTag::EncryptionAlgorithmAcceptable => {
                "Is the encryption algorithm acceptable?"
            }
            MessageTag::EncryptionAlgorithmAcceptableAnswer => {
                "The encryption algorithm is not authorised!"
            }
            MessageTag::DigestAlgorithmAcceptable => "Is the digest algorithm acceptable?",
            MessageTag::DigestAlgorithmAcceptableAnswer => {
                "The digest algorithm is not authorised!"
            }
            MessageTag::PublicKeySizeAcceptable => "Is the public key size acceptable?",
            MessageTag::PublicKeySizeAcceptableAnswer => "The public key size is too small!",
            MessageTag::DigestAlgorithmNotExpired => {
                "Is the digest algorithm reliable at the validation time?"
            }
            MessageTag::DigestAlgorithmNotExpiredAnswer => {
                "The digest algorithm is expired at the validation time!"
            }
            MessageTag::EncryptionAlgorithmNotExpired => {
                "Is the encryption algorithm with the key size reliable at the validation time?"
            }
            MessageTag::EncryptionAlgorithmNotExpiredAnswer => {
                "The encryption algorithm with the key size is expired at the validation time!"
            }
            MessageTag::LegacyEncryptionAlgorithmAlias => {
                "The encryption algorithm is only accepted through its legacy RSA equivalent."
            }
            MessageTag::CertificateChainAnchored => {
                "Can the certificate chain be built till a trust anchor?"
            }
            MessageTag::CertificateChainAnchoredAnswer => {
                "The certificate chain is not trusted, it does not contain a trust anchor."
            }
            MessageTag::CertificateTrusted => "Is the certificate a trust anchor?",
            MessageTag::CertificateTrustedAnswer => "The certificate is not a trust anchor!",
            MessageTag::CertificateValidityRange => {
                "Is the validation time in the validity range of the certificate?"
            }
            MessageTag::CertificateValidityRangeAnswer => {
                "The validation time is not in the validity range of the certificate!"
            }
            MessageTag::CertificateValuesMatch => {
                "Does the certificate contain an expected extension or certificate policy?"
            }
            MessageTag::CertificateValuesMatchAnswer => {
                "The certificate contains none of the expected extensions or certificate policies!"
            }
            MessageTag::RevocationDataConsistent => "Is the revocation data consistent?",
            MessageTag::RevocationDataConsistentAnswer => {
                "The revocation data is not consistent!"
            }
            MessageTag::RevocationConsistent => {
                "Revocation thisUpdate is in the certificate validity range"
            }
            MessageTag::RevocationConsistentCrl => {
                "Revocation thisUpdate and expiredCertsOnCRL are in the certificate validity range"
            }
            MessageTag::RevocationConsistentOcsp => {
                "Revocation thisUpdate and archiveCutOff are in the certificate validity range"
            }
            MessageTag::RevocationConsistentTl => {
                "Revocation thisUpdate and ExpiredCertsRevocationInfo are in the certificate validity range"
            }
            MessageTag::RevocationThisUpdateBefore => {
                "Revocation thisUpdate is before the certificate notBefore"
            }
            MessageTag::RevocationNotAfterAfter => {
                "The certificate notAfter is before the revocation cutoff date"
            }
            MessageTag::Custom { text, .. } => text,
        }
    }
}

impl fmt::Display for MessageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A keyed message attached to a conclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub key: &'static str,
    pub text: String,
}

impl Message {
    pub fn new(tag: MessageTag) -> Self {
        Self {
            key: tag.id(),
            text: tag.text().to_string(),
        }
    }

    /// Same key, text extended with `detail`.
    pub fn with_detail(tag: MessageTag, detail: &str) -> Self {
        Self {
            key: tag.id(),
            text: format!("{} ({detail})", tag.text()),
        }
    }
}
