// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("unknown digest algorithm: {0}")]
    UnknownDigestAlgorithm(String),

    #[error("unknown encryption algorithm: {0}")]
    UnknownEncryptionAlgorithm(String),

    #[error("unknown constraint level: {0}")]
    UnknownLevel(String),

    #[error("duplicate expiration entry for {algorithm} (key size {key_size:?})")]
    DuplicateExpirationEntry {
        algorithm: String,
        key_size: Option<u32>,
    },

    #[error("minimum key size for {0} must be greater than zero")]
    ZeroMinimumKeySize(String),

    #[error("unsupported date pattern letter '{letter}' in '{pattern}'")]
    UnsupportedDatePattern { pattern: String, letter: char },

    #[error("unable to parse '{value}' with format '{format}'")]
    MalformedDate { value: String, format: String },
}
