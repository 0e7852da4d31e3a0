// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Validation policy model and cryptographic constraint evaluation.
//!
//! A [`model::ConstraintModel`] is the already-parsed, immutable cryptographic section of a
//! validation policy. The [`evaluator::CryptographicConstraintEvaluator`] answers
//! reliability and expiration questions against it.
//!
//! An absent policy is a valid input: every query then answers "not accepted" instead of
//! failing.

pub mod algorithms;
pub mod dates;
pub mod error;
pub mod evaluator;
mod legacy;
pub mod level;
pub mod model;
pub mod shared;

pub use algorithms::{DigestAlgorithm, EncryptionAlgorithm};
pub use evaluator::{AlgorithmMatch, CryptographicConstraintEvaluator};
pub use level::{ConstraintCategory, Level};
pub use model::{ConstraintModel, ConstraintModelBuilder};
