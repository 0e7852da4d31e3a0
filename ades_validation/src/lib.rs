// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Chain-of-checks engine for AdES validation building blocks.
//!
//! A [`chain::ValidationChain`] runs an ordered list of [`check::CheckItem`]s against one
//! target and produces one [`conclusion::Conclusion`]. Checks read policy through a
//! [`ades_validation_policy::CryptographicConstraintEvaluator`] and trust anchors through an
//! [`ades_validation_trust::TrustAnchorVerifier`], both passed in a [`check::CheckContext`].
//!
//! The [`checks`] module holds the check variants and builders for the standard checks.

pub mod chain;
pub mod check;
pub mod checks;
pub mod conclusion;
pub mod indication;
pub mod message;

pub use chain::{ValidationChain, ValidationChainBuilder};
pub use check::{CheckContext, CheckItem, CheckKind, CheckOutcome, CustomCheck};
pub use conclusion::{Conclusion, ConstraintRecord, ConstraintStatus};
pub use indication::{Indication, SubIndication};
pub use message::{Message, MessageTag};

pub use ades_validation_policy as policy;
pub use ades_validation_trust as trust;
