// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Check items processed by a [`crate::chain::ValidationChain`].
//!
//! A check is data: what to evaluate ([`CheckKind`]), how severe a failure is ([`Level`]),
//! which messages to report and which indication a terminating failure produces.

use crate::checks::certificate::CertificateCheck;
use crate::checks::cryptographic::CryptographicCheck;
use crate::checks::revocation::RevocationCheck;
use crate::checks::trust::TrustCheck;
use crate::indication::{Indication, SubIndication};
use crate::message::MessageTag;
use ades_validation_policy::{CryptographicConstraintEvaluator, Level};
use ades_validation_trust::TrustAnchorVerifier;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Inputs shared by every check of one execution.
///
/// The validation time always comes from the caller; checks never read a clock.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub validation_time: DateTime<Utc>,
    pub crypto: &'a CryptographicConstraintEvaluator,
    pub trust: &'a TrustAnchorVerifier,
}

impl<'a> CheckContext<'a> {
    pub fn new(
        validation_time: DateTime<Utc>,
        crypto: &'a CryptographicConstraintEvaluator,
        trust: &'a TrustAnchorVerifier,
    ) -> Self {
        Self {
            validation_time,
            crypto,
            trust,
        }
    }
}

/// Result of evaluating one predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub passed: bool,
    pub additional_info: Option<String>,
}

impl CheckOutcome {
    pub fn passed() -> Self {
        Self {
            passed: true,
            additional_info: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            passed: false,
            additional_info: None,
        }
    }

    pub fn from_bool(passed: bool) -> Self {
        Self {
            passed,
            additional_info: None,
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = Some(info.into());
        self
    }
}

pub type CustomPredicate = Arc<dyn Fn(&CheckContext<'_>) -> CheckOutcome + Send + Sync>;

/// A caller-supplied predicate.
#[derive(Clone)]
pub struct CustomCheck {
    name: &'static str,
    predicate: CustomPredicate,
}

impl CustomCheck {
    pub fn new<F>(name: &'static str, predicate: F) -> Self
    where
        F: Fn(&CheckContext<'_>) -> CheckOutcome + Send + Sync + 'static,
    {
        Self {
            name,
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        (self.predicate)(ctx)
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCheck")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The closed set of predicates a chain can evaluate.
#[derive(Debug, Clone)]
pub enum CheckKind {
    Certificate(CertificateCheck),
    Cryptographic(CryptographicCheck),
    Trust(TrustCheck),
    Revocation(RevocationCheck),
    Custom(CustomCheck),
}

impl CheckKind {
    pub fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        match self {
            CheckKind::Certificate(check) => check.evaluate(ctx),
            CheckKind::Cryptographic(check) => check.evaluate(ctx),
            CheckKind::Trust(check) => check.evaluate(ctx),
            CheckKind::Revocation(check) => check.evaluate(ctx),
            CheckKind::Custom(check) => check.evaluate(ctx),
        }
    }
}

impl From<CertificateCheck> for CheckKind {
    fn from(check: CertificateCheck) -> Self {
        CheckKind::Certificate(check)
    }
}

impl From<CryptographicCheck> for CheckKind {
    fn from(check: CryptographicCheck) -> Self {
        CheckKind::Cryptographic(check)
    }
}

impl From<TrustCheck> for CheckKind {
    fn from(check: TrustCheck) -> Self {
        CheckKind::Trust(check)
    }
}

impl From<RevocationCheck> for CheckKind {
    fn from(check: RevocationCheck) -> Self {
        CheckKind::Revocation(check)
    }
}

impl From<CustomCheck> for CheckKind {
    fn from(check: CustomCheck) -> Self {
        CheckKind::Custom(check)
    }
}

/// Second chance for a failed predicate.
///
/// When it holds, the item passes and `warning` is reported.
#[derive(Debug, Clone)]
pub struct Fallback {
    pub kind: CheckKind,
    pub warning: MessageTag,
}

/// One step of a validation chain.
#[derive(Debug, Clone)]
pub struct CheckItem {
    pub(crate) kind: CheckKind,
    pub(crate) name: MessageTag,
    pub(crate) answer: MessageTag,
    pub(crate) level: Level,
    pub(crate) indication: Indication,
    pub(crate) sub_indication: Option<SubIndication>,
    pub(crate) fallback: Option<Fallback>,
    pub(crate) info_on_success: bool,
}

impl CheckItem {
    /// A check failing with `INDETERMINATE` and no sub-indication unless configured otherwise.
    pub fn new(
        kind: impl Into<CheckKind>,
        name: MessageTag,
        answer: MessageTag,
        level: Level,
    ) -> Self {
        Self {
            kind: kind.into(),
            name,
            answer,
            level,
            indication: Indication::Indeterminate,
            sub_indication: None,
            fallback: None,
            info_on_success: false,
        }
    }

    /// Indication and sub-indication of the conclusion when this item fails at FAIL level.
    pub fn failure(mut self, indication: Indication, sub_indication: Option<SubIndication>) -> Self {
        self.indication = indication;
        self.sub_indication = sub_indication;
        self
    }

    pub fn with_fallback(mut self, kind: impl Into<CheckKind>, warning: MessageTag) -> Self {
        self.fallback = Some(Fallback {
            kind: kind.into(),
            warning,
        });
        self
    }

    /// Report an info message when the predicate holds.
    pub fn info_on_success(mut self) -> Self {
        self.info_on_success = true;
        self
    }

    pub fn kind(&self) -> &CheckKind {
        &self.kind
    }

    pub fn name(&self) -> MessageTag {
        self.name
    }

    pub fn answer(&self) -> MessageTag {
        self.answer
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn indication(&self) -> Indication {
        self.indication
    }

    pub fn sub_indication(&self) -> Option<SubIndication> {
        self.sub_indication
    }

    pub fn fallback(&self) -> Option<&Fallback> {
        self.fallback.as_ref()
    }
}
