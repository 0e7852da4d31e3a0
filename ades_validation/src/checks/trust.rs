// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::check::{CheckContext, CheckItem, CheckOutcome};
use crate::indication::{Indication, SubIndication};
use crate::message::MessageTag;
use ades_validation_policy::Level;
use ades_validation_trust::{CertificateToken, Context};

/// Trust anchor checks. `context: None` asks about every usage context.
#[derive(Debug, Clone)]
pub enum TrustCheck {
    CertificateTrusted {
        certificate: CertificateToken,
        context: Option<Context>,
    },
    /// At least one certificate of `chain` is a trust anchor.
    ChainAnchored {
        chain: Vec<CertificateToken>,
        context: Option<Context>,
    },
}

impl TrustCheck {
    pub fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let time = ctx.validation_time;
        let trusted = |certificate: &CertificateToken, context: Option<Context>| match context {
            Some(context) => ctx
                .trust
                .is_trusted_at_time_in_context(certificate, time, context),
            None => ctx.trust.is_trusted_at_time(certificate, time),
        };

        match self {
            TrustCheck::CertificateTrusted {
                certificate,
                context,
            } => CheckOutcome::from_bool(trusted(certificate, *context)),
            TrustCheck::ChainAnchored { chain, context } => {
                match chain.iter().find(|c| trusted(*c, *context)) {
                    Some(anchor) => {
                        CheckOutcome::passed().with_info(format!("trust anchor {}", anchor.id()))
                    }
                    None => CheckOutcome::failed(),
                }
            }
        }
    }
}

/// Can the chain be anchored in a trusted certificate.
pub fn prospective_chain_check(
    chain: Vec<CertificateToken>,
    context: Option<Context>,
    level: Level,
) -> CheckItem {
    CheckItem::new(
        TrustCheck::ChainAnchored { chain, context },
        MessageTag::CertificateChainAnchored,
        MessageTag::CertificateChainAnchoredAnswer,
        level,
    )
    .failure(
        Indication::Indeterminate,
        Some(SubIndication::NoCertificateChainFound),
    )
}

/// Is `certificate` itself a trust anchor.
pub fn trusted_certificate_check(
    certificate: CertificateToken,
    context: Option<Context>,
    level: Level,
) -> CheckItem {
    CheckItem::new(
        TrustCheck::CertificateTrusted {
            certificate,
            context,
        },
        MessageTag::CertificateTrusted,
        MessageTag::CertificateTrustedAnswer,
        level,
    )
    .failure(
        Indication::Indeterminate,
        Some(SubIndication::NoCertificateChainFound),
    )
}
