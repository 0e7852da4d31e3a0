// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The chain-of-checks sequencer.
//!
//! Items run in declared order. A failure at `FAIL` level sets the conclusion indication from
//! the failing item and stops the chain; lower levels only add a message.

use crate::check::{CheckContext, CheckItem, CheckOutcome};
use crate::conclusion::{Conclusion, ConstraintRecord, ConstraintStatus};
use crate::indication::Indication;
use crate::message::{Message, MessageTag};
use ades_validation_policy::Level;
use tracing::debug;

/// An ordered sequence of checks against one target.
///
/// A chain holds no execution state; running it twice with the same context yields equal
/// conclusions.
#[derive(Debug, Clone, Default)]
pub struct ValidationChain {
    target_id: String,
    items: Vec<CheckItem>,
}

impl ValidationChain {
    pub fn builder(target_id: impl Into<String>) -> ValidationChainBuilder {
        ValidationChainBuilder::new(target_id)
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn items(&self) -> &[CheckItem] {
        self.items.as_slice()
    }

    /// Run every item and produce the conclusion.
    ///
    /// `success` is the indication when no `FAIL` level item fails.
    pub fn execute(&self, ctx: &CheckContext<'_>, success: Indication) -> Conclusion {
        let mut conclusion = Conclusion::new(self.target_id.clone(), success);

        for item in &self.items {
            if item.level == Level::Ignore {
                conclusion.constraints.push(ConstraintRecord {
                    name: item.name,
                    status: ConstraintStatus::Ignored,
                    answer: None,
                    additional_info: None,
                });
                continue;
            }

            let (outcome, fallback_used) = evaluate_item(item, ctx);
            if outcome.passed {
                if let Some(warning) = fallback_used {
                    conclusion.warnings.push(Message::new(warning));
                }
                if item.info_on_success {
                    conclusion.infos.push(Message::new(item.name));
                }
                conclusion.constraints.push(ConstraintRecord {
                    name: item.name,
                    status: ConstraintStatus::Ok,
                    answer: None,
                    additional_info: outcome.additional_info,
                });
                continue;
            }

            let message = Message::new(item.answer);
            if item.level == Level::Fail {
                conclusion.errors.push(message);
                conclusion.constraints.push(ConstraintRecord {
                    name: item.name,
                    status: ConstraintStatus::NotOk,
                    answer: Some(item.answer),
                    additional_info: outcome.additional_info,
                });
                conclusion.indication = item.indication;
                conclusion.sub_indication = item.sub_indication;
                debug!(
                    target_id = %self.target_id,
                    check = item.name.id(),
                    indication = item.indication.id(),
                    sub_indication = item.sub_indication.map(|s| s.id()).unwrap_or(""),
                    "validation chain halted"
                );
                break;
            }

            let status = if item.level == Level::Warn {
                conclusion.warnings.push(message);
                ConstraintStatus::Warning
            } else {
                conclusion.infos.push(message);
                ConstraintStatus::Information
            };
            conclusion.constraints.push(ConstraintRecord {
                name: item.name,
                status,
                answer: Some(item.answer),
                additional_info: outcome.additional_info,
            });
        }

        conclusion
    }
}

/// Evaluate the primary predicate, then the fallback when the primary fails.
///
/// Returns the fallback warning when the fallback decided the outcome.
fn evaluate_item(
    item: &CheckItem,
    ctx: &CheckContext<'_>,
) -> (CheckOutcome, Option<MessageTag>) {
    let primary = item.kind.evaluate(ctx);
    if primary.passed {
        return (primary, None);
    }

    if let Some(fallback) = &item.fallback {
        let secondary = fallback.kind.evaluate(ctx);
        if secondary.passed {
            return (secondary, Some(fallback.warning));
        }
    }
    (primary, None)
}

pub struct ValidationChainBuilder {
    chain: ValidationChain,
}

impl ValidationChainBuilder {
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            chain: ValidationChain {
                target_id: target_id.into(),
                items: Vec::new(),
            },
        }
    }

    pub fn check(mut self, item: CheckItem) -> Self {
        self.chain.items.push(item);
        self
    }

    pub fn checks(mut self, items: impl IntoIterator<Item = CheckItem>) -> Self {
        self.chain.items.extend(items);
        self
    }

    pub fn build(self) -> ValidationChain {
        self.chain
    }
}
