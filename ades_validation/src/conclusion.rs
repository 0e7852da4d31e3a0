// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::indication::{Indication, SubIndication};
use crate::message::{Message, MessageTag};
use std::fmt;

/// How a single check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintStatus {
    Ok,
    NotOk,
    Warning,
    Information,
    Ignored,
}

impl ConstraintStatus {
    pub fn id(&self) -> &'static str {
        match self {
            ConstraintStatus::Ok => "OK",
            ConstraintStatus::NotOk => "NOT_OK",
            ConstraintStatus::Warning => "WARNING",
            ConstraintStatus::Information => "INFORMATION",
            ConstraintStatus::Ignored => "IGNORED",
        }
    }
}

impl fmt::Display for ConstraintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One considered check, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintRecord {
    pub name: MessageTag,
    pub status: ConstraintStatus,
    /// The failure answer, set unless the check passed or was ignored.
    pub answer: Option<MessageTag>,
    pub additional_info: Option<String>,
}

/// Verdict of one chain execution against one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conclusion {
    pub target_id: String,
    pub indication: Indication,
    pub sub_indication: Option<SubIndication>,
    pub errors: Vec<Message>,
    pub warnings: Vec<Message>,
    pub infos: Vec<Message>,
    pub constraints: Vec<ConstraintRecord>,
}

impl Conclusion {
    pub(crate) fn new(target_id: impl Into<String>, indication: Indication) -> Self {
        Self {
            target_id: target_id.into(),
            indication,
            sub_indication: None,
            errors: Vec::new(),
            warnings: Vec::new(),
            infos: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.indication.is_passed()
    }

    /// Record of the check named `name`, if it was considered.
    pub fn constraint(&self, name: MessageTag) -> Option<&ConstraintRecord> {
        self.constraints.iter().find(|c| c.name == name)
    }

    pub fn error_keys(&self) -> Vec<&'static str> {
        self.errors.iter().map(|m| m.key).collect()
    }

    pub fn warning_keys(&self) -> Vec<&'static str> {
        self.warnings.iter().map(|m| m.key).collect()
    }

    pub fn info_keys(&self) -> Vec<&'static str> {
        self.infos.iter().map(|m| m.key).collect()
    }
}
