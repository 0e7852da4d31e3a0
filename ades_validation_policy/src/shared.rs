// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::evaluator::CryptographicConstraintEvaluator;
use crate::model::ConstraintModel;
use parking_lot::RwLock;
use std::sync::Arc;

/// A constraint model shared by concurrent validations.
///
/// Readers take an `Arc` snapshot and keep using it for the whole validation. A policy
/// refresh builds a new model and swaps it in; models already handed out are never mutated.
#[derive(Debug)]
pub struct SharedConstraintModel {
    current: RwLock<Arc<ConstraintModel>>,
}

impl SharedConstraintModel {
    pub fn new(model: ConstraintModel) -> Self {
        Self {
            current: RwLock::new(Arc::new(model)),
        }
    }

    /// The model in effect right now.
    pub fn snapshot(&self) -> Arc<ConstraintModel> {
        self.current.read().clone()
    }

    /// Replace the model, returning the previous one.
    pub fn swap(&self, model: ConstraintModel) -> Arc<ConstraintModel> {
        std::mem::replace(&mut *self.current.write(), Arc::new(model))
    }

    /// Evaluator bound to the current snapshot.
    pub fn evaluator(&self) -> CryptographicConstraintEvaluator {
        CryptographicConstraintEvaluator::new(self.snapshot())
    }
}
