// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::dates::DateFormat;
use crate::error::PolicyError;
use crate::level::{ConstraintCategory, Level};
use std::collections::BTreeMap;

/// One row of the algorithm expiration table.
///
/// `date` is kept as policy text; it is parsed with the model's [`DateFormat`] when an
/// evaluator is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmExpiration {
    pub algorithm: String,
    pub key_size: Option<u32>,
    pub date: String,
}

/// Immutable cryptographic section of a validation policy.
///
/// Built with [`ConstraintModelBuilder`] and shared as `Arc<ConstraintModel>`. Lists keep the
/// policy order, which is the order lookups observe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintModel {
    levels: BTreeMap<ConstraintCategory, Level>,
    acceptable_digest_algorithms: Vec<String>,
    acceptable_encryption_algorithms: Vec<String>,
    minimum_key_sizes: Vec<(String, u32)>,
    expiration_entries: Vec<AlgorithmExpiration>,
    date_format: DateFormat,
    suite_update_date: Option<String>,
}

impl ConstraintModel {
    pub fn builder() -> ConstraintModelBuilder {
        ConstraintModelBuilder::new()
    }

    /// Level explicitly declared for `category`, without inheritance.
    pub fn explicit_level(&self, category: ConstraintCategory) -> Option<Level> {
        self.levels.get(&category).copied()
    }

    pub fn acceptable_digest_algorithms(&self) -> &[String] {
        self.acceptable_digest_algorithms.as_slice()
    }

    pub fn acceptable_encryption_algorithms(&self) -> &[String] {
        self.acceptable_encryption_algorithms.as_slice()
    }

    /// Minimum key sizes keyed by encryption algorithm name, in policy order.
    pub fn minimum_key_sizes(&self) -> &[(String, u32)] {
        self.minimum_key_sizes.as_slice()
    }

    pub fn expiration_entries(&self) -> &[AlgorithmExpiration] {
        self.expiration_entries.as_slice()
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    /// Raw suite update date, as written in the policy.
    pub fn suite_update_date(&self) -> Option<&str> {
        self.suite_update_date.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct ConstraintModelBuilder {
    model: ConstraintModel,
}

impl ConstraintModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global level of the cryptographic constraints.
    pub fn level(self, level: Level) -> Self {
        self.category_level(ConstraintCategory::Global, level)
    }

    /// Explicit level for a single category. Categories without one inherit the global level.
    pub fn category_level(mut self, category: ConstraintCategory, level: Level) -> Self {
        self.model.levels.insert(category, level);
        self
    }

    pub fn acceptable_digest_algorithm(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.model.acceptable_digest_algorithms, name.into());
        self
    }

    pub fn acceptable_digest_algorithms<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |b, name| b.acceptable_digest_algorithm(name))
    }

    pub fn acceptable_encryption_algorithm(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.model.acceptable_encryption_algorithms, name.into());
        self
    }

    pub fn acceptable_encryption_algorithms<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |b, name| b.acceptable_encryption_algorithm(name))
    }

    pub fn minimum_key_size(mut self, name: impl Into<String>, size: u32) -> Self {
        self.model.minimum_key_sizes.push((name.into(), size));
        self
    }

    /// Expiration of an algorithm regardless of key size (digest algorithms).
    pub fn expiration(mut self, name: impl Into<String>, date: impl Into<String>) -> Self {
        self.model.expiration_entries.push(AlgorithmExpiration {
            algorithm: name.into(),
            key_size: None,
            date: date.into(),
        });
        self
    }

    /// Expiration of an encryption algorithm used with keys of at least `key_size` bits.
    pub fn expiration_for_key_size(
        mut self,
        name: impl Into<String>,
        key_size: u32,
        date: impl Into<String>,
    ) -> Self {
        self.model.expiration_entries.push(AlgorithmExpiration {
            algorithm: name.into(),
            key_size: Some(key_size),
            date: date.into(),
        });
        self
    }

    pub fn date_format(mut self, format: DateFormat) -> Self {
        self.model.date_format = format;
        self
    }

    pub fn suite_update_date(mut self, date: impl Into<String>) -> Self {
        self.model.suite_update_date = Some(date.into());
        self
    }

    /// Finish building.
    ///
    /// Rejects duplicate `(algorithm, key size)` expiration rows and zero minimum key sizes.
    /// Unparsable dates are not rejected here; they are skipped during evaluation.
    pub fn build(self) -> Result<ConstraintModel, PolicyError> {
        let model = self.model;

        for (name, size) in &model.minimum_key_sizes {
            if *size == 0 {
                return Err(PolicyError::ZeroMinimumKeySize(name.clone()));
            }
        }

        for (i, entry) in model.expiration_entries.iter().enumerate() {
            let duplicate = model.expiration_entries[..i]
                .iter()
                .any(|e| e.algorithm == entry.algorithm && e.key_size == entry.key_size);
            if duplicate {
                return Err(PolicyError::DuplicateExpirationEntry {
                    algorithm: entry.algorithm.clone(),
                    key_size: entry.key_size,
                });
            }
        }

        Ok(model)
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}
