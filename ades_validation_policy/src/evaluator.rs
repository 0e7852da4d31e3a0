// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Reliability and expiration queries over a [`ConstraintModel`].
//!
//! Expiration dates are parsed once when the evaluator is created. Rows whose date cannot be
//! parsed are logged and skipped, so a partially broken policy still evaluates every other
//! algorithm.

use crate::algorithms::{DigestAlgorithm, EncryptionAlgorithm};
use crate::legacy;
use crate::level::{ConstraintCategory, Level};
use crate::model::ConstraintModel;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::warn;

/// How an encryption algorithm was found in a policy list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmMatch {
    /// The list names the algorithm itself.
    Exact,
    /// Only the legacy equivalent is listed.
    LegacyAlias(EncryptionAlgorithm),
    NoMatch,
}

impl AlgorithmMatch {
    pub fn is_match(&self) -> bool {
        !matches!(self, AlgorithmMatch::NoMatch)
    }
}

#[derive(Debug, Clone)]
struct ExpirationRow {
    algorithm: String,
    key_size: Option<u32>,
    date: DateTime<Utc>,
}

/// Answers "is this algorithm acceptable, and until when" for one policy.
///
/// The evaluator never fails: without a model nothing is reliable and no level is defined.
#[derive(Debug, Clone)]
pub struct CryptographicConstraintEvaluator {
    model: Option<Arc<ConstraintModel>>,
    expirations: Vec<ExpirationRow>,
    suite_update_date: Option<DateTime<Utc>>,
    legacy_aliases: bool,
}

impl CryptographicConstraintEvaluator {
    pub fn new(model: Arc<ConstraintModel>) -> Self {
        Self::from_optional(Some(model))
    }

    /// Evaluator for a policy without a cryptographic section.
    pub fn absent() -> Self {
        Self::from_optional(None)
    }

    pub fn from_optional(model: Option<Arc<ConstraintModel>>) -> Self {
        let (expirations, suite_update_date) = match model.as_deref() {
            Some(m) => (parse_expirations(m), parse_suite_update_date(m)),
            None => (Vec::new(), None),
        };
        Self {
            model,
            expirations,
            suite_update_date,
            legacy_aliases: true,
        }
    }

    /// Disable the transitional `RSASSA-PSS` to `RSA` alias.
    pub fn without_legacy_aliases(mut self) -> Self {
        self.legacy_aliases = false;
        self
    }

    pub fn legacy_aliases_enabled(&self) -> bool {
        self.legacy_aliases
    }

    pub fn model(&self) -> Option<&ConstraintModel> {
        self.model.as_deref()
    }

    pub fn is_digest_algorithm_reliable(&self, algorithm: DigestAlgorithm) -> bool {
        self.model().is_some_and(|m| {
            m.acceptable_digest_algorithms()
                .iter()
                .any(|name| name == algorithm.name())
        })
    }

    pub fn is_encryption_algorithm_reliable(&self, algorithm: EncryptionAlgorithm) -> bool {
        self.encryption_algorithm_match(algorithm).is_match()
    }

    /// Match `algorithm` against the acceptable encryption algorithms, reporting whether the
    /// legacy alias was needed.
    pub fn encryption_algorithm_match(&self, algorithm: EncryptionAlgorithm) -> AlgorithmMatch {
        match self.model() {
            Some(m) => {
                self.match_encryption(
                    m.acceptable_encryption_algorithms(),
                    |name: &String| name.as_str(),
                    algorithm,
                )
                .1
            }
            None => AlgorithmMatch::NoMatch,
        }
    }

    /// Like [`Self::encryption_algorithm_match`] but never considers legacy aliases.
    pub fn is_encryption_algorithm_listed(&self, algorithm: EncryptionAlgorithm) -> bool {
        self.model().is_some_and(|m| {
            m.acceptable_encryption_algorithms()
                .iter()
                .any(|name| name == algorithm.name())
        })
    }

    /// Minimum key size declared for `algorithm`; the first matching row wins.
    pub fn minimum_key_size(&self, algorithm: EncryptionAlgorithm) -> Option<u32> {
        let m = self.model()?;
        let (rows, _) = self.match_encryption(
            m.minimum_key_sizes(),
            |(name, _): &(String, u32)| name.as_str(),
            algorithm,
        );
        rows.first().map(|(_, size)| *size)
    }

    pub fn is_encryption_algorithm_with_key_size_reliable(
        &self,
        algorithm: EncryptionAlgorithm,
        key_size: u32,
    ) -> bool {
        if key_size == 0 {
            return false;
        }
        self.minimum_key_size(algorithm)
            .is_some_and(|minimum| minimum <= key_size)
    }

    /// Text variant; anything but a plain decimal number counts as key size 0.
    pub fn is_encryption_algorithm_with_key_size_text_reliable(
        &self,
        algorithm: EncryptionAlgorithm,
        key_size: &str,
    ) -> bool {
        self.is_encryption_algorithm_with_key_size_reliable(algorithm, parse_key_size(key_size))
    }

    /// Expiration of `algorithm` for a key of `key_size` bits.
    ///
    /// Uses the row with the greatest key size not exceeding `key_size`, so a weaker key never
    /// inherits the later expiration of a stronger one.
    pub fn expiration_date(
        &self,
        algorithm: EncryptionAlgorithm,
        key_size: u32,
    ) -> Option<DateTime<Utc>> {
        let (rows, _) = self.match_encryption(
            &self.expirations,
            |row: &ExpirationRow| row.algorithm.as_str(),
            algorithm,
        );
        let table: BTreeMap<u32, DateTime<Utc>> = rows
            .into_iter()
            .map(|row| (row.key_size.unwrap_or(0), row.date))
            .collect();
        table
            .range(..=key_size)
            .next_back()
            .map(|(_, date)| *date)
    }

    pub fn expiration_date_for_key_size_text(
        &self,
        algorithm: EncryptionAlgorithm,
        key_size: &str,
    ) -> Option<DateTime<Utc>> {
        self.expiration_date(algorithm, parse_key_size(key_size))
    }

    /// Expiration of a digest algorithm: the first row naming it.
    pub fn digest_expiration_date(&self, algorithm: DigestAlgorithm) -> Option<DateTime<Utc>> {
        self.expirations
            .iter()
            .find(|row| row.algorithm == algorithm.name())
            .map(|row| row.date)
    }

    /// Acceptable digest algorithms whose expiration date is not before `validation_time`.
    pub fn reliable_digest_algorithms_at_time(
        &self,
        validation_time: DateTime<Utc>,
    ) -> BTreeSet<DigestAlgorithm> {
        let mut reliable = BTreeSet::new();
        let Some(m) = self.model() else {
            return reliable;
        };

        for row in &self.expirations {
            if !m.acceptable_digest_algorithms().contains(&row.algorithm) {
                continue;
            }
            match row.algorithm.parse::<DigestAlgorithm>() {
                Ok(algorithm) => {
                    if self
                        .digest_expiration_date(algorithm)
                        .is_some_and(|date| date >= validation_time)
                    {
                        reliable.insert(algorithm);
                    }
                }
                Err(err) => warn!(algorithm = %row.algorithm, %err, "unable to parse a digest algorithm"),
            }
        }
        reliable
    }

    /// Acceptable encryption algorithms with the smallest key size that is both large enough
    /// and not expired at `validation_time`.
    pub fn reliable_encryption_algorithms_with_minimal_key_length_at_time(
        &self,
        validation_time: DateTime<Utc>,
    ) -> BTreeMap<EncryptionAlgorithm, u32> {
        let mut reliable = BTreeMap::new();
        let Some(m) = self.model() else {
            return reliable;
        };

        for row in &self.expirations {
            if !m.acceptable_encryption_algorithms().contains(&row.algorithm) {
                continue;
            }
            let algorithm = match row.algorithm.parse::<EncryptionAlgorithm>() {
                Ok(algorithm) => algorithm,
                Err(err) => {
                    warn!(algorithm = %row.algorithm, %err, "unable to parse an encryption algorithm");
                    continue;
                }
            };

            let key_size = row.key_size.unwrap_or(0);
            let acceptable = self.is_encryption_algorithm_with_key_size_reliable(algorithm, key_size)
                && self
                    .expiration_date(algorithm, key_size)
                    .is_some_and(|date| date >= validation_time);
            if acceptable {
                reliable
                    .entry(algorithm)
                    .and_modify(|minimal: &mut u32| {
                        if key_size < *minimal {
                            *minimal = key_size;
                        }
                    })
                    .or_insert(key_size);
            }
        }
        reliable
    }

    /// Level of `category`, falling back to the global level.
    ///
    /// The post-update expiration level falls back to the expiration level first.
    pub fn level(&self, category: ConstraintCategory) -> Option<Level> {
        let m = self.model()?;
        match category {
            ConstraintCategory::Global => m.explicit_level(ConstraintCategory::Global),
            ConstraintCategory::PostUpdateExpirationDate => m
                .explicit_level(ConstraintCategory::PostUpdateExpirationDate)
                .or_else(|| self.level(ConstraintCategory::ExpirationDate)),
            other => m
                .explicit_level(other)
                .or_else(|| m.explicit_level(ConstraintCategory::Global)),
        }
    }

    /// When the expiration table was last refreshed.
    pub fn suite_update_date(&self) -> Option<DateTime<Utc>> {
        self.suite_update_date
    }

    /// Level of expiration checks performed at `validation_time`.
    pub fn expiration_level_at(&self, validation_time: DateTime<Utc>) -> Option<Level> {
        match self.suite_update_date {
            Some(updated) if validation_time > updated => {
                self.level(ConstraintCategory::PostUpdateExpirationDate)
            }
            _ => self.level(ConstraintCategory::ExpirationDate),
        }
    }

    /// Which minimum key size rows decide for `algorithm`.
    pub fn minimum_key_size_match(&self, algorithm: EncryptionAlgorithm) -> AlgorithmMatch {
        match self.model() {
            Some(m) => {
                self.match_encryption(
                    m.minimum_key_sizes(),
                    |(name, _): &(String, u32)| name.as_str(),
                    algorithm,
                )
                .1
            }
            None => AlgorithmMatch::NoMatch,
        }
    }

    /// Which expiration rows decide for `algorithm`.
    pub fn expiration_match(&self, algorithm: EncryptionAlgorithm) -> AlgorithmMatch {
        self.match_encryption(
            &self.expirations,
            |row: &ExpirationRow| row.algorithm.as_str(),
            algorithm,
        )
        .1
    }

    fn match_encryption<'a, T>(
        &self,
        entries: &'a [T],
        name_of: impl Fn(&T) -> &str,
        algorithm: EncryptionAlgorithm,
    ) -> (Vec<&'a T>, AlgorithmMatch) {
        let exact: Vec<&T> = entries
            .iter()
            .filter(|e| name_of(*e) == algorithm.name())
            .collect();
        if !exact.is_empty() {
            return (exact, AlgorithmMatch::Exact);
        }

        if self.legacy_aliases {
            if let Some((alias, rows)) = legacy::alias_matches(entries, &name_of, algorithm) {
                return (rows, AlgorithmMatch::LegacyAlias(alias));
            }
        }
        (Vec::new(), AlgorithmMatch::NoMatch)
    }
}

fn parse_key_size(text: &str) -> u32 {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().unwrap_or(0)
    } else {
        0
    }
}

fn parse_expirations(model: &ConstraintModel) -> Vec<ExpirationRow> {
    let format = model.date_format();
    model
        .expiration_entries()
        .iter()
        .filter_map(|entry| match format.parse(&entry.date) {
            Ok(date) => Some(ExpirationRow {
                algorithm: entry.algorithm.clone(),
                key_size: entry.key_size,
                date,
            }),
            Err(err) => {
                warn!(algorithm = %entry.algorithm, key_size = ?entry.key_size, %err, "skipping algorithm expiration entry");
                None
            }
        })
        .collect()
}

fn parse_suite_update_date(model: &ConstraintModel) -> Option<DateTime<Utc>> {
    let raw = model.suite_update_date()?;
    match model.date_format().parse(raw) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(%err, "ignoring cryptographic suite update date");
            None
        }
    }
}
