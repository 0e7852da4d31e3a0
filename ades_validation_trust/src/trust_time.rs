// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::context::Context;
use chrono::{DateTime, Utc};

/// A `[start, end)` interval during which a certificate acts as a trust anchor.
///
/// A missing bound is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertificateTrustTime {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl CertificateTrustTime {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self::new(Some(start), None)
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Sunset date of the trust anchor.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// `time` is inside `[start, end)`.
    pub fn is_trusted_at_time(&self, time: DateTime<Utc>) -> bool {
        self.has_started_at(time) && self.end.map_or(true, |end| time < end)
    }

    /// `time` is at or after the start bound; the end bound is not considered.
    pub fn has_started_at(&self, time: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| start <= time)
    }
}

/// A trust window, optionally limited to one usage context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustTimeRecord {
    pub context: Option<Context>,
    pub window: CertificateTrustTime,
}

impl TrustTimeRecord {
    /// Window valid in every context.
    pub fn all_contexts(window: CertificateTrustTime) -> Self {
        Self {
            context: None,
            window,
        }
    }

    pub fn for_context(context: Context, window: CertificateTrustTime) -> Self {
        Self {
            context: Some(context),
            window,
        }
    }

    /// Unscoped records apply everywhere; a query without context accepts every record.
    pub fn applies_to(&self, context: Option<Context>) -> bool {
        match (self.context, context) {
            (None, _) | (_, None) => true,
            (Some(scoped), Some(requested)) => scoped == requested,
        }
    }
}
