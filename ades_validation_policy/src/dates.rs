// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Date handling for policy values.
//!
//! Policies express dates as text together with a `SimpleDateFormat`-style pattern
//! (`yyyy-MM-dd` by default). Patterns are translated once into a chrono format string.

use crate::error::PolicyError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Pattern used when the policy does not declare one.
pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd";

/// A date format usable for parsing policy dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    chrono_format: String,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_PATTERN.to_string(),
            chrono_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl DateFormat {
    /// Translate a `SimpleDateFormat`-style pattern (`yyyy-MM-dd`, `yyyy-MM-dd'T'HH:mm:ss`, ...).
    pub fn from_pattern(pattern: &str) -> Result<Self, PolicyError> {
        let mut out = String::new();
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                // quoted literal; '' is an escaped quote
                if chars.get(i + 1) == Some(&'\'') {
                    out.push('\'');
                    i += 2;
                    continue;
                }
                i += 1;
                while i < chars.len() && chars[i] != '\'' {
                    push_literal(&mut out, chars[i]);
                    i += 1;
                }
                i += 1;
                continue;
            }
            if !c.is_ascii_alphabetic() {
                push_literal(&mut out, c);
                i += 1;
                continue;
            }

            let mut run = 1;
            while i + run < chars.len() && chars[i + run] == c {
                run += 1;
            }
            let directive = match (c, run) {
                ('y', 2) => "%y",
                ('y', _) => "%Y",
                ('M', _) => "%m",
                ('d', _) => "%d",
                ('H', _) => "%H",
                ('m', _) => "%M",
                ('s', _) => "%S",
                ('X', _) | ('Z', _) => "%z",
                (letter, _) => {
                    return Err(PolicyError::UnsupportedDatePattern {
                        pattern: pattern.to_string(),
                        letter,
                    })
                }
            };
            out.push_str(directive);
            i += run;
        }

        Ok(Self {
            pattern: pattern.to_string(),
            chrono_format: out,
        })
    }

    /// The pattern as declared by the policy.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The equivalent chrono format string.
    pub fn chrono_format(&self) -> &str {
        &self.chrono_format
    }

    /// Parse `value` as a UTC instant. Date-only formats yield midnight UTC.
    pub fn parse(&self, value: &str) -> Result<DateTime<Utc>, PolicyError> {
        let value = value.trim();
        if let Ok(dt) = DateTime::parse_from_str(value, &self.chrono_format) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, &self.chrono_format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
        NaiveDate::parse_from_str(value, &self.chrono_format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| PolicyError::MalformedDate {
                value: value.to_string(),
                format: self.pattern.clone(),
            })
    }
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
