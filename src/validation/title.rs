//! Release title policy.
//!
//! A title must match the configured pattern in full. When the pattern names
//! `year`, `month` or `day` captures, each captured value must also agree with
//! the current UTC date, which gives a lightweight CalVer guard on top of an
//! otherwise arbitrary pattern.

use chrono::{Datelike, NaiveDate, Utc};
use regex::{Captures, Regex};
use tracing::info;

use crate::error::{ReleaseGateError, Result};

#[derive(Debug, Clone)]
pub struct TitlePolicy {
    pattern: String,
    regex: Regex,
}

#[derive(Debug, Clone, Copy)]
enum CalendarUnit {
    Year,
    Month,
    Day,
}

impl CalendarUnit {
    const ORDER: [CalendarUnit; 3] = [CalendarUnit::Year, CalendarUnit::Month, CalendarUnit::Day];

    fn name(&self) -> &'static str {
        match self {
            CalendarUnit::Year => "year",
            CalendarUnit::Month => "month",
            CalendarUnit::Day => "day",
        }
    }

    fn current(&self, today: NaiveDate) -> i64 {
        match self {
            CalendarUnit::Year => i64::from(today.year()),
            CalendarUnit::Month => i64::from(today.month()),
            CalendarUnit::Day => i64::from(today.day()),
        }
    }

    /// Two-digit years are accepted alongside four-digit ones.
    fn accepts(&self, value: i64, today: NaiveDate) -> bool {
        let current = self.current(today);
        match self {
            CalendarUnit::Year => value == current || value == current % 100,
            _ => value == current,
        }
    }
}

impl TitlePolicy {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            ReleaseGateError::ConfigError(format!("Invalid release_pattern {:?}: {}", pattern, e))
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn validate(&self, title: &str) -> Result<()> {
        self.validate_on(title, Utc::now().date_naive())
    }

    pub fn validate_on(&self, title: &str, today: NaiveDate) -> Result<()> {
        info!("Validating title {} against pattern {}", title, self.pattern);

        let captures = self
            .regex
            .captures(title)
            .ok_or_else(|| ReleaseGateError::validation("Invalid release title."))?;

        for unit in CalendarUnit::ORDER {
            self.check_unit(unit, &captures, today)?;
        }

        Ok(())
    }

    fn check_unit(
        &self,
        unit: CalendarUnit,
        captures: &Captures<'_>,
        today: NaiveDate,
    ) -> Result<()> {
        if !self.pattern.contains(&format!("<{}>", unit.name())) {
            return Ok(());
        }
        let Some(captured) = captures.name(unit.name()) else {
            return Ok(());
        };

        let raw = captured.as_str();
        let valid = raw
            .trim()
            .parse::<i64>()
            .map(|value| unit.accepts(value, today))
            .unwrap_or(false);

        if valid {
            Ok(())
        } else {
            Err(ReleaseGateError::validation(format!(
                "{} is not a valid {}. Current is {}.",
                raw,
                unit.name(),
                unit.current(today)
            )))
        }
    }
}

pub fn validate_title(title: &str, pattern: &str) -> Result<()> {
    TitlePolicy::new(pattern)?.validate(title)
}
