//! Date windows for aggregation

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::input::parse_date;
use crate::models::Entry;

/// Named or custom window, evaluated against a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "lowercase")]
pub enum Period {
    Today,
    /// Monday-start week containing the reference date
    Week,
    #[default]
    Month,
    All,
    /// Inclusive on both ends
    Range { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Custom range from user input; blank or reversed bounds are rejected
    pub fn range(start: &str, end: &str) -> Result<Self, ValidationError> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(ValidationError::InvalidRange);
        }
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        if start > end {
            return Err(ValidationError::InvalidRange);
        }
        Ok(Self::Range { start, end })
    }

    /// Resolve surface parameters: any `from`/`to` means a custom range,
    /// otherwise the named period (default `month`)
    pub fn resolve(
        period: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if from.is_some() || to.is_some() {
            return Self::range(from.unwrap_or_default(), to.unwrap_or_default());
        }
        match period {
            Some(p) => p.parse(),
            None => Ok(Self::default()),
        }
    }

    /// Inclusive first and last day, `None` for `all`
    pub fn bounds(&self, reference: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Self::Today => Some((reference, reference)),
            Self::Week => {
                let monday =
                    reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
                Some((monday, monday + Duration::days(6)))
            }
            Self::Month => {
                let first = reference.with_day(1).unwrap_or(reference);
                let last = (first + Duration::days(32))
                    .with_day(1)
                    .map(|next| next - Duration::days(1))
                    .unwrap_or(reference);
                Some((first, last))
            }
            Self::All => None,
            Self::Range { start, end } => Some((start, end)),
        }
    }

    pub fn contains(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match *self {
            Self::Today => date == reference,
            Self::Month => date.year() == reference.year() && date.month() == reference.month(),
            Self::All => true,
            _ => self
                .bounds(reference)
                .is_some_and(|(from, to)| date >= from && date <= to),
        }
    }

    /// Entries inside the window, in their original order
    pub fn filter(&self, entries: &[Entry], reference: NaiveDate) -> Vec<Entry> {
        entries
            .iter()
            .filter(|e| self.contains(e.date, reference))
            .cloned()
            .collect()
    }

    /// Human-readable label
    pub fn label(&self, reference: NaiveDate) -> String {
        match self {
            Self::Today => format!("Today ({})", reference),
            Self::Week => match self.bounds(reference) {
                Some((from, to)) => format!("This week ({} to {})", from, to),
                None => "This week".to_string(),
            },
            Self::Month => format!("This month ({})", reference.format("%B %Y")),
            Self::All => "All time".to_string(),
            Self::Range { start, end } => format!("{} to {}", start, end),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" | "day" => Ok(Self::Today),
            "week" | "this-week" => Ok(Self::Week),
            "month" | "this-month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            _ => Err(ValidationError::UnknownPeriod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::test_support::*;

    // Wednesday
    fn reference() -> NaiveDate {
        date("2024-05-15")
    }

    #[test]
    fn test_today() {
        assert!(Period::Today.contains(date("2024-05-15"), reference()));
        assert!(!Period::Today.contains(date("2024-05-14"), reference()));
    }

    #[test]
    fn test_week_is_monday_start_inclusive() {
        let week = Period::Week;
        assert_eq!(
            week.bounds(reference()),
            Some((date("2024-05-13"), date("2024-05-19")))
        );
        assert!(week.contains(date("2024-05-13"), reference()));
        assert!(week.contains(date("2024-05-19"), reference()));
        assert!(!week.contains(date("2024-05-12"), reference()));
        assert!(!week.contains(date("2024-05-20"), reference()));

        // A Sunday reference belongs to the week that started six days earlier
        assert_eq!(
            week.bounds(date("2024-05-19")),
            Some((date("2024-05-13"), date("2024-05-19")))
        );
    }

    #[test]
    fn test_month() {
        assert!(Period::Month.contains(date("2024-05-01"), reference()));
        assert!(Period::Month.contains(date("2024-05-31"), reference()));
        assert!(!Period::Month.contains(date("2023-05-15"), reference()));
        assert_eq!(
            Period::Month.bounds(date("2024-02-10")),
            Some((date("2024-02-01"), date("2024-02-29")))
        );
        assert_eq!(
            Period::Month.bounds(date("2024-12-31")),
            Some((date("2024-12-01"), date("2024-12-31")))
        );
    }

    #[test]
    fn test_range_validation() {
        assert_eq!(
            Period::range("2024-01-01", "2024-01-31").unwrap(),
            Period::Range {
                start: date("2024-01-01"),
                end: date("2024-01-31")
            }
        );
        assert_eq!(
            Period::range("2024-02-01", "2024-01-31"),
            Err(ValidationError::InvalidRange)
        );
        assert_eq!(
            Period::range("", "2024-01-31"),
            Err(ValidationError::InvalidRange)
        );
        assert!(Period::range("2024-01-01", "2024-01-01").is_ok());
    }

    #[test]
    fn test_range_inclusive() {
        let range = Period::range("2024-01-02", "2024-01-03").unwrap();
        assert!(range.contains(date("2024-01-02"), reference()));
        assert!(range.contains(date("2024-01-03"), reference()));
        assert!(!range.contains(date("2024-01-04"), reference()));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Period::resolve(None, None, None).unwrap(), Period::Month);
        assert_eq!(Period::resolve(Some("week"), None, None).unwrap(), Period::Week);
        assert_eq!(
            Period::resolve(Some("week"), Some("2024-01-01"), None),
            Err(ValidationError::InvalidRange)
        );
        assert!(matches!(
            Period::resolve(Some("fortnight"), None, None),
            Err(ValidationError::UnknownPeriod(_))
        ));
    }

    #[test]
    fn test_filter_all() {
        let entries = vec![
            trip(1, "2020-01-01", 100.0, 0.0),
            trip(2, "2024-05-15", 200.0, 0.0),
        ];
        assert_eq!(Period::All.filter(&entries, reference()).len(), 2);
        assert_eq!(Period::Today.filter(&entries, reference()).len(), 1);
    }
}
