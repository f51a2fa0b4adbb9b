//! Log list view: kind filter, sort direction, pagination

use serde::{Deserialize, Serialize};

use super::sort_chronologically;
use crate::models::Entry;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Kinds shown in the log list; standalone readings never are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Trip,
    Fuel,
}

impl KindFilter {
    fn matches(&self, entry: &Entry) -> bool {
        match self {
            Self::All => !entry.is_reading(),
            Self::Trip => entry.is_trip(),
            Self::Fuel => entry.is_fuel(),
        }
    }
}

impl std::str::FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "trip" | "trips" => Ok(Self::Trip),
            "fuel" => Ok(Self::Fuel),
            _ => Err(format!("Unknown filter: {} (valid: all, trip, fuel)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "oldest" => Ok(Self::Asc),
            "desc" | "newest" => Ok(Self::Desc),
            _ => Err(format!("Unknown sort order: {} (valid: asc, desc)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    pub kind: KindFilter,
    pub order: SortOrder,
    /// Zero-based; clamped to the last page
    pub page: usize,
    pub page_size: usize,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            kind: KindFilter::All,
            order: SortOrder::Desc,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of the log list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryPage {
    pub entries: Vec<Entry>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

pub fn list(entries: &[Entry], filter: &EntryFilter) -> EntryPage {
    let mut matching: Vec<Entry> = entries
        .iter()
        .filter(|e| filter.kind.matches(e))
        .cloned()
        .collect();
    sort_chronologically(&mut matching);
    if filter.order == SortOrder::Desc {
        matching.reverse();
    }

    let page_size = filter.page_size.max(1);
    let total = matching.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = filter.page.min(total_pages - 1);

    let entries = matching
        .into_iter()
        .skip(page * page_size)
        .take(page_size)
        .collect();

    EntryPage {
        entries,
        page,
        total_pages,
        total,
    }
}

/// Standalone readings, oldest first
pub fn readings(entries: &[Entry]) -> Vec<Entry> {
    let mut readings: Vec<Entry> = entries.iter().filter(|e| e.is_reading()).cloned().collect();
    sort_chronologically(&mut readings);
    readings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::test_support::*;

    fn ledger() -> Vec<Entry> {
        vec![
            trip(1, "2024-01-01", 100.0, 0.0),
            trip(2, "2024-01-02", 150.0, 0.0),
            fuel(3, "2024-01-02", 160.0, 5.0, 500.0),
            reading(4, "2024-01-03", 170.0),
            trip(5, "2024-01-04", 230.0, 0.0),
            trip(6, "2024-01-05", 260.0, 0.0),
            trip(7, "2024-01-06", 300.0, 0.0),
        ]
    }

    fn ids(page: &EntryPage) -> Vec<i64> {
        page.entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_default_hides_readings_newest_first() {
        let page = list(&ledger(), &EntryFilter::default());
        assert_eq!(page.total, 6);
        assert_eq!(page.total_pages, 2);
        assert_eq!(ids(&page), vec![7, 6, 5, 3, 2]);
    }

    #[test]
    fn test_kind_filter_and_ascending() {
        let filter = EntryFilter {
            kind: KindFilter::Trip,
            order: SortOrder::Asc,
            page_size: 10,
            ..Default::default()
        };
        assert_eq!(ids(&list(&ledger(), &filter)), vec![1, 2, 5, 6, 7]);

        let filter = EntryFilter {
            kind: KindFilter::Fuel,
            ..Default::default()
        };
        assert_eq!(ids(&list(&ledger(), &filter)), vec![3]);
    }

    #[test]
    fn test_page_clamped_to_last() {
        let filter = EntryFilter {
            page: 9,
            ..Default::default()
        };
        let page = list(&ledger(), &filter);
        assert_eq!(page.page, 1);
        assert_eq!(ids(&page), vec![1]);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let page = list(&[], &EntryFilter::default());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 0);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_readings_only() {
        let readings = readings(&ledger());
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].id, 4);
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!("trips".parse::<KindFilter>().unwrap(), KindFilter::Trip);
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!("reading".parse::<KindFilter>().is_err());
    }
}
