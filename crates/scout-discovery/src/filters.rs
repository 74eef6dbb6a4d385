//! Search filter and sort options

use serde::{Deserialize, Serialize};

/// Date window applied against a record's creation timestamp.
///
/// Records without a parseable timestamp pass every window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl DateRange {
    /// Window length in days, `None` for the unbounded window.
    pub fn days(&self) -> Option<i64> {
        match self {
            DateRange::All => None,
            DateRange::Week => Some(7),
            DateRange::Month => Some(30),
            DateRange::Year => Some(365),
        }
    }
}

/// Difficulty bucket derived from the 0-10 complexity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityBucket {
    Basic,
    Intermediate,
    Advanced,
    Expert,
    Unknown,
}

impl ComplexityBucket {
    /// Bucket boundaries: <=3 basic, <=6 intermediate, <=8 advanced, else
    /// expert. A missing score is `Unknown`, which no explicit filter
    /// matches.
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            None => ComplexityBucket::Unknown,
            Some(s) if s <= 3.0 => ComplexityBucket::Basic,
            Some(s) if s <= 6.0 => ComplexityBucket::Intermediate,
            Some(s) if s <= 8.0 => ComplexityBucket::Advanced,
            Some(_) => ComplexityBucket::Expert,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityBucket::Basic => "basic",
            ComplexityBucket::Intermediate => "intermediate",
            ComplexityBucket::Advanced => "advanced",
            ComplexityBucket::Expert => "expert",
            ComplexityBucket::Unknown => "unknown",
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Relevance,
    DateDesc,
    DateAsc,
    ComplexityAsc,
    ComplexityDesc,
}

/// All optional search criteria, AND-combined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub date_range: DateRange,
    /// Empty means no complexity restriction.
    #[serde(default)]
    pub complexity: Vec<ComplexityBucket>,
    /// Domain ids, e.g. `computer_science`. Empty means no restriction.
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub sort_by: SortOrder,
}

impl SearchFilters {
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if self.date_range != DateRange::All {
            count += 1;
        }
        count += self.complexity.len();
        count += self.domains.len();
        if self.sort_by != SortOrder::Relevance {
            count += 1;
        }
        count
    }
}
