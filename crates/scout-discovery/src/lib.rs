//! Scout discovery - client-side paper search
//!
//! Pure in-memory ranking over the paper corpus the data store returns:
//! token-set Jaccard similarity with a domain-match bonus, multi-criteria
//! filters (date range, complexity bucket, domain membership) and a
//! selectable sort order.
//!
//! This module never touches storage and never fails: absent or malformed
//! analysis fields degrade to neutral values instead of excluding a record.

pub mod filters;
pub mod relevance;

pub use filters::{ComplexityBucket, DateRange, SearchFilters, SortOrder};
pub use relevance::{search_papers, RankedPaper};
