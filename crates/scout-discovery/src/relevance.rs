//! Relevance scoring for client-side paper search

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::filters::{ComplexityBucket, DateRange, SearchFilters, SortOrder};
use scout_domain::Paper;

/// Bonus added when the paper's primary domain appears in the query.
const DOMAIN_MATCH_BONUS: f64 = 0.1;

/// Display ceiling for the reported similarity score.
const SIMILARITY_DISPLAY_CAP: f64 = 0.99;

/// A paper admitted by the search, with its display similarity attached.
#[derive(Debug, Clone)]
pub struct RankedPaper {
    pub paper: Paper,
    /// Relevance score clamped to [0, 0.99].
    pub similarity: f64,
}

/// The ranking-relevant slice of the opaque analysis record.
///
/// Extracted field by field so one malformed value degrades to neutral
/// without discarding the rest.
#[derive(Debug, Clone, Default)]
struct AnalysisView {
    complexity_score: Option<f64>,
    domain_primary: Option<String>,
    domain_secondary: Vec<String>,
}

impl AnalysisView {
    fn from_value(analysis: &Value) -> Self {
        let complexity_score = analysis.get("complexity_score").and_then(Value::as_f64);
        let domain_primary = analysis
            .get("domain_primary")
            .and_then(Value::as_str)
            .map(str::to_string);
        let domain_secondary = analysis
            .get("domain_secondary")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            complexity_score,
            domain_primary,
            domain_secondary,
        }
    }
}

/// Lowercase, strip everything outside `[a-z0-9\s]`, split on whitespace.
fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Jaccard index of two token sets; 0 when the union is empty.
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Normalize a domain label for membership comparison.
fn normalize_domain(domain: &str) -> String {
    domain.to_lowercase().split_whitespace().collect::<Vec<_>>().join("_")
}

fn passes_date_filter(paper: &Paper, range: DateRange, now: DateTime<Utc>) -> bool {
    let Some(days) = range.days() else {
        return true;
    };
    // Records without a parseable timestamp pass every window.
    match DateTime::parse_from_rfc3339(&paper.created_at) {
        Ok(created) => now.signed_duration_since(created.with_timezone(&Utc)) <= Duration::days(days),
        Err(_) => true,
    }
}

fn passes_complexity_filter(view: &AnalysisView, wanted: &[ComplexityBucket]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let bucket = ComplexityBucket::from_score(view.complexity_score);
    // An unknown bucket never satisfies an explicit filter.
    bucket != ComplexityBucket::Unknown && wanted.contains(&bucket)
}

fn passes_domain_filter(view: &AnalysisView, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let wanted: HashSet<String> = wanted.iter().map(|d| normalize_domain(d)).collect();
    view.domain_primary
        .iter()
        .chain(view.domain_secondary.iter())
        .any(|domain| wanted.contains(&normalize_domain(domain)))
}

fn parse_created_at(paper: &Paper) -> i64 {
    DateTime::parse_from_rfc3339(&paper.created_at)
        .map(|t| t.timestamp_millis())
        .unwrap_or(0)
}

/// Search the corpus for a free-text query, honoring `filters`.
///
/// An empty or whitespace-only query returns no results without scoring
/// anything. A paper is admitted when its token similarity is positive or
/// its title contains the raw query as a case-insensitive substring; the
/// latter keeps exact-title hits that differ only in punctuation.
pub fn search_papers(
    query: &str,
    papers: &[Paper],
    filters: &SearchFilters,
    now: DateTime<Utc>,
) -> Vec<RankedPaper> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    let query_tokens = tokenize(query);

    // (ranked, raw score, analysis view); the raw score sorts, the clamped
    // copy inside RankedPaper is what callers display.
    let mut results: Vec<(RankedPaper, f64, AnalysisView)> = Vec::new();
    for paper in papers {
        let view = AnalysisView::from_value(&paper.analysis);

        if !passes_date_filter(paper, filters.date_range, now)
            || !passes_complexity_filter(&view, &filters.complexity)
            || !passes_domain_filter(&view, &filters.domains)
        {
            continue;
        }

        let mut paper_tokens = tokenize(&paper.title);
        paper_tokens.extend(tokenize(&paper.content));
        let similarity = jaccard(&query_tokens, &paper_tokens);

        let title_hit = paper.title.to_lowercase().contains(&query_lower);
        if similarity <= 0.0 && !title_hit {
            continue;
        }

        let mut score = similarity;
        if let Some(domain) = &view.domain_primary {
            if !domain.is_empty() && query_lower.contains(&domain.to_lowercase()) {
                score += DOMAIN_MATCH_BONUS;
            }
        }

        results.push((
            RankedPaper {
                paper: paper.clone(),
                similarity: score.clamp(0.0, SIMILARITY_DISPLAY_CAP),
            },
            score,
            view,
        ));
    }

    match filters.sort_by {
        SortOrder::Relevance => {
            results.sort_by(|(_, a, _), (_, b, _)| b.total_cmp(a));
        }
        SortOrder::DateDesc => {
            results.sort_by_key(|(r, _, _)| std::cmp::Reverse(parse_created_at(&r.paper)));
        }
        SortOrder::DateAsc => {
            results.sort_by_key(|(r, _, _)| parse_created_at(&r.paper));
        }
        SortOrder::ComplexityAsc => {
            results.sort_by(|(_, _, a), (_, _, b)| {
                a.complexity_score
                    .unwrap_or(0.0)
                    .total_cmp(&b.complexity_score.unwrap_or(0.0))
            });
        }
        SortOrder::ComplexityDesc => {
            results.sort_by(|(_, _, a), (_, _, b)| {
                b.complexity_score
                    .unwrap_or(0.0)
                    .total_cmp(&a.complexity_score.unwrap_or(0.0))
            });
        }
    }

    results.into_iter().map(|(ranked, _, _)| ranked).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paper(id: &str, title: &str, content: &str, analysis: Value) -> Paper {
        Paper {
            id: id.to_string(),
            user_id: None,
            title: title.to_string(),
            content: content.to_string(),
            filename: format!("{id}.pdf"),
            file_size: None,
            analysis,
            created_at: "2025-01-10T09:00:00Z".to_string(),
            updated_at: "2025-01-10T09:00:00Z".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-15T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        let tokens = tokenize("Deep-Learning: in Medical Imaging!");
        assert!(tokens.contains("deep"));
        assert!(tokens.contains("learning"));
        assert!(tokens.contains("medical"));
        assert!(!tokens.iter().any(|t| t.contains('-') || t.contains(':')));
    }

    #[test]
    fn test_jaccard_empty_union_is_zero() {
        assert_eq!(jaccard(&HashSet::new(), &HashSet::new()), 0.0);
    }

    #[test]
    fn test_query_ranks_overlapping_title_first() {
        let papers = vec![
            paper("p2", "Quantum Computing Basics", "qubits and gates", json!({})),
            paper(
                "p1",
                "Deep Learning in Medical Imaging",
                "convolutional networks for radiology",
                json!({}),
            ),
        ];
        let results = search_papers(
            "deep learning medical",
            &papers,
            &SearchFilters::default(),
            now(),
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].paper.id, "p1");
        assert!(results[0].similarity > 0.0);
    }

    #[test]
    fn test_title_substring_admits_zero_overlap() {
        // "learn" is a substring of the title but matches no whole token, so
        // the Jaccard score alone would drop this paper.
        let papers = vec![paper("p1", "Deep Learning", "protein structure", json!({}))];
        let results = search_papers("learn", &papers, &SearchFilters::default(), now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].similarity, 0.0);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let papers = vec![paper("p1", "Anything", "content", json!({}))];
        assert!(search_papers("", &papers, &SearchFilters::default(), now()).is_empty());
        assert!(search_papers("   ", &papers, &SearchFilters::default(), now()).is_empty());
    }

    #[test]
    fn test_domain_bonus_applies() {
        let papers = vec![
            paper("plain", "Graph Neural Networks", "nodes and edges", json!({})),
            paper(
                "boosted",
                "Graph Neural Networks",
                "nodes and edges",
                json!({ "domain_primary": "graph" }),
            ),
        ];
        let results = search_papers("graph networks", &papers, &SearchFilters::default(), now());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].paper.id, "boosted");
        assert!(results[0].similarity > results[1].similarity);
    }

    #[test]
    fn test_similarity_capped_for_display() {
        let papers = vec![paper(
            "p1",
            "exact match",
            "",
            json!({ "domain_primary": "exact match" }),
        )];
        let results = search_papers("exact match", &papers, &SearchFilters::default(), now());
        assert_eq!(results.len(), 1);
        assert!(results[0].similarity <= 0.99);
    }

    #[test]
    fn test_complexity_filter_excludes_unknown() {
        let papers = vec![
            paper("scored", "neural networks", "", json!({ "complexity_score": 7 })),
            paper("unscored", "neural networks", "", json!({})),
        ];
        let filters = SearchFilters {
            complexity: vec![ComplexityBucket::Advanced],
            ..Default::default()
        };
        let results = search_papers("neural networks", &papers, &filters, now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].paper.id, "scored");
    }

    #[test]
    fn test_complexity_filter_respects_boundaries() {
        let papers = vec![
            paper("six", "topic models", "", json!({ "complexity_score": 6 })),
            paper("seven", "topic models", "", json!({ "complexity_score": 7 })),
        ];
        let intermediate = SearchFilters {
            complexity: vec![ComplexityBucket::Intermediate],
            ..Default::default()
        };
        let results = search_papers("topic models", &papers, &intermediate, now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].paper.id, "six");
    }

    #[test]
    fn test_date_filter_passes_missing_timestamp() {
        let mut stale = paper("stale", "reinforcement learning", "", json!({}));
        stale.created_at = "2020-01-01T00:00:00Z".to_string();
        let mut undated = paper("undated", "reinforcement learning", "", json!({}));
        undated.created_at = String::new();

        let filters = SearchFilters {
            date_range: DateRange::Week,
            ..Default::default()
        };
        let results = search_papers("reinforcement learning", &[stale, undated], &filters, now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].paper.id, "undated");
    }

    #[test]
    fn test_domain_filter_matches_secondary_and_normalizes() {
        let papers = vec![paper(
            "p1",
            "protein folding",
            "",
            json!({ "domain_primary": "Biology", "domain_secondary": ["Computer Science"] }),
        )];
        let filters = SearchFilters {
            domains: vec!["computer_science".to_string()],
            ..Default::default()
        };
        assert_eq!(search_papers("protein folding", &papers, &filters, now()).len(), 1);

        let miss = SearchFilters {
            domains: vec!["economics".to_string()],
            ..Default::default()
        };
        assert!(search_papers("protein folding", &papers, &miss, now()).is_empty());
    }

    #[test]
    fn test_sort_by_complexity_treats_missing_as_zero() {
        let papers = vec![
            paper("high", "bayesian inference", "", json!({ "complexity_score": 9 })),
            paper("none", "bayesian inference", "", json!({})),
            paper("low", "bayesian inference", "", json!({ "complexity_score": 2 })),
        ];
        let filters = SearchFilters {
            sort_by: SortOrder::ComplexityAsc,
            ..Default::default()
        };
        let results = search_papers("bayesian inference", &papers, &filters, now());
        let ids: Vec<_> = results.iter().map(|r| r.paper.id.as_str()).collect();
        assert_eq!(ids, vec!["none", "low", "high"]);
    }

    #[test]
    fn test_sort_by_date() {
        let mut older = paper("older", "causal inference", "", json!({}));
        older.created_at = "2025-01-09T00:00:00Z".to_string();
        let mut newer = paper("newer", "causal inference", "", json!({}));
        newer.created_at = "2025-01-14T00:00:00Z".to_string();

        let filters = SearchFilters {
            sort_by: SortOrder::DateDesc,
            ..Default::default()
        };
        let results = search_papers("causal inference", &[older, newer], &filters, now());
        let ids: Vec<_> = results.iter().map(|r| r.paper.id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "older"]);
    }

    #[test]
    fn test_malformed_analysis_degrades_to_neutral() {
        let papers = vec![paper(
            "odd",
            "spiking neural networks",
            "",
            json!({ "complexity_score": "very high", "domain_secondary": 7 }),
        )];
        // Still searchable; malformed fields read as absent.
        let results = search_papers(
            "spiking neural networks",
            &papers,
            &SearchFilters::default(),
            now(),
        );
        assert_eq!(results.len(), 1);

        let filtered = SearchFilters {
            complexity: vec![ComplexityBucket::Expert],
            ..Default::default()
        };
        assert!(search_papers("spiking neural networks", &papers, &filtered, now()).is_empty());
    }
}
