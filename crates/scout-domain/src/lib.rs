//! Domain types shared across the scout research suite
//!
//! This crate provides the canonical record shapes for research-paper
//! analysis data:
//! - Paper: an uploaded research paper plus its externally-produced analysis
//! - Summary: an age-targeted summary of a paper
//! - CodeGeneration, Visualization: derived artifacts for a paper
//! - Notification, SimilarPapers: auxiliary per-user records
//! - GuestSession: the on-device pseudo-identity used without an account
//!
//! Externally computed payloads (analysis records, summary content,
//! visualization configs) are carried as opaque `serde_json::Value` and
//! never interpreted here.

pub mod generation;
pub mod guest;
pub mod notification;
pub mod paper;
pub mod similar;
pub mod summary;

pub use generation::{CodeGeneration, CodeGenerationDraft, Visualization, VisualizationDraft};
pub use guest::GuestSession;
pub use notification::{Notification, NotificationDraft};
pub use paper::{Paper, PaperDraft};
pub use similar::{SimilarPaperRef, SimilarPapers, SimilarPapersDraft};
pub use summary::{Summary, SummaryDraft};
