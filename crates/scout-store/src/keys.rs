//! Storage key layout for the on-device store

/// Collection holding every locally saved paper.
pub const PAPERS_KEY: &str = "research_papers";

/// Per-paper summary collections: `summaries_<paper_id>`.
pub const SUMMARIES_PREFIX: &str = "summaries_";

/// Per-paper code-generation collections: `code_<paper_id>`.
pub const CODE_PREFIX: &str = "code_";

/// Per-paper visualization collections: `visualizations_<paper_id>`.
pub const VISUALIZATIONS_PREFIX: &str = "visualizations_";

/// The persisted guest session record.
pub const GUEST_SESSION_KEY: &str = "scout_guest_session";
