//! Arbiter Store - Store traits and reference implementations
//!
//! The decision engine's only boundary is its data-store dependency,
//! expressed here as two capability traits: [`RuleStore`] and
//! [`RecommendationStore`]. The crate ships in-memory implementations for
//! tests and demos, and a YAML loader for seeding a rule store from rule
//! definition files.

pub mod error;
pub mod loader;
pub mod memory;
pub mod traits;

// Re-export main types
pub use error::{StoreError, StoreResult};
pub use loader::{load_rules_from_dir, load_rules_from_str, rule_store_from_dir};
pub use memory::{MemoryRecommendationStore, MemoryRuleStore};
pub use traits::{FinalizePatch, HistoryFilter, RecommendationStore, RuleStore};
