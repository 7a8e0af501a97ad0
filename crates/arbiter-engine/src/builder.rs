//! Builder pattern for DecisionEngine
//!
//! # Example
//!
//! ```rust,ignore
//! use arbiter_engine::DecisionEngine;
//! use arbiter_store::{MemoryRecommendationStore, MemoryRuleStore};
//!
//! let engine = DecisionEngine::builder()
//!     .with_rule_store(MemoryRuleStore::with_rules(rules))
//!     .with_recommendation_store(MemoryRecommendationStore::new())
//!     .build()?;
//! ```

use crate::engine::DecisionEngine;
use crate::error::{EngineError, Result};
use arbiter_store::{RecommendationStore, RuleStore};
use std::sync::Arc;

/// Builder for [`DecisionEngine`]
#[derive(Default)]
pub struct DecisionEngineBuilder {
    rule_store: Option<Arc<dyn RuleStore>>,
    recommendation_store: Option<Arc<dyn RecommendationStore>>,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule store
    pub fn with_rule_store(mut self, store: impl RuleStore + 'static) -> Self {
        self.rule_store = Some(Arc::new(store));
        self
    }

    /// Set the rule store from an existing shared handle
    pub fn with_shared_rule_store(mut self, store: Arc<dyn RuleStore>) -> Self {
        self.rule_store = Some(store);
        self
    }

    /// Set the recommendation store
    pub fn with_recommendation_store(
        mut self,
        store: impl RecommendationStore + 'static,
    ) -> Self {
        self.recommendation_store = Some(Arc::new(store));
        self
    }

    /// Set the recommendation store from an existing shared handle
    pub fn with_shared_recommendation_store(
        mut self,
        store: Arc<dyn RecommendationStore>,
    ) -> Self {
        self.recommendation_store = Some(store);
        self
    }

    /// Build the engine; both stores are required
    pub fn build(self) -> Result<DecisionEngine> {
        let rules = self
            .rule_store
            .ok_or_else(|| EngineError::Config("rule store is required".to_string()))?;
        let recommendations = self
            .recommendation_store
            .ok_or_else(|| EngineError::Config("recommendation store is required".to_string()))?;
        Ok(DecisionEngine::new(rules, recommendations))
    }
}
