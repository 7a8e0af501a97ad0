//! Data model for decision rules and recommendations

pub mod recommendation;
pub mod rule;
