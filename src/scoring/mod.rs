pub mod config;
pub mod factors;
pub mod engine;
pub mod validation;

pub use config::*;
pub use engine::{calculate_score, AttributeContribution, ScoreBreakdown, ScoreResult};
pub use validation::validate_profile;
