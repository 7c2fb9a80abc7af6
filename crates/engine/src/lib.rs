//! Career recommendation and gap-analysis engine.
//!
//! This crate provides:
//! - Occupation matching with lexical and supervised scoring strategies
//! - Skill-gap analysis with prioritization and development planning
//! - Course matching against skills worth developing
//! - Career trajectory projection over progression chains

pub mod courses;
pub mod gaps;
pub mod matcher;
pub mod text;
pub mod trajectory;

pub use courses::CourseMatcher;
pub use gaps::{
    analyze_skill_gaps, estimate_development_time, recommend_development_paths, DevelopmentPlan,
    Intensity, MissingSkills, SkillGap, StrategyKind, StrategyStep, TimeEstimate, TimeFrame,
};
pub use matcher::{
    explain_recommendation, MatchStrategy, MatcherConfig, OccupationMatcher, Recommendation,
    TitleClassifier, TrainError, TrainedModel, BASE_SCORE_WEIGHT, DEFAULT_AFFINITY,
    PERSONALITY_WEIGHT,
};
pub use text::{cosine, tokenize, SparseVector, TfIdfSpace};
pub use trajectory::{
    CareerTrajectory, ProjectedPath, RoleStage, TrajectoryProjector, DEFAULT_TIME_HORIZON,
    ROLE_MATCH_THRESHOLD,
};
