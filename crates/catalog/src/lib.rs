//! Occupation, course, and labor-market data for the pathwise career engine.
//!
//! This crate provides:
//! - Typed records for occupations, courses, hiring companies, progression
//!   graphs, and classifier training data
//! - [`CareerCatalog`], an immutable snapshot parsed once from embedded
//!   fixtures and shared by reference across the engine
//! - Word-set title similarity used by every fuzzy title lookup

pub mod similarity;
pub mod store;
pub mod types;

pub use similarity::{best_match, find_similar, title_similarity, TitleMatch, DEFAULT_THRESHOLD};
pub use store::{CareerCatalog, CatalogError, ProgressionMap, TransitionMatrix};
pub use types::{
    Course, HiringCompany, Occupation, RiasecScores, SalaryRange, TrainingRecord,
};
