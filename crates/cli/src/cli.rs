use clap::{Parser, Subcommand, ValueEnum};
use pathwise_engine::MatchStrategy;
use std::path::PathBuf;

/// Occupation scoring strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum StrategyArg {
    /// Score by tf-idf similarity between profile text and occupation requirements.
    #[default]
    Lexical,
    /// Score with the classifier trained on the embedded placement records.
    Supervised,
}

impl From<StrategyArg> for MatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Lexical => MatchStrategy::Lexical,
            StrategyArg::Supervised => MatchStrategy::Supervised,
        }
    }
}

/// Output rendering for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Command-line interface for the `pathwise` application.
#[derive(Debug, Parser)]
#[command(
    name = "pathwise",
    about = "Career recommendations, skill gaps, courses, and trajectory projections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `pathwise` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ranks catalog occupations against a profile.
    Recommend {
        /// Profile request JSON file (resume, confirmed skills, personality).
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,
        /// Scoring strategy (overrides `PATHWISE_STRATEGY`).
        #[arg(long, value_enum, env = "PATHWISE_STRATEGY", default_value_t = StrategyArg::Lexical)]
        strategy: StrategyArg,
        /// Maximum recommendations to print.
        #[arg(long, default_value_t = 5)]
        limit: usize,
        /// Appends a per-recommendation explanation of the match.
        #[arg(long, default_value_t = false)]
        explain: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Computes skill gaps and development plans for the top matches.
    Gaps {
        /// Profile request JSON file (resume, confirmed skills, personality).
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,
        /// Number of top occupations to analyze.
        #[arg(long, default_value_t = 3)]
        limit: usize,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Recommends courses that close missing skills.
    Courses {
        /// Profile request JSON file (resume, confirmed skills, personality).
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,
        /// Skill to close (repeatable); defaults to the top match's prioritized gaps.
        #[arg(long = "skill", value_name = "SKILL")]
        skills: Vec<String>,
        /// Courses listed per skill.
        #[arg(long, default_value_t = 3)]
        limit: usize,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Projects career paths from a starting role.
    Trajectory {
        /// Role title to project from, e.g. "Software Developer".
        role: String,
        /// Optional profile request JSON file used to personalize the paths.
        #[arg(long, value_name = "FILE")]
        profile: Option<PathBuf>,
        /// Projection horizon in years.
        #[arg(long, value_name = "YEARS", default_value_t = pathwise_engine::DEFAULT_TIME_HORIZON)]
        horizon: usize,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}
