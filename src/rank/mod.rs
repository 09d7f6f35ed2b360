pub mod aggregate;
pub mod columns;
pub mod pipeline;
pub mod score;
pub mod strategy;

pub use aggregate::{aggregate_row, split_score, RowText};
pub use columns::{ColumnSpec, Columns};
pub use pipeline::{RankOptions, RankPipeline};
pub use score::{RankedItem, Score};
pub use strategy::{CharCountStrategy, FuzzyStrategy, RankingStrategy, ScoringWeights, StrategyKind};
