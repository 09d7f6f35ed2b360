use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of scoring one query against one string.
///
/// `matches` holds strictly increasing `char` offsets into the string that
/// was actually scored. A rank above zero means the string matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub rank: f32,
    pub matches: Vec<usize>,
}

impl Score {
    pub fn new(rank: f32, matches: Vec<usize>) -> Self {
        Self { rank, matches }
    }

    /// A failed match with no offsets
    pub fn no_match() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.rank > 0.0
    }
}

/// One candidate together with the scores computed for it in a refresh.
///
/// Scores are keyed by column order-index. In column-filtering mode every
/// searchable column holds its own independent score; in whole-row mode the
/// columns hold the split of a single whole-row score (or, when that score
/// failed, only the first searchable column holds it).
#[derive(Debug, Clone)]
pub struct RankedItem<T> {
    item: T,
    scores: BTreeMap<usize, Score>,
    score_mode_by_column: bool,
    total: f32,
}

impl<T> RankedItem<T> {
    pub fn new(item: T, score_mode_by_column: bool) -> Self {
        Self {
            item,
            scores: BTreeMap::new(),
            score_mode_by_column,
            total: 0.0,
        }
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn into_item(self) -> T {
        self.item
    }

    /// Attach `score` to the column at `column_index`, replacing any earlier score
    pub fn add_score(&mut self, column_index: usize, score: Score) {
        self.scores.insert(column_index, score);
        self.total = self.scores.values().map(|s| s.rank).sum();
    }

    pub fn column_score(&self, column_index: usize) -> Option<&Score> {
        self.scores.get(&column_index)
    }

    /// Held scores in column order
    pub fn scores(&self) -> impl Iterator<Item = (usize, &Score)> {
        self.scores.iter().map(|(index, score)| (*index, score))
    }

    /// Whether the scores came from per-column filters rather than a whole-row split
    pub fn is_scored_by_column(&self) -> bool {
        self.score_mode_by_column
    }

    /// Sum of every held column rank
    pub fn total_score(&self) -> f32 {
        self.total
    }
}
