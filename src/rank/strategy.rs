//! Ranking strategies: one query against one string.
//!
//! Strategies are pluggable; the pipeline only orchestrates them across
//! candidates and columns. Two built-ins are provided:
//! - [`FuzzyStrategy`] - ordered subsequence match with position bonuses
//! - [`CharCountStrategy`] - counts query characters present anywhere
//!
//! Whitespace in the query is ignored by both built-ins, so a query never
//! matches the separators placed between columns in whole-row mode.

use super::score::Score;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Scores a query against a candidate string.
///
/// Implementations run concurrently across candidates and must not depend on
/// call order. An `Err` aborts the whole refresh.
pub trait RankingStrategy: Send + Sync {
    fn rank(&self, query: &str, text: &str) -> Result<Score>;
}

impl<F> RankingStrategy for F
where
    F: Fn(&str, &str) -> Result<Score> + Send + Sync,
{
    fn rank(&self, query: &str, text: &str) -> Result<Score> {
        self(query, text)
    }
}

/// Built-in strategy selector for config and CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    Fuzzy,
    CharCount,
}

impl StrategyKind {
    pub fn build(self, weights: &ScoringWeights) -> Box<dyn RankingStrategy> {
        match self {
            StrategyKind::Fuzzy => Box::new(FuzzyStrategy::new(weights.clone())),
            StrategyKind::CharCount => Box::new(CharCountStrategy),
        }
    }
}

/// Configurable weights for fuzzy scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Points for each matched character
    pub match_bonus: f32,
    /// Extra points when the match is the first character of the text
    pub start_of_string_bonus: f32,
    /// Extra points when the match follows a non-alphanumeric character
    pub start_of_word_bonus: f32,
    /// Extra points for a lower-to-upper case transition
    pub camel_case_bonus: f32,
    /// Extra points when the match directly follows the previous match
    pub consecutive_bonus: f32,
    /// Points lost per skipped character between two matches
    pub gap_penalty: f32,
    /// Floor applied to every successful match so it stays above zero
    pub min_rank: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            match_bonus: 16.0,
            start_of_string_bonus: 12.0,
            start_of_word_bonus: 10.0,
            camel_case_bonus: 8.0,
            consecutive_bonus: 6.0,
            gap_penalty: 1.0,
            min_rank: 0.1,
        }
    }
}

/// Single-char case fold so offsets stay aligned with the original text
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn query_chars(query: &str) -> Vec<char> {
    query
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(fold)
        .collect()
}

/// Case-insensitive ordered subsequence matcher.
///
/// Finds the leftmost match end, walks back to the shortest window ending
/// there, then scores the greedy placement inside that window.
#[derive(Debug, Clone, Default)]
pub struct FuzzyStrategy {
    weights: ScoringWeights,
}

impl FuzzyStrategy {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Create a strategy with default weights
    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default())
    }

    fn positions(pattern: &[char], folded: &[char]) -> Option<Vec<usize>> {
        // Forward: earliest index where the whole pattern has been consumed
        let mut pi = 0;
        let mut end = None;
        for (i, c) in folded.iter().enumerate() {
            if *c == pattern[pi] {
                pi += 1;
                if pi == pattern.len() {
                    end = Some(i);
                    break;
                }
            }
        }
        let end = end?;

        // Backward: latest start that still contains the pattern
        let mut pi = pattern.len();
        let mut start = end;
        for i in (0..=end).rev() {
            if folded[i] == pattern[pi - 1] {
                pi -= 1;
                if pi == 0 {
                    start = i;
                    break;
                }
            }
        }

        let mut positions = Vec::with_capacity(pattern.len());
        let mut pi = 0;
        for (i, c) in folded.iter().enumerate().take(end + 1).skip(start) {
            if pi < pattern.len() && *c == pattern[pi] {
                positions.push(i);
                pi += 1;
            }
        }

        Some(positions)
    }

    fn position_bonus(&self, chars: &[char], pos: usize) -> f32 {
        if pos == 0 {
            return self.weights.start_of_string_bonus;
        }

        let prev = chars[pos - 1];
        let current = chars[pos];
        if !prev.is_alphanumeric() {
            self.weights.start_of_word_bonus
        } else if prev.is_lowercase() && current.is_uppercase() {
            self.weights.camel_case_bonus
        } else {
            0.0
        }
    }
}

impl RankingStrategy for FuzzyStrategy {
    fn rank(&self, query: &str, text: &str) -> Result<Score> {
        let pattern = query_chars(query);
        if pattern.is_empty() {
            return Ok(Score::no_match());
        }

        let chars: Vec<char> = text.chars().collect();
        if chars.len() < pattern.len() {
            return Ok(Score::no_match());
        }
        let folded: Vec<char> = chars.iter().copied().map(fold).collect();

        let Some(positions) = Self::positions(&pattern, &folded) else {
            return Ok(Score::no_match());
        };

        let mut rank = 0.0;
        let mut previous: Option<usize> = None;
        for &pos in &positions {
            rank += self.weights.match_bonus + self.position_bonus(&chars, pos);
            if let Some(prev) = previous {
                if pos == prev + 1 {
                    rank += self.weights.consecutive_bonus;
                } else {
                    rank -= (pos - prev - 1) as f32 * self.weights.gap_penalty;
                }
            }
            previous = Some(pos);
        }

        Ok(Score::new(rank.max(self.weights.min_rank), positions))
    }
}

/// All-or-nothing character presence count.
///
/// Each query character is looked up at its first occurrence in the text;
/// the rank is the number of query characters when every one is found and
/// zero otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCountStrategy;

impl RankingStrategy for CharCountStrategy {
    fn rank(&self, query: &str, text: &str) -> Result<Score> {
        let pattern = query_chars(query);
        if pattern.is_empty() {
            return Ok(Score::no_match());
        }

        let folded: Vec<char> = text.chars().map(fold).collect();
        let mut matches = Vec::with_capacity(pattern.len());
        for qc in &pattern {
            match folded.iter().position(|c| c == qc) {
                Some(pos) => matches.push(pos),
                None => return Ok(Score::no_match()),
            }
        }

        matches.sort_unstable();
        matches.dedup();

        Ok(Score::new(pattern.len() as f32, matches))
    }
}
