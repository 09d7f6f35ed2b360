//! Whole-row scoring support.
//!
//! A candidate's searchable columns are joined into one string so a single
//! query can match across columns; the resulting score is then split back
//! into per-column scores with column-local offsets for highlighting.
//!
//! All lengths and offsets here are `char` indices.

use super::columns::Columns;
use super::score::Score;

/// Joined text of a candidate's searchable columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowText {
    /// Column texts, each followed by one separator character
    pub text: String,
    /// Index of the separator closing each column, one per searchable column
    pub boundaries: Vec<usize>,
    /// Length of `text` in chars
    pub len: usize,
}

/// Join the searchable columns of `item` in order-index order.
///
/// Every column contributes its text plus one `separator`, and the index of
/// that separator is recorded as the column's boundary, so the final
/// boundary is always `len - 1`. An empty column still contributes a lone
/// separator and a boundary.
pub fn aggregate_row<T>(columns: &Columns<T>, item: &T, separator: char) -> RowText {
    let mut text = String::new();
    let mut boundaries = Vec::new();
    let mut len = 0;

    for column in columns.searchable() {
        let content = column.text(item);
        len += content.chars().count() + 1;
        text.push_str(&content);
        text.push(separator);
        boundaries.push(len - 1);
    }

    RowText {
        text,
        boundaries,
        len,
    }
}

/// Split a whole-row `score` into one score per column.
///
/// `len` and `boundaries` describe the row text the score was computed
/// against. Every resulting score carries the whole-row rank. A match on a
/// boundary belongs to the column that the boundary closes.
pub fn split_score(len: usize, score: &Score, boundaries: &[usize]) -> Vec<Score> {
    let mut scores = Vec::with_capacity(boundaries.len());
    let mut matches = Vec::new();
    let mut next_match = 0;
    let mut next_boundary = 0;
    let mut offset = 0;

    for index in 0..len {
        if score.matches.get(next_match) == Some(&index) {
            matches.push(index - offset);
            next_match += 1;
        }

        if boundaries.get(next_boundary) == Some(&index) || index == len - 1 {
            scores.push(Score::new(score.rank, std::mem::take(&mut matches)));
            next_boundary += 1;
            offset = index + 1;
        }
    }

    scores
}
