//! Parsed input commands.
//!
//! The engine consumes commands through [`PickCommand`] so hosts can bring
//! their own input grammar; [`Command`] is the default one.

pub mod parser;

pub use parser::{parse_command, Command};

/// Contract between an input grammar and the pick list engine.
///
/// Filter segment `k` addresses the `k`-th *searchable* column in
/// order-index order; non-searchable columns never consume a segment. A
/// grammar must author its segments in that order.
pub trait PickCommand: Sized {
    /// Parse raw input; never fails
    fn parse(input: &str) -> Self;

    /// Raw input was empty or whitespace
    fn is_blank(&self) -> bool;

    /// Score each searchable column against its own segment instead of the whole row
    fn is_column_filtering(&self) -> bool;

    /// Segment `k`, or the empty string past the last one.
    /// Segment 0 is the whole-row query outside column-filtering mode.
    fn column_filter(&self, k: usize) -> &str;

    /// Fast-select token present
    fn is_fast_select(&self) -> bool;

    /// Row code typed after the fast-select token
    fn fast_select_code(&self) -> Option<&str>;

    /// True when both commands produce the same ranked set.
    /// Fast-select state must not take part in the comparison.
    fn is_filter_equal(&self, other: &Self) -> bool;
}
