//! Ranking pipeline: score every candidate, drop non-matches, sort.
//!
//! Scoring is data-parallel over candidates (rayon) once the candidate count
//! reaches the configured threshold; filtering and sorting wait for the
//! complete scored set.

use super::aggregate::{aggregate_row, split_score};
use super::columns::Columns;
use super::score::RankedItem;
use super::strategy::RankingStrategy;
use crate::command::PickCommand;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::time::Instant;

/// Tunables for a pipeline run
#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    /// Character joining searchable columns in whole-row mode.
    /// Keep it whitespace: the built-in strategies never match whitespace,
    /// so no match offset lands on a column boundary.
    pub separator: char,
    /// Candidate count below which scoring runs on the calling thread
    pub parallel_threshold: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            separator: ' ',
            parallel_threshold: 512,
        }
    }
}

/// Sort-key projection used to break rank ties
pub type SortKeyFn<T> = dyn Fn(&T) -> String + Send + Sync;

/// One configured ranking pass over a column set
pub struct RankPipeline<'a, T> {
    columns: &'a Columns<T>,
    strategy: &'a dyn RankingStrategy,
    sort_key: &'a SortKeyFn<T>,
    options: RankOptions,
}

impl<'a, T: Send> RankPipeline<'a, T> {
    pub fn new(
        columns: &'a Columns<T>,
        strategy: &'a dyn RankingStrategy,
        sort_key: &'a SortKeyFn<T>,
    ) -> Self {
        Self {
            columns,
            strategy,
            sort_key,
            options: RankOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RankOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetch candidates for `command`, then rank and filter them.
    ///
    /// Any fetch or strategy failure aborts the run; no partial list is returned.
    pub fn rank_and_filter<C, F>(&self, command: &C, fetch: F) -> Result<Vec<RankedItem<T>>>
    where
        C: PickCommand + Sync,
        F: FnOnce(&C) -> Result<Vec<T>>,
    {
        let candidates = fetch(command).context("Failed to fetch candidates")?;
        self.rank_candidates(command, candidates)
    }

    /// Rank an already fetched candidate set
    pub fn rank_candidates<C>(&self, command: &C, candidates: Vec<T>) -> Result<Vec<RankedItem<T>>>
    where
        C: PickCommand + Sync,
    {
        let start = Instant::now();
        let candidate_count = candidates.len();

        let scored: Vec<RankedItem<T>> = if candidate_count >= self.options.parallel_threshold {
            candidates
                .into_par_iter()
                .map(|item| self.score_item(command, item))
                .collect::<Result<_>>()?
        } else {
            candidates
                .into_iter()
                .map(|item| self.score_item(command, item))
                .collect::<Result<_>>()?
        };

        let mut keyed: Vec<(String, RankedItem<T>)> = scored
            .into_iter()
            .filter(|item| item.total_score() > 0.0)
            .map(|item| ((self.sort_key)(item.item()), item))
            .collect();

        // Stable: equal rank and key keep fetch order
        keyed.sort_by(|a, b| {
            b.1.total_score()
                .total_cmp(&a.1.total_score())
                .then_with(|| a.0.cmp(&b.0))
        });

        log::debug!(
            "ranked {} candidates, {} kept in {:?} (column mode: {})",
            candidate_count,
            keyed.len(),
            start.elapsed(),
            command.is_column_filtering()
        );

        Ok(keyed.into_iter().map(|(_, item)| item).collect())
    }

    fn score_item<C: PickCommand>(&self, command: &C, item: T) -> Result<RankedItem<T>> {
        let mut ranked = RankedItem::new(item, command.is_column_filtering());

        if command.is_column_filtering() {
            // Filter segment k addresses the k-th searchable column
            for (k, column) in self.columns.searchable().enumerate() {
                let text = column.text(ranked.item());
                let score = self
                    .strategy
                    .rank(command.column_filter(k), &text)
                    .with_context(|| format!("Failed to rank column '{}'", column.id()))?;
                ranked.add_score(column.index(), score);
            }
        } else {
            let row = aggregate_row(self.columns, ranked.item(), self.options.separator);
            let score = self
                .strategy
                .rank(command.column_filter(0), &row.text)
                .context("Failed to rank row")?;

            if score.is_match() {
                let splits = split_score(row.len, &score, &row.boundaries);
                for (column, split) in self.columns.searchable().zip(splits) {
                    ranked.add_score(column.index(), split);
                }
            } else if let Some(first) = self.columns.searchable().next() {
                ranked.add_score(first.index(), score);
            }
        }

        Ok(ranked)
    }
}
