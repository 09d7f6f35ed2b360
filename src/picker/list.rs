use super::fast_select::{FastSelectResolver, FastSelectState};
use crate::command::{Command, PickCommand};
use crate::error;
use crate::rank::columns::{ColumnSpec, Columns};
use crate::rank::pipeline::{RankOptions, RankPipeline, SortKeyFn};
use crate::rank::score::RankedItem;
use crate::rank::strategy::RankingStrategy;
use crate::utils::alpha::{AlphaCodec, MAX_WIDTH};
use anyhow::Result;
use std::sync::Arc;

/// Candidate source; may return a different universe per command
pub type FetchFn<T, C> = Box<dyn Fn(&C) -> Result<Vec<T>> + Send + Sync>;

/// Published ranked list; replaced wholesale on every recompute
pub type RankedList<T> = Arc<Vec<RankedItem<T>>>;

type ListChangedFn<T> = Box<dyn FnMut(&RankedList<T>)>;
type SelectFn<T> = Box<dyn FnMut(&T)>;
type ArmChangedFn = Box<dyn FnMut(bool)>;

/// What a refresh did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// The ranked list was recomputed and republished
    pub recomputed: bool,
    /// 1-based row chosen by a complete fast-select code
    pub selected_row: Option<usize>,
    /// Fast-select mode is armed after this refresh
    pub armed: bool,
}

/// Incremental filter/rank/select engine behind a quick pick list.
///
/// Each [`refresh`](PickList::refresh) parses the raw input, recomputes the
/// ranked list only when the filter part changed, and then resolves fast
/// select against whatever list is current. Refreshes must be serialized by
/// the caller.
pub struct PickList<T, C = Command> {
    columns: Columns<T>,
    fetch: FetchFn<T, C>,
    strategy: Box<dyn RankingStrategy>,
    sort_key: Box<SortKeyFn<T>>,
    options: RankOptions,
    min_codec_width: usize,
    items: RankedList<T>,
    codec: AlphaCodec,
    previous: Option<C>,
    resolver: FastSelectResolver,
    cursor: Option<usize>,
    on_list_changed: Option<ListChangedFn<T>>,
    on_select: Option<SelectFn<T>>,
    on_arm_changed: Option<ArmChangedFn>,
}

impl<T, C> PickList<T, C>
where
    T: Send,
    C: PickCommand + Sync,
{
    pub fn new<F, K>(fetch: F, strategy: Box<dyn RankingStrategy>, sort_key: K) -> Self
    where
        F: Fn(&C) -> Result<Vec<T>> + Send + Sync + 'static,
        K: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            columns: Columns::new(),
            fetch: Box::new(fetch),
            strategy,
            sort_key: Box::new(sort_key),
            options: RankOptions::default(),
            min_codec_width: 1,
            items: Arc::new(Vec::new()),
            codec: AlphaCodec::default(),
            previous: None,
            resolver: FastSelectResolver::new(),
            cursor: None,
            on_list_changed: None,
            on_select: None,
            on_arm_changed: None,
        }
    }

    pub fn with_options(mut self, options: RankOptions) -> Self {
        self.options = options;
        self
    }

    /// Minimum fast-select code width, clamped to `1..=MAX_WIDTH`
    pub fn with_min_codec_width(mut self, min_codec_width: usize) -> Self {
        self.min_codec_width = min_codec_width.clamp(1, MAX_WIDTH);
        self.codec = AlphaCodec::with_min_width(self.items.len(), self.min_codec_width);
        self
    }

    /// Register a column whose text depends only on the candidate
    pub fn add_column<F>(&mut self, id: impl Into<String>, extract: F) -> error::Result<&mut ColumnSpec<T>>
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.columns.add_column(id, extract)
    }

    /// Register a column whose text may depend on the visible row
    pub fn add_row_column<F>(&mut self, id: impl Into<String>, extract: F) -> error::Result<&mut ColumnSpec<T>>
    where
        F: Fn(&T, Option<usize>) -> String + Send + Sync + 'static,
    {
        self.columns.add_row_column(id, extract)
    }

    pub fn columns(&self) -> &Columns<T> {
        &self.columns
    }

    pub fn column_index_for_id(&self, id: &str) -> error::Result<usize> {
        self.columns.index_for_id(id)
    }

    pub fn set_on_list_changed(&mut self, listener: impl FnMut(&RankedList<T>) + 'static) {
        self.on_list_changed = Some(Box::new(listener));
    }

    pub fn set_on_select(&mut self, listener: impl FnMut(&T) + 'static) {
        self.on_select = Some(Box::new(listener));
    }

    pub fn set_on_arm_changed(&mut self, listener: impl FnMut(bool) + 'static) {
        self.on_arm_changed = Some(Box::new(listener));
    }

    /// Process one edit of the raw input.
    ///
    /// On error nothing is committed: the published list, codec, cursor and
    /// remembered command stay as they were.
    pub fn refresh(&mut self, raw_input: &str) -> Result<RefreshOutcome> {
        let command = C::parse(raw_input);
        let recompute = self
            .previous
            .as_ref()
            .is_none_or(|previous| !command.is_filter_equal(previous));

        if recompute {
            let ranked = RankPipeline::new(&self.columns, self.strategy.as_ref(), self.sort_key.as_ref())
                .with_options(self.options)
                .rank_and_filter(&command, |c| (self.fetch)(c))?;

            self.items = Arc::new(ranked);
            self.codec = AlphaCodec::with_min_width(self.items.len(), self.min_codec_width);
            self.cursor = None;
            if let Some(listener) = self.on_list_changed.as_mut() {
                listener(&self.items);
            }
        } else {
            log::trace!("filter unchanged, keeping {} ranked items", self.items.len());
        }

        let resolution = self.resolver.resolve(&command, &self.codec, self.items.len());
        if recompute {
            self.previous = Some(command);
        }

        if let Some(armed) = resolution.arm_changed
            && let Some(listener) = self.on_arm_changed.as_mut()
        {
            listener(armed);
        }

        if let Some(row) = resolution.row {
            self.select_row(row);
        }

        Ok(RefreshOutcome {
            recomputed: recompute,
            selected_row: resolution.row,
            armed: self.resolver.is_armed(),
        })
    }
}

impl<T, C> PickList<T, C> {
    /// Snapshot of the published list
    pub fn items(&self) -> RankedList<T> {
        Arc::clone(&self.items)
    }

    pub fn get(&self, index: usize) -> Option<&RankedItem<T>> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Row labels for the current list
    pub fn codec(&self) -> &AlphaCodec {
        &self.codec
    }

    pub fn is_armed(&self) -> bool {
        self.resolver.is_armed()
    }

    pub fn fast_select_state(&self) -> FastSelectState {
        self.resolver.state()
    }

    /// 0-based index of the highlighted row
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Move the cursor down; moving past the last row clears it
    pub fn select_next(&mut self) {
        let count = self.items.len();
        self.cursor = match self.cursor {
            Some(index) if index + 1 >= count => None,
            Some(index) => Some(index + 1),
            None if count > 0 => Some(0),
            None => None,
        };
    }

    /// Move the cursor up; moving above the first row clears it and
    /// moving up from no cursor wraps to the last row
    pub fn select_prev(&mut self) {
        self.cursor = match self.cursor {
            Some(index) => index.checked_sub(1),
            None => self.items.len().checked_sub(1),
        };
    }

    /// Choose the highlighted row, or the first row when nothing is highlighted.
    ///
    /// Returns the chosen 1-based row.
    pub fn accept(&mut self) -> Option<usize> {
        let row = self.cursor.unwrap_or(0) + 1;
        self.select_row(row).then_some(row)
    }

    /// Choose 1-based `row` and notify the select listener; false when no such row exists
    pub fn select_row(&mut self, row: usize) -> bool {
        let items = Arc::clone(&self.items);
        let Some(item) = row.checked_sub(1).and_then(|index| items.get(index)) else {
            return false;
        };

        self.cursor = Some(row - 1);
        if let Some(listener) = self.on_select.as_mut() {
            listener(item.item());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::strategy::CharCountStrategy;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn words() -> PickList<&'static str> {
        let mut list = PickList::new(
            |_: &Command| Ok(vec!["alpha", "beta", "gamma"]),
            Box::new(CharCountStrategy),
            |w: &&'static str| w.to_string(),
        );
        list.add_column("word", |w: &&'static str| w.to_string()).unwrap();
        list
    }

    #[test]
    fn test_cursor_navigation_wraps_through_none() {
        let mut list = words();
        list.refresh("a").unwrap();
        assert_eq!(list.len(), 3);

        list.select_next();
        assert_eq!(list.cursor(), Some(0));
        list.select_next();
        list.select_next();
        assert_eq!(list.cursor(), Some(2));
        list.select_next();
        assert_eq!(list.cursor(), None);

        list.select_prev();
        assert_eq!(list.cursor(), Some(2));
        list.select_prev();
        list.select_prev();
        list.select_prev();
        assert_eq!(list.cursor(), None);
    }

    #[test]
    fn test_accept_defaults_to_first_row() {
        let mut list = words();
        let chosen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&chosen);
        list.set_on_select(move |w: &&'static str| sink.borrow_mut().push(w.to_string()));

        assert_eq!(list.accept(), None);

        list.refresh("m").unwrap();
        assert_eq!(list.accept(), Some(1));
        assert_eq!(list.cursor(), Some(0));
        list.select_next();
        assert_eq!(list.cursor(), None);
        list.select_prev();
        assert_eq!(list.accept(), Some(1));

        assert_eq!(*chosen.borrow(), vec!["gamma", "gamma"]);
    }

    #[test]
    fn test_recompute_clears_cursor() {
        let mut list = words();
        list.refresh("a").unwrap();
        list.select_next();
        assert_eq!(list.cursor(), Some(0));

        list.refresh("a/").unwrap();
        assert_eq!(list.cursor(), Some(0));

        list.refresh("al").unwrap();
        assert_eq!(list.cursor(), None);
    }

    #[test]
    fn test_min_codec_width() {
        let mut list = words().with_min_codec_width(2);
        list.refresh("a").unwrap();
        assert_eq!(list.codec().width(), 2);

        let outcome = list.refresh("a/AB").unwrap();
        assert_eq!(outcome.selected_row, Some(2));
    }

    #[test]
    fn test_huge_min_codec_width_is_clamped() {
        let mut list = words().with_min_codec_width(usize::MAX);
        list.refresh("a").unwrap();
        assert_eq!(list.codec().width(), MAX_WIDTH);

        // Codes still resolve at the clamped width
        let code = format!("a/{}", list.codec().encode(3).unwrap());
        assert_eq!(list.refresh(&code).unwrap().selected_row, Some(3));
        assert_eq!(list.refresh("a/A").unwrap().selected_row, None);
    }
}
