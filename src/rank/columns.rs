use crate::error::{PickError, Result};
use rustc_hash::FxHashMap;
use std::fmt;

/// Column text extractor: `(candidate, row)` to display text.
///
/// `row` is the 0-based visible row when rendering and `None` while scoring.
pub type ExtractFn<T> = Box<dyn Fn(&T, Option<usize>) -> String + Send + Sync>;

/// One registered column
pub struct ColumnSpec<T> {
    id: String,
    index: usize,
    searchable: bool,
    extract: ExtractFn<T>,
}

impl<T> ColumnSpec<T> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Order-index: registration position, used for display and scanning
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Include or exclude this column from scoring; it renders either way
    pub fn searchable(&mut self, searchable: bool) -> &mut Self {
        self.searchable = searchable;
        self
    }

    /// Text used for scoring
    pub fn text(&self, item: &T) -> String {
        (self.extract)(item, None)
    }

    /// Text used for rendering at a visible row
    pub fn display_text(&self, item: &T, row: usize) -> String {
        (self.extract)(item, Some(row))
    }
}

impl<T> fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("searchable", &self.searchable)
            .finish()
    }
}

/// Ordered column registry with id lookup
pub struct Columns<T> {
    specs: Vec<ColumnSpec<T>>,
    by_id: FxHashMap<String, usize>,
}

impl<T> Default for Columns<T> {
    fn default() -> Self {
        Self {
            specs: Vec::new(),
            by_id: FxHashMap::default(),
        }
    }
}

impl<T> fmt::Debug for Columns<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.specs).finish()
    }
}

impl<T> Columns<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a searchable column whose text depends only on the candidate
    pub fn add_column<F>(&mut self, id: impl Into<String>, extract: F) -> Result<&mut ColumnSpec<T>>
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.add_row_column(id, move |item: &T, _row: Option<usize>| extract(item))
    }

    /// Register a searchable column whose text may also depend on the visible row
    pub fn add_row_column<F>(&mut self, id: impl Into<String>, extract: F) -> Result<&mut ColumnSpec<T>>
    where
        F: Fn(&T, Option<usize>) -> String + Send + Sync + 'static,
    {
        let id = id.into();
        if self.by_id.contains_key(&id) {
            return Err(PickError::DuplicateColumn(id));
        }

        let index = self.specs.len();
        self.by_id.insert(id.clone(), index);
        self.specs.push(ColumnSpec {
            id,
            index,
            searchable: true,
            extract: Box::new(extract),
        });

        Ok(&mut self.specs[index])
    }

    /// Order-index of the column registered as `id`
    pub fn index_for_id(&self, id: &str) -> Result<usize> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| PickError::UnknownColumn(id.to_string()))
    }

    pub fn get(&self, index: usize) -> Option<&ColumnSpec<T>> {
        self.specs.get(index)
    }

    /// All columns in order-index order
    pub fn iter(&self) -> impl Iterator<Item = &ColumnSpec<T>> {
        self.specs.iter()
    }

    /// Searchable columns in order-index order
    pub fn searchable(&self) -> impl Iterator<Item = &ColumnSpec<T>> {
        self.specs.iter().filter(|spec| spec.searchable)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
