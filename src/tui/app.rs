use crate::picker::PickList;
use crate::source::Entry;
use std::sync::Arc;

/// Rows moved by page up/down
const PAGE_SIZE: usize = 10;

/// Application state
pub struct App {
    pub list: PickList<Arc<Entry>>,
    pub query: String,
    pub status_message: String,
    /// Entry chosen by Enter or fast select; ends the session
    pub chosen: Option<Arc<Entry>>,
}

impl App {
    pub fn new(list: PickList<Arc<Entry>>, initial_query: Option<String>) -> Self {
        let mut app = Self {
            list,
            query: initial_query.unwrap_or_default(),
            status_message: String::new(),
            chosen: None,
        };
        app.refresh();
        app
    }

    /// Re-run the pick list against the current query
    pub fn refresh(&mut self) {
        match self.list.refresh(&self.query) {
            Ok(outcome) => {
                if let Some(row) = outcome.selected_row {
                    self.choose(row);
                }
                self.status_message = self.summary();
            }
            Err(e) => {
                log::warn!("refresh failed: {:#}", e);
                self.status_message = format!("Error: {:#}", e);
            }
        }
    }

    fn summary(&self) -> String {
        let mode = if self.list.is_armed() {
            format!("fast select ({} letters)", self.list.codec().width())
        } else {
            "filter".to_string()
        };
        format!("{} matches | {}", self.list.len(), mode)
    }

    fn choose(&mut self, row: usize) {
        self.chosen = row
            .checked_sub(1)
            .and_then(|index| self.list.get(index))
            .map(|item| Arc::clone(item.item()));
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refresh();
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.refresh();
        }
    }

    /// Delete the last word of the query
    pub fn delete_word(&mut self) {
        let trimmed = self.query.trim_end();
        let cut = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.query.truncate(cut);
        self.refresh();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.refresh();
    }

    pub fn accept(&mut self) {
        if let Some(row) = self.list.accept() {
            self.choose(row);
        }
    }

    pub fn select_next(&mut self) {
        self.list.select_next();
    }

    pub fn select_prev(&mut self) {
        self.list.select_prev();
    }

    pub fn select_page_down(&mut self) {
        for _ in 0..PAGE_SIZE {
            if self.list.cursor().is_some_and(|c| c + 1 >= self.list.len()) {
                break;
            }
            self.list.select_next();
        }
    }

    pub fn select_page_up(&mut self) {
        for _ in 0..PAGE_SIZE {
            if self.list.cursor().is_none_or(|c| c == 0) {
                break;
            }
            self.list.select_prev();
        }
    }

    pub fn is_done(&self) -> bool {
        self.chosen.is_some()
    }
}
