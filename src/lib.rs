//! # quickpick - Incremental fuzzy quick pick engine
//!
//! quickpick narrows a candidate set as the user types, scores each
//! candidate per column, orders the survivors and lets a visible row be
//! chosen with a short letter code.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`command`] - Input grammar (`a | b` column filters, `/CODE` fast select)
//! - [`rank`] - Columns, scores, ranking strategies and the ranking pipeline
//! - [`picker`] - Pick list state: refresh gate, fast select, selection
//! - [`source`] - Loading candidates from delimited text or JSON lines
//! - [`output`] - Plain, colored and JSON printing of ranked rows
//! - `tui` - Interactive terminal UI (feature `interactive`)
//! - [`utils`] - Row label codec and configuration file
//!
//! ## Quick Start
//!
//! ```
//! use quickpick::picker::PickList;
//! use quickpick::rank::CharCountStrategy;
//!
//! let mut list = PickList::new(
//!     |_: &quickpick::command::Command| Ok(vec!["apple", "apply", "banana"]),
//!     Box::new(CharCountStrategy),
//!     |s: &&'static str| s.to_string(),
//! );
//! list.add_column("name", |s: &&'static str| s.to_string()).unwrap();
//!
//! list.refresh("app").unwrap();
//! assert_eq!(list.len(), 2);
//!
//! // Second row is labelled "B"; typing its code selects it
//! let outcome = list.refresh("app/b").unwrap();
//! assert_eq!(outcome.selected_row, Some(2));
//! ```
//!
//! ## Refresh cost
//!
//! A refresh only reruns the pipeline when the filter part of the input
//! changed. Typing a fast-select code reuses the published list, so row
//! labels stay stable while the code is being typed.

pub mod command;
pub mod error;
pub mod output;
pub mod picker;
pub mod rank;
pub mod source;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;
