//! Pick list state: refresh gate, fast select and explicit selection.

pub mod fast_select;
pub mod list;

pub use fast_select::{FastSelectResolver, FastSelectState, Resolution};
pub use list::{FetchFn, PickList, RankedList, RefreshOutcome};
