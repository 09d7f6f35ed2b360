//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`alpha`] - Bijective base-26 row labels (`A`..`Z`, `AA`..)
//! - [`app_data`] - Configuration file in the platform config directory
//!
//! ```
//! use quickpick::utils::{from_alpha, to_alpha, AlphaCodec};
//!
//! assert_eq!(to_alpha(27), "AA");
//! assert_eq!(from_alpha("aa"), Some(27));
//!
//! // Fixed-width labels for a 30-row list
//! let codec = AlphaCodec::new(30);
//! assert_eq!(codec.encode(1).as_deref(), Some("AA"));
//! assert_eq!(codec.decode("BD"), Some(30));
//! ```

pub mod alpha;
pub mod app_data;

pub use alpha::*;
pub use app_data::*;
