//! Searchable dropdown selection control.
//!
//! A text input that filters a list of grouped options as the user types and
//! commits one of them, driven by keyboard and pointer events the way a
//! native single select is. The crate holds no rendering code: a host draws
//! the control, forwards its input as [`Event`]s and places the dropdown
//! through a [`Positioner`].

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod matcher;
pub mod option;
pub mod select;
pub mod selection;
pub mod text_field;

pub use config::{MaxSize, OBSERVED_ATTRIBUTES, SelectConfig};
pub use error::ConfigError;
pub use event::{Event, EventResult, Key, Modifiers, PointerTarget};
pub use filter::{FilterOutcome, MIN_VISIBLE_ROWS, filter, visible_rows};
pub use matcher::{MatchStrategy, SearchQuery, TextMatcher, matches};
pub use option::{Entry, OptionGroup, OptionList, SelectOption};
pub use select::{NmdSelect, OpenState, Positioner, SuppressionWindow};
pub use text_field::TextField;
