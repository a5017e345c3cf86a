//! Core of a calendar date-picker widget: a validated date model,
//! month-grid construction, single/range selection with min/max and
//! disabled-date constraints, a keyboard/pointer interaction state
//! machine, and locale-aware pattern formatting and parsing.
//!
//! The crate renders nothing. A host renderer subscribes to immutable
//! [`Snapshot`]s, draws them, and feeds raw input back in through
//! [`DatePicker::handle`] or [`DatePicker::handle_key`].

pub mod calendar;
pub mod cmds;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod format;
pub mod grid;
pub mod locale;
pub mod picker;
pub mod selection;
pub mod viewport;

pub use calendar::CalendarDate;
pub use cmds::{Cmd, Key, KeyMap};
pub use config::Config;
pub use error::{
    InvalidDate, InvalidRange, InvalidViewport, Notice, ParseError, ParseErrorKind,
    RejectionReason,
};
pub use events::Subscription;
pub use grid::GridCell;
pub use locale::LocaleTable;
pub use picker::{Clock, DatePicker, Phase, Snapshot, SystemClock};
pub use selection::{Constraints, DateRange, Selection, SelectionMode};
pub use viewport::Viewport;
