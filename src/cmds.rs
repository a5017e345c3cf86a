use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;

/// Discrete inputs consumed by the interaction state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    /// Move focus by one day or one week.
    NextDay,
    PrevDay,
    NextWeek,
    PrevWeek,
    /// Focus the first/last selectable day of the visible month.
    FirstDay,
    LastDay,
    /// Move focus one month, preserving the day where possible.
    NextMonth,
    PrevMonth,
    /// Page the viewport without touching focus.
    PageForward,
    PageBack,
    GoToToday,
    JumpToSelection,
    /// Activate the focused cell (Enter/Space).
    Activate,
    /// Pointer activation of a specific cell.
    ActivateCell(CalendarDate),
    /// Text submitted from the paired entry field.
    SubmitText(String),
    ClearSelection,
    /// Abandon a pending range start.
    Cancel,
}

/// Raw key events as delivered by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Esc,
    Char(char),
}

pub type KeyMap = HashMap<Key, Cmd>;
