use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;
use crate::error::{InvalidRange, RejectionReason};

/// A closed span of days, start and end inclusive. Never inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

impl DateRange {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, InvalidRange> {
        if start <= end {
            Ok(DateRange { start, end })
        } else {
            Err(InvalidRange { start, end })
        }
    }

    /// Builds the range spanned by two picks in either order.
    pub fn between(a: CalendarDate, b: CalendarDate) -> Self {
        if a <= b {
            DateRange { start: a, end: b }
        } else {
            DateRange { start: b, end: a }
        }
    }

    pub fn start(&self) -> CalendarDate {
        self.start
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    Single,
    Range,
}

/// The user's choice. Replaced wholesale on every confirmed pick;
/// `RangeStart` is the pending half of an interactive range pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Selection {
    None,
    Single(CalendarDate),
    RangeStart(CalendarDate),
    Range(DateRange),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Pending range start awaiting its second pick.
    pub fn is_pending(&self) -> bool {
        matches!(self, Selection::RangeStart(_))
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Selection::Single(_) | Selection::Range(_))
    }

    /// The date the viewport should travel to on "jump to selection".
    pub fn anchor(&self) -> Option<CalendarDate> {
        match self {
            Selection::None => None,
            Selection::Single(date) => Some(*date),
            Selection::RangeStart(start) => Some(*start),
            Selection::Range(range) => Some(range.start()),
        }
    }

    /// Whether `date` is a picked endpoint (or the single pick).
    pub fn is_endpoint(&self, date: CalendarDate) -> bool {
        match self {
            Selection::None => false,
            Selection::Single(picked) => *picked == date,
            Selection::RangeStart(start) => *start == date,
            Selection::Range(range) => range.start() == date || range.end() == date,
        }
    }

    /// Whether `date` lies inside the selected span.
    pub fn covers(&self, date: CalendarDate) -> bool {
        match self {
            Selection::Range(range) => range.contains(date),
            Selection::RangeStart(start) => *start == date,
            _ => false,
        }
    }
}

/// Gates which dates are selectable. The `disabled` predicate is an
/// external callback, assumed pure but possibly expensive.
#[derive(Default)]
pub struct Constraints {
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
    disabled: Option<Box<dyn Fn(CalendarDate) -> bool>>,
}

impl Constraints {
    pub fn new() -> Self {
        Constraints::default()
    }

    pub fn min(mut self, min: CalendarDate) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: CalendarDate) -> Self {
        self.max = Some(max);
        self
    }

    pub fn disabled<F>(mut self, predicate: F) -> Self
    where
        F: Fn(CalendarDate) -> bool + 'static,
    {
        self.disabled = Some(Box::new(predicate));
        self
    }

    pub fn check(&self, date: CalendarDate) -> Result<(), RejectionReason> {
        if self.min.map_or(false, |min| date < min) || self.max.map_or(false, |max| date > max) {
            return Err(RejectionReason::OutOfBounds);
        }
        if self.disabled.as_ref().map_or(false, |f| f(date)) {
            return Err(RejectionReason::Disabled);
        }

        Ok(())
    }

    pub fn is_selectable(&self, date: CalendarDate) -> bool {
        self.check(date).is_ok()
    }
}

impl fmt::Debug for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraints")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("disabled", &self.disabled.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}

/// Holds the current selection and applies the mode-dependent pick
/// rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionModel {
    mode: SelectionMode,
    selection: Selection,
}

impl SelectionModel {
    pub fn new(mode: SelectionMode) -> Self {
        SelectionModel {
            mode,
            selection: Selection::None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Applies a pick. Single mode replaces the selection atomically;
    /// range mode opens a pending start on the first pick and closes
    /// on the second, with endpoints ordered regardless of pick order.
    /// A rejected pick leaves the selection untouched.
    pub fn try_select(
        &mut self,
        date: CalendarDate,
        constraints: &Constraints,
    ) -> Result<Selection, RejectionReason> {
        constraints.check(date).map_err(|reason| {
            log::debug!("pick of {} rejected: {}", date, reason);
            reason
        })?;

        self.selection = match (self.mode, self.selection) {
            (SelectionMode::Single, _) => Selection::Single(date),
            (SelectionMode::Range, Selection::RangeStart(start)) => {
                Selection::Range(DateRange::between(start, date))
            }
            (SelectionMode::Range, _) => Selection::RangeStart(date),
        };

        Ok(self.selection)
    }

    pub fn clear(&mut self) {
        self.selection = Selection::None;
    }

    pub fn is_complete(&self) -> bool {
        self.selection.is_complete()
    }

    /// Switching modes clears any selection so no stale pick leaks
    /// into the other mode's rules.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode != mode {
            self.mode = mode;
            self.selection = Selection::None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn single_mode_replaces_atomically() {
        let constraints = Constraints::new();
        let mut model = SelectionModel::new(SelectionMode::Single);

        model.try_select(date(2024, 5, 1), &constraints).unwrap();
        model.try_select(date(2024, 5, 9), &constraints).unwrap();
        assert_eq!(model.selection(), Selection::Single(date(2024, 5, 9)));
        assert!(model.is_complete());
    }

    #[test]
    fn rejection_leaves_selection_untouched() {
        let constraints = Constraints::new()
            .min(date(2024, 1, 1))
            .max(date(2024, 12, 31))
            .disabled(|d| d.day() == 13);
        let mut model = SelectionModel::new(SelectionMode::Single);

        model.try_select(date(2024, 5, 1), &constraints).unwrap();

        assert_eq!(
            model.try_select(date(2023, 12, 31), &constraints),
            Err(RejectionReason::OutOfBounds)
        );
        assert_eq!(
            model.try_select(date(2025, 1, 1), &constraints),
            Err(RejectionReason::OutOfBounds)
        );
        assert_eq!(
            model.try_select(date(2024, 6, 13), &constraints),
            Err(RejectionReason::Disabled)
        );
        assert_eq!(model.selection(), Selection::Single(date(2024, 5, 1)));
    }

    #[test]
    fn range_picks_order_endpoints() {
        let constraints = Constraints::new();
        let mut model = SelectionModel::new(SelectionMode::Range);

        model.try_select(date(2024, 5, 20), &constraints).unwrap();
        assert!(model.selection().is_pending());
        assert!(!model.is_complete());

        model.try_select(date(2024, 5, 7), &constraints).unwrap();
        match model.selection() {
            Selection::Range(range) => {
                assert_eq!(range.start(), date(2024, 5, 7));
                assert_eq!(range.end(), date(2024, 5, 20));
            }
            other => panic!("expected a completed range, got {:?}", other),
        }
    }

    #[test]
    fn third_pick_opens_a_new_range() {
        let constraints = Constraints::new();
        let mut model = SelectionModel::new(SelectionMode::Range);

        model.try_select(date(2024, 5, 1), &constraints).unwrap();
        model.try_select(date(2024, 5, 5), &constraints).unwrap();
        model.try_select(date(2024, 6, 2), &constraints).unwrap();
        assert_eq!(model.selection(), Selection::RangeStart(date(2024, 6, 2)));
    }

    #[test]
    fn same_day_range_is_valid() {
        let constraints = Constraints::new();
        let mut model = SelectionModel::new(SelectionMode::Range);

        model.try_select(date(2024, 5, 5), &constraints).unwrap();
        model.try_select(date(2024, 5, 5), &constraints).unwrap();
        assert_eq!(
            model.selection(),
            Selection::Range(DateRange::between(date(2024, 5, 5), date(2024, 5, 5)))
        );
    }

    #[test]
    fn mode_switch_clears_pending_range() {
        let constraints = Constraints::new();
        let mut model = SelectionModel::new(SelectionMode::Range);

        model.try_select(date(2024, 5, 20), &constraints).unwrap();
        model.set_mode(SelectionMode::Single);
        assert_eq!(model.selection(), Selection::None);

        // same mode again is a no-op
        model.try_select(date(2024, 5, 2), &constraints).unwrap();
        model.set_mode(SelectionMode::Single);
        assert_eq!(model.selection(), Selection::Single(date(2024, 5, 2)));
    }

    #[test]
    fn inverted_range_construction_fails() {
        assert!(DateRange::new(date(2024, 5, 9), date(2024, 5, 1)).is_err());
        assert!(DateRange::new(date(2024, 5, 1), date(2024, 5, 1)).is_ok());
    }

    #[test]
    fn range_membership() {
        let range = DateRange::between(date(2024, 5, 10), date(2024, 5, 20));
        assert!(range.contains(date(2024, 5, 10)));
        assert!(range.contains(date(2024, 5, 20)));
        assert!(!range.contains(date(2024, 5, 21)));

        let selection = Selection::Range(range);
        assert!(selection.is_endpoint(date(2024, 5, 10)));
        assert!(!selection.is_endpoint(date(2024, 5, 15)));
        assert!(selection.covers(date(2024, 5, 15)));
    }
}
