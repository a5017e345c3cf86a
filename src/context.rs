use crate::calendar::CalendarDate;
use crate::error::Notice;
use crate::selection::{SelectionMode, SelectionModel};
use crate::viewport::Viewport;

/// Mutable state bundle of the interaction machine: what is shown,
/// what is picked, where keyboard focus sits, and the last surfaced
/// outcome. Mutated only by `DatePicker` transitions.
#[derive(Debug)]
pub struct PickerContext {
    pub viewport: Viewport,
    pub selection: SelectionModel,
    pub focus: CalendarDate,
    pub notice: Option<Notice>,
}

impl PickerContext {
    pub fn new(mode: SelectionMode, today: CalendarDate) -> Self {
        PickerContext {
            viewport: Viewport::of(today),
            selection: SelectionModel::new(mode),
            focus: today,
            notice: None,
        }
    }

    pub fn focus_visible(&self) -> bool {
        self.viewport.contains(self.focus)
    }

    /// Moves the viewport to the focused month if focus wandered out
    /// of view. One month step per day/week move, by construction.
    pub fn reveal_focus(&mut self) {
        if !self.focus_visible() {
            self.viewport = Viewport::of(self.focus);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn starts_on_todays_month() {
        let context = PickerContext::new(SelectionMode::Single, date(2024, 5, 17));
        assert_eq!(context.viewport, Viewport::new(2024, 5).unwrap());
        assert_eq!(context.focus, date(2024, 5, 17));
        assert!(context.focus_visible());
    }

    #[test]
    fn reveal_focus_follows_month_crossing() {
        let mut context = PickerContext::new(SelectionMode::Single, date(2024, 5, 31));
        context.focus = context.focus + Duration::days(1);
        assert!(!context.focus_visible());

        context.reveal_focus();
        assert_eq!(context.viewport, Viewport::new(2024, 6).unwrap());
        assert!(context.focus_visible());
    }
}
