use chrono::Weekday;
use derive_more::Constructor;
use serde::Serialize;

use crate::calendar::CalendarDate;
use crate::selection::{Constraints, Selection};
use crate::viewport::Viewport;

/// One derived day cell of the 6×7 grid. Never stored; recomputed from
/// viewport, selection and constraints on every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Constructor)]
pub struct GridCell {
    pub date: CalendarDate,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub in_range: bool,
    pub selectable: bool,
}

/// Projects the 42 cells for the current state. The disabled predicate
/// runs exactly once per cell.
pub fn project(
    viewport: Viewport,
    week_start: Weekday,
    selection: Selection,
    constraints: &Constraints,
    today: CalendarDate,
) -> Vec<GridCell> {
    viewport
        .grid(week_start)
        .into_iter()
        .map(|date| {
            let selectable = constraints.is_selectable(date);
            GridCell::new(
                date,
                viewport.contains(date),
                date == today,
                selection.is_endpoint(date),
                selection.covers(date),
                selectable,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::calendar::GRID_CELLS;
    use crate::selection::DateRange;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn projects_42_cells_with_month_membership() {
        let viewport = Viewport::new(2024, 2).unwrap();
        let cells = project(
            viewport,
            Weekday::Mon,
            Selection::None,
            &Constraints::new(),
            date(2024, 2, 15),
        );

        assert_eq!(cells.len(), GRID_CELLS);
        assert_eq!(cells.iter().filter(|c| c.in_month).count(), 29);
        assert_eq!(cells.iter().filter(|c| c.is_today).count(), 1);
        // Feb 2024 starts on a Thursday; the Monday-first grid leads
        // with three January cells.
        assert_eq!(cells[0].date, date(2024, 1, 29));
        assert!(!cells[0].in_month);
    }

    #[test]
    fn range_flags() {
        let viewport = Viewport::new(2024, 5).unwrap();
        let selection =
            Selection::Range(DateRange::between(date(2024, 5, 10), date(2024, 5, 12)));
        let cells = project(
            viewport,
            Weekday::Mon,
            selection,
            &Constraints::new(),
            date(2024, 5, 1),
        );

        let cell = |day| {
            cells
                .iter()
                .find(|c| c.date == date(2024, 5, day))
                .copied()
                .unwrap()
        };

        assert!(cell(10).is_selected && cell(10).in_range);
        assert!(!cell(11).is_selected && cell(11).in_range);
        assert!(cell(12).is_selected && cell(12).in_range);
        assert!(!cell(13).in_range);
    }

    #[test]
    fn disabled_predicate_runs_once_per_cell() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&calls);
        let constraints = Constraints::new().disabled(move |_| {
            counter.set(counter.get() + 1);
            false
        });

        let viewport = Viewport::new(2024, 5).unwrap();
        project(
            viewport,
            Weekday::Mon,
            Selection::None,
            &constraints,
            date(2024, 5, 1),
        );

        assert_eq!(calls.get(), GRID_CELLS as u32);
    }

    #[test]
    fn constraint_flags_mark_unselectable_cells() {
        let viewport = Viewport::new(2024, 5).unwrap();
        let constraints = Constraints::new()
            .min(date(2024, 5, 10))
            .max(date(2024, 5, 20));
        let cells = project(
            viewport,
            Weekday::Mon,
            Selection::None,
            &constraints,
            date(2024, 5, 1),
        );

        assert!(!cells.iter().find(|c| c.date == date(2024, 5, 9)).unwrap().selectable);
        assert!(cells.iter().find(|c| c.date == date(2024, 5, 10)).unwrap().selectable);
        assert!(!cells.iter().find(|c| c.date == date(2024, 5, 21)).unwrap().selectable);
    }
}
