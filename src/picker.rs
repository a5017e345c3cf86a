use std::collections::VecDeque;
use std::sync::mpsc;

use chrono::{Duration, Local};
use serde::Serialize;

use crate::calendar::CalendarDate;
use crate::cmds::{Cmd, Key};
use crate::config::Config;
use crate::context::PickerContext;
use crate::error::Notice;
use crate::events::{Notifier, Subscription};
use crate::format;
use crate::grid::{self, GridCell};
use crate::selection::{Selection, SelectionMode};
use crate::viewport::Viewport;

/// Supplies "today" on demand. Injected so the core never reads
/// ambient time and tests can pin it.
pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// Wall-clock dates from the host system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::from_naive(Local::now().date_naive())
    }
}

/// Interaction phase. `RangeStartPicked` mirrors a pending range
/// start; focus is an independent axis and always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    RangeStartPicked,
}

/// Immutable view of the widget state, emitted after every applied
/// transition and assembled fresh on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub viewport: Viewport,
    pub cells: Vec<GridCell>,
    pub selection: Selection,
    pub focus: CalendarDate,
    pub notice: Option<Notice>,
}

/// The date-picker core: consumes discrete input events, drives
/// viewport and selection, and broadcasts snapshots to subscribers.
pub struct DatePicker {
    config: Config,
    context: PickerContext,
    notifier: Notifier<Snapshot>,
    queue: VecDeque<Cmd>,
    in_transition: bool,
    clock: Box<dyn Clock>,
}

impl DatePicker {
    pub fn new(config: Config) -> Self {
        DatePicker::with_clock(config, SystemClock)
    }

    pub fn with_clock<C: Clock + 'static>(config: Config, clock: C) -> Self {
        let today = clock.today();
        let mut context = PickerContext::new(config.mode, today);

        // focus defaults to today, else the first selectable day in view
        if !config.constraints.is_selectable(today) {
            if let Some(first) = context
                .viewport
                .days()
                .find(|day| config.constraints.is_selectable(*day))
            {
                context.focus = first;
            }
        }

        DatePicker {
            config,
            context,
            notifier: Notifier::new(),
            queue: VecDeque::new(),
            in_transition: false,
            clock: Box::new(clock),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.context.viewport
    }

    pub fn selection(&self) -> Selection {
        self.context.selection.selection()
    }

    pub fn focus(&self) -> CalendarDate {
        self.context.focus
    }

    pub fn mode(&self) -> SelectionMode {
        self.context.selection.mode()
    }

    pub fn phase(&self) -> Phase {
        if self.selection().is_pending() {
            Phase::RangeStartPicked
        } else {
            Phase::Idle
        }
    }

    /// Switches the selection mode, clearing any in-progress pick.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.config.mode = mode;
        self.context.selection.set_mode(mode);
    }

    pub fn subscribe(&mut self) -> (Subscription, mpsc::Receiver<Snapshot>) {
        self.notifier.subscribe()
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.notifier.unsubscribe(subscription)
    }

    pub fn snapshot(&self) -> Snapshot {
        let selection = self.selection();

        Snapshot {
            viewport: self.context.viewport,
            cells: grid::project(
                self.context.viewport,
                self.config.week_start,
                selection,
                &self.config.constraints,
                self.clock.today(),
            ),
            selection,
            focus: self.context.focus,
            notice: self.context.notice.clone(),
        }
    }

    /// Resolves a raw key through the configured map. Unmapped keys
    /// are ignored.
    pub fn handle_key(&mut self, key: Key) {
        match self.config.key_map.get(&key).cloned() {
            Some(cmd) => self.handle(cmd),
            None => log::trace!("ignoring unmapped key {:?}", key),
        }
    }

    /// Applies a command. Commands submitted while a transition is in
    /// flight (a wrapper feeding input back in) queue up and run
    /// afterwards, so mutations keep a total order. Each applied
    /// transition broadcasts one snapshot.
    pub fn handle(&mut self, cmd: Cmd) {
        self.queue.push_back(cmd);
        if self.in_transition {
            return;
        }

        self.in_transition = true;
        while let Some(cmd) = self.queue.pop_front() {
            if self.apply(cmd) {
                let snapshot = self.snapshot();
                self.notifier.broadcast(&snapshot);
            }
        }
        self.in_transition = false;
    }

    fn apply(&mut self, cmd: Cmd) -> bool {
        log::trace!("applying {:?}", cmd);
        let notice_cleared = self.context.notice.take().is_some();

        let changed = match cmd {
            Cmd::NextDay => self.move_focus(Duration::days(1)),
            Cmd::PrevDay => self.move_focus(Duration::days(-1)),
            Cmd::NextWeek => self.move_focus(Duration::days(7)),
            Cmd::PrevWeek => self.move_focus(Duration::days(-7)),
            Cmd::FirstDay => self.focus_month_edge(true),
            Cmd::LastDay => self.focus_month_edge(false),
            Cmd::NextMonth => self.shift_focus_month(1),
            Cmd::PrevMonth => self.shift_focus_month(-1),
            Cmd::PageForward => {
                self.context.viewport = self.context.viewport.next();
                true
            }
            Cmd::PageBack => {
                self.context.viewport = self.context.viewport.previous();
                true
            }
            Cmd::GoToToday => {
                let today = self.clock.today();
                self.context.viewport = Viewport::of(today);
                self.context.focus = today;
                true
            }
            Cmd::JumpToSelection => match self.selection().anchor() {
                Some(anchor) => {
                    self.context.viewport = Viewport::of(anchor);
                    true
                }
                None => false,
            },
            Cmd::Activate => self.activate(self.context.focus),
            Cmd::ActivateCell(date) => self.activate(date),
            Cmd::SubmitText(text) => self.submit_text(&text),
            Cmd::ClearSelection => {
                self.context.selection.clear();
                true
            }
            Cmd::Cancel => {
                if self.selection().is_pending() {
                    self.context.selection.clear();
                    true
                } else {
                    false
                }
            }
        };

        changed || notice_cleared
    }

    fn move_focus(&mut self, step: Duration) -> bool {
        self.context.focus = self.context.focus + step;
        self.context.reveal_focus();
        true
    }

    fn focus_month_edge(&mut self, first: bool) -> bool {
        let constraints = &self.config.constraints;
        let target = if first {
            self.context
                .viewport
                .days()
                .find(|day| constraints.is_selectable(*day))
        } else {
            self.context
                .viewport
                .days()
                .filter(|day| constraints.is_selectable(*day))
                .last()
        };

        match target {
            Some(day) => {
                self.context.focus = day;
                true
            }
            None => false,
        }
    }

    fn shift_focus_month(&mut self, delta: i32) -> bool {
        self.context.focus = self.context.focus.add_months(delta);
        self.context.reveal_focus();
        true
    }

    fn activate(&mut self, date: CalendarDate) -> bool {
        match self
            .context
            .selection
            .try_select(date, &self.config.constraints)
        {
            Ok(_) => {
                self.context.focus = date;
                self.context.reveal_focus();
                true
            }
            Err(reason) => {
                // expected outcome, surfaced as a hint
                self.context.notice = Some(Notice::Rejected(reason));
                true
            }
        }
    }

    fn submit_text(&mut self, text: &str) -> bool {
        match format::parse(text, &self.config.pattern, &self.config.locale) {
            Ok(date) => self.activate(date),
            Err(err) => {
                log::debug!("rejecting submitted text {:?}: {}", text, err);
                self.context.notice = Some(Notice::InvalidInput(err));
                true
            }
        }
    }
}
