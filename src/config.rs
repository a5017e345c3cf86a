use std::collections::HashMap;

use chrono::Weekday;

use crate::calendar::CalendarDate;
use crate::cmds::{Cmd, Key, KeyMap};
use crate::locale::LocaleTable;
use crate::selection::{Constraints, SelectionMode};

/// Recognized widget options. `mode` is the initial selection mode;
/// runtime switches go through `DatePicker::set_mode`.
#[derive(Debug)]
pub struct Config {
    pub mode: SelectionMode,
    pub week_start: Weekday,
    pub constraints: Constraints,
    pub locale: LocaleTable,
    pub pattern: String,
    pub key_map: KeyMap,
}

impl Default for Config {
    fn default() -> Config {
        let mut config = Config {
            mode: SelectionMode::Single,
            week_start: Weekday::Sun,
            constraints: Constraints::default(),
            locale: LocaleTable::default(),
            pattern: "YYYY-MM-DD".to_owned(),
            key_map: HashMap::new(),
        };

        config.key_map.insert(Key::Left, Cmd::PrevDay);
        config.key_map.insert(Key::Right, Cmd::NextDay);
        config.key_map.insert(Key::Up, Cmd::PrevWeek);
        config.key_map.insert(Key::Down, Cmd::NextWeek);
        config.key_map.insert(Key::Home, Cmd::FirstDay);
        config.key_map.insert(Key::End, Cmd::LastDay);
        config.key_map.insert(Key::PageUp, Cmd::PrevMonth);
        config.key_map.insert(Key::PageDown, Cmd::NextMonth);
        config.key_map.insert(Key::Enter, Cmd::Activate);
        config.key_map.insert(Key::Char(' '), Cmd::Activate);
        config.key_map.insert(Key::Esc, Cmd::Cancel);
        config.key_map.insert(Key::Char('h'), Cmd::PrevDay);
        config.key_map.insert(Key::Char('l'), Cmd::NextDay);
        config.key_map.insert(Key::Char('k'), Cmd::PrevWeek);
        config.key_map.insert(Key::Char('j'), Cmd::NextWeek);
        config.key_map.insert(Key::Char('t'), Cmd::GoToToday);

        config
    }
}

impl Config {
    pub fn mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn min(mut self, min: CalendarDate) -> Self {
        self.constraints = self.constraints.min(min);
        self
    }

    pub fn max(mut self, max: CalendarDate) -> Self {
        self.constraints = self.constraints.max(max);
        self
    }

    pub fn disabled<F>(mut self, predicate: F) -> Self
    where
        F: Fn(CalendarDate) -> bool + 'static,
    {
        self.constraints = self.constraints.disabled(predicate);
        self
    }

    pub fn locale(mut self, locale: LocaleTable) -> Self {
        self.locale = locale;
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = pattern.to_owned();
        self
    }

    /// Rebinds a key, replacing any default binding.
    pub fn bind(mut self, key: Key, cmd: Cmd) -> Self {
        self.key_map.insert(key, cmd);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_navigation() {
        let config = Config::default();
        assert_eq!(config.key_map.get(&Key::Left), Some(&Cmd::PrevDay));
        assert_eq!(config.key_map.get(&Key::Char('j')), Some(&Cmd::NextWeek));
        assert_eq!(config.key_map.get(&Key::Esc), Some(&Cmd::Cancel));
    }

    #[test]
    fn bind_overrides_default() {
        let config = Config::default().bind(Key::Char('t'), Cmd::JumpToSelection);
        assert_eq!(
            config.key_map.get(&Key::Char('t')),
            Some(&Cmd::JumpToSelection)
        );
    }
}
