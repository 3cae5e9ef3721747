//! Date-time picker: calendar day grid plus hour and minute steppers.

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent};

use super::control::ControlEvent;
use crate::model::time::{format_timestamp, parse_timestamp};
use crate::model::EditValue;

/// Minutes move in steps of this size and snap to multiples of it.
pub const MINUTE_STEP: u32 = 5;

/// Part of the timestamp that ↑/↓ adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segment {
    Year,
    Month,
    #[default]
    Day,
    Hour,
    Minute,
}

impl Segment {
    const ORDER: [Segment; 5] = [
        Segment::Year,
        Segment::Month,
        Segment::Day,
        Segment::Hour,
        Segment::Minute,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|s| *s == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1).min(Self::ORDER.len() - 1)]
    }

    fn prev(self) -> Self {
        Self::ORDER[self.index().saturating_sub(1)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateTimePicker {
    value: Option<NaiveDateTime>,
    segment: Segment,
}

impl DateTimePicker {
    /// Unparsable input leaves the picker empty.
    pub fn new(raw: &str) -> Self {
        let value = parse_timestamp(raw);
        if value.is_none() && !raw.trim().is_empty() {
            tracing::debug!(value = raw, "Unparsable timestamp, picker starts empty");
        }
        Self {
            value,
            segment: Segment::default(),
        }
    }

    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    #[cfg(test)]
    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// `2025-05-28 14:35`, or empty.
    pub fn display(&self) -> String {
        self.value
            .map(|v| v.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }

    /// Display split around the active segment: (before, segment, after).
    pub fn display_parts(&self) -> Option<(String, String, String)> {
        let text = self.value?.format("%Y-%m-%d %H:%M").to_string();
        let (start, end) = match self.segment {
            Segment::Year => (0, 4),
            Segment::Month => (5, 7),
            Segment::Day => (8, 10),
            Segment::Hour => (11, 13),
            Segment::Minute => (14, 16),
        };
        if text.len() < end {
            return None;
        }
        Some((
            text[..start].to_string(),
            text[start..end].to_string(),
            text[end..].to_string(),
        ))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ControlEvent {
        match key.code {
            KeyCode::Left => {
                self.segment = self.segment.prev();
                ControlEvent::Consumed
            }
            KeyCode::Right => {
                self.segment = self.segment.next();
                ControlEvent::Consumed
            }
            KeyCode::Up | KeyCode::Char('+') => self.step(true, Local::now().naive_local()),
            KeyCode::Down | KeyCode::Char('-') => self.step(false, Local::now().naive_local()),
            KeyCode::Backspace | KeyCode::Delete => {
                self.value = None;
                ControlEvent::Changed(EditValue::Text(String::new()))
            }
            _ => ControlEvent::Ignored,
        }
    }

    /// Adjust the active segment. An empty picker seeds from `now` instead.
    fn step(&mut self, up: bool, now: NaiveDateTime) -> ControlEvent {
        let next = match self.value {
            None => round_to_step(now),
            Some(current) => adjust(current, self.segment, up),
        };
        self.value = Some(next);
        ControlEvent::Changed(EditValue::Text(format_timestamp(&next)))
    }

    /// Weeks of the shown month, Monday first. Empty when the picker is empty.
    pub fn calendar_weeks(&self) -> Vec<[Option<u32>; 7]> {
        let Some(value) = self.value else {
            return Vec::new();
        };
        month_grid(value.year(), value.month())
    }
}

fn adjust(current: NaiveDateTime, segment: Segment, up: bool) -> NaiveDateTime {
    let shifted = match segment {
        Segment::Year => {
            let months = Months::new(12);
            if up {
                current.checked_add_months(months)
            } else {
                current.checked_sub_months(months)
            }
        }
        Segment::Month => {
            let months = Months::new(1);
            if up {
                current.checked_add_months(months)
            } else {
                current.checked_sub_months(months)
            }
        }
        Segment::Day => current.checked_add_signed(Duration::days(if up { 1 } else { -1 })),
        Segment::Hour => current.checked_add_signed(Duration::hours(if up { 1 } else { -1 })),
        Segment::Minute => {
            let minute = current.minute();
            let offset = minute % MINUTE_STEP;
            let delta = match (up, offset) {
                (true, 0) => MINUTE_STEP as i64,
                (true, r) => (MINUTE_STEP - r) as i64,
                (false, 0) => -(MINUTE_STEP as i64),
                (false, r) => -(r as i64),
            };
            current.checked_add_signed(Duration::minutes(delta))
        }
    };
    shifted.unwrap_or(current)
}

/// Round to the nearest minute step, dropping seconds.
pub fn round_to_step(value: NaiveDateTime) -> NaiveDateTime {
    let base = value.with_second(0).and_then(|v| v.with_nanosecond(0)).unwrap_or(value);
    let offset = base.minute() % MINUTE_STEP;
    let delta = if offset * 2 >= MINUTE_STEP {
        (MINUTE_STEP - offset) as i64
    } else {
        -(offset as i64)
    };
    base + Duration::minutes(delta)
}

/// Day numbers laid out Monday..Sunday, one array per week.
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<u32>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let days = first
        .checked_add_months(Months::new(1))
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31);

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = first.weekday().num_days_from_monday() as usize;
    for day in 1..=days {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn at(raw: &str) -> NaiveDateTime {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn hour_steps_by_one() {
        let mut picker = DateTimePicker::new("2025-05-28T14:35:00");
        picker.handle_key(key(KeyCode::Right));
        assert_eq!(picker.segment(), Segment::Hour);
        let event = picker.handle_key(key(KeyCode::Up));
        assert_eq!(event, ControlEvent::Changed(EditValue::Text("2025-05-28T15:35:00".into())));
        picker.handle_key(key(KeyCode::Char('-')));
        picker.handle_key(key(KeyCode::Char('-')));
        assert_eq!(picker.display(), "2025-05-28 13:35");
    }

    #[test]
    fn minutes_snap_to_five() {
        assert_eq!(adjust(at("2025-05-28T14:37:00"), Segment::Minute, true), at("2025-05-28T14:40:00"));
        assert_eq!(adjust(at("2025-05-28T14:37:00"), Segment::Minute, false), at("2025-05-28T14:35:00"));
        assert_eq!(adjust(at("2025-05-28T14:55:00"), Segment::Minute, true), at("2025-05-28T15:00:00"));
        assert_eq!(adjust(at("2025-05-28T00:00:00"), Segment::Minute, false), at("2025-05-27T23:55:00"));
    }

    #[test]
    fn month_step_clamps_day() {
        assert_eq!(adjust(at("2025-01-31T09:00:00"), Segment::Month, true), at("2025-02-28T09:00:00"));
        assert_eq!(adjust(at("2024-02-29T09:00:00"), Segment::Year, true), at("2025-02-28T09:00:00"));
    }

    #[test]
    fn empty_picker_seeds_from_now_rounded() {
        let mut picker = DateTimePicker::new("not a date");
        assert_eq!(picker.display(), "");
        assert!(picker.calendar_weeks().is_empty());

        let event = picker.step(true, at("2025-06-01T10:43:27"));
        assert_eq!(event, ControlEvent::Changed(EditValue::Text("2025-06-01T10:45:00".into())));
    }

    #[test]
    fn rounding_goes_to_nearest_step() {
        assert_eq!(round_to_step(at("2025-06-01T10:42:00")), at("2025-06-01T10:40:00"));
        assert_eq!(round_to_step(at("2025-06-01T10:58:00")), at("2025-06-01T11:00:00"));
    }

    #[test]
    fn backspace_clears() {
        let mut picker = DateTimePicker::new("2025-05-28T14:35:00");
        assert_eq!(
            picker.handle_key(key(KeyCode::Backspace)),
            ControlEvent::Changed(EditValue::Text(String::new()))
        );
        assert_eq!(picker.value(), None);
    }

    #[test]
    fn calendar_starts_on_monday() {
        // 2025-05-01 is a Thursday.
        let weeks = month_grid(2025, 5);
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0], [None, None, None, Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(weeks[4][5], Some(31));
        assert_eq!(month_grid(2024, 2).iter().flatten().flatten().count(), 29);
    }

    #[test]
    fn display_parts_highlight_segment() {
        let picker = DateTimePicker::new("2025-05-28T14:35:00");
        let (before, active, after) = picker.display_parts().unwrap();
        assert_eq!((before.as_str(), active.as_str(), after.as_str()), ("2025-05-", "28", " 14:35"));
    }
}
