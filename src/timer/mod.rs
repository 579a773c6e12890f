//! Step timers.
//!
//! A step's description is scanned for a duration such as "৩০ মিনিট",
//! "10 to 15 minutes" or "২ ঘন্টা". When one is found the step gets a
//! countdown that is decremented once per elapsed second while running.
//!
//! Only the first duration in the text is used, and only the first number
//! of a range. Non-integer phrasings ("half an hour") yield no timer.

use crate::search::parse_number;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Time units recognized in step text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurationUnit {
    Second,
    Minute,
    Hour,
}

impl DurationUnit {
    /// Number of seconds in one unit.
    pub fn seconds(self) -> u64 {
        match self {
            DurationUnit::Second => 1,
            DurationUnit::Minute => 60,
            DurationUnit::Hour => 3600,
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        if token.starts_with("second") || token == "সেকেন্ড" {
            Some(DurationUnit::Second)
        } else if token.starts_with("minute") || token == "মিনিট" {
            Some(DurationUnit::Minute)
        } else if token.starts_with("hour") || token == "ঘন্টা" || token == "ঘণ্টা" {
            Some(DurationUnit::Hour)
        } else {
            None
        }
    }
}

/// A duration found in free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDuration {
    pub value: u64,
    pub unit: DurationUnit,
}

impl StepDuration {
    /// Total length in seconds, or `None` on overflow.
    pub fn as_seconds(&self) -> Option<u64> {
        self.value.checked_mul(self.unit.seconds())
    }
}

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)([0-9০-৯]+)\s*(?:(?:to|-|–|থেকে)\s*)?(?:[0-9০-৯]*\s*)?(seconds?|minutes?|hours?|সেকেন্ড|মিনিট|ঘন্টা|ঘণ্টা)",
        )
        .expect("duration pattern is valid")
    })
}

/// Finds the first duration in `text`.
///
/// A number that is the fractional part of a decimal ("1.5 hours") is not a
/// duration; the search moves on to the next match.
pub fn parse_duration(text: &str) -> Option<StepDuration> {
    let caps = duration_regex()
        .captures_iter(text)
        .find(|caps| caps.get(0).is_some_and(|m| !follows_decimal_point(text, m.start())))?;
    let value = parse_number(&caps[1])?;
    let unit = DurationUnit::from_token(&caps[2])?;
    Some(StepDuration { value, unit })
}

fn follows_decimal_point(text: &str, start: usize) -> bool {
    let mut before = text[..start].chars().rev();
    matches!(before.next(), Some('.' | ','))
        && before
            .next()
            .is_some_and(|c| c.is_ascii_digit() || ('০'..='৯').contains(&c))
}

/// Seconds of the first duration in `text`, if any.
pub fn parse_duration_seconds(text: &str) -> Option<u64> {
    parse_duration(text)?.as_seconds()
}

/// Countdown attached to a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub running: bool,
}

impl TimerState {
    /// A full, running countdown of `seconds`.
    pub fn new(seconds: u64) -> Self {
        TimerState {
            total_seconds: seconds,
            remaining_seconds: seconds,
            running: true,
        }
    }

    /// Builds the timer for a step's text, or `None` if it names no duration.
    pub fn for_text(text: &str) -> Option<Self> {
        parse_duration_seconds(text).map(Self::new)
    }

    /// Applies one elapsed second.
    ///
    /// Paused timers are left untouched. A running timer that reaches zero
    /// stops itself. Returns true if the state changed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        if self.remaining_seconds == 0 {
            self.running = false;
        }
        true
    }

    /// Flips between running and paused. An expired timer stays stopped.
    pub fn toggle(&mut self) {
        if self.running {
            self.running = false;
        } else if !self.is_expired() {
            self.running = true;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Remaining time as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format_countdown(self.remaining_seconds)
    }
}

/// Formats seconds as `MM:SS`; minutes are not capped at 59.
pub fn format_countdown(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
