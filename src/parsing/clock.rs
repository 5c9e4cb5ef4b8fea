//! 12-hour clock handling shared by the inline and CSV tokenizers.
//!
//! Exports print times as `오전 9:05` / `오후 3:07`. Tokenizers convert the
//! displayed hour to 24-hour form, validate it, and regenerate the label so
//! every message carries one canonical label shape no matter how the source
//! spelled it.

use chrono::{NaiveTime, Timelike};

/// Morning/afternoon marker of a 12-hour clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    /// `오전` / AM
    Am,
    /// `오후` / PM
    Pm,
}

impl Meridiem {
    /// Parses a marker as printed in an export (`오전`, `오후`, `AM`, `PM`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "오전" => Some(Meridiem::Am),
            "오후" => Some(Meridiem::Pm),
            _ if s.eq_ignore_ascii_case("am") => Some(Meridiem::Am),
            _ if s.eq_ignore_ascii_case("pm") => Some(Meridiem::Pm),
            _ => None,
        }
    }

    /// Returns the Korean marker used in canonical labels.
    pub fn label(self) -> &'static str {
        match self {
            Meridiem::Am => "오전",
            Meridiem::Pm => "오후",
        }
    }
}

/// Converts a displayed 12-hour reading to a 24-hour hour.
///
/// PM adds 12 unless the display says 12; AM maps 12 to 0; everything else
/// passes through unchanged.
///
/// ```
/// use talkpack::parsing::{Meridiem, to_24_hour};
///
/// assert_eq!(to_24_hour(Meridiem::Pm, 12), 12);
/// assert_eq!(to_24_hour(Meridiem::Pm, 3), 15);
/// assert_eq!(to_24_hour(Meridiem::Am, 12), 0);
/// assert_eq!(to_24_hour(Meridiem::Am, 9), 9);
/// ```
pub fn to_24_hour(meridiem: Meridiem, hour: u32) -> u32 {
    match meridiem {
        Meridiem::Pm if hour != 12 => hour + 12,
        Meridiem::Am if hour == 12 => 0,
        _ => hour,
    }
}

/// Renders a canonical `오전 h:mm` / `오후 h:mm` label from a 24-hour time.
///
/// ```
/// use chrono::NaiveTime;
/// use talkpack::parsing::time_label;
///
/// let t = NaiveTime::from_hms_opt(0, 5, 0).unwrap();
/// assert_eq!(time_label(t), "오전 12:05");
/// ```
pub fn time_label(time: NaiveTime) -> String {
    let hour = time.hour();
    let meridiem = if hour < 12 { Meridiem::Am } else { Meridiem::Pm };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}:{:02}", meridiem.label(), display, time.minute())
}

/// Builds a validated time from a displayed 12-hour reading.
///
/// Returns `None` for readings that don't name a real time of day
/// (e.g. `오후 13:00` or `오전 9:75`).
pub fn clock_time(meridiem: Meridiem, hour: u32, minute: u32) -> Option<NaiveTime> {
    if hour > 12 {
        return None;
    }
    NaiveTime::from_hms_opt(to_24_hour(meridiem, hour), minute, 0)
}
