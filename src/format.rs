//! Directive-based formatting of calendar dates.
//!
//! A layout is copied through unchanged except for these directives:
//!
//! | Directive | Output                                                     |
//! |-----------|------------------------------------------------------------|
//! | `%W`      | full weekday name, e.g. "Friday"                           |
//! | `%w`      | weekday name cut to three characters, e.g. "Fri"           |
//! | `%M`      | full month name, e.g. "September"                          |
//! | `%m`      | month name cut to three characters, e.g. "Sep"             |
//! | `%N`      | month number, e.g. "9"                                     |
//! | `%n`      | month number padded with zeroes, e.g. "09"                 |
//! | `%D`      | day of the month, e.g. "2"                                 |
//! | `%d`      | day of the month padded with zeroes, e.g. "02"             |
//! | `%Y`      | "2017" for positive years, "2017 BC" for negative ones; if |
//! |           | both eras are the same, always "<year> <era>"              |
//! | `%y`      | year with its era, e.g. "2017 AD" or "44 BC"               |
//! | `%z`      | signed year without an era, e.g. "-44"                     |
//! | `%%`      | a literal "%"                                              |
//!
//! Unrecognized directives produce no output.

use crate::date::CalendarDate;
use crate::div_rem::{digit_width, RemFloor};
use crate::month::abbreviate;

pub const FULL_FORMAT: &str = "%W, %M %D, %Y";
pub const LONG_FORMAT: &str = "%M %D, %Y";
pub const MEDIUM_FORMAT: &str = "%m %D, %Y";
pub const SHORT_FORMAT: &str = "%N/%D/%Y";

impl CalendarDate {
    pub fn format(&self, layout: &str) -> String {
        let mut buffer = String::with_capacity(layout.len() * 2);
        let mut directive = false;
        for ch in layout.chars() {
            if !directive {
                if ch == '%' {
                    directive = true;
                } else {
                    buffer.push(ch);
                }
                continue;
            }
            directive = false;
            match ch {
                'W' => buffer.push_str(self.week_day_name()),
                'w' => buffer.push_str(&abbreviate(self.week_day_name())),
                'M' => buffer.push_str(self.month_name()),
                'm' => buffer.push_str(&abbreviate(self.month_name())),
                'N' => buffer.push_str(&self.month().to_string()),
                'n' => {
                    let width = digit_width(self.calendar().months().len());
                    buffer.push_str(&format!("{:0width$}", self.month(), width = width));
                }
                'D' => buffer.push_str(&self.day_in_month().to_string()),
                'd' => {
                    let (month, day) = self.month_and_day();
                    let days = self.calendar().months()[month as usize - 1].days();
                    let width = digit_width(days as usize);
                    buffer.push_str(&format!("{:0width$}", day, width = width));
                }
                'Y' => buffer.push_str(&self.year_with_previous_era()),
                'y' => buffer.push_str(&self.year_with_era()),
                'z' => buffer.push_str(&self.year().to_string()),
                '%' => buffer.push('%'),
                _ => {}
            }
        }
        buffer
    }

    fn year_with_previous_era(&self) -> String {
        let calendar = self.calendar();
        let year = self.year();
        if calendar.previous_era().trim().is_empty() {
            year.to_string()
        } else if calendar.era() == calendar.previous_era() {
            format!("{} {}", year, calendar.previous_era())
        } else if year < 0 {
            format!("{} {}", -year, calendar.previous_era())
        } else {
            year.to_string()
        }
    }

    fn year_with_era(&self) -> String {
        let calendar = self.calendar();
        let era = self.era();
        let mut year = self.year();
        if year < 0 && !era.trim().is_empty() && calendar.era() != calendar.previous_era() {
            year = -year;
        }
        if era.trim().is_empty() {
            year.to_string()
        } else {
            format!("{} {}", year, era)
        }
    }

    /// Renders this date's month as a small text calendar: a title line, a
    /// row of weekday initials and then the days, one week per row.
    pub fn text_calendar_month(&self) -> String {
        let calendar = self.calendar();
        let weekdays = calendar.weekdays();
        let most_days = calendar
            .months()
            .iter()
            .map(|month| month.days())
            .max()
            .unwrap_or(1);
        let width = digit_width(most_days as usize);
        let last_week_day = weekdays.len() - 1;

        let (month, day) = self.month_and_day();
        let mut buffer = format!("{}: {}", month, self.month_name());
        for (i, name) in weekdays.iter().enumerate() {
            buffer.push(if i == 0 { '\n' } else { ' ' });
            buffer.push_str(&" ".repeat(width - 1));
            if let Some(initial) = name.chars().next() {
                buffer.push(initial);
            }
        }

        let count = weekdays.len();
        // Weekday of the first of the month.
        let offset = self.week_day() as i64 - (day as i64 - 1);
        let mut week_day = offset.rem_floor(count as i64) as usize;
        for i in 1..=self.days_in_month() {
            if i == 1 || week_day == 0 {
                buffer.push('\n');
            }
            if i == 1 {
                buffer.push_str(&" ".repeat(week_day * (width + 1)));
            }
            buffer.push_str(&format!("{:>width$}", i, width = width));
            if week_day != last_week_day {
                buffer.push(' ');
            }
            week_day = (week_day + 1) % count;
        }
        buffer.push('\n');
        buffer
    }
}
