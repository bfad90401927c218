use std::cmp::Ordering;
use std::fmt;

use log::error;

use crate::calendar::Calendar;
use crate::div_rem::RemFloor;
use crate::error::DateError;
use crate::format::SHORT_FORMAT;
use crate::parse::{parse_date_text, MonthField};
use crate::season::Season;

/// A date in a [`Calendar`], stored as the number of days since 1/1/1.
///
/// There is no year 0: day -1 is the last day of year -1. Every other field is
/// derived from the day count on demand. Day counts are limited to
/// `MIN_DAYS..=MAX_DAYS`, about 12.6 quadrillion Gregorian years either side
/// of 1/1/1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDate {
    calendar: Calendar,
    days: i64,
}

impl CalendarDate {
    pub const MIN_DAYS: i64 = -(1 << 62);
    pub const MAX_DAYS: i64 = 1 << 62;

    /// The date `days` days after 1/1/1 (or before it, if negative).
    pub fn new(calendar: &Calendar, days: i64) -> Result<Self, DateError> {
        if !(Self::MIN_DAYS..=Self::MAX_DAYS).contains(&days) {
            return Err(DateError::DaysOutOfRange(days));
        }
        Ok(CalendarDate {
            calendar: calendar.clone(),
            days,
        })
    }

    pub fn from_mdy(
        calendar: &Calendar,
        month: u32,
        day: u32,
        year: i64,
    ) -> Result<Self, DateError> {
        let days = compute_days(calendar, month, day, year)?;
        CalendarDate::new(calendar, days).map_err(|_| DateError::YearOutOfRange(year))
    }

    /// Parses "9/22/2017", "9/22/2017 AD", "September 22, 2017" or
    /// "Sep 22, 2017 AD". A trailing era matching the calendar's previous era
    /// negates the year.
    pub fn parse(calendar: &Calendar, text: &str) -> Result<Self, DateError> {
        let fields = parse_date_text(text, &[calendar.era(), calendar.previous_era()])?;
        let month = match fields.month {
            MonthField::Number(text) => text
                .parse::<u32>()
                .map_err(|_| DateError::InvalidMonthText(text.to_string()))?,
            MonthField::Name(name) => calendar
                .months()
                .iter()
                .position(|month| month.matches(name))
                .map(|index| index as u32 + 1)
                .ok_or_else(|| DateError::UnknownMonthName(name.to_string()))?,
        };
        let invalid_year = || DateError::InvalidYear(fields.year.to_string());
        let mut year = fields.year.parse::<i64>().map_err(|_| invalid_year())?;
        let day = fields
            .day
            .parse::<u32>()
            .map_err(|_| DateError::InvalidDayText(fields.day.to_string()))?;
        if let Some(era) = fields.era {
            let previous_era = calendar.previous_era().trim();
            if !previous_era.is_empty()
                && previous_era != calendar.era().trim()
                && previous_era.to_lowercase() == era.to_lowercase()
            {
                year = year.checked_neg().ok_or_else(invalid_year)?;
            }
        }
        CalendarDate::from_mdy(calendar, month, day, year).map_err(|e| match e {
            DateError::YearOutOfRange(_) => invalid_year(),
            e => e,
        })
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Number of days since 1/1/1.
    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn year(&self) -> i64 {
        self.calendar.year_of_days(self.days)
    }

    /// The 1-based month.
    pub fn month(&self) -> u32 {
        self.month_and_day().0
    }

    pub fn month_name(&self) -> &str {
        self.calendar.months()[self.month() as usize - 1].name()
    }

    /// The 1-based day within the year.
    pub fn day_in_year(&self) -> i64 {
        let first = self.calendar.first_day(self.year());
        (1 + i128::from(self.days) - first) as i64
    }

    /// The 1-based day within the month.
    pub fn day_in_month(&self) -> u32 {
        self.month_and_day().1
    }

    /// Length of this date's month, including the leap day if there is one.
    pub fn days_in_month(&self) -> u32 {
        self.calendar.month_days(self.month(), self.year())
    }

    /// Index of this date's weekday in the calendar's weekday list.
    pub fn week_day(&self) -> usize {
        let count = self.calendar.weekdays().len();
        let offset = self.days.rem_floor(count as i64) as usize;
        (offset + self.calendar.day_zero_weekday()) % count
    }

    pub fn week_day_name(&self) -> &str {
        &self.calendar.weekdays()[self.week_day()]
    }

    /// The era label for this date's year.
    pub fn era(&self) -> &str {
        if self.year() < 0 {
            self.calendar.previous_era()
        } else {
            self.calendar.era()
        }
    }

    /// The calendar's seasons that include this date.
    pub fn seasons(&self) -> Vec<&Season> {
        let (month, day) = self.month_and_day();
        self.calendar
            .seasons()
            .iter()
            .filter(|season| season.contains(month, day))
            .collect()
    }

    /// The date `days` days later, or earlier if `days` is negative.
    pub fn add_days(&self, days: i64) -> Result<Self, DateError> {
        CalendarDate::new(&self.calendar, self.days.saturating_add(days))
    }

    pub(crate) fn month_and_day(&self) -> (u32, u32) {
        let year = self.year();
        let mut remaining = self.day_in_year();
        for month in 1..=self.calendar.months().len() as u32 {
            let length = self.calendar.month_days(month, year) as i64;
            if remaining <= length {
                return (month, remaining as u32);
            }
            remaining -= length;
        }
        error!(
            "day {} lies past the last month of year {}",
            self.days, year
        );
        panic!("unable to determine the month of day {}", self.days);
    }
}

fn compute_days(calendar: &Calendar, month: u32, day: u32, year: i64) -> Result<i64, DateError> {
    if year == 0 {
        return Err(DateError::YearZero);
    }
    if month < 1 || month as usize > calendar.months().len() {
        return Err(DateError::InvalidMonth(month));
    }
    if day < 1 || day > calendar.month_days(month, year) {
        return Err(DateError::InvalidDay(day));
    }
    let mut days = calendar.first_day(year) + i128::from(day) - 1;
    days += calendar.months()[..month as usize - 1]
        .iter()
        .map(|month| i128::from(month.days()))
        .sum::<i128>();
    if let Some(rule) = calendar.leap_year() {
        if rule.month() < month && rule.is(year) {
            days += 1;
        }
    }
    i64::try_from(days).map_err(|_| DateError::YearOutOfRange(year))
}

impl PartialOrd for CalendarDate {
    /// Dates are ordered by day count; dates from different calendars are
    /// unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.calendar == other.calendar {
            Some(self.days.cmp(&other.days))
        } else {
            None
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(SHORT_FORMAT))
    }
}
