use thiserror::Error;

/// Reasons a date could not be built from fields or parsed from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("year 0 is invalid")]
    YearZero,
    #[error("year {0} is out of range")]
    YearOutOfRange(i64),
    #[error("day count {0} is out of range")]
    DaysOutOfRange(i64),
    #[error("month {0} is invalid")]
    InvalidMonth(u32),
    #[error("day {0} is invalid")]
    InvalidDay(u32),
    #[error("invalid year text '{0}'")]
    InvalidYear(String),
    #[error("invalid month text '{0}'")]
    InvalidMonthText(String),
    #[error("invalid day text '{0}'")]
    InvalidDayText(String),
    #[error("unknown month name '{0}'")]
    UnknownMonthName(String),
    #[error("invalid date text '{0}'")]
    InvalidDateText(String),
}

/// Reasons a calendar definition could not be built or loaded.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("invalid calendar: {0}")]
    Invalid(String),
    #[error("malformed calendar data: {0}")]
    Json(#[from] serde_json::Error),
}
