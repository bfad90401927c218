//! A calendar engine for configurable, non-Gregorian calendars.
//!
//! A [`CalendarDefinition`] describes weekdays, months, seasons, eras and an
//! optional [`LeapYearRule`]. It is validated once and then shared through a
//! [`Calendar`] handle by any number of [`CalendarDate`] values, each of which
//! is just a day count relative to 1/1/1. Calendars have no year 0.

pub use calendar::{Calendar, CalendarBuilder, CalendarDefinition};
pub use config::{CalendarConfig, LeapYearConfig, MonthConfig, SeasonConfig};
pub use date::CalendarDate;
pub use error::{CalendarError, DateError};
pub use format::{FULL_FORMAT, LONG_FORMAT, MEDIUM_FORMAT, SHORT_FORMAT};
pub use leap_year::LeapYearRule;
pub use month::Month;
pub use season::Season;

mod calendar;
mod config;
mod date;
mod div_rem;
mod error;
mod format;
mod leap_year;
mod month;
mod parse;
mod season;
