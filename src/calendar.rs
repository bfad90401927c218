use std::ops::Deref;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::config::CalendarConfig;
use crate::error::CalendarError;
use crate::leap_year::LeapYearRule;
use crate::month::Month;
use crate::season::Season;

lazy_static! {
    static ref DEFAULT_CALENDAR: Calendar = Calendar::new(CalendarDefinition::default_calendar());
}

/// The full description of a calendar: its weekdays, months, seasons, eras and
/// leap-year rule. Definitions are validated when built and never change
/// afterwards; use [`CalendarDefinition::to_builder`] to derive an edited copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CalendarConfig", into = "CalendarConfig")]
pub struct CalendarDefinition {
    pub(crate) weekdays: Vec<String>,
    pub(crate) day_zero_weekday: usize,
    pub(crate) months: Vec<Month>,
    pub(crate) seasons: Vec<Season>,
    pub(crate) era: String,
    pub(crate) previous_era: String,
    pub(crate) leap_year: Option<LeapYearRule>,
}

impl CalendarDefinition {
    pub fn builder() -> CalendarBuilder {
        CalendarBuilder::new()
    }

    /// A builder pre-populated with this definition's values.
    pub fn to_builder(&self) -> CalendarBuilder {
        CalendarBuilder {
            weekdays: self.weekdays.clone(),
            day_zero_weekday: self.day_zero_weekday,
            months: self.months.clone(),
            seasons: self.seasons.clone(),
            era: self.era.clone(),
            previous_era: self.previous_era.clone(),
            leap_year: self.leap_year,
        }
    }

    /// The built-in Gregorian-shaped calendar. Day zero (1/1/1) is a Monday.
    pub fn default_calendar() -> Self {
        let weekdays = [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ];
        let months = [
            ("January", 31),
            ("February", 28),
            ("March", 31),
            ("April", 30),
            ("May", 31),
            ("June", 30),
            ("July", 31),
            ("August", 31),
            ("September", 30),
            ("October", 31),
            ("November", 30),
            ("December", 31),
        ];
        CalendarDefinition {
            weekdays: weekdays.iter().map(|name| name.to_string()).collect(),
            day_zero_weekday: 1,
            months: months
                .iter()
                .map(|(name, days)| Month::new(*name, *days))
                .collect(),
            seasons: vec![
                Season::new("Winter", 12, 21, 3, 19),
                Season::new("Spring", 3, 20, 6, 20),
                Season::new("Summer", 6, 21, 9, 21),
                Season::new("Fall", 9, 22, 12, 20),
            ],
            era: "AD".to_string(),
            previous_era: "BC".to_string(),
            leap_year: Some(LeapYearRule::new(2, 4, 100, 400)),
        }
    }

    pub fn weekdays(&self) -> &[String] {
        &self.weekdays
    }

    /// Index into [`weekdays`](Self::weekdays) of the weekday of day zero.
    pub fn day_zero_weekday(&self) -> usize {
        self.day_zero_weekday
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn era(&self) -> &str {
        &self.era
    }

    pub fn previous_era(&self) -> &str {
        &self.previous_era
    }

    pub fn leap_year(&self) -> Option<&LeapYearRule> {
        self.leap_year.as_ref()
    }

    /// Length of a common year.
    pub fn min_days_per_year(&self) -> i64 {
        self.months.iter().map(|month| month.days() as i64).sum()
    }

    /// Length of the given year.
    pub fn days(&self, year: i64) -> i64 {
        let days = self.min_days_per_year();
        if self.is_leap_year(year) {
            days + 1
        } else {
            days
        }
    }

    pub fn is_leap_year(&self, year: i64) -> bool {
        match self.leap_year {
            Some(ref rule) => rule.is(year),
            None => false,
        }
    }

    pub fn is_leap_month(&self, month: u32) -> bool {
        match self.leap_year {
            Some(ref rule) => rule.month() == month,
            None => false,
        }
    }

    /// Length of the 1-based `month` in `year`, including any leap day.
    pub(crate) fn month_days(&self, month: u32, year: i64) -> u32 {
        let days = self.months[month as usize - 1].days();
        if self.is_leap_month(month) && self.is_leap_year(year) {
            days + 1
        } else {
            days
        }
    }

    /// Day count of the first day of `year`. Years count 1, 2, ... forward
    /// from day zero and -1, -2, ... backward, so the year before 1 is -1.
    /// Returns `None` if that day count does not fit in an `i64`.
    pub fn year_to_days(&self, year: i64) -> Option<i64> {
        i64::try_from(self.first_day(year)).ok()
    }

    pub(crate) fn first_day(&self, year: i64) -> i128 {
        let base = if year >= 1 { year - 1 } else { year };
        let mut days = i128::from(base) * i128::from(self.min_days_per_year());
        if let Some(ref rule) = self.leap_year {
            let leaps = i128::from(rule.since(year));
            if year >= 1 {
                days += leaps;
            } else {
                days -= leaps;
                // The leap day of the year itself lies after its first day.
                if rule.is(year) {
                    days -= 1;
                }
            }
        }
        days
    }

    /// The year containing the given day count, which must lie within
    /// `CalendarDate::MIN_DAYS..=CalendarDate::MAX_DAYS`.
    ///
    /// Starts from an estimate that ignores leap days and corrects it. Each
    /// correction assumes every year in between has a leap day, so it never
    /// steps past the answer.
    pub(crate) fn year_of_days(&self, days: i64) -> i64 {
        let target = i128::from(days);
        let longest = i128::from(self.min_days_per_year()) + 1;
        // Ordinal 0 is year 1 and ordinal -1 is year -1.
        let mut ordinal = days.div_euclid(self.min_days_per_year());
        loop {
            let first = self.first_day(ordinal_year(ordinal));
            if first > target {
                ordinal -= ((first - target + longest - 1) / longest) as i64;
                continue;
            }
            let next = self.first_day(ordinal_year(ordinal + 1));
            if target < next {
                return ordinal_year(ordinal);
            }
            ordinal += 1 + ((target - next) / longest) as i64;
        }
    }

    pub fn check_validity(&self) -> Option<String> {
        if self.weekdays.is_empty() {
            return Some("at least one weekday must be defined".to_string());
        }
        if self.day_zero_weekday >= self.weekdays.len() {
            return Some(format!(
                "day zero weekday must be in the range 0 to {}",
                self.weekdays.len() - 1
            ));
        }
        if self.weekdays.iter().any(|name| name.trim().is_empty()) {
            return Some("weekday names may not be blank".to_string());
        }
        if self.months.is_empty() {
            return Some("at least one month must be defined".to_string());
        }
        if let Some(diagnostic) = self.months.iter().find_map(Month::check_validity) {
            return Some(diagnostic);
        }
        if self.seasons.is_empty() {
            return Some("at least one season must be defined".to_string());
        }
        if let Some(ref rule) = self.leap_year {
            if let Some(diagnostic) = rule.check_validity(&self.months) {
                return Some(diagnostic);
            }
        }
        self.seasons
            .iter()
            .find_map(|season| season.check_validity(self))
    }
}

fn ordinal_year(ordinal: i64) -> i64 {
    if ordinal >= 0 {
        ordinal + 1
    } else {
        ordinal
    }
}

impl Default for CalendarDefinition {
    fn default() -> Self {
        CalendarDefinition::default_calendar()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalendarBuilder {
    weekdays: Vec<String>,
    day_zero_weekday: usize,
    months: Vec<Month>,
    seasons: Vec<Season>,
    era: String,
    previous_era: String,
    leap_year: Option<LeapYearRule>,
}

impl CalendarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weekdays<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weekdays = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn day_zero_weekday(&mut self, index: usize) -> &mut Self {
        self.day_zero_weekday = index;
        self
    }

    pub fn month(&mut self, name: impl Into<String>, days: u32) -> &mut Self {
        self.months.push(Month::new(name, days));
        self
    }

    pub fn months(&mut self, months: Vec<Month>) -> &mut Self {
        self.months = months;
        self
    }

    pub fn season(&mut self, season: Season) -> &mut Self {
        self.seasons.push(season);
        self
    }

    pub fn seasons(&mut self, seasons: Vec<Season>) -> &mut Self {
        self.seasons = seasons;
        self
    }

    pub fn era(&mut self, era: impl Into<String>) -> &mut Self {
        self.era = era.into();
        self
    }

    pub fn previous_era(&mut self, previous_era: impl Into<String>) -> &mut Self {
        self.previous_era = previous_era.into();
        self
    }

    pub fn leap_year(&mut self, leap_year: Option<LeapYearRule>) -> &mut Self {
        self.leap_year = leap_year;
        self
    }

    pub fn build(&self) -> Result<CalendarDefinition, CalendarError> {
        let definition = CalendarDefinition {
            weekdays: self.weekdays.clone(),
            day_zero_weekday: self.day_zero_weekday,
            months: self.months.clone(),
            seasons: self.seasons.clone(),
            era: self.era.clone(),
            previous_era: self.previous_era.clone(),
            leap_year: self.leap_year,
        };
        match definition.check_validity() {
            Some(diagnostic) => Err(CalendarError::Invalid(diagnostic)),
            None => Ok(definition),
        }
    }
}

/// A shared handle to an immutable [`CalendarDefinition`]. Cloning is cheap,
/// and every date created from a handle refers to the same definition.
#[derive(Debug, Clone)]
pub struct Calendar {
    pimpl: Arc<CalendarDefinition>,
}

impl Calendar {
    pub fn new(definition: CalendarDefinition) -> Self {
        Calendar {
            pimpl: Arc::new(definition),
        }
    }

    pub fn definition(&self) -> &CalendarDefinition {
        &self.pimpl
    }
}

impl Deref for Calendar {
    type Target = CalendarDefinition;

    fn deref(&self) -> &CalendarDefinition {
        &self.pimpl
    }
}

impl Default for Calendar {
    fn default() -> Self {
        DEFAULT_CALENDAR.clone()
    }
}

impl From<CalendarDefinition> for Calendar {
    fn from(definition: CalendarDefinition) -> Self {
        Calendar::new(definition)
    }
}

impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pimpl, &other.pimpl) || *self.pimpl == *other.pimpl
    }
}

impl Eq for Calendar {}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> CalendarBuilder {
        let mut builder = CalendarDefinition::builder();
        builder
            .weekdays(["One", "Two", "Three"])
            .month("First", 10)
            .month("Second", 20)
            .season(Season::new("Only", 1, 1, 2, 20))
            .era("NE")
            .previous_era("OE");
        builder
    }

    #[test]
    fn default_calendar_is_valid() {
        let calendar = CalendarDefinition::default_calendar();
        assert_eq!(calendar.check_validity(), None);
        assert_eq!(calendar.min_days_per_year(), 365);
        assert_eq!(calendar.days(2023), 365);
        assert_eq!(calendar.days(2024), 366);
        assert_eq!(calendar.days(-1), 366);
        assert!(calendar.is_leap_month(2));
        assert!(!calendar.is_leap_month(3));
    }

    #[test]
    fn builder_validates() {
        let calendar = base_builder().build().unwrap();
        assert_eq!(calendar.min_days_per_year(), 30);
        assert!(!calendar.is_leap_year(4));
        assert!(!calendar.is_leap_month(1));

        let err = base_builder().months(Vec::new()).build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid calendar: at least one month must be defined"
        );
    }

    #[test]
    fn validity_diagnostics() {
        fn check(builder: &CalendarBuilder) -> Option<String> {
            let definition = CalendarDefinition {
                weekdays: builder.weekdays.clone(),
                day_zero_weekday: builder.day_zero_weekday,
                months: builder.months.clone(),
                seasons: builder.seasons.clone(),
                era: builder.era.clone(),
                previous_era: builder.previous_era.clone(),
                leap_year: builder.leap_year,
            };
            definition.check_validity()
        }

        assert_eq!(check(&base_builder()), None);
        assert_eq!(
            check(base_builder().weekdays(Vec::<String>::new())),
            Some("at least one weekday must be defined".to_string())
        );
        assert_eq!(
            check(base_builder().day_zero_weekday(3)),
            Some("day zero weekday must be in the range 0 to 2".to_string())
        );
        assert_eq!(
            check(base_builder().weekdays(["One", " "])),
            Some("weekday names may not be blank".to_string())
        );
        assert_eq!(
            check(base_builder().months(Vec::new())),
            Some("at least one month must be defined".to_string())
        );
        assert_eq!(
            check(base_builder().month("Empty", 0)),
            Some("month 'Empty' must have at least 1 day".to_string())
        );
        assert_eq!(
            check(
                base_builder()
                    .month("Big", u32::MAX)
                    .leap_year(Some(LeapYearRule::new(3, 4, 0, 0)))
            ),
            Some("month 'Big' may have at most 4294967294 days".to_string())
        );
        assert_eq!(
            check(base_builder().seasons(Vec::new())),
            Some("at least one season must be defined".to_string())
        );
        assert_eq!(
            check(base_builder().season(Season::new("Late", 3, 1, 1, 1))),
            Some("season 'Late' start month must be in the range 1 to 2".to_string())
        );
        assert!(check(base_builder().leap_year(Some(LeapYearRule::new(3, 4, 0, 0)))).is_some());
    }

    #[test]
    fn edits_produce_new_definitions() {
        let original = CalendarDefinition::default_calendar();
        let edited = original.to_builder().era("CE").previous_era("BCE").build().unwrap();
        assert_eq!(original.era(), "AD");
        assert_eq!(edited.era(), "CE");
        assert_eq!(edited.previous_era(), "BCE");
        assert_eq!(edited.months(), original.months());
    }

    #[test]
    fn year_to_days_gregorian() {
        let calendar = CalendarDefinition::default_calendar();
        assert_eq!(calendar.year_to_days(1), Some(0));
        assert_eq!(calendar.year_to_days(2), Some(365));
        assert_eq!(calendar.year_to_days(5), Some(1461));
        assert_eq!(calendar.year_to_days(-1), Some(-366));
        assert_eq!(calendar.year_to_days(-2), Some(-731));
        assert_eq!(calendar.year_to_days(-5), Some(-1827));
    }

    #[test]
    fn year_to_days_strictly_increasing() {
        let custom = base_builder()
            .leap_year(Some(LeapYearRule::new(2, 3, 15, 45)))
            .build()
            .unwrap();
        for calendar in [CalendarDefinition::default_calendar(), custom] {
            let years = (-1000..=1000).filter(|year| *year != 0).collect::<Vec<_>>();
            for pair in years.windows(2) {
                let (earlier, later) = (pair[0], pair[1]);
                assert_eq!(
                    calendar.first_day(later) - calendar.first_day(earlier),
                    i128::from(calendar.days(earlier)),
                    "years {} and {}",
                    earlier,
                    later
                );
            }
        }
    }

    #[test]
    fn year_to_days_at_the_limits() {
        let calendar = CalendarDefinition::default_calendar();
        assert_eq!(calendar.year_to_days(i64::MAX), None);
        assert_eq!(calendar.year_to_days(i64::MIN), None);
        assert!(calendar.first_day(i64::MAX) > i128::from(i64::MAX));
        assert!(calendar.first_day(i64::MIN) < i128::from(i64::MIN));

        let year = 10_000_000_000_000_000;
        let days = calendar.year_to_days(year).unwrap();
        assert_eq!(days, 3_652_424_999_999_999_634);
        assert_eq!(calendar.year_of_days(days), year);
        assert_eq!(calendar.year_of_days(days - 1), year - 1);
        assert_eq!(calendar.year_to_days(year * 100), None);
    }

    #[test]
    fn year_of_days_never_zero() {
        let calendar = CalendarDefinition::default_calendar();
        for days in -2000..2000 {
            let year = calendar.year_of_days(days);
            assert_ne!(year, 0);
            let first = calendar.year_to_days(year).unwrap();
            assert!(first <= days);
            assert!(days < first + calendar.days(year));
        }
        assert_eq!(calendar.year_of_days(0), 1);
        assert_eq!(calendar.year_of_days(-1), -1);
        assert_eq!(calendar.year_of_days(-366), -1);
        assert_eq!(calendar.year_of_days(-367), -2);
    }

    #[test]
    fn handles_share_the_definition() {
        let a = Calendar::default();
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.era(), "AD");
        let other = Calendar::new(base_builder().build().unwrap());
        assert_ne!(a, other);
    }
}
