use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::calendar::CalendarDefinition;
use crate::error::CalendarError;
use crate::leap_year::LeapYearRule;
use crate::month::Month;
use crate::season::Season;

/// Persisted form of a calendar definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    pub weekdays: Vec<String>,
    pub day_zero_weekday: usize,
    pub months: Vec<MonthConfig>,
    pub seasons: Vec<SeasonConfig>,
    #[serde(default)]
    pub era: String,
    #[serde(default)]
    pub previous_era: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leap: Option<LeapYearConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonthConfig {
    pub name: String,
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonConfig {
    pub name: String,
    pub start_month: u32,
    pub start_day: u32,
    pub end_month: u32,
    pub end_day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeapYearConfig {
    pub month: u32,
    pub every: i64,
    #[serde(default)]
    pub except: i64,
    #[serde(default)]
    pub unless: i64,
}

impl TryFrom<CalendarConfig> for CalendarDefinition {
    type Error = CalendarError;

    fn try_from(config: CalendarConfig) -> Result<Self, Self::Error> {
        debug!(
            "loading calendar with {} weekdays, {} months and {} seasons",
            config.weekdays.len(),
            config.months.len(),
            config.seasons.len()
        );
        let result = CalendarDefinition::builder()
            .weekdays(config.weekdays)
            .day_zero_weekday(config.day_zero_weekday)
            .months(
                config
                    .months
                    .into_iter()
                    .map(|month| Month::new(month.name, month.days))
                    .collect(),
            )
            .seasons(
                config
                    .seasons
                    .into_iter()
                    .map(|season| {
                        Season::new(
                            season.name,
                            season.start_month,
                            season.start_day,
                            season.end_month,
                            season.end_day,
                        )
                    })
                    .collect(),
            )
            .era(config.era)
            .previous_era(config.previous_era)
            .leap_year(
                config
                    .leap
                    .map(|leap| {
                        LeapYearRule::new(leap.month, leap.every, leap.except, leap.unless)
                    }),
            )
            .build();
        if let Err(ref e) = result {
            warn!("rejected calendar configuration: {}", e);
        }
        result
    }
}

impl From<CalendarDefinition> for CalendarConfig {
    fn from(definition: CalendarDefinition) -> Self {
        CalendarConfig {
            weekdays: definition.weekdays,
            day_zero_weekday: definition.day_zero_weekday,
            months: definition
                .months
                .iter()
                .map(|month| MonthConfig {
                    name: month.name().to_string(),
                    days: month.days(),
                })
                .collect(),
            seasons: definition
                .seasons
                .iter()
                .map(|season| SeasonConfig {
                    name: season.name().to_string(),
                    start_month: season.start_month(),
                    start_day: season.start_day(),
                    end_month: season.end_month(),
                    end_day: season.end_day(),
                })
                .collect(),
            era: definition.era,
            previous_era: definition.previous_era,
            leap: definition.leap_year.map(|rule| LeapYearConfig {
                month: rule.month(),
                every: rule.every(),
                except: rule.except(),
                unless: rule.unless(),
            }),
        }
    }
}

impl CalendarDefinition {
    /// Builds a validated definition from its key-value form.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, CalendarError> {
        let config: CalendarConfig = serde_json::from_value(Value::Object(map))?;
        CalendarDefinition::try_from(config)
    }

    pub fn to_map(&self) -> Result<Map<String, Value>, CalendarError> {
        match serde_json::to_value(CalendarConfig::from(self.clone()))? {
            Value::Object(map) => Ok(map),
            other => Err(CalendarError::Invalid(format!(
                "calendar serialized to a non-map value: {}",
                other
            ))),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, CalendarError> {
        let config: CalendarConfig = serde_json::from_str(text)?;
        CalendarDefinition::try_from(config)
    }

    pub fn to_json_string(&self) -> Result<String, CalendarError> {
        Ok(serde_json::to_string(self)?)
    }
}
