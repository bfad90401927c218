use crate::calendar::CalendarDefinition;

/// A named span of the year from a start month/day to an end month/day,
/// both inclusive. A season whose end precedes its start wraps over the new
/// year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Season {
    name: String,
    start_month: u32,
    start_day: u32,
    end_month: u32,
    end_day: u32,
}

impl Season {
    pub fn new(
        name: impl Into<String>,
        start_month: u32,
        start_day: u32,
        end_month: u32,
        end_day: u32,
    ) -> Self {
        Season {
            name: name.into(),
            start_month,
            start_day,
            end_month,
            end_day,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    pub fn start_day(&self) -> u32 {
        self.start_day
    }

    pub fn end_month(&self) -> u32 {
        self.end_month
    }

    pub fn end_day(&self) -> u32 {
        self.end_day
    }

    /// True if the given month and day fall inside this season.
    pub fn contains(&self, month: u32, day: u32) -> bool {
        let start = (self.start_month, self.start_day);
        let end = (self.end_month, self.end_day);
        let at = (month, day);
        if start <= end {
            start <= at && at <= end
        } else {
            at >= start || at <= end
        }
    }

    pub fn check_validity(&self, calendar: &CalendarDefinition) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("season names may not be blank".to_string());
        }
        if let Some(diagnostic) =
            self.check_month_day(calendar, self.start_month, self.start_day, "start")
        {
            return Some(diagnostic);
        }
        self.check_month_day(calendar, self.end_month, self.end_day, "end")
    }

    fn check_month_day(
        &self,
        calendar: &CalendarDefinition,
        month: u32,
        day: u32,
        which: &str,
    ) -> Option<String> {
        let months = calendar.months();
        if month < 1 || month as usize > months.len() {
            return Some(format!(
                "season '{}' {} month must be in the range 1 to {}",
                self.name,
                which,
                months.len()
            ));
        }
        let mut days = months[month as usize - 1].days();
        if calendar.is_leap_month(month) {
            days = days.saturating_add(1);
        }
        if day < 1 || day > days {
            return Some(format!(
                "season '{}' {} day must be in the range 1 to {}",
                self.name, which, days
            ));
        }
        None
    }
}
