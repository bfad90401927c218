/// A named month with its length in a common (non-leap) year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Month {
    name: String,
    days: u32,
}

impl Month {
    /// Longest allowed month, leaving room for a leap day.
    pub const MAX_DAYS: u32 = u32::MAX - 1;

    pub fn new(name: impl Into<String>, days: u32) -> Self {
        Month {
            name: name.into(),
            days,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// A copy of this month with a different length.
    pub fn with_days(&self, days: u32) -> Self {
        Month::new(self.name.clone(), days)
    }

    pub fn check_validity(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("month names may not be blank".to_string());
        }
        if self.days < 1 {
            return Some(format!("month '{}' must have at least 1 day", self.name));
        }
        if self.days > Month::MAX_DAYS {
            return Some(format!(
                "month '{}' may have at most {} days",
                self.name,
                Month::MAX_DAYS
            ));
        }
        None
    }

    /// True if `text` names this month, either in full or by its first three letters.
    pub(crate) fn matches(&self, text: &str) -> bool {
        if self.name.to_lowercase() == text.to_lowercase() {
            return true;
        }
        self.name.chars().count() > 3
            && abbreviate(&self.name).to_lowercase() == text.to_lowercase()
    }
}

pub(crate) fn abbreviate(name: &str) -> String {
    name.chars().take(3).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity() {
        assert_eq!(Month::new("January", 31).check_validity(), None);
        assert_eq!(
            Month::new("  ", 31).check_validity(),
            Some("month names may not be blank".to_string())
        );
        assert_eq!(
            Month::new("Void", 0).check_validity(),
            Some("month 'Void' must have at least 1 day".to_string())
        );
        assert_eq!(Month::new("Long", Month::MAX_DAYS).check_validity(), None);
        assert_eq!(
            Month::new("Endless", u32::MAX).check_validity(),
            Some("month 'Endless' may have at most 4294967294 days".to_string())
        );
    }

    #[test]
    fn name_matching() {
        let month = Month::new("September", 30);
        assert!(month.matches("september"));
        assert!(month.matches("SEP"));
        assert!(month.matches("Sep"));
        assert!(!month.matches("Sept"));
        assert!(!month.matches("Se"));

        // Three-letter names only match in full.
        let month = Month::new("May", 31);
        assert!(month.matches("may"));
        assert!(!month.matches("ma"));
    }

    #[test]
    fn with_days_keeps_name() {
        let month = Month::new("February", 28).with_days(29);
        assert_eq!(month.name(), "February");
        assert_eq!(month.days(), 29);
    }
}
