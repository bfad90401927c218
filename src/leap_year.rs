use num_integer::Integer;

use crate::month::Month;

/// A leap-year rule of the form "every `every` years, except every `except`
/// years, unless every `unless` years". A zero `except` or `unless` disables
/// that clause. In a leap year `month` gains one day.
///
/// Years before 1 are shifted up by one before testing so that year -1 plays
/// the role year 0 would have in a calendar that had one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeapYearRule {
    month: u32,
    every: i64,
    except: i64,
    unless: i64,
}

impl LeapYearRule {
    pub fn new(month: u32, every: i64, except: i64, unless: i64) -> Self {
        LeapYearRule {
            month,
            every,
            except,
            unless,
        }
    }

    /// The 1-based index of the month that gains a day.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn every(&self) -> i64 {
        self.every
    }

    pub fn except(&self) -> i64 {
        self.except
    }

    pub fn unless(&self) -> i64 {
        self.unless
    }

    pub fn is(&self, year: i64) -> bool {
        let year = if year < 1 { year + 1 } else { year };
        year % self.every == 0
            && (self.except == 0
                || year % self.except != 0
                || (self.unless != 0 && year % self.unless == 0))
    }

    /// Number of leap years between year 1 and `year`, not counting `year`
    /// itself. For negative years this counts the leap years between `year`
    /// and -1, so the result is always non-negative.
    pub fn since(&self, year: i64) -> i64 {
        if year == -1 {
            return 0;
        }
        let delta = if year >= 1 { year } else { -(year + 1) };
        let mut count = delta / self.every;
        if self.except != 0 {
            count -= delta / self.except;
        }
        if self.unless != 0 {
            count += delta / self.unless;
        }
        if self.is(year) {
            count -= 1;
        }
        if year < -1 {
            count += 1;
        }
        count
    }

    pub fn check_validity(&self, months: &[Month]) -> Option<String> {
        if self.month < 1 || self.month as usize > months.len() {
            return Some(format!(
                "leap year month must be in the range 1 to {}",
                months.len()
            ));
        }
        if self.every < 2 {
            return Some("leap year must occur at least every 2 years".to_string());
        }
        if self.except != 0 {
            if self.except <= self.every {
                return Some(
                    "leap year exception must be greater than the leap year interval".to_string(),
                );
            }
            if !self.except.is_multiple_of(&self.every) {
                return Some(
                    "leap year exception must be a multiple of the leap year interval".to_string(),
                );
            }
        }
        if self.unless != 0 {
            if self.except == 0 {
                return Some(
                    "leap year exception to the exception requires an exception".to_string(),
                );
            }
            if self.unless <= self.except {
                return Some(
                    "leap year exception to the exception must be greater than the exception"
                        .to_string(),
                );
            }
            if !self.unless.is_multiple_of(&self.except) {
                return Some(
                    "leap year exception to the exception must be a multiple of the exception"
                        .to_string(),
                );
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gregorian() -> LeapYearRule {
        LeapYearRule::new(2, 4, 100, 400)
    }

    fn months() -> Vec<Month> {
        vec![Month::new("One", 30), Month::new("Two", 30), Month::new("Three", 30)]
    }

    #[test]
    fn is_leap_positive_years() {
        let rule = gregorian();
        assert!(rule.is(4));
        assert!(rule.is(2000));
        assert!(rule.is(2024));
        assert!(!rule.is(1));
        assert!(!rule.is(1900));
        assert!(!rule.is(2023));
    }

    #[test]
    fn is_leap_negative_years() {
        // -1 stands in for the missing year 0, -5 for -4, and so on.
        let rule = gregorian();
        assert!(rule.is(-1));
        assert!(rule.is(-5));
        assert!(rule.is(-401));
        assert!(!rule.is(-4));
        assert!(!rule.is(-101));
        assert!(!rule.is(-2));
    }

    #[test]
    fn since_matches_brute_force() {
        let rule = gregorian();
        for year in 1..=401 {
            let expected = (1..year).filter(|y| rule.is(*y)).count() as i64;
            assert_eq!(rule.since(year), expected, "year {}", year);
        }

        let rule = LeapYearRule::new(3, 3, 15, 45);
        for year in 1..=200 {
            let expected = (1..year).filter(|y| rule.is(*y)).count() as i64;
            assert_eq!(rule.since(year), expected, "year {}", year);
        }

        let rule = LeapYearRule::new(1, 2, 0, 0);
        for year in 1..=50 {
            let expected = (1..year).filter(|y| rule.is(*y)).count() as i64;
            assert_eq!(rule.since(year), expected, "year {}", year);
        }
    }

    #[test]
    fn since_negative_years() {
        // For year < -1 this counts the leap years in (year, -1].
        let rule = gregorian();
        assert_eq!(rule.since(-1), 0);
        assert_eq!(rule.since(-2), 1);
        assert_eq!(rule.since(-5), 1);
        assert_eq!(rule.since(-6), 2);
        for year in -401..-1 {
            let expected = (year + 1..=-1).filter(|y| rule.is(*y)).count() as i64;
            assert_eq!(rule.since(year), expected, "year {}", year);
        }
    }

    #[test]
    fn validity() {
        let months = months();
        assert_eq!(LeapYearRule::new(2, 4, 100, 400).check_validity(&months), None);
        assert_eq!(LeapYearRule::new(1, 2, 0, 0).check_validity(&months), None);
        assert!(LeapYearRule::new(0, 4, 0, 0).check_validity(&months).is_some());
        assert!(LeapYearRule::new(4, 4, 0, 0).check_validity(&months).is_some());
        assert!(LeapYearRule::new(1, 1, 0, 0).check_validity(&months).is_some());
        assert!(LeapYearRule::new(1, 4, 4, 0).check_validity(&months).is_some());
        assert!(LeapYearRule::new(1, 4, 0, 400).check_validity(&months).is_some());
        assert!(LeapYearRule::new(1, 4, 100, 100).check_validity(&months).is_some());
        assert!(LeapYearRule::new(1, 4, 100, 250).check_validity(&months).is_some());
    }

    #[test]
    fn exception_must_be_a_multiple() {
        let diagnostic = LeapYearRule::new(1, 100, 150, 0).check_validity(&months());
        assert_eq!(
            diagnostic,
            Some("leap year exception must be a multiple of the leap year interval".to_string())
        );
    }
}
