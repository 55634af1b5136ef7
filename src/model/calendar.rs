//! Day-granular date arithmetic.

use chrono::{Days, NaiveDate};

use crate::error::ScheduleError;

/// Whole days from `a` to `b` (`b - a`), positive when `b` is later.
pub fn day_delta(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// `date` moved by `n` days (negative moves backwards).
///
/// Saturates at the ends of the representable calendar instead of panicking.
pub fn shift_days(date: NaiveDate, n: i64) -> NaiveDate {
    let days = Days::new(n.unsigned_abs());
    let shifted = if n >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.unwrap_or(if n >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Earliest date of the sequence.
pub fn min_date<I>(dates: I) -> Result<NaiveDate, ScheduleError>
where
    I: IntoIterator<Item = NaiveDate>,
{
    dates.into_iter().min().ok_or(ScheduleError::EmptyInput)
}

/// Latest date of the sequence.
pub fn max_date<I>(dates: I) -> Result<NaiveDate, ScheduleError>
where
    I: IntoIterator<Item = NaiveDate>,
{
    dates.into_iter().max().ok_or(ScheduleError::EmptyInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_delta_crosses_february() {
        assert_eq!(day_delta(d(2025, 2, 27), d(2025, 3, 2)), 3);
        assert_eq!(day_delta(d(2024, 2, 27), d(2024, 3, 2)), 4);
        assert_eq!(day_delta(d(2025, 3, 2), d(2025, 2, 27)), -3);
    }

    #[test]
    fn day_delta_crosses_year() {
        assert_eq!(day_delta(d(2025, 12, 30), d(2026, 1, 2)), 3);
        assert_eq!(day_delta(d(2024, 1, 1), d(2025, 1, 1)), 366);
    }

    #[test]
    fn shift_days_rolls_over() {
        assert_eq!(shift_days(d(2024, 2, 28), 1), d(2024, 2, 29));
        assert_eq!(shift_days(d(2025, 2, 28), 1), d(2025, 3, 1));
        assert_eq!(shift_days(d(2025, 1, 1), -1), d(2024, 12, 31));
        assert_eq!(shift_days(d(2025, 6, 15), 0), d(2025, 6, 15));
    }

    #[test]
    fn shift_days_saturates() {
        assert_eq!(shift_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(shift_days(NaiveDate::MIN, -1), NaiveDate::MIN);
    }

    #[test]
    fn min_max_over_dates() {
        let dates = [d(2025, 12, 4), d(2025, 12, 1), d(2025, 12, 8)];
        assert_eq!(min_date(dates), Ok(d(2025, 12, 1)));
        assert_eq!(max_date(dates), Ok(d(2025, 12, 8)));
    }

    #[test]
    fn min_max_reject_empty_input() {
        assert_eq!(min_date(Vec::new()), Err(ScheduleError::EmptyInput));
        assert_eq!(max_date(std::iter::empty()), Err(ScheduleError::EmptyInput));
    }
}
