use crate::domain::date_of_birth::DateOfBirth;
use chrono::{Datelike, NaiveDate};

/// Whole calendar days from `today` until the next occurrence of the birthday,
/// 0 when it is today.
///
/// A February 29 birthday falls on March 1 in years without a February 29.
pub fn days_until_birthday(date_of_birth: DateOfBirth, today: NaiveDate) -> u32 {
    let birth = date_of_birth.to_naive_date();

    let this_year = occurrence_in(birth, today.year());

    let next = if this_year < today {
        occurrence_in(birth, today.year() + 1)
    } else {
        this_year
    };

    // `next` is never before `today`, so the difference is non-negative.
    (next - today).num_days().unsigned_abs() as u32
}

fn occurrence_in(birth: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(NaiveDate::MAX)
}

pub fn birthday_message(name: &str, days: u32) -> String {
    if days == 0 {
        format!("Hello, {}! Happy birthday!", name)
    } else {
        format!("Hello, {}! Your birthday is in {} day(s)", name, days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days(born: NaiveDate, today: NaiveDate) -> u32 {
        days_until_birthday(DateOfBirth::from_naive_date(born), today)
    }

    #[test]
    fn countdown_around_a_fixed_today() {
        let today = date(2024, 7, 25);

        assert_eq!(days(date(1990, 7, 25), today), 0);
        assert_eq!(days(date(1990, 7, 26), today), 1);
        assert_eq!(days(date(1990, 7, 24), today), 364);
        assert_eq!(days(date(1990, 12, 31), today), 159);
        assert_eq!(days(date(1990, 1, 1), today), 160);
    }

    #[test]
    fn leap_day_birthday_falls_on_march_first_in_common_years() {
        let born = date(2000, 2, 29);

        assert_eq!(days(born, date(2023, 2, 28)), 1);
        assert_eq!(days(born, date(2023, 3, 1)), 0);
        assert_eq!(days(born, date(2023, 3, 2)), 364);
        assert_eq!(days(born, date(2024, 2, 28)), 1);
        assert_eq!(days(born, date(2024, 2, 29)), 0);
        assert_eq!(days(born, date(2024, 3, 1)), 365);
    }

    #[test]
    fn year_end_rollover() {
        assert_eq!(days(date(1985, 1, 1), date(2023, 12, 31)), 1);
        assert_eq!(days(date(1985, 12, 31), date(2024, 1, 1)), 365);
    }

    #[test]
    fn message_depends_on_countdown() {
        assert_eq!(birthday_message("Alice", 0), "Hello, Alice! Happy birthday!");
        assert_eq!(
            birthday_message("Bob", 12),
            "Hello, Bob! Your birthday is in 12 day(s)"
        );
    }
}
