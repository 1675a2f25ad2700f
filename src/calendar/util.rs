use std::iter::successors;
use time::{util::is_leap_year, Date, Duration, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// The weekday that begins each row of the grid
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum WeekStart {
    /// ISO-8601 weeks
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub(crate) fn first_weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Monday,
            WeekStart::Sunday => Weekday::Sunday,
        }
    }

    /// Zero-based column of `wd` in a row
    pub(crate) fn index0(self, wd: Weekday) -> u8 {
        match self {
            WeekStart::Monday => wd.number_days_from_monday(),
            WeekStart::Sunday => wd.number_days_from_sunday(),
        }
    }

    /// The seven weekdays in row order
    pub(crate) fn weekdays(self) -> impl Iterator<Item = Weekday> {
        successors(Some(self.first_weekday()), |wd| Some(wd.next())).take(DAYS_IN_WEEK)
    }
}

pub(crate) fn weekday_abbrev(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Monday => "Mo",
        Weekday::Tuesday => "Tu",
        Weekday::Wednesday => "We",
        Weekday::Thursday => "Th",
        Weekday::Friday => "Fr",
        Weekday::Saturday => "Sa",
        Weekday::Sunday => "Su",
    }
}

/// Returns the first day of the week containing `date`, or `None` if that
/// day precedes the beginning of time
pub(crate) fn start_of_week(date: Date, week_start: WeekStart) -> Option<Date> {
    date.checked_sub(Duration::days(week_start.index0(date.weekday()).into()))
}

/// Returns the (ISO year, ISO week number) identifying the row that `date`
/// falls in.
///
/// Sunday-based rows are keyed by the ISO week of the Monday inside them, so
/// that every day of a row maps to the same key under either convention.
pub(crate) fn week_key(date: Date, week_start: WeekStart) -> (i32, u8) {
    let date = match week_start {
        // At the end of time there is no following Monday; the key of the
        // preceding ISO week is the best available.
        WeekStart::Sunday if date.weekday() == Weekday::Sunday => date.next_day().unwrap_or(date),
        _ => date,
    };
    let (year, week, _) = date.to_iso_week_date();
    (year, week)
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

pub(crate) fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("day 1 should exist in every month")
}

pub(crate) fn last_of_month(date: Date) -> Date {
    date.replace_day(days_in_month(date.year(), date.month()))
        .expect("the month's length should be a valid day")
}

pub(crate) fn same_month(a: Date, b: Date) -> bool {
    (a.year(), a.month()) == (b.year(), b.month())
}

/// Orders dates by (year, month), ignoring the day
pub(crate) fn month_ordinal(date: Date) -> (i32, u8) {
    (date.year(), u8::from(date.month()))
}

/// Shifts `date` by `delta` calendar months, clamping the day to the length
/// of the target month.  Returns `None` if the result is outside the
/// supported range of dates.
pub(crate) fn add_months(date: Date, delta: i32) -> Option<Date> {
    let total = date
        .year()
        .checked_mul(12)?
        .checked_add(i32::from(u8::from(date.month())) - 1)?
        .checked_add(delta)?;
    let year = total.div_euclid(12);
    let month = u8::try_from(total.rem_euclid(12) + 1).ok()?;
    let month = Month::try_from(month).ok()?;
    let day = date.day().min(days_in_month(year, month));
    Date::from_calendar_date(year, month, day).ok()
}

pub(crate) fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

pub(crate) fn iter_weeks_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.checked_add(Duration::weeks(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_start_of_week_monday() {
        assert_eq!(
            start_of_week(date!(2024 - 01 - 10), WeekStart::Monday),
            Some(date!(2024 - 01 - 08))
        );
        assert_eq!(
            start_of_week(date!(2024 - 01 - 08), WeekStart::Monday),
            Some(date!(2024 - 01 - 08))
        );
        assert_eq!(
            start_of_week(date!(2024 - 01 - 14), WeekStart::Monday),
            Some(date!(2024 - 01 - 08))
        );
    }

    #[test]
    fn test_start_of_week_sunday() {
        assert_eq!(
            start_of_week(date!(2024 - 01 - 10), WeekStart::Sunday),
            Some(date!(2024 - 01 - 07))
        );
        assert_eq!(
            start_of_week(date!(2024 - 01 - 14), WeekStart::Sunday),
            Some(date!(2024 - 01 - 14))
        );
    }

    #[test]
    fn test_weekdays() {
        let days = WeekStart::Sunday.weekdays().collect::<Vec<_>>();
        assert_eq!(days.len(), DAYS_IN_WEEK);
        assert_eq!(days.first(), Some(&Weekday::Sunday));
        assert_eq!(days.last(), Some(&Weekday::Saturday));
        let days = WeekStart::Monday.weekdays().collect::<Vec<_>>();
        assert_eq!(days.first(), Some(&Weekday::Monday));
        assert_eq!(days.last(), Some(&Weekday::Sunday));
    }

    #[test]
    fn test_week_key_across_year() {
        assert_eq!(week_key(date!(2024 - 12 - 30), WeekStart::Monday), (2025, 1));
        assert_eq!(week_key(date!(2025 - 01 - 05), WeekStart::Monday), (2025, 1));
        assert_eq!(week_key(date!(2024 - 12 - 29), WeekStart::Monday), (2024, 52));
        // Sunday the 29th begins the row that holds Monday the 30th
        assert_eq!(week_key(date!(2024 - 12 - 29), WeekStart::Sunday), (2025, 1));
        assert_eq!(week_key(date!(2025 - 01 - 04), WeekStart::Sunday), (2025, 1));
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(date!(2024 - 01 - 31), 1), Some(date!(2024 - 02 - 29)));
        assert_eq!(add_months(date!(2023 - 01 - 31), 1), Some(date!(2023 - 02 - 28)));
        assert_eq!(add_months(date!(2024 - 03 - 31), -1), Some(date!(2024 - 02 - 29)));
    }

    #[test]
    fn test_add_months_across_year() {
        assert_eq!(add_months(date!(2024 - 12 - 15), 1), Some(date!(2025 - 01 - 15)));
        assert_eq!(add_months(date!(2024 - 01 - 15), -1), Some(date!(2023 - 12 - 15)));
        assert_eq!(add_months(date!(2024 - 01 - 15), -13), Some(date!(2022 - 12 - 15)));
    }

    #[test]
    fn test_add_months_end_of_time() {
        assert_eq!(add_months(date!(9999 - 12 - 01), 1), None);
        assert_eq!(add_months(date!(9999 - 12 - 31), 12), None);
    }

    #[test]
    fn test_month_edges() {
        assert_eq!(first_of_month(date!(2024 - 02 - 17)), date!(2024 - 02 - 01));
        assert_eq!(last_of_month(date!(2024 - 02 - 17)), date!(2024 - 02 - 29));
        assert_eq!(last_of_month(date!(2100 - 02 - 01)), date!(2100 - 02 - 28));
        assert_eq!(last_of_month(date!(2024 - 04 - 30)), date!(2024 - 04 - 30));
    }
}
