use super::util::{
    first_of_month, iter_days_from, iter_weeks_from, month_ordinal, start_of_week, week_key,
    WeekStart, DAYS_IN_WEEK,
};
use std::cmp::Ordering;
use time::{Date, Duration};

/// A month view never has fewer rows than this
const MIN_ROWS: usize = 4;

/// A month view never has more rows than this
const MAX_ROWS: usize = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarDay {
    pub(crate) date: Date,
    pub(crate) is_previous_month: bool,
    pub(crate) is_next_month: bool,
    pub(crate) is_today: bool,
}

impl CalendarDay {
    pub(crate) fn day_of_month(&self) -> u8 {
        self.date.day()
    }

    pub(crate) fn in_month(&self) -> bool {
        !(self.is_previous_month || self.is_next_month)
    }

    pub(crate) fn show(&self) -> String {
        if self.is_today {
            format!("[{:2}]", self.day_of_month())
        } else {
            format!(" {:2} ", self.day_of_month())
        }
    }
}

/// The first and last day of a selected week
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct WeekRange {
    pub(crate) start: Date,
    pub(crate) end: Date,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekRow {
    pub(crate) week_number: u8,
    pub(crate) start_date: Date,
    pub(crate) is_current_selection: bool,
    pub(crate) is_disabled: bool,
    pub(crate) days: [CalendarDay; DAYS_IN_WEEK],
}

impl WeekRow {
    pub(crate) fn end_date(&self) -> Date {
        self.days[DAYS_IN_WEEK - 1].date
    }

    pub(crate) fn range(&self) -> WeekRange {
        WeekRange {
            start: self.start_date,
            end: self.end_date(),
        }
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        (self.start_date..=self.end_date()).contains(&date)
    }
}

/// Optional limits on which weeks may be selected.  Both ends are stored as
/// the first day of their week.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Bounds {
    min: Option<Date>,
    max: Option<Date>,
}

impl Bounds {
    pub(crate) fn new(min: Option<Date>, max: Option<Date>, week_start: WeekStart) -> Bounds {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                log::warn!("Ignoring bounds: minimum {lo} is after maximum {hi}");
                return Bounds::default();
            }
        }
        Bounds {
            min: min.and_then(|d| start_of_week(d, week_start)),
            max: max.and_then(|d| start_of_week(d, week_start)),
        }
    }

    /// Whether the week beginning on `week_start` may not be selected.  The
    /// weeks of the bounds themselves are disabled.
    pub(crate) fn disables(&self, week_start: Date) -> bool {
        self.min.is_some_and(|min| week_start <= min)
            || self.max.is_some_and(|max| week_start >= max)
    }

    /// Whether a month spanning `first..=last` overlaps the weeks from the
    /// minimum's week through the maximum's week
    pub(crate) fn admits_month(&self, first: Date, last: Date) -> bool {
        let before_min = self.min.is_some_and(|min| last < min);
        let after_max = self.max.is_some_and(|max| {
            max.checked_add(Duration::days(6))
                .is_some_and(|week_end| first > week_end)
        });
        !(before_min || after_max)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    // Invariant: always the first of the month
    month: Date,
    rows: Vec<WeekRow>,
}

impl MonthGrid {
    pub(crate) fn month(&self) -> Date {
        self.month
    }

    pub(crate) fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    pub(crate) fn get(&self, index: usize) -> Option<&WeekRow> {
        self.rows.get(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index of the row marked as the current selection, if shown
    pub(crate) fn current_row(&self) -> Option<usize> {
        self.rows.iter().position(|row| row.is_current_selection)
    }

    pub(crate) fn row_containing(&self, date: Date) -> Option<usize> {
        self.rows.iter().position(|row| row.contains(date))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthGridBuilder {
    week_start: WeekStart,
    today: Date,
}

impl MonthGridBuilder {
    pub(crate) fn new(week_start: WeekStart, today: Date) -> Self {
        MonthGridBuilder { week_start, today }
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    /// Lays out the month containing `month_anchor` as complete weeks,
    /// flagging the week that contains `selected` and the weeks excluded by
    /// `bounds`.
    ///
    /// Rows that would extend past the representable range of dates are
    /// omitted, so a grid for the first or last month of time may be short.
    pub(crate) fn build(&self, month_anchor: Date, selected: Date, bounds: &Bounds) -> MonthGrid {
        let month = first_of_month(month_anchor);
        let selected_key = week_key(selected, self.week_start);
        let mut rows = Vec::with_capacity(MAX_ROWS);
        if let Some(first_start) = start_of_week(month, self.week_start) {
            for start in iter_weeks_from(first_start) {
                let Some(row) = self.make_row(start, month, selected_key, bounds) else {
                    break;
                };
                rows.push(row);
                let done = rows.len() >= MIN_ROWS
                    && start
                        .checked_add(Duration::weeks(1))
                        .map_or(true, |next| next.month() != start.month());
                if done {
                    break;
                }
            }
        }
        log::debug!(
            "Built grid for {} {}: {} rows",
            month.month(),
            month.year(),
            rows.len()
        );
        MonthGrid { month, rows }
    }

    fn make_row(
        &self,
        start: Date,
        month: Date,
        selected_key: (i32, u8),
        bounds: &Bounds,
    ) -> Option<WeekRow> {
        let days = iter_days_from(start)
            .take(DAYS_IN_WEEK)
            .map(|date| self.make_day(date, month))
            .collect::<Vec<_>>();
        let days = <[CalendarDay; DAYS_IN_WEEK]>::try_from(days).ok()?;
        let key = week_key(start, self.week_start);
        Some(WeekRow {
            week_number: key.1,
            start_date: start,
            is_current_selection: key == selected_key,
            is_disabled: bounds.disables(start),
            days,
        })
    }

    fn make_day(&self, date: Date, month: Date) -> CalendarDay {
        let ordering = month_ordinal(date).cmp(&month_ordinal(month));
        CalendarDay {
            date,
            is_previous_month: ordering == Ordering::Less,
            is_next_month: ordering == Ordering::Greater,
            is_today: date == self.today,
        }
    }
}
