use super::grid::Bounds;
use super::util::{add_months, first_of_month, last_of_month, same_month, start_of_week, WeekStart};
use thiserror::Error;
use time::{Date, Duration};

/// The two dates a picker carries between grid rebuilds
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Anchors {
    /// Any day in the selected week
    pub(crate) selected: Date,
    /// Any day in the displayed month
    pub(crate) month: Date,
}

impl Anchors {
    pub(crate) fn new(date: Date) -> Anchors {
        Anchors {
            selected: date,
            month: date,
        }
    }

    /// Moves the selection to `date`.  Moving it into another month drags
    /// the displayed month along with it.
    pub(crate) fn select(&mut self, date: Date) {
        if !same_month(date, self.month) {
            self.month = first_of_month(date);
        }
        self.selected = date;
    }
}

/// Decides which week and month steps the bounds permit, and performs them.
/// A refused step leaves the anchors untouched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NavigationPolicy {
    bounds: Bounds,
    week_start: WeekStart,
}

impl NavigationPolicy {
    pub(crate) fn new(bounds: Bounds, week_start: WeekStart) -> Self {
        NavigationPolicy { bounds, week_start }
    }

    pub(crate) fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub(crate) fn can_step_previous_week(&self, anchors: &Anchors) -> bool {
        self.shifted_week(anchors, -1).is_ok()
    }

    pub(crate) fn can_step_next_week(&self, anchors: &Anchors) -> bool {
        self.shifted_week(anchors, 1).is_ok()
    }

    pub(crate) fn can_step_previous_month(&self, anchors: &Anchors) -> bool {
        self.shifted_month(anchors, -1).is_ok()
    }

    pub(crate) fn can_step_next_month(&self, anchors: &Anchors) -> bool {
        self.shifted_month(anchors, 1).is_ok()
    }

    pub(crate) fn step_previous_week(&self, anchors: &mut Anchors) -> Result<(), StepError> {
        self.step_week(anchors, -1)
    }

    pub(crate) fn step_next_week(&self, anchors: &mut Anchors) -> Result<(), StepError> {
        self.step_week(anchors, 1)
    }

    pub(crate) fn step_previous_month(&self, anchors: &mut Anchors) -> Result<(), StepError> {
        self.step_month(anchors, -1)
    }

    pub(crate) fn step_next_month(&self, anchors: &mut Anchors) -> Result<(), StepError> {
        self.step_month(anchors, 1)
    }

    fn step_week(&self, anchors: &mut Anchors, weeks: i64) -> Result<(), StepError> {
        let selected = self.shifted_week(anchors, weeks)?;
        anchors.select(selected);
        log::debug!("Selected week moved to {selected}");
        Ok(())
    }

    fn step_month(&self, anchors: &mut Anchors, months: i32) -> Result<(), StepError> {
        let month = self.shifted_month(anchors, months)?;
        anchors.month = month;
        log::debug!("Displayed month moved to {} {}", month.month(), month.year());
        Ok(())
    }

    fn shifted_week(&self, anchors: &Anchors, weeks: i64) -> Result<Date, StepError> {
        let date = anchors
            .selected
            .checked_add(Duration::weeks(weeks))
            .ok_or(StepError::OutOfTime)?;
        let week_start = start_of_week(date, self.week_start).ok_or(StepError::OutOfTime)?;
        if self.bounds.disables(week_start) {
            Err(StepError::Disabled)
        } else {
            Ok(date)
        }
    }

    fn shifted_month(&self, anchors: &Anchors, months: i32) -> Result<Date, StepError> {
        let date = add_months(anchors.month, months).ok_or(StepError::OutOfTime)?;
        if self
            .bounds
            .admits_month(first_of_month(date), last_of_month(date))
        {
            Ok(date)
        } else {
            Err(StepError::Disabled)
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum StepError {
    #[error("step would leave the selectable range")]
    Disabled,
    #[error("reached the end of time")]
    OutOfTime,
}
