mod widget;
#[cfg(test)]
pub(crate) use self::widget::tests::symbols;
pub(crate) use self::widget::PickerView;
use crate::calendar::{
    week_key, Anchors, Bounds, MonthGrid, MonthGridBuilder, NavigationPolicy, StepError,
    WeekRange, WeekStart,
};
use std::fmt;
use thiserror::Error;
use time::{
    format_description::{BorrowedFormatItem, OwnedFormatItem},
    macros::format_description,
    Date,
};

/// Format applied to each end of the selected range when no other is given
static DEFAULT_VALUE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day]/[month]/[year]");

pub(crate) type ChangeCallback = Box<dyn FnMut(WeekRange)>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PickerOptions {
    /// Date whose week is initially selected; today if unset
    pub(crate) initial_date: Option<Date>,
    pub(crate) min: Option<Date>,
    pub(crate) max: Option<Date>,
    pub(crate) week_start: WeekStart,
    pub(crate) show_week_number: bool,
    pub(crate) value_format: OwnedFormatItem,
}

impl Default for PickerOptions {
    fn default() -> PickerOptions {
        PickerOptions {
            initial_date: None,
            min: None,
            max: None,
            week_start: WeekStart::default(),
            show_week_number: false,
            value_format: OwnedFormatItem::from(DEFAULT_VALUE_FORMAT),
        }
    }
}

/// A week picker bound to a text field: the dropdown's open state, the
/// selected week and displayed month, and the field's value
pub(crate) struct WeekPicker {
    options: PickerOptions,
    anchors: Anchors,
    policy: NavigationPolicy,
    builder: MonthGridBuilder,
    value: String,
    open: bool,
    on_change: Option<ChangeCallback>,
}

impl WeekPicker {
    pub(crate) fn new(options: PickerOptions, today: Date) -> WeekPicker {
        let initial = options.initial_date.unwrap_or(today);
        let bounds = Bounds::new(options.min, options.max, options.week_start);
        WeekPicker {
            anchors: Anchors::new(initial),
            policy: NavigationPolicy::new(bounds, options.week_start),
            builder: MonthGridBuilder::new(options.week_start, today),
            value: String::new(),
            open: false,
            on_change: None,
            options,
        }
    }

    pub(crate) fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(WeekRange) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub(crate) fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub(crate) fn bounds(&self) -> &Bounds {
        self.policy.bounds()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn show(&mut self) -> MonthGrid {
        self.open = true;
        self.grid()
    }

    pub(crate) fn hide(&mut self) {
        self.open = false;
    }

    /// Builds the grid for the displayed month.  Grids are never cached, so
    /// this always reflects the latest navigation.
    pub(crate) fn grid(&self) -> MonthGrid {
        self.builder
            .build(self.anchors.month, self.anchors.selected, self.bounds())
    }

    pub(crate) fn can_step_previous_month(&self) -> bool {
        self.policy.can_step_previous_month(&self.anchors)
    }

    pub(crate) fn can_step_next_month(&self) -> bool {
        self.policy.can_step_next_month(&self.anchors)
    }

    pub(crate) fn can_step_previous_week(&self) -> bool {
        self.policy.can_step_previous_week(&self.anchors)
    }

    pub(crate) fn can_step_next_week(&self) -> bool {
        self.policy.can_step_next_week(&self.anchors)
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), StepError> {
        self.policy.step_previous_month(&mut self.anchors)
    }

    pub(crate) fn next_month(&mut self) -> Result<(), StepError> {
        self.policy.step_next_month(&mut self.anchors)
    }

    pub(crate) fn previous_week(&mut self) -> Result<(), StepError> {
        self.policy.step_previous_week(&mut self.anchors)
    }

    pub(crate) fn next_week(&mut self) -> Result<(), StepError> {
        self.policy.step_next_week(&mut self.anchors)
    }

    /// Displays the month of the selected week again
    pub(crate) fn show_selected_month(&mut self) {
        self.anchors.month = self.anchors.selected;
    }

    /// Selects the week in row `index` of the current grid.
    ///
    /// Disabled rows and out-of-range indices are ignored, yielding
    /// `Ok(None)` with nothing changed.  Otherwise the field value is
    /// updated, the change callback is invoked, the dropdown is closed, and
    /// the new range is returned.
    pub(crate) fn select_row(&mut self, index: usize) -> Result<Option<WeekRange>, SelectError> {
        let grid = self.grid();
        match grid.get(index) {
            Some(row) if !row.is_disabled => self.commit(row.range()).map(Some),
            _ => Ok(None),
        }
    }

    /// Selects the week containing `date`, with the same rules as
    /// [`WeekPicker::select_row`]
    pub(crate) fn select_date(&mut self, date: Date) -> Result<Option<WeekRange>, SelectError> {
        let grid = self
            .builder
            .build(date, self.anchors.selected, self.bounds());
        match grid.row_containing(date).and_then(|i| grid.get(i)) {
            Some(row) if !row.is_disabled => self.commit(row.range()).map(Some),
            _ => Ok(None),
        }
    }

    fn commit(&mut self, range: WeekRange) -> Result<WeekRange, SelectError> {
        let value = format!(
            "{} - {}",
            range.start.format(&self.options.value_format)?,
            range.end.format(&self.options.value_format)?
        );
        self.anchors.select(range.start);
        self.value = value;
        log::info!("Selected week {} through {}", range.start, range.end);
        if let Some(callback) = self.on_change.as_mut() {
            callback(range);
        }
        self.hide();
        Ok(range)
    }

    /// The text of the bound field; empty until a week is selected
    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    /// The selected week's anchor date
    pub(crate) fn date(&self) -> Date {
        self.anchors.selected
    }

    pub(crate) fn week(&self) -> u8 {
        week_key(self.anchors.selected, self.options.week_start).1
    }

    pub(crate) fn year(&self) -> i32 {
        week_key(self.anchors.selected, self.options.week_start).0
    }

    pub(crate) fn displayed_month(&self) -> Date {
        self.anchors.month
    }

    pub(crate) fn today(&self) -> Date {
        self.builder.today()
    }
}

impl fmt::Debug for WeekPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeekPicker")
            .field("options", &self.options)
            .field("anchors", &self.anchors)
            .field("policy", &self.policy)
            .field("builder", &self.builder)
            .field("value", &self.value)
            .field("open", &self.open)
            .field("on_change", &self.on_change.as_ref().map(|_| ".."))
            .finish()
    }
}

#[derive(Debug, Error)]
pub(crate) enum SelectError {
    #[error("failed to format selected week")]
    Format(#[from] time::error::Format),
}
