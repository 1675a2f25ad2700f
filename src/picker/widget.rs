use super::WeekPicker;
use crate::calendar::{weekday_abbrev, CalendarDay, WeekRow};
use crate::theme::{
    BASE_STYLE, DISABLED_STYLE, HIGHLIGHT_MODIFIER, INACTIVE_ARROW_STYLE, OUTSIDE_MONTH_STYLE,
    SELECTED_STYLE, TITLE_STYLE, WEEKDAY_STYLE, WEEK_NUMBER_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the optional week number column
const WEEK_NO_WIDTH: u16 = 4;

/// Number of day columns in a row
const DAY_COLUMNS: u16 = 7;

const GRID_WIDTH: u16 = DAY_WIDTH * DAY_COLUMNS;

/// Number of lines above the first week: the month controls and the weekday
/// header
const HEADER_LINES: u16 = 2;

/// Columns or lines taken up by the border on both sides
const BORDERS: u16 = 2;

const PREV_ARROW: &str = "‹";
const NEXT_ARROW: &str = "›";

/// The dropdown: month controls, weekday header, and one line per week of the
/// picker's current grid
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PickerView {
    highlight: Option<usize>,
}

impl PickerView {
    pub(crate) fn new() -> PickerView {
        PickerView::default()
    }

    /// Underline the row at `index`
    pub(crate) fn highlight(mut self, index: usize) -> PickerView {
        self.highlight = Some(index);
        self
    }

    pub(crate) fn width(show_week_number: bool) -> u16 {
        Self::inner_width(show_week_number) + BORDERS
    }

    pub(crate) fn height(rows: usize) -> u16 {
        u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .saturating_add(HEADER_LINES + BORDERS)
    }

    fn inner_width(show_week_number: bool) -> u16 {
        if show_week_number {
            WEEK_NO_WIDTH + GRID_WIDTH
        } else {
            GRID_WIDTH
        }
    }

    fn row_style(row: &WeekRow) -> Style {
        if row.is_current_selection {
            SELECTED_STYLE
        } else if row.is_disabled {
            DISABLED_STYLE
        } else {
            BASE_STYLE
        }
    }

    fn day_style(row_style: Style, day: &CalendarDay) -> Style {
        if day.in_month() || row_style != BASE_STYLE {
            row_style
        } else {
            OUTSIDE_MONTH_STYLE
        }
    }
}

impl StatefulWidget for PickerView {
    type State = WeekPicker;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let grid = state.grid();
        let show_week_number = state.options().show_week_number;
        let month = state.displayed_month();
        let outer = Rect {
            x: area.x,
            y: area.y,
            width: Self::width(show_week_number).min(area.width),
            height: Self::height(grid.len()).min(area.height),
        };
        Clear.render(outer, buf);
        let block = Block::bordered().style(BASE_STYLE);
        let inner = block.inner(outer);
        block.render(outer, buf);

        let week_col = if show_week_number { WEEK_NO_WIDTH } else { 0 };
        let mut canvas = BufferCanvas::new(inner, buf);
        canvas.draw_controls(
            Self::inner_width(show_week_number),
            &format!("{} {}", month.month(), month.year()),
            state.can_step_previous_month(),
            state.can_step_next_month(),
        );
        if show_week_number {
            canvas.mvprint(1, 0, " Wk ", WEEKDAY_STYLE);
        }
        for (i, wd) in std::iter::zip(0u16.., state.options().week_start.weekdays()) {
            canvas.mvprint(
                1,
                week_col + DAY_WIDTH * i,
                format!(" {} ", weekday_abbrev(wd)),
                WEEKDAY_STYLE,
            );
        }
        for (i, row) in grid.rows().iter().enumerate() {
            let y = HEADER_LINES.saturating_add(u16::try_from(i).unwrap_or(u16::MAX));
            let mut style = Self::row_style(row);
            if self.highlight == Some(i) {
                style = style.add_modifier(HIGHLIGHT_MODIFIER);
            }
            if show_week_number {
                canvas.mvprint(
                    y,
                    0,
                    format!("{:>3} ", row.week_number),
                    if style == BASE_STYLE {
                        WEEK_NUMBER_STYLE
                    } else {
                        style
                    },
                );
            }
            for (j, day) in std::iter::zip(0u16.., &row.days) {
                canvas.mvprint(
                    y,
                    week_col + DAY_WIDTH * j,
                    day.show(),
                    Self::day_style(style, day),
                );
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_controls(&mut self, width: u16, title: &str, has_prev: bool, has_next: bool) {
        let arrow_style = |active| {
            if active {
                TITLE_STYLE
            } else {
                INACTIVE_ARROW_STYLE
            }
        };
        let title_width = usize::from(width.saturating_sub(2));
        self.mvprint(0, 0, PREV_ARROW, arrow_style(has_prev));
        self.mvprint(0, 1, format!("{title:^title_width$}"), TITLE_STYLE);
        self.mvprint(0, width.saturating_sub(1), NEXT_ARROW, arrow_style(has_next));
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // dropdown's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
