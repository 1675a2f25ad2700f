use crate::calendar::WeekRange;
use crate::help::Help;
use crate::picker::{PickerView, SelectError, WeekPicker};
use crate::theme::{BASE_STYLE, PLACEHOLDER_STYLE};
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

/// Number of lines taken up by the bordered field above the dropdown
const FIELD_HEIGHT: u16 = 3;

const PLACEHOLDER: &str = "(no week selected)";

#[derive(Debug)]
pub(crate) struct App {
    picker: WeekPicker,
    /// Row of the dropdown under the keyboard cursor
    highlight: usize,
    state: AppState,
}

impl App {
    pub(crate) fn new(mut picker: WeekPicker) -> App {
        let grid = picker.show();
        App {
            highlight: grid.current_row().unwrap_or(0),
            picker,
            state: AppState::Picking,
        }
    }

    /// Runs until the user quits or selects a week.  In the latter case, the
    /// field's new value is returned.
    pub(crate) fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> io::Result<Option<String>> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(self.selection())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = read()?
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the requested
    // move was refused
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => {
                    let ok = self.picker.previous_month().is_ok();
                    self.sync_highlight();
                    ok
                }
                KeyCode::Char('l') | KeyCode::Right => {
                    let ok = self.picker.next_month().is_ok();
                    self.sync_highlight();
                    ok
                }
                KeyCode::Char('k') | KeyCode::Up => self.highlight_up(),
                KeyCode::Char('j') | KeyCode::Down => self.highlight_down(),
                KeyCode::Char('[') if self.picker.can_step_previous_week() => {
                    let ok = self.picker.previous_week().is_ok();
                    self.sync_highlight();
                    ok
                }
                KeyCode::Char(']') if self.picker.can_step_next_week() => {
                    let ok = self.picker.next_week().is_ok();
                    self.sync_highlight();
                    ok
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let result = self.picker.select_row(self.highlight);
                    self.finish(result)
                }
                KeyCode::Char('t') => {
                    let today = self.picker.today();
                    let result = self.picker.select_date(today);
                    self.finish(result)
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.picker.show_selected_month();
                    self.sync_highlight();
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Selected | AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        matches!(self.state, AppState::Selected | AppState::Quitting)
    }

    fn selection(&self) -> Option<String> {
        (self.state == AppState::Selected).then(|| self.picker.value().to_owned())
    }

    fn finish(&mut self, result: Result<Option<WeekRange>, SelectError>) -> bool {
        match result {
            Ok(Some(_)) => {
                log::info!(
                    "Week {}-W{:02} selected from {}",
                    self.picker.year(),
                    self.picker.week(),
                    self.picker.date()
                );
                self.state = AppState::Selected;
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::error!("{e}");
                false
            }
        }
    }

    fn highlight_up(&mut self) -> bool {
        if let Some(i) = self.highlight.checked_sub(1) {
            self.highlight = i;
            true
        } else {
            false
        }
    }

    fn highlight_down(&mut self) -> bool {
        if self.highlight + 1 < self.picker.grid().len() {
            self.highlight += 1;
            true
        } else {
            false
        }
    }

    // Follow the selection if it is shown, else stay on the same line
    fn sync_highlight(&mut self) {
        let grid = self.picker.grid();
        self.highlight = grid
            .current_row()
            .unwrap_or(self.highlight.min(grid.len().saturating_sub(1)));
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let field_area = Rect {
            x: area.x,
            y: area.y,
            width: PickerView::width(self.picker.options().show_week_number).min(area.width),
            height: FIELD_HEIGHT.min(area.height),
        };
        let value = if self.picker.value().is_empty() {
            Span::styled(PLACEHOLDER, PLACEHOLDER_STYLE)
        } else {
            Span::styled(self.picker.value(), BASE_STYLE)
        };
        Paragraph::new(Line::from(value))
            .block(Block::bordered().title(" Week "))
            .style(BASE_STYLE)
            .render(field_area, buf);
        if self.picker.is_open() {
            let dropdown_area = Rect {
                x: area.x,
                y: area.y + field_area.height,
                width: area.width,
                height: area.height - field_area.height,
            };
            PickerView::new()
                .highlight(self.highlight)
                .render(dropdown_area, buf, &mut self.picker);
        }
        if self.state == AppState::Helping {
            Help.render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Selected,
    Quitting,
}
