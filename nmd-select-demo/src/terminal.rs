use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal,
};
use unicode_width::UnicodeWidthStr;

use crate::view::{DropdownView, RowKind, View, truncate};

const HELP: &str =
    "Type to filter, Up/Down to move, Enter to commit, Esc to close, Tab to blur, Ctrl+Q to quit";

pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            event::EnableBracketedPaste
        )?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    /// Redraw the whole screen.
    pub fn draw(&mut self, view: &View, focused: bool, status: &str) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let width = usize::from(width);

        queue!(
            self.stdout,
            cursor::Hide,
            SetAttribute(Attribute::Reset),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Dim),
            Print(truncate(HELP, width)),
            SetAttribute(Attribute::Reset),
        )?;

        self.draw_input(view)?;
        if let Some(dropdown) = &view.dropdown {
            self.draw_dropdown(dropdown)?;
        }

        queue!(
            self.stdout,
            cursor::MoveTo(0, height.saturating_sub(1)),
            Print(truncate(status, width)),
        )?;

        if focused {
            queue!(
                self.stdout,
                cursor::MoveTo(view.cursor_x, view.input.y),
                cursor::Show
            )?;
        }

        self.stdout.flush()
    }

    fn draw_input(&mut self, view: &View) -> io::Result<()> {
        let input = view.input;
        let (text, dim) = match &view.placeholder {
            Some(placeholder) if view.text.is_empty() => {
                (truncate(placeholder, usize::from(input.width)), true)
            }
            _ => (view.text.clone(), false),
        };
        let pad = usize::from(input.width).saturating_sub(text.width());

        queue!(
            self.stdout,
            cursor::MoveTo(input.x, input.y),
            SetAttribute(Attribute::Underlined)
        )?;
        if dim {
            queue!(self.stdout, SetAttribute(Attribute::Dim))?;
        }
        queue!(
            self.stdout,
            Print(text),
            Print(" ".repeat(pad)),
            SetAttribute(Attribute::Reset)
        )
    }

    fn draw_dropdown(&mut self, dropdown: &DropdownView) -> io::Result<()> {
        let rect = dropdown.rect;
        let text_width =
            usize::from(rect.width).saturating_sub(usize::from(dropdown.thumb.is_some()));

        for (offset, row) in dropdown.rows.iter().enumerate() {
            let y = rect.y + offset as u16;
            let pad = text_width.saturating_sub(row.label.width());

            queue!(self.stdout, cursor::MoveTo(rect.x, y))?;
            match row.kind {
                RowKind::Header => queue!(self.stdout, SetAttribute(Attribute::Bold))?,
                RowKind::Option { selected: true, .. } => {
                    queue!(self.stdout, SetAttribute(Attribute::Reverse))?
                }
                RowKind::Option { .. } | RowKind::Blank => {}
            }
            queue!(
                self.stdout,
                Print(&row.label),
                Print(" ".repeat(pad)),
                SetAttribute(Attribute::Reset)
            )?;

            if let (Some(thumb), Some(x)) = (dropdown.thumb, dropdown.scrollbar_x()) {
                let offset = offset as u16;
                let on_thumb = offset >= thumb.start && offset < thumb.start + thumb.len;
                queue!(
                    self.stdout,
                    cursor::MoveTo(x, y),
                    Print(if on_thumb { '█' } else { '│' })
                )?;
            }
        }

        let label = truncate(dropdown.close_label(), usize::from(rect.width));
        let pad = usize::from(rect.width).saturating_sub(label.width());
        queue!(
            self.stdout,
            cursor::MoveTo(rect.x, dropdown.close_row_y()),
            SetAttribute(Attribute::Dim),
            Print(label),
            Print(" ".repeat(pad)),
            SetAttribute(Attribute::Reset)
        )
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableBracketedPaste,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
