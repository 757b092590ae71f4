//! Screen model of the control: what goes where, and what a click hits.

use nmd_select::{Entry, NmdSelect, PointerTarget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::placement::{Placement, Rect};

const CLOSE_LABEL: &str = "  ✕ close";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Option { index: usize, selected: bool },
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub label: String,
}

/// Scrollbar thumb, in rows from the top of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumb {
    pub start: u16,
    pub len: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownView {
    /// Whole dropdown, list rows plus the close row.
    pub rect: Rect,
    /// The rows currently scrolled into view.
    pub rows: Vec<Row>,
    pub thumb: Option<Thumb>,
}

impl DropdownView {
    pub fn close_row_y(&self) -> u16 {
        self.rect.bottom() - 1
    }

    pub fn scrollbar_x(&self) -> Option<u16> {
        self.thumb.map(|_| self.rect.right() - 1)
    }

    pub fn close_label(&self) -> &'static str {
        CLOSE_LABEL
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub input: Rect,
    /// Text as shown: the tail of the displayed text when it is wider than
    /// the field.
    pub text: String,
    pub placeholder: Option<String>,
    /// Terminal column of the text cursor.
    pub cursor_x: u16,
    pub dropdown: Option<DropdownView>,
}

impl View {
    pub fn build(select: &NmdSelect, input: Rect, placement: Placement) -> Self {
        let (text, cursor_x) = field_text(select, input);
        let placeholder = select
            .displayed_text()
            .is_empty()
            .then(|| select.config().placeholder.clone())
            .flatten();
        let dropdown = select
            .is_open()
            .then(|| dropdown(select, input, placement))
            .flatten();

        Self {
            input,
            text,
            placeholder,
            cursor_x,
            dropdown,
        }
    }

    /// The part of the control under a pointer press, if any.
    pub fn hit(&self, x: u16, y: u16) -> Option<PointerTarget> {
        if self.input.contains(x, y) {
            return Some(PointerTarget::Input);
        }

        let dropdown = self.dropdown.as_ref()?;
        if !dropdown.rect.contains(x, y) {
            return None;
        }
        if y == dropdown.close_row_y() {
            return Some(PointerTarget::CloseRow);
        }
        if dropdown.scrollbar_x() == Some(x) {
            return Some(PointerTarget::Scrollbar);
        }

        let row = dropdown.rows.get(usize::from(y - dropdown.rect.y))?;
        Some(match row.kind {
            RowKind::Option { index, .. } => PointerTarget::Option(index),
            RowKind::Header | RowKind::Blank => PointerTarget::List,
        })
    }
}

fn field_text(select: &NmdSelect, input: Rect) -> (String, u16) {
    let field = select.text_field();
    let before_cursor = &field.text()[..field.cursor()];
    let width = usize::from(input.width.saturating_sub(1));

    // Scroll horizontally so the cursor stays inside the field.
    let mut start = 0;
    while before_cursor[start..].width() > width {
        start += before_cursor[start..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
    }
    let visible = &field.text()[start..];
    let cursor_x = input.x + before_cursor[start..].width() as u16;
    (truncate(visible, usize::from(input.width)), cursor_x)
}

/// Every row the list would show, in document order.
fn list_rows(select: &NmdSelect) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut index = 0;
    for entry in select.options().entries() {
        match entry {
            Entry::Group(group) => {
                if group.is_visible() {
                    rows.push(Row {
                        kind: RowKind::Header,
                        label: group.label().to_string(),
                    });
                }
                for option in group.options() {
                    if option.is_visible() {
                        rows.push(Row {
                            kind: RowKind::Option {
                                index,
                                selected: option.is_selected(),
                            },
                            label: format!("  {}", option.text()),
                        });
                    }
                    index += 1;
                }
            }
            Entry::Option(option) => {
                if option.is_visible() {
                    rows.push(Row {
                        kind: RowKind::Option {
                            index,
                            selected: option.is_selected(),
                        },
                        label: option.text().to_string(),
                    });
                }
                index += 1;
            }
        }
    }
    rows
}

fn dropdown(select: &NmdSelect, input: Rect, placement: Placement) -> Option<DropdownView> {
    let rows = list_rows(select);
    let wanted = u16::try_from(select.visible_rows()).unwrap_or(u16::MAX);
    let rect = placement.rect(input, wanted.saturating_add(1));
    if rect.height == 0 || rect.width == 0 {
        return None;
    }
    let list_height = usize::from(rect.height - 1);

    let selected_row = rows
        .iter()
        .position(|row| matches!(row.kind, RowKind::Option { selected: true, .. }));
    let offset = match selected_row {
        Some(row) if row >= list_height => row + 1 - list_height,
        _ => 0,
    };

    let total = rows.len();
    let thumb = (total > list_height && list_height > 0).then(|| {
        let len = (list_height * list_height / total).max(1);
        let start = (offset * list_height / total).min(list_height - len);
        Thumb {
            start: start as u16,
            len: len as u16,
        }
    });

    let text_width = usize::from(rect.width).saturating_sub(usize::from(thumb.is_some()));
    let mut window: Vec<Row> = rows
        .into_iter()
        .skip(offset)
        .take(list_height)
        .map(|row| Row {
            label: truncate(&row.label, text_width),
            ..row
        })
        .collect();
    window.resize(
        list_height,
        Row {
            kind: RowKind::Blank,
            label: String::new(),
        },
    );

    Some(DropdownView {
        rect,
        rows: window,
        thumb,
    })
}

/// Cut `text` to at most `width` terminal columns.
pub fn truncate(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}
