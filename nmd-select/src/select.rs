//! The searchable select control and its open/close state machine.

use std::fmt;

use crate::config::SelectConfig;
use crate::error::ConfigError;
use crate::event::{Event, EventResult, Key, Modifiers, PointerTarget};
use crate::filter::{self, MIN_VISIBLE_ROWS};
use crate::matcher::{SearchQuery, TextMatcher};
use crate::option::{OptionList, SelectOption};
use crate::selection;
use crate::text_field::TextField;

/// Whether the dropdown list is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenState {
    #[default]
    Closed,
    Open,
}

/// One-shot guard against the focus loss a pointer press is expected to
/// cause.
///
/// Armed by a pointer press, cleared by the first blur it swallows or by
/// the following pointer release, whichever comes first. Arming twice is
/// the same as arming once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuppressionWindow {
    armed: bool,
}

impl SuppressionWindow {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Disarm and report whether a blur should be swallowed.
    pub fn consume(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Viewport-geometry collaborator, told the row count after every open so
/// it can place the dropdown.
pub trait Positioner {
    fn position(&mut self, visible_rows: usize);
}

impl<F: FnMut(usize)> Positioner for F {
    fn position(&mut self, visible_rows: usize) {
        self(visible_rows)
    }
}

/// A text input that filters a list of grouped options as the user types
/// and commits one of them, like a native single select.
///
/// # Example
///
/// ```
/// use nmd_select::{Event, Key, NmdSelect, OptionGroup, OptionList, SelectOption};
///
/// let options = OptionList::new([
///     OptionGroup::new("Swedish Cars", [
///         SelectOption::new("volvo", "Volvo"),
///         SelectOption::new("saab", "Saab"),
///     ])
///     .into(),
/// ]);
/// let mut select = NmdSelect::new(options);
///
/// for c in "saa".chars() {
///     select.handle_event(&Event::key(Key::Char(c)));
/// }
/// select.handle_event(&Event::key(Key::Enter));
///
/// assert_eq!(select.value(), "saab");
/// assert_eq!(select.displayed_text(), "Saab");
/// assert!(!select.is_open());
/// ```
pub struct NmdSelect {
    options: OptionList,
    field: TextField,
    config: SelectConfig,
    state: OpenState,
    suppression: SuppressionWindow,
    /// A pointer press is waiting for its release.
    release_pending: bool,
    visible_rows: usize,
    query: SearchQuery,
    matcher: TextMatcher,
    positioner: Option<Box<dyn Positioner>>,
    focus_requested: bool,
    /// Value reported by the last change notification.
    committed: String,
    change: Option<String>,
    dirty: bool,
}

impl NmdSelect {
    pub fn new(options: OptionList) -> Self {
        Self::with_config(options, SelectConfig::default())
    }

    pub fn with_config(options: OptionList, config: SelectConfig) -> Self {
        let field = TextField::new(options.selected().map(SelectOption::text).unwrap_or(""));
        let committed = options.value().to_string();
        Self {
            query: SearchQuery::new("", config.strategy),
            options,
            field,
            config,
            state: OpenState::Closed,
            suppression: SuppressionWindow::default(),
            release_pending: false,
            visible_rows: MIN_VISIBLE_ROWS,
            matcher: TextMatcher::new(),
            positioner: None,
            focus_requested: false,
            committed,
            change: None,
            dirty: false,
        }
    }

    /// Install the collaborator that places the dropdown on open.
    pub fn set_positioner(&mut self, positioner: impl Positioner + 'static) {
        self.positioner = Some(Box::new(positioner));
    }

    // -------------------------------------------------------------------------
    // Host surface
    // -------------------------------------------------------------------------

    /// The committed value.
    pub fn value(&self) -> &str {
        self.options.value()
    }

    /// Select the first option with `value` and show its text. An unknown
    /// value clears both.
    pub fn set_value(&mut self, value: &str) {
        self.options.set_value(value);
        self.commit_selection();
        self.committed = self.options.value().to_string();
    }

    pub fn options(&self) -> &OptionList {
        &self.options
    }

    /// Replace the option collection.
    pub fn set_options(&mut self, options: OptionList) {
        self.options = options;
        if self.is_open() {
            let text = self.field.text().to_string();
            self.filter(&text);
        } else {
            self.commit_selection();
        }
        self.committed = self.options.value().to_string();
        self.dirty = true;
    }

    pub fn selected_options(&self) -> Vec<&SelectOption> {
        self.options.selected_options()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.options.selected_index()
    }

    /// Select by flat option index and show its text. `None` or an
    /// out-of-range index clears both.
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.options.set_selected_index(index);
        self.commit_selection();
        self.committed = self.options.value().to_string();
    }

    pub fn displayed_text(&self) -> &str {
        self.field.text()
    }

    pub fn text_field(&self) -> &TextField {
        &self.field
    }

    pub fn state(&self) -> OpenState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == OpenState::Open
    }

    /// Row count the dropdown reserves, as of the last filter pass.
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// The query of the last filter pass.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Apply an attribute change, see [`SelectConfig::set_attribute`].
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        self.config.set_attribute(name, value)?;
        self.dirty = true;
        Ok(())
    }

    pub fn is_suppressing_blur(&self) -> bool {
        self.suppression.is_armed()
    }

    pub fn has_pending_release(&self) -> bool {
        self.release_pending
    }

    // -------------------------------------------------------------------------
    // Open / close
    // -------------------------------------------------------------------------

    /// Show the dropdown with every option, preselecting the option whose
    /// text is displayed. No-op when open, disabled or read-only.
    pub fn open(&mut self) {
        if self.config.is_inert() {
            log::trace!("[open] ignored: control is disabled or read-only");
            return;
        }
        if self.is_open() {
            return;
        }
        self.state = OpenState::Open;
        self.filter("");
        selection::select_by_displayed_text(&mut self.options, &mut self.field, false);
        if let Some(positioner) = self.positioner.as_mut() {
            positioner.position(self.visible_rows);
        }
        log::debug!("[open] rows={} text={:?}", self.visible_rows, self.field.text());
        self.dirty = true;
    }

    /// Hide the dropdown, committing the option whose text is displayed.
    /// Text that names no option is cleared.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.state = OpenState::Closed;
        selection::select_by_displayed_text(&mut self.options, &mut self.field, true);
        log::debug!("[close] value={:?}", self.options.value());
        self.note_change();
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Filtering and selection
    // -------------------------------------------------------------------------

    /// Re-filter the options for `query` and return the row count the
    /// dropdown should now reserve.
    ///
    /// Only runs while open; a closed control keeps its last result.
    pub fn filter(&mut self, query: &str) -> usize {
        if !self.is_open() {
            log::trace!("[filter] skipped while closed");
            return self.visible_rows;
        }
        self.query = SearchQuery::new(query, self.config.strategy);
        let outcome = filter::filter(&mut self.options, &self.query, &mut self.matcher);
        self.visible_rows = filter::visible_rows(outcome.visible_count, self.config.max_size);
        self.dirty = true;
        self.visible_rows
    }

    /// Show the selected option's text, or clear text and value when none
    /// is selected.
    pub fn commit_selection(&mut self) {
        selection::commit_selection(&mut self.options, &mut self.field);
        self.dirty = true;
    }

    /// Select the option whose text equals the displayed text. See
    /// [`selection::select_by_displayed_text`].
    pub fn select_by_displayed_text(&mut self, clear_if_no_match: bool) -> bool {
        self.dirty = true;
        selection::select_by_displayed_text(&mut self.options, &mut self.field, clear_if_no_match)
    }

    /// Move the highlighted option to the next or previous visible option,
    /// stopping at either end.
    fn step_selection(&mut self, forward: bool) {
        let visible = self.options.visible_indices();
        let Some(last) = visible.len().checked_sub(1) else {
            return;
        };
        let current = self
            .options
            .selected_index()
            .and_then(|selected| visible.iter().position(|&index| index == selected));
        let next = match (current, forward) {
            (Some(pos), true) => pos.saturating_add(1).min(last),
            (Some(pos), false) => pos.saturating_sub(1),
            (None, true) => 0,
            (None, false) => return,
        };
        self.options.select(visible[next]);
        self.dirty = true;
    }

    fn note_change(&mut self) {
        let value = self.options.value();
        if value != self.committed {
            self.committed = value.to_string();
            self.change = Some(self.committed.clone());
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Feed one host event through the state machine.
    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        if self.config.disabled && *event != Event::Blur {
            return EventResult::Ignored;
        }
        match event {
            Event::Key { key, modifiers } => self.handle_key(*key, *modifiers),
            Event::Input { text } => {
                if self.config.readonly {
                    return EventResult::Ignored;
                }
                self.open();
                self.field.set_text(text.as_str());
                self.on_input();
                EventResult::Consumed
            }
            Event::PointerDown { target } => {
                self.handle_pointer_down(*target);
                EventResult::Consumed
            }
            Event::PointerUp => self.handle_pointer_up(),
            Event::Blur => self.handle_blur(),
        }
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> EventResult {
        if modifiers.ctrl || modifiers.alt || self.config.readonly {
            return EventResult::Ignored;
        }

        match key {
            Key::Down => {
                self.open();
                self.step_selection(true);
                EventResult::Consumed
            }
            Key::Up => {
                self.open();
                self.step_selection(false);
                EventResult::Consumed
            }
            Key::Enter => {
                self.commit_selection();
                self.close();
                EventResult::Consumed
            }
            Key::Escape if self.is_open() => {
                self.close();
                EventResult::Consumed
            }
            Key::Char(c) => {
                self.open();
                self.field.insert_char(c);
                self.on_input();
                EventResult::Consumed
            }
            Key::Backspace => {
                if self.field.delete_before() {
                    self.open();
                    self.on_input();
                }
                EventResult::Consumed
            }
            Key::Delete => {
                if self.field.delete_at() {
                    self.open();
                    self.on_input();
                }
                EventResult::Consumed
            }
            Key::Left => self.move_cursor(TextField::move_left),
            Key::Right => self.move_cursor(TextField::move_right),
            Key::Home => self.move_cursor(TextField::move_home),
            Key::End => self.move_cursor(TextField::move_end),
            _ => EventResult::Ignored,
        }
    }

    fn move_cursor(&mut self, movement: fn(&mut TextField)) -> EventResult {
        movement(&mut self.field);
        self.dirty = true;
        EventResult::Consumed
    }

    /// The displayed text changed: filter on it.
    fn on_input(&mut self) {
        let text = self.field.text().to_string();
        self.filter(&text);
    }

    fn handle_pointer_down(&mut self, target: PointerTarget) {
        if self.is_open() {
            match target {
                PointerTarget::Option(index)
                    if self.options.option(index).is_some_and(SelectOption::is_visible) =>
                {
                    self.options.select(index);
                    self.commit_selection();
                    self.close();
                }
                PointerTarget::CloseRow => self.close(),
                // Scrollbar, list background and the input keep the list open, but
                // focus will briefly leave the input.
                _ => self.suppression.arm(),
            }
        } else {
            self.open();
            self.suppression.arm();
        }
        log::trace!(
            "[pointer_down] target={:?} open={} suppressing={}",
            target,
            self.is_open(),
            self.suppression.is_armed()
        );
        // Only one release can be pending; a second press re-uses it.
        self.release_pending = true;
    }

    fn handle_pointer_up(&mut self) -> EventResult {
        if !std::mem::take(&mut self.release_pending) {
            return EventResult::Ignored;
        }
        self.focus_requested = true;
        self.field.select_all();
        self.suppression.disarm();
        self.dirty = true;
        EventResult::Consumed
    }

    fn handle_blur(&mut self) -> EventResult {
        if self.suppression.consume() {
            log::debug!("[blur] suppressed");
            return EventResult::Consumed;
        }
        if !self.is_open() {
            return EventResult::Ignored;
        }
        self.close();
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Host notifications
    // -------------------------------------------------------------------------

    /// Check and clear the request to give focus back to the input.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// New committed value, reported once after user interaction changed it.
    pub fn take_change(&mut self) -> Option<String> {
        self.change.take()
    }

    /// Check if the control's state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl fmt::Debug for NmdSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NmdSelect")
            .field("state", &self.state)
            .field("text", &self.field.text())
            .field("value", &self.options.value())
            .field("visible_rows", &self.visible_rows)
            .field("suppression", &self.suppression)
            .field("release_pending", &self.release_pending)
            .finish_non_exhaustive()
    }
}
