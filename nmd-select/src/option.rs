//! Option and group collection backing a select control.

use serde::Deserialize;

fn visible_by_default() -> bool {
    true
}

/// One selectable entry: display text plus the value it commits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    value: String,
    text: String,
    #[serde(skip, default = "visible_by_default")]
    visible: bool,
    #[serde(default)]
    selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            visible: true,
            selected: false,
        }
    }

    /// Mark the option as selected when it is authored.
    ///
    /// [`OptionList`] keeps only one selected option, so when several are
    /// authored as selected the last one wins.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// A labeled run of options, shown with a heading row.
///
/// A group is visible exactly when one of its options is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptionGroup {
    label: String,
    options: Vec<SelectOption>,
    #[serde(skip, default = "visible_by_default")]
    visible: bool,
}

impl OptionGroup {
    pub fn new(label: impl Into<String>, options: impl IntoIterator<Item = SelectOption>) -> Self {
        Self {
            label: label.into(),
            options: options.into_iter().collect(),
            visible: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn options_mut(&mut self) -> &mut [SelectOption] {
        &mut self.options
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// A top-level entry of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Group(OptionGroup),
    Option(SelectOption),
}

impl From<SelectOption> for Entry {
    fn from(option: SelectOption) -> Self {
        Entry::Option(option)
    }
}

impl From<OptionGroup> for Entry {
    fn from(group: OptionGroup) -> Self {
        Entry::Group(group)
    }
}

/// Ordered collection of options and groups.
///
/// Options are addressed by their flat index in document order, with group
/// members expanded in place. At most one option is selected at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    entries: Vec<Entry>,
}

impl OptionList {
    pub fn new(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut list = Self {
            entries: entries.into_iter().collect(),
        };
        list.normalize_selection();
        list
    }

    /// Append an entry at the end of the collection.
    pub fn push(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
        self.normalize_selection();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    /// Iterate all options in document order, groups expanded.
    pub fn options(&self) -> impl Iterator<Item = &SelectOption> + '_ {
        self.entries.iter().flat_map(|entry| match entry {
            Entry::Option(option) => std::slice::from_ref(option).iter(),
            Entry::Group(group) => group.options.iter(),
        })
    }

    fn options_mut(&mut self) -> impl Iterator<Item = &mut SelectOption> + '_ {
        self.entries.iter_mut().flat_map(|entry| match entry {
            Entry::Option(option) => std::slice::from_mut(option).iter_mut(),
            Entry::Group(group) => group.options.iter_mut(),
        })
    }

    /// Number of options (group headings are not counted).
    pub fn len(&self) -> usize {
        self.options().count()
    }

    pub fn is_empty(&self) -> bool {
        self.options().next().is_none()
    }

    pub fn option(&self, index: usize) -> Option<&SelectOption> {
        self.options().nth(index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.options().position(SelectOption::is_selected)
    }

    pub fn selected(&self) -> Option<&SelectOption> {
        self.options().find(|option| option.is_selected())
    }

    /// Selected options; never more than one.
    pub fn selected_options(&self) -> Vec<&SelectOption> {
        self.options().filter(|option| option.is_selected()).collect()
    }

    /// Select the option at `index`, deselecting every other option.
    ///
    /// Returns false and leaves the selection untouched when `index` is out
    /// of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        for (i, option) in self.options_mut().enumerate() {
            option.selected = i == index;
        }
        true
    }

    pub fn clear_selection(&mut self) {
        for option in self.options_mut() {
            option.selected = false;
        }
    }

    /// Set the selection by index. `None` or an out-of-range index clears it.
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        match index {
            Some(index) if self.select(index) => {}
            _ => self.clear_selection(),
        }
    }

    /// The committed value: the selected option's value, or empty.
    pub fn value(&self) -> &str {
        self.selected().map(SelectOption::value).unwrap_or("")
    }

    /// Select the first option carrying `value`.
    ///
    /// Clears the selection and returns false when no option has it.
    pub fn set_value(&mut self, value: &str) -> bool {
        let found = self.options().position(|option| option.value == value);
        match found {
            Some(index) => self.select(index),
            None => {
                self.clear_selection();
                false
            }
        }
    }

    /// Flat index of the first option whose text equals `text` exactly.
    pub fn position_of_text(&self, text: &str) -> Option<usize> {
        self.options().position(|option| option.text == text)
    }

    /// Flat indices of the options currently shown, in document order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.options()
            .enumerate()
            .filter(|(_, option)| option.is_visible())
            .map(|(index, _)| index)
            .collect()
    }

    fn normalize_selection(&mut self) {
        let last = self
            .options()
            .enumerate()
            .filter(|(_, option)| option.is_selected())
            .map(|(index, _)| index)
            .last();
        if let Some(last) = last {
            for (i, option) in self.options_mut().enumerate() {
                option.selected = i == last;
            }
        }
    }
}

impl FromIterator<Entry> for OptionList {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::new(iter)
    }
}
