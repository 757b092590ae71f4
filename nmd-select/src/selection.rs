//! Keeps the displayed text and the committed value in step.

use crate::option::OptionList;
use crate::text_field::TextField;

/// Show the selected option's text, or clear both text and value when
/// nothing is selected.
pub fn commit_selection(options: &mut OptionList, field: &mut TextField) {
    match options.selected().map(|option| option.text().to_string()) {
        Some(text) => field.set_text(text),
        None => {
            field.clear();
            options.clear_selection();
        }
    }
}

/// Select the first option, visible or not, whose text equals the
/// displayed text.
///
/// Without a match the committed value is cleared, and the displayed text
/// too when `clear_if_no_match` is set. Returns whether an option matched.
pub fn select_by_displayed_text(
    options: &mut OptionList,
    field: &mut TextField,
    clear_if_no_match: bool,
) -> bool {
    if let Some(index) = options.position_of_text(field.text()) {
        options.select(index);
        return true;
    }

    options.clear_selection();
    if clear_if_no_match {
        field.clear();
    }
    false
}
