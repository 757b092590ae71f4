use std::cell::RefCell;
use std::rc::Rc;

use nmd_select::{
    Event, EventResult, Key, Modifiers, NmdSelect, OpenState, OptionGroup, OptionList,
    PointerTarget, SelectConfig, SelectOption,
};

fn cars() -> OptionList {
    OptionList::new([
        OptionGroup::new(
            "Swedish Cars",
            [
                SelectOption::new("volvo", "Volvo"),
                SelectOption::new("saab", "Saab"),
            ],
        )
        .into(),
        OptionGroup::new(
            "German Cars",
            [
                SelectOption::new("mercedes", "Mercedes"),
                SelectOption::new("audi", "Audi"),
            ],
        )
        .into(),
        OptionGroup::new(
            "Other",
            [
                SelectOption::new("vaux", "Vauxhalle"),
                SelectOption::new("vololo", "Vololo"),
            ],
        )
        .into(),
    ])
}

fn type_text(select: &mut NmdSelect, text: &str) {
    for c in text.chars() {
        select.handle_event(&Event::key(Key::Char(c)));
    }
}

fn press(select: &mut NmdSelect, key: Key) -> EventResult {
    select.handle_event(&Event::key(key))
}

fn pointer_down(select: &mut NmdSelect, target: PointerTarget) -> EventResult {
    select.handle_event(&Event::PointerDown { target })
}

fn visible_selected(select: &NmdSelect) -> Vec<&str> {
    select
        .options()
        .options()
        .filter(|o| o.is_visible() && o.is_selected())
        .map(|o| o.text())
        .collect()
}

// ============================================================================
// Open / close
// ============================================================================

#[test]
fn test_initial_state() {
    let select = NmdSelect::new(cars());
    assert_eq!(select.state(), OpenState::Closed);
    assert_eq!(select.displayed_text(), "");
    assert_eq!(select.value(), "");
    assert_eq!(select.visible_rows(), 2);
}

#[test]
fn test_initial_text_from_authored_selection() {
    let options = OptionList::new([
        SelectOption::new("a", "Alpha").into(),
        SelectOption::new("b", "Beta").with_selected(true).into(),
    ]);
    let select = NmdSelect::new(options);
    assert_eq!(select.displayed_text(), "Beta");
    assert_eq!(select.value(), "b");
}

#[test]
fn test_open_shows_everything() {
    let mut select = NmdSelect::new(cars());
    select.open();

    assert!(select.is_open());
    assert_eq!(select.visible_rows(), 9);
    assert!(select.options().options().all(|o| o.is_visible()));
    // Nothing displayed, so nothing stays selected.
    assert_eq!(select.selected_index(), None);
}

#[test]
fn test_open_twice_is_noop() {
    let mut select = NmdSelect::new(cars());
    select.open();
    press(&mut select, Key::Down);
    press(&mut select, Key::Down);
    let selected = select.selected_index();

    select.open();
    assert_eq!(select.selected_index(), selected);
}

#[test]
fn test_close_when_closed_is_noop() {
    let mut select = NmdSelect::new(cars());
    select.set_value("audi");
    select.close();
    assert_eq!(select.displayed_text(), "Audi");
    assert_eq!(select.value(), "audi");
}

#[test]
fn test_disabled_never_opens() {
    let config = SelectConfig {
        disabled: true,
        ..Default::default()
    };
    let mut select = NmdSelect::with_config(cars(), config);

    select.open();
    assert!(!select.is_open());

    assert_eq!(press(&mut select, Key::Char('v')), EventResult::Ignored);
    assert_eq!(
        pointer_down(&mut select, PointerTarget::Input),
        EventResult::Ignored
    );
    assert!(!select.is_open());
    assert_eq!(select.displayed_text(), "");
}

#[test]
fn test_readonly_ignores_typing_and_navigation() {
    let mut select = NmdSelect::new(cars());
    select.set_value("saab");
    select.set_attribute("readonly", Some("")).unwrap();

    assert_eq!(press(&mut select, Key::Char('x')), EventResult::Ignored);
    assert_eq!(press(&mut select, Key::Down), EventResult::Ignored);
    assert_eq!(press(&mut select, Key::Enter), EventResult::Ignored);
    assert!(!select.is_open());
    assert_eq!(select.value(), "saab");
}

#[test]
fn test_positioner_called_on_open() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut select = NmdSelect::new(cars());
    let sink = Rc::clone(&calls);
    select.set_positioner(move |rows| sink.borrow_mut().push(rows));

    select.open();
    select.open();
    type_text(&mut select, "a");

    assert_eq!(*calls.borrow(), vec![9]);
}

// ============================================================================
// Typing
// ============================================================================

#[test]
fn test_typing_opens_and_filters() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "german");

    assert!(select.is_open());
    assert_eq!(select.displayed_text(), "german");
    assert_eq!(select.visible_rows(), 3);
    assert_eq!(select.value(), "mercedes");
}

#[test]
fn test_typing_auto_selects_first_match() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "vol");

    assert_eq!(select.value(), "volvo");
    assert_eq!(visible_selected(&select), vec!["Volvo"]);
}

#[test]
fn test_backspace_refilters() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "audix");
    assert_eq!(select.value(), "");

    assert_eq!(press(&mut select, Key::Backspace), EventResult::Consumed);
    assert_eq!(select.displayed_text(), "audi");
    assert_eq!(select.value(), "audi");
}

#[test]
fn test_input_event_replaces_text() {
    let mut select = NmdSelect::new(cars());
    let result = select.handle_event(&Event::Input {
        text: "benz merc".into(),
    });

    assert_eq!(result, EventResult::Consumed);
    assert!(select.is_open());
    // No option mentions "benz".
    assert_eq!(select.value(), "");
    assert_eq!(select.visible_rows(), 2);
}

#[test]
fn test_max_size_caps_rows() {
    let mut select = NmdSelect::new(cars());
    select.set_attribute("max-size", Some("1")).unwrap();
    type_text(&mut select, "german");

    assert_eq!(select.visible_rows(), 1);

    type_text(&mut select, "xyz");
    assert_eq!(select.visible_rows(), 1);
}

#[test]
fn test_no_match_uses_row_floor() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "xyz");
    assert_eq!(select.visible_rows(), 2);
}

#[test]
fn test_filter_is_skipped_while_closed() {
    let mut select = NmdSelect::new(cars());
    assert_eq!(select.filter("audi"), 2);
    assert!(select.options().options().all(|o| o.is_visible()));
    assert_eq!(select.value(), "");
}

#[test]
fn test_modified_keys_are_ignored() {
    let mut select = NmdSelect::new(cars());
    let result = select.handle_event(&Event::Key {
        key: Key::Char('c'),
        modifiers: Modifiers::ctrl(),
    });
    assert_eq!(result, EventResult::Ignored);
    assert!(!select.is_open());
}

// ============================================================================
// Keyboard navigation
// ============================================================================

#[test]
fn test_arrow_down_opens_and_selects_first() {
    let mut select = NmdSelect::new(cars());
    assert_eq!(press(&mut select, Key::Down), EventResult::Consumed);

    assert!(select.is_open());
    assert_eq!(select.selected_index(), Some(0));
    // Navigation does not touch the displayed text.
    assert_eq!(select.displayed_text(), "");
}

#[test]
fn test_arrow_navigation_clamps() {
    let mut select = NmdSelect::new(cars());
    for _ in 0..10 {
        press(&mut select, Key::Down);
    }
    assert_eq!(select.selected_index(), Some(5));

    for _ in 0..10 {
        press(&mut select, Key::Up);
    }
    assert_eq!(select.selected_index(), Some(0));
}

#[test]
fn test_arrow_up_without_selection_does_nothing() {
    let mut select = NmdSelect::new(cars());
    assert_eq!(press(&mut select, Key::Up), EventResult::Consumed);
    assert!(select.is_open());
    assert_eq!(select.selected_index(), None);
}

#[test]
fn test_arrow_navigation_skips_hidden_options() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "v");
    // Volvo, Vauxhalle, Vololo
    assert_eq!(select.value(), "volvo");

    press(&mut select, Key::Down);
    assert_eq!(select.value(), "vaux");
    press(&mut select, Key::Down);
    assert_eq!(select.value(), "vololo");
    press(&mut select, Key::Down);
    assert_eq!(select.value(), "vololo");
    press(&mut select, Key::Up);
    assert_eq!(select.value(), "vaux");
}

#[test]
fn test_enter_commits_and_closes() {
    let mut select = NmdSelect::new(cars());
    press(&mut select, Key::Down);
    press(&mut select, Key::Down);
    assert_eq!(press(&mut select, Key::Enter), EventResult::Consumed);

    assert!(!select.is_open());
    assert_eq!(select.displayed_text(), "Saab");
    assert_eq!(select.value(), "saab");
    assert_eq!(select.take_change().as_deref(), Some("saab"));
    assert_eq!(select.take_change(), None);
}

#[test]
fn test_enter_without_match_clears() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "xyz");
    press(&mut select, Key::Enter);

    assert!(!select.is_open());
    assert_eq!(select.displayed_text(), "");
    assert_eq!(select.value(), "");
}

#[test]
fn test_escape_closes() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "Audi");
    assert_eq!(press(&mut select, Key::Escape), EventResult::Consumed);
    assert!(!select.is_open());
    assert_eq!(select.value(), "audi");

    assert_eq!(press(&mut select, Key::Escape), EventResult::Ignored);
}

// ============================================================================
// Focus loss
// ============================================================================

#[test]
fn test_blur_without_match_clears() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "xyz");

    assert_eq!(select.handle_event(&Event::Blur), EventResult::Consumed);
    assert!(!select.is_open());
    assert_eq!(select.displayed_text(), "");
    assert_eq!(select.value(), "");
}

#[test]
fn test_blur_keeps_exact_text_match() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "Mercedes");
    select.handle_event(&Event::Blur);

    assert_eq!(select.displayed_text(), "Mercedes");
    assert_eq!(select.value(), "mercedes");
}

#[test]
fn test_blur_with_partial_text_clears() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "merc");
    // Highlighted but never committed.
    assert_eq!(select.value(), "mercedes");

    select.handle_event(&Event::Blur);
    assert_eq!(select.displayed_text(), "");
    assert_eq!(select.value(), "");
}

#[test]
fn test_commit_then_reopen_preserves_selection() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "audi");
    press(&mut select, Key::Enter);
    assert_eq!(select.displayed_text(), "Audi");

    select.open();
    assert_eq!(select.selected_index(), Some(3));
    assert_eq!(visible_selected(&select), vec!["Audi"]);
    assert_eq!(select.visible_rows(), 9);
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn test_pointer_down_while_closed_opens_and_suppresses_blur() {
    let mut select = NmdSelect::new(cars());
    pointer_down(&mut select, PointerTarget::Input);

    assert!(select.is_open());
    assert!(select.is_suppressing_blur());
    assert!(select.has_pending_release());

    // The transient blur is swallowed.
    assert_eq!(select.handle_event(&Event::Blur), EventResult::Consumed);
    assert!(select.is_open());
    assert!(!select.is_suppressing_blur());

    // A second blur closes.
    select.handle_event(&Event::Blur);
    assert!(!select.is_open());
}

#[test]
fn test_pointer_up_disarms_and_requests_focus() {
    let mut select = NmdSelect::new(cars());
    select.set_value("saab");
    pointer_down(&mut select, PointerTarget::Input);

    assert_eq!(select.handle_event(&Event::PointerUp), EventResult::Consumed);
    assert!(!select.is_suppressing_blur());
    assert!(!select.has_pending_release());
    assert!(select.take_focus_request());
    assert!(!select.take_focus_request());
    assert_eq!(select.text_field().selection(), Some((0, 4)));

    // Blur after release is no longer suppressed.
    select.handle_event(&Event::Blur);
    assert!(!select.is_open());
    assert_eq!(select.value(), "saab");
}

#[test]
fn test_pointer_up_without_press_is_ignored() {
    let mut select = NmdSelect::new(cars());
    assert_eq!(select.handle_event(&Event::PointerUp), EventResult::Ignored);
    assert!(!select.take_focus_request());
}

#[test]
fn test_pointer_down_on_option_commits() {
    let mut select = NmdSelect::new(cars());
    select.open();
    pointer_down(&mut select, PointerTarget::Option(4));

    assert!(!select.is_open());
    assert_eq!(select.displayed_text(), "Vauxhalle");
    assert_eq!(select.value(), "vaux");
    assert!(!select.is_suppressing_blur());
    assert_eq!(select.take_change().as_deref(), Some("vaux"));

    // The following blur finds the control closed already.
    assert_eq!(select.handle_event(&Event::Blur), EventResult::Ignored);
    assert_eq!(select.value(), "vaux");
}

#[test]
fn test_pointer_down_on_hidden_option_only_suppresses() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "audi");
    pointer_down(&mut select, PointerTarget::Option(0));

    assert!(select.is_open());
    assert!(select.is_suppressing_blur());
    assert_eq!(select.value(), "audi");
}

#[test]
fn test_pointer_down_on_close_row() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "Saab");
    pointer_down(&mut select, PointerTarget::CloseRow);

    assert!(!select.is_open());
    assert_eq!(select.value(), "saab");
    assert!(select.has_pending_release());
}

#[test]
fn test_pointer_down_on_scrollbar_keeps_open() {
    let mut select = NmdSelect::new(cars());
    select.open();
    pointer_down(&mut select, PointerTarget::Scrollbar);
    assert!(select.is_open());
    assert!(select.is_suppressing_blur());

    // Arming twice is idempotent: one blur consumes it.
    pointer_down(&mut select, PointerTarget::List);
    select.handle_event(&Event::Blur);
    assert!(select.is_open());
    select.handle_event(&Event::Blur);
    assert!(!select.is_open());
}

// ============================================================================
// Programmatic access
// ============================================================================

#[test]
fn test_set_value_commits_text() {
    let mut select = NmdSelect::new(cars());
    select.set_value("mercedes");
    assert_eq!(select.displayed_text(), "Mercedes");
    assert_eq!(select.selected_options().len(), 1);

    select.set_value("nope");
    assert_eq!(select.displayed_text(), "");
    assert_eq!(select.value(), "");
    // Programmatic changes are not reported.
    assert_eq!(select.take_change(), None);
}

#[test]
fn test_set_selected_index_commits_text() {
    let mut select = NmdSelect::new(cars());
    select.set_selected_index(Some(5));
    assert_eq!(select.displayed_text(), "Vololo");

    select.set_selected_index(Some(99));
    assert_eq!(select.selected_index(), None);
    assert_eq!(select.displayed_text(), "");
}

#[test]
fn test_set_options_while_open_refilters() {
    let mut select = NmdSelect::new(cars());
    type_text(&mut select, "o");
    select.set_options(OptionList::new([
        SelectOption::new("x", "Xylophone").into(),
        SelectOption::new("y", "Yak").into(),
    ]));

    assert_eq!(select.value(), "x");
    assert_eq!(select.visible_rows(), 2);
    assert!(!select.options().option(1).unwrap().is_visible());
}

#[test]
fn test_dirty_tracking() {
    let mut select = NmdSelect::new(cars());
    assert!(!select.is_dirty());
    press(&mut select, Key::Down);
    assert!(select.is_dirty());
    select.clear_dirty();
    assert!(!select.is_dirty());
}
