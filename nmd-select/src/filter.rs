//! Visibility engine: applies a query to the collection.

use crate::config::MaxSize;
use crate::matcher::{SearchQuery, TextMatcher};
use crate::option::{Entry, OptionList};

/// Fewest rows the dropdown list ever reserves.
pub const MIN_VISIBLE_ROWS: usize = 2;

/// Result of one filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Visible group headings plus visible options.
    pub visible_count: usize,
    /// Flat index of the option that was auto-selected, if any matched.
    pub first_match: Option<usize>,
}

/// Recompute visibility of every option and group for `query`.
///
/// Options are visited in document order. An option inside a group is shown
/// when its own text matches or, if the strategy allows it, when the group
/// label matches. A group is shown when any of its options is. The first
/// shown option becomes the selection; when nothing is shown the selection
/// is cleared, since hidden options cannot be chosen.
pub fn filter(
    options: &mut OptionList,
    query: &SearchQuery,
    matcher: &mut TextMatcher,
) -> FilterOutcome {
    let cascade = query.strategy().cascades_group_label() && !query.matches_everything();
    let mut visible_count = 0;
    let mut first_match = None;
    let mut index = 0;

    for entry in options.entries_mut() {
        match entry {
            Entry::Group(group) => {
                let label_matches = cascade && matcher.matches(group.label(), query);
                let mut any_visible = false;
                for option in group.options_mut() {
                    let visible = label_matches || matcher.matches(option.text(), query);
                    option.set_visible(visible);
                    if visible {
                        any_visible = true;
                        visible_count += 1;
                        first_match.get_or_insert(index);
                    }
                    index += 1;
                }
                group.set_visible(any_visible);
                if any_visible {
                    visible_count += 1;
                }
            }
            Entry::Option(option) => {
                let visible = matcher.matches(option.text(), query);
                option.set_visible(visible);
                if visible {
                    visible_count += 1;
                    first_match.get_or_insert(index);
                }
                index += 1;
            }
        }
    }

    match first_match {
        Some(index) => {
            options.select(index);
        }
        None => options.clear_selection(),
    }

    log::trace!(
        "[filter] query={:?} visible={} first_match={:?}",
        query.raw(),
        visible_count,
        first_match
    );

    FilterOutcome {
        visible_count,
        first_match,
    }
}

/// Row count the dropdown should reserve for `visible_count` rows.
///
/// Never below [`MIN_VISIBLE_ROWS`]; a configured `max_size` caps the result
/// and may take it under the floor. A `max_size` of zero does not cap.
pub fn visible_rows(visible_count: usize, max_size: Option<MaxSize>) -> usize {
    let rows = visible_count.max(MIN_VISIBLE_ROWS);
    match max_size.and_then(MaxSize::limit) {
        Some(limit) => rows.min(limit),
        None => rows,
    }
}
