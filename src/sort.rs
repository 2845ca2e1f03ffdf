use std::cmp::Ordering;

use serde::Deserialize;

use crate::post_handle::PostHandle;

/// Handle field a post list can be ordered by.
#[derive(Deserialize, Copy, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Created,
    Updated,
    Title,
}

impl SortField {
    fn value_of<'a>(&self, handle: &'a PostHandle) -> &'a str {
        match self {
            SortField::Created => &handle.created,
            SortField::Updated => &handle.updated,
            SortField::Title => &handle.title,
        }
    }
}

/// Builds a comparator over the raw field values. Lexicographic on the
/// stored strings, which lines up with chronological order for ISO-8601
/// timestamps. Equal values compare as Equal, so a stable sort keeps their
/// index order.
pub fn compare_by(field: SortField, reverse: bool) -> impl Fn(&PostHandle, &PostHandle) -> Ordering {
    move |a, b| {
        let ord = field.value_of(a).cmp(field.value_of(b));
        if reverse { ord.reverse() } else { ord }
    }
}
