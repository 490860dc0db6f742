//! proptest strategies for permalink parts that every scheme can carry.

use proptest::prelude::*;

use crate::types::PermalinkParts;

/// Identifier body: non-empty, no `/` or `?`.
fn body() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._=:~-]{1,24}"
}

fn room_sigil() -> impl Strategy<Value = char> {
    prop_oneof![Just('!'), Just('#')]
}

/// Server names that need no percent-encoding.
fn via_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9-]{1,12}(\\.[a-z]{2,6})?(:[0-9]{1,5})?", 0..4)
}

pub(crate) fn permalink_parts() -> impl Strategy<Value = PermalinkParts> {
    prop_oneof![
        body().prop_map(|user| PermalinkParts::for_user(format!("@{user}"))),
        (room_sigil(), body(), via_list()).prop_map(|(sigil, room, via)| {
            PermalinkParts::for_room(format!("{sigil}{room}"), via)
        }),
        (room_sigil(), body(), body(), via_list()).prop_map(|(sigil, room, event, via)| {
            PermalinkParts::for_event(format!("{sigil}{room}"), format!("${event}"), via)
        }),
    ]
}
