//! Net add/delete reconciliation.
//!
//! Each (timestamp, location) key sums +1 per add and -1 per delete over
//! the whole history. Only keys with a positive sum survive, so the result
//! does not depend on the order in which the log recorded the mutations.

use crate::models::event::{ParsedEvent, SessionKey};
use crate::models::session::ReconciledSession;
use std::collections::BTreeMap;

/// Signed totals per key, before the positivity filter.
pub fn net_counts<'a, I>(events: I) -> BTreeMap<SessionKey, i32>
where
    I: IntoIterator<Item = &'a ParsedEvent>,
{
    let mut totals: BTreeMap<SessionKey, i32> = BTreeMap::new();

    for ev in events {
        // ignored and malformed events have no key
        if let Some(key) = ev.key() {
            *totals.entry(key).or_insert(0) += ev.kind.signal();
        }
    }

    totals
}

/// Active sessions, ordered by timestamp then location.
pub fn reconcile(events: &[ParsedEvent]) -> Vec<ReconciledSession> {
    net_counts(events)
        .into_iter()
        .filter(|(_, net)| *net > 0)
        .map(|(key, net)| ReconciledSession::from_key(key, net))
        .collect()
}
