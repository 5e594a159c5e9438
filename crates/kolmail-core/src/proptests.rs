//! Property-based tests for the chunked send protocol.
//!
//! - Request count is one per group, with one request for empty sets
//! - Meat rides on the first request only
//! - Non-giftable items never reach a request
//! - The overall result is the AND of every group's outcome

use proptest::prelude::*;

use crate::item::{Attachments, Item};
use crate::service::{SEND_GROUP_SIZE, Strategy as Delivery, deliver};
use crate::testing::ScriptedSession;
use kolmail_protocol::Recipient;

const SENT: &str = "<td>Message sent.</td>";
const PACKAGE: &str = "<td>Package sent.</td>";

/// Distinct items with quantities and giftable flags.
fn attachment_strategy() -> impl Strategy<Value = Vec<(Item, u32)>> {
    prop::collection::btree_map(1u32..5_000, (1u32..100, prop::bool::weighted(0.8)), 0..40).prop_map(
        |entries| {
            entries
                .into_iter()
                .map(|(id, (quantity, giftable))| {
                    let item = Item::new(id, format!("item {id}"));
                    let item = if giftable { item } else { item.untradeable() };
                    (item, quantity)
                })
                .collect()
        },
    )
}

fn run(session: &ScriptedSession, strategy: Delivery, pairs: Vec<(Item, u32)>, meat: u64) -> bool {
    let to = Recipient::from("Zootgraph");
    tokio_test::block_on(deliver(
        session,
        strategy,
        &to,
        "note",
        &Attachments::Counted(pairs),
        meat,
    ))
    .unwrap()
}

proptest! {
    #[test]
    fn request_count_is_group_count(pairs in attachment_strategy(), gift in any::<bool>()) {
        let strategy = if gift { Delivery::gift() } else { Delivery::Send };
        let size = strategy.group_size();
        let giftable = pairs.iter().filter(|(item, _)| item.is_giftable()).count();
        let session = ScriptedSession::fixed(if gift { PACKAGE } else { SENT });

        prop_assert!(run(&session, strategy, pairs, 0));
        let expected = if giftable == 0 { 1 } else { giftable.div_ceil(size) };
        prop_assert_eq!(session.requests().len(), expected);
    }

    #[test]
    fn meat_only_on_first_request(pairs in attachment_strategy(), meat in 1u64..10_000_000) {
        let session = ScriptedSession::fixed(SENT);
        run(&session, Delivery::Send, pairs, meat);

        let requests = session.requests();
        let first = meat.to_string();
        prop_assert_eq!(requests[0].field("sendmeat"), Some(first.as_str()));
        for request in &requests[1..] {
            prop_assert_eq!(request.field("sendmeat"), Some("0"));
        }
    }

    #[test]
    fn non_giftable_never_sent(pairs in attachment_strategy()) {
        let forbidden: Vec<String> = pairs
            .iter()
            .filter(|(item, _)| !item.is_giftable())
            .map(|(item, _)| item.id.to_string())
            .collect();
        let session = ScriptedSession::fixed(SENT);
        run(&session, Delivery::Send, pairs, 0);

        for request in session.requests() {
            prop_assert!(ScriptedSession::item_count(&request) <= SEND_GROUP_SIZE);
            for (name, value) in request.fields() {
                if name.starts_with("whichitem") {
                    prop_assert!(!forbidden.contains(value));
                }
            }
        }
    }

    #[test]
    fn result_is_and_of_groups(pairs in attachment_strategy(), failing in any::<prop::sample::Index>()) {
        let giftable = pairs.iter().filter(|(item, _)| item.is_giftable()).count();
        let groups = giftable.div_ceil(SEND_GROUP_SIZE).max(1);
        let fail_at = failing.index(groups);

        let counter = std::sync::atomic::AtomicUsize::new(0);
        let session = ScriptedSession::new(move |_| {
            let n = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if n == fail_at { "<html>error</html>".to_string() } else { SENT.to_string() }
        });

        prop_assert!(!run(&session, Delivery::Send, pairs, 0));
        prop_assert_eq!(session.requests().len(), groups);
    }
}
