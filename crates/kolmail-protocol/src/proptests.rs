//! Property-based tests for request building and response parsing.

use proptest::prelude::*;

use crate::command::{Command, item_fields};
use crate::parser::{MESSAGE_SENT_MARKER, SendResponse, parse_deleted_count};
use crate::types::{ItemId, KmailId, Recipient};

proptest! {
    /// The deleted banner is found wherever it sits in the page.
    #[test]
    fn deleted_count_found_in_any_page(
        count in 0u32..100_000,
        before in "[a-z<>/ ]{0,40}",
        after in "[a-z<>/ ]{0,40}",
    ) {
        let noun = if count == 1 { "message" } else { "messages" };
        let body = format!("{before}<td>{count} {noun} deleted.</td>{after}");
        prop_assert_eq!(parse_deleted_count(&body), count);
    }

    /// Pages without the banner never report deletions.
    #[test]
    fn deleted_count_zero_without_banner(body in "[a-zA-Z0-9<>/ .]{0,200}") {
        prop_assume!(!body.contains("deleted."));
        prop_assert_eq!(parse_deleted_count(&body), 0);
    }

    /// Item fields come in numbered pairs starting at 1.
    #[test]
    fn item_fields_numbered_pairs(items in prop::collection::vec((1u32..20_000, 1u32..1_000), 0..12)) {
        let items: Vec<(ItemId, u32)> = items.into_iter().map(|(id, qty)| (ItemId::new(id), qty)).collect();
        let fields = item_fields(&items);
        prop_assert_eq!(fields.len(), items.len() * 2);
        for (index, (id, qty)) in items.iter().enumerate() {
            let position = index + 1;
            prop_assert_eq!(&fields[index * 2], &(format!("whichitem{position}"), id.to_string()));
            prop_assert_eq!(&fields[index * 2 + 1], &(format!("howmany{position}"), qty.to_string()));
        }
    }

    /// Every selected kmail appears exactly once in a delete request.
    #[test]
    fn delete_selects_every_id(ids in prop::collection::btree_set(1u64..1_000_000, 0..30)) {
        let ids: Vec<KmailId> = ids.into_iter().map(KmailId::new).collect();
        let request = Command::DeleteMessages { ids: ids.clone() }.to_request();
        for id in &ids {
            let selector = id.selector();
            prop_assert_eq!(request.field(&selector), Some("on"));
        }
        prop_assert_eq!(request.fields().len(), ids.len() + 2);
    }

    /// A refusal page is never mistaken for success.
    #[test]
    fn refusal_never_sent(prefix in "[a-z ]{0,30}", suffix in "[a-z ]{0,30}") {
        let body = format!("{prefix}That player cannot receive Meat or items{suffix}{MESSAGE_SENT_MARKER}");
        prop_assert_eq!(SendResponse::classify(&body, MESSAGE_SENT_MARKER), SendResponse::CannotReceive);
    }

    /// Message text survives form encoding.
    #[test]
    fn message_text_survives_encoding(message in "\\PC{0,60}") {
        let request = Command::SendMessage {
            to: Recipient::from("someone"),
            message: message.clone(),
            items: Vec::new(),
            meat: 0,
        }
        .to_request();
        let encoded = request.encode(Some("hash"));
        let decoded: Vec<(String, String)> = url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();
        prop_assert!(decoded.contains(&("message".to_string(), message)));
        prop_assert_eq!(&decoded[0], &("pwd".to_string(), "hash".to_string()));
    }
}
