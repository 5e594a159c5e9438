//! Received kmails.

use chrono::{DateTime, NaiveDateTime, Utc};
use kolmail_protocol::{KmailId, PlayerId, RawKmail, Recipient};
use tracing::warn;

use crate::error::Result;
use crate::extract::{extract_items, extract_meat};
use crate::item::{AttachmentSet, Attachments, ItemCatalog};
use crate::service;
use crate::session::Session;

/// Format of the `localtime` field, e.g. `11/14/23 17:13:20`.
const LOCALTIME_FORMAT: &str = "%m/%d/%y %H:%M:%S";

/// Kind of a received kmail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KmailKind {
    /// Player-to-player message.
    Normal,
    /// Message generated by a gift shop purchase.
    GiftShop,
    /// Any other kind, kept verbatim.
    Other(String),
}

impl KmailKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::GiftShop => "giftshop",
            Self::Other(kind) => kind,
        }
    }
}

impl From<&str> for KmailKind {
    fn from(kind: &str) -> Self {
        match kind {
            "normal" => Self::Normal,
            "giftshop" => Self::GiftShop,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A kmail received by the current player.
///
/// Built only by [`Kmail::parse`]; immutable afterwards. Deleting one is a
/// request to the server, not a local change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kmail {
    id: KmailId,
    kind: KmailKind,
    sender_id: PlayerId,
    sender_name: String,
    date: Option<NaiveDateTime>,
    sent_at: Option<DateTime<Utc>>,
    message: String,
}

impl Kmail {
    /// Parses a raw record from the inbox API.
    ///
    /// A malformed `localtime` does not fail the parse; the date is simply
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a positive number or `fromid` is not
    /// a number.
    pub fn parse(raw: RawKmail) -> Result<Self> {
        let id = raw
            .id
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|&id| id > 0)
            .map(KmailId::new)
            .ok_or_else(|| kolmail_protocol::Error::malformed("id", &raw.id))?;
        let sender_id = raw
            .fromid
            .parse::<PlayerId>()
            .map_err(|_| kolmail_protocol::Error::malformed("fromid", &raw.fromid))?;

        let date = NaiveDateTime::parse_from_str(raw.localtime.trim(), LOCALTIME_FORMAT).ok();
        if date.is_none() {
            warn!(id = %id, localtime = %raw.localtime, "Unparseable kmail date");
        }
        let sent_at = raw
            .azunixtime
            .as_deref()
            .and_then(|secs| secs.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Ok(Self {
            id,
            kind: KmailKind::from(raw.kind.as_str()),
            sender_id,
            sender_name: raw.fromname,
            date,
            sent_at,
            message: raw.message,
        })
    }

    /// Returns the kmail id.
    #[must_use]
    pub const fn id(&self) -> KmailId {
        self.id
    }

    /// Returns the kind.
    #[must_use]
    pub const fn kind(&self) -> &KmailKind {
        &self.kind
    }

    /// Returns the sender's player number.
    #[must_use]
    pub const fn sender_id(&self) -> PlayerId {
        self.sender_id
    }

    /// Returns the sender's name.
    #[must_use]
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    /// Returns the server-local send time, or `None` if it was malformed.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }

    /// Returns the send time from the unix timestamp, when provided.
    #[must_use]
    pub const fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.sent_at
    }

    /// Returns the raw message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Items attached to this kmail.
    ///
    /// Names the catalog does not know are skipped.
    #[must_use]
    pub fn items(&self, catalog: &impl ItemCatalog) -> AttachmentSet {
        let mut set = AttachmentSet::new();
        for (name, quantity) in extract_items(&self.message) {
            match catalog.by_name(&name) {
                Some(item) => set.add(item.clone(), quantity),
                None => warn!(id = %self.id, name, "Unknown item in kmail"),
            }
        }
        set
    }

    /// Meat attached to this kmail, 0 if none.
    #[must_use]
    pub fn meat(&self) -> u64 {
        extract_meat(&self.message)
    }

    /// Deletes this kmail.
    ///
    /// Returns true only if the server reports exactly one deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be issued.
    pub async fn delete<S: Session>(&self, session: &S) -> Result<bool> {
        let deleted = service::delete_messages(session, std::slice::from_ref(self)).await?;
        Ok(deleted == 1)
    }

    /// Sends a kmail back to the sender.
    ///
    /// # Errors
    ///
    /// Returns an error if a request cannot be issued.
    pub async fn reply<S: Session>(
        &self,
        session: &S,
        message: &str,
        attachments: impl Into<Attachments>,
        meat: u64,
    ) -> Result<bool> {
        let to = Recipient::Id(self.sender_id);
        service::send(session, &to, message, attachments, meat).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    use crate::Error;
    use crate::item::{Item, StaticCatalog};

    fn raw() -> RawKmail {
        RawKmail {
            id: "123456".into(),
            kind: "normal".into(),
            fromid: "1197090".into(),
            fromname: "Zootgraph".into(),
            localtime: "11/14/23 17:13:20".into(),
            azunixtime: Some("1700000000".into()),
            message: "hi<center>You acquire an item: <b>helmet turtle</b></center>\
                      <center>You acquire <b>3 seal-clubbing clubs</b></center>\
                      <center>You gain 250 Meat.</center>"
                .into(),
        }
    }

    #[test]
    fn test_parse_ids_round_trip() {
        let kmail = Kmail::parse(raw()).unwrap();
        assert_eq!(kmail.id(), KmailId::new(123_456));
        assert_eq!(kmail.sender_id(), PlayerId::new(1_197_090));
        assert_eq!(kmail.sender_name(), "Zootgraph");
        assert_eq!(kmail.kind(), &KmailKind::Normal);
    }

    #[test]
    fn test_parse_date() {
        let date = Kmail::parse(raw()).unwrap().date().unwrap();
        assert_eq!(date.year(), 2023);
        assert_eq!(date.month(), 11);
        assert_eq!(date.day(), 14);
        assert_eq!(date.hour(), 17);
    }

    #[test]
    fn test_parse_unix_time() {
        let kmail = Kmail::parse(raw()).unwrap();
        assert_eq!(kmail.sent_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_malformed_date_is_none() {
        let mut raw = raw();
        raw.localtime = "yesterday-ish".into();
        raw.azunixtime = None;
        let kmail = Kmail::parse(raw).unwrap();
        assert!(kmail.date().is_none());
        assert!(kmail.sent_at().is_none());
    }

    #[test]
    fn test_malformed_id_is_error() {
        let mut raw = raw();
        raw.fromid = "Zootgraph".into();
        assert!(matches!(
            Kmail::parse(raw),
            Err(Error::Protocol(
                kolmail_protocol::Error::MalformedRecord { field: "fromid", .. }
            ))
        ));
    }

    #[test]
    fn test_zero_id_is_error() {
        let mut raw = raw();
        raw.id = "0".into();
        assert!(matches!(
            Kmail::parse(raw),
            Err(Error::Protocol(
                kolmail_protocol::Error::MalformedRecord { field: "id", .. }
            ))
        ));
    }

    #[test]
    fn test_other_kind_preserved() {
        let mut raw = raw();
        raw.kind = "system".into();
        let kmail = Kmail::parse(raw).unwrap();
        assert_eq!(kmail.kind(), &KmailKind::Other("system".into()));
        assert_eq!(kmail.kind().as_str(), "system");
    }

    #[test]
    fn test_items_and_meat() {
        let catalog: StaticCatalog = [
            Item::new(1, "seal-clubbing club"),
            Item::new(2, "helmet turtle"),
        ]
        .into_iter()
        .collect();

        let kmail = Kmail::parse(raw()).unwrap();
        let items = kmail.items(&catalog);
        assert_eq!(items.len(), 2);
        assert_eq!(items.quantity(kolmail_protocol::ItemId::new(1)), 3);
        assert_eq!(items.quantity(kolmail_protocol::ItemId::new(2)), 1);
        assert_eq!(kmail.meat(), 250);
    }

    #[test]
    fn test_unknown_items_skipped() {
        let kmail = Kmail::parse(raw()).unwrap();
        assert!(kmail.items(&StaticCatalog::new()).is_empty());
    }
}
