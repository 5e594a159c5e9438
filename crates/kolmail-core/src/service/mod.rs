//! Kmail services.
//!
//! Inbox reads and deletes live in [`inbox`]; the chunked send and gift
//! protocol lives in [`outbox`].

pub mod inbox;
pub mod outbox;

pub use inbox::{delete_messages, fetch_inbox};
pub use outbox::{GIFT_GROUP_SIZE, GroupOutcome, SEND_GROUP_SIZE, Strategy, deliver, gift, send};
