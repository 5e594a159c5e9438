//! # kolmail-core
//!
//! Kmail services for Kingdom of Loathing automation clients.
//!
//! This crate provides:
//! - **Inbox** - fetch and parse every pending kmail in one request
//! - **Batch delete** - remove many kmails with one form submission
//! - **Chunked send** - attach any number of items and Meat to a kmail,
//!   splitting them across as many requests as the game requires
//! - **Gift fallback** - recipients who cannot receive attachments by kmail
//!   get gift packages instead
//! - **Item catalog** and **body extraction** - resolve the items and Meat
//!   embedded in received kmails
//!
//! ## Example
//!
//! ```ignore
//! use kolmail_core::{Attachments, HttpSession, Mailer, Recipient, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> kolmail_core::Result<()> {
//!     let session = HttpSession::new(&SessionConfig::from_env()?)?;
//!     let mailer = Mailer::new(session);
//!
//!     for kmail in mailer.inbox().await? {
//!         println!("{} from {}: {} meat", kmail.id(), kmail.sender_name(), kmail.meat());
//!     }
//!
//!     let sent = mailer
//!         .send(&Recipient::from("Zootgraph"), "thanks!", Attachments::none(), 500)
//!         .await?;
//!     assert!(sent);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod extract;
pub mod item;
pub mod kmail;
mod mailer;
pub mod service;
pub mod session;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod proptests;
#[cfg(test)]
#[allow(clippy::unwrap_used, missing_docs)]
mod testing;

pub use error::{Error, Result};
pub use item::{AttachmentSet, Attachments, Item, ItemCatalog, StaticCatalog};
pub use kmail::{Kmail, KmailKind};
pub use kolmail_protocol::{GameRequest, ItemId, KmailId, Method, PlayerId, Recipient};
pub use mailer::Mailer;
pub use service::{
    GIFT_GROUP_SIZE, GroupOutcome, SEND_GROUP_SIZE, Strategy, delete_messages, deliver,
    fetch_inbox, gift, send,
};
pub use session::{HttpSession, Session, SessionConfig};
