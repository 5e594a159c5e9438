//! # kolmail-protocol
//!
//! Wire-level pieces of the Kingdom of Loathing kmail endpoints.
//!
//! ## Features
//!
//! - **Typed identifiers**: [`KmailId`], [`PlayerId`], [`ItemId`] and the
//!   [`Recipient`] addressing forms
//! - **Request builders**: inbox fetch, batch delete, `sendmessage.php` and
//!   `town_sendgift.php` requests as transport-neutral [`GameRequest`]s
//! - **Response parsing**: the raw inbox JSON records, the deleted-count
//!   banner and the send/gift outcome markers
//!
//! ## Quick Start
//!
//! ```
//! use kolmail_protocol::{Command, ItemId, Recipient};
//!
//! let request = Command::SendMessage {
//!     to: Recipient::from("Zootgraph"),
//!     message: "hello".into(),
//!     items: vec![(ItemId::new(2), 3)],
//!     meat: 100,
//! }
//! .to_request();
//!
//! assert_eq!(request.path(), "sendmessage.php");
//! assert_eq!(request.field("whichitem1"), Some("2"));
//! ```
//!
//! ## Modules
//!
//! - [`command`]: request model and builders
//! - [`parser`]: response parsing
//! - [`types`]: identifiers and recipients

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
mod error;
pub mod parser;
pub mod types;

#[cfg(test)]
mod proptests;

pub use command::{Command, GameRequest, Method};
pub use error::{Error, Result};
pub use parser::{RawKmail, SendResponse};
pub use types::{ItemId, KmailId, PlayerId, Recipient};
