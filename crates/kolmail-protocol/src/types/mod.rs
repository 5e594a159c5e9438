//! Core kmail types.

mod ids;
mod recipient;

pub use ids::{ItemId, KmailId, PlayerId};
pub use recipient::Recipient;
