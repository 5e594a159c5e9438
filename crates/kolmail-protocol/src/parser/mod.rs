//! Kmail response parser.
//!
//! The game answers form submissions with full HTML pages. Only a handful of
//! literal markers matter: whether the message or package went out, whether
//! the recipient refused attachments, and how many kmails a delete removed.

mod raw;

pub use raw::{RawKmail, parse_inbox};

/// Marker on `sendmessage.php` when the kmail was delivered.
pub const MESSAGE_SENT_MARKER: &str = ">Message sent.</";

/// Marker on `town_sendgift.php` when the package was delivered.
pub const PACKAGE_SENT_MARKER: &str = ">Package sent.</";

/// Marker shown when the recipient cannot take Meat or items by kmail.
pub const CANNOT_RECEIVE_MARKER: &str = "That player cannot receive Meat or items";

/// Classification of a send or gift response page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendResponse {
    /// The success marker was present.
    Sent,
    /// The recipient cannot receive attachments through this channel.
    CannotReceive,
    /// Neither marker was present.
    Failed,
}

impl SendResponse {
    /// Classifies a response page against a success marker.
    ///
    /// The refusal marker takes precedence over the success marker.
    #[must_use]
    pub fn classify(body: &str, success_marker: &str) -> Self {
        if body.contains(CANNOT_RECEIVE_MARKER) {
            Self::CannotReceive
        } else if body.contains(success_marker) {
            Self::Sent
        } else {
            Self::Failed
        }
    }

    /// Returns true for [`SendResponse::Sent`].
    #[must_use]
    pub const fn is_sent(self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Extracts the count from a `N message(s) deleted.` banner.
///
/// Returns 0 when no banner is present.
#[must_use]
pub fn parse_deleted_count(body: &str) -> u32 {
    body.match_indices(" deleted.")
        .find_map(|(end, _)| deleted_count_before(&body[..end]))
        .unwrap_or(0)
}

fn deleted_count_before(prefix: &str) -> Option<u32> {
    let rest = prefix
        .strip_suffix("messages")
        .or_else(|| prefix.strip_suffix("message"))?
        .strip_suffix(' ')?;
    let digits_start = rest
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |index| index + 1);
    let digits = &rest[digits_start..];
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
