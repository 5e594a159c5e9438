//! Chunked kmail and gift delivery.
//!
//! A single `sendmessage.php` request carries at most
//! [`SEND_GROUP_SIZE`] distinct items and a gift package at most
//! [`GIFT_GROUP_SIZE`]. Larger attachment sets are split into groups, one
//! request per group, sent strictly in order. Meat is a per-request field,
//! so it rides on the first request only.
//!
//! ```text
//! Attempting(Send) ──all groups answered──→ Done
//!        │
//!        └── "cannot receive" ──→ Attempting(Gift) ──→ Done
//! ```
//!
//! Gift has no fallback, so the restart happens at most once.

use kolmail_protocol::parser::{MESSAGE_SENT_MARKER, PACKAGE_SENT_MARKER, SendResponse};
use kolmail_protocol::{Command, GameRequest, ItemId, Recipient};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::item::Attachments;
use crate::session::Session;

/// Distinct items one kmail can carry.
pub const SEND_GROUP_SIZE: usize = 11;

/// Distinct items one gift package can carry.
pub const GIFT_GROUP_SIZE: usize = 3;

/// How a batch of attachments is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Plain kmail via `sendmessage.php`.
    Send,
    /// Gift package via `town_sendgift.php`.
    Gift {
        /// Note placed inside the package.
        inside_note: String,
    },
}

impl Strategy {
    /// Gift strategy with an empty inside note.
    #[must_use]
    pub const fn gift() -> Self {
        Self::Gift {
            inside_note: String::new(),
        }
    }

    /// Maximum number of distinct items per request.
    #[must_use]
    pub const fn group_size(&self) -> usize {
        match self {
            Self::Send => SEND_GROUP_SIZE,
            Self::Gift { .. } => GIFT_GROUP_SIZE,
        }
    }

    /// Literal the response page contains when the request succeeded.
    #[must_use]
    pub const fn success_marker(&self) -> &'static str {
        match self {
            Self::Send => MESSAGE_SENT_MARKER,
            Self::Gift { .. } => PACKAGE_SENT_MARKER,
        }
    }

    /// Strategy to restart with when the recipient cannot receive attachments.
    #[must_use]
    pub const fn fallback(&self) -> Option<Self> {
        match self {
            Self::Send => Some(Self::gift()),
            Self::Gift { .. } => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Gift { .. } => "gift",
        }
    }

    /// Builds the request for one group.
    ///
    /// For gifts the package tier is the number of items in the group.
    #[must_use]
    pub fn build_request(
        &self,
        to: &Recipient,
        note: &str,
        meat: u64,
        items: &[(ItemId, u32)],
    ) -> GameRequest {
        let command = match self {
            Self::Send => Command::SendMessage {
                to: to.clone(),
                message: note.to_string(),
                items: items.to_vec(),
                meat,
            },
            Self::Gift { inside_note } => Command::SendGift {
                to: to.clone(),
                note: note.to_string(),
                inside_note: inside_note.clone(),
                package: items.len(),
                items: items.to_vec(),
                meat,
            },
        };
        command.to_request()
    }
}

/// Result of one group's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupOutcome {
    /// Distinct items in the group.
    pub items: usize,
    /// Meat attached to the group's request.
    pub meat: u64,
    /// Whether the response carried the success marker.
    pub succeeded: bool,
}

enum Attempt {
    Completed(Vec<GroupOutcome>),
    CannotReceive,
}

/// Delivers attachments with the given strategy, falling back to gifts
/// when the recipient cannot receive them by kmail.
///
/// Non-giftable items are dropped without error. Returns true only if every
/// group's response carried the success marker.
///
/// # Errors
///
/// Returns an error if a request cannot be issued. Groups already sent are
/// not rolled back.
pub async fn deliver<S: Session>(
    session: &S,
    strategy: Strategy,
    to: &Recipient,
    note: &str,
    attachments: &Attachments,
    meat: u64,
) -> Result<bool> {
    let mut strategy = strategy;
    loop {
        match attempt(session, &strategy, to, note, attachments, meat).await? {
            Attempt::Completed(outcomes) => return Ok(reduce(&strategy, to, &outcomes)),
            Attempt::CannotReceive => match strategy.fallback() {
                Some(next) => {
                    info!(%to, from = strategy.name(), to_strategy = next.name(), "Recipient cannot receive attachments, falling back");
                    strategy = next;
                }
                None => {
                    warn!(%to, strategy = strategy.name(), "Recipient cannot receive attachments");
                    return Ok(false);
                }
            },
        }
    }
}

fn reduce(strategy: &Strategy, to: &Recipient, outcomes: &[GroupOutcome]) -> bool {
    let failed: Vec<usize> = outcomes
        .iter()
        .enumerate()
        .filter(|(_, outcome)| !outcome.succeeded)
        .map(|(index, _)| index + 1)
        .collect();
    let items: usize = outcomes.iter().map(|outcome| outcome.items).sum();
    let meat: u64 = outcomes.iter().map(|outcome| outcome.meat).sum();

    if failed.is_empty() {
        debug!(strategy = strategy.name(), %to, groups = outcomes.len(), items, meat, "Delivered");
        true
    } else {
        warn!(
            strategy = strategy.name(),
            %to,
            groups = outcomes.len(),
            items,
            meat,
            ?failed,
            "Some groups were not delivered"
        );
        false
    }
}

async fn attempt<S: Session>(
    session: &S,
    strategy: &Strategy,
    to: &Recipient,
    note: &str,
    attachments: &Attachments,
    meat: u64,
) -> Result<Attempt> {
    let (giftable, dropped) = attachments.normalize().split_giftable();
    for item in &dropped {
        debug!(item = %item, id = %item.id, "Dropping non-giftable item");
    }

    let can_fall_back = strategy.fallback().is_some();
    let marker = strategy.success_marker();
    let mut outcomes = Vec::new();

    for (index, group) in giftable.groups(strategy.group_size()).iter().enumerate() {
        let group_meat = if index == 0 { meat } else { 0 };
        let request = strategy.build_request(to, note, group_meat, group);
        debug!(
            strategy = strategy.name(),
            %to,
            group = index + 1,
            items = group.len(),
            meat = group_meat,
            "Sending group"
        );

        let body = session.request(&request).await?;
        let response = SendResponse::classify(&body, marker);
        if can_fall_back && response == SendResponse::CannotReceive {
            return Ok(Attempt::CannotReceive);
        }

        outcomes.push(GroupOutcome {
            items: group.len(),
            meat: group_meat,
            succeeded: response.is_sent(),
        });
    }

    Ok(Attempt::Completed(outcomes))
}

/// Sends a kmail, splitting items over as many messages as needed.
///
/// Recipients who cannot receive attachments by kmail are sent gift
/// packages instead, with `message` as the outside note.
///
/// # Errors
///
/// Returns an error if a request cannot be issued.
pub async fn send<S: Session>(
    session: &S,
    to: &Recipient,
    message: &str,
    attachments: impl Into<Attachments>,
    meat: u64,
) -> Result<bool> {
    deliver(session, Strategy::Send, to, message, &attachments.into(), meat).await
}

/// Sends gift packages, splitting items over as many packages as needed.
///
/// # Errors
///
/// Returns an error if a request cannot be issued.
pub async fn gift<S: Session>(
    session: &S,
    to: &Recipient,
    message: &str,
    attachments: impl Into<Attachments>,
    meat: u64,
    inside_note: &str,
) -> Result<bool> {
    let strategy = Strategy::Gift {
        inside_note: inside_note.to_string(),
    };
    deliver(session, strategy, to, message, &attachments.into(), meat).await
}
