//! Session-bound facade over the kmail services.

use kolmail_protocol::Recipient;

use crate::error::Result;
use crate::item::Attachments;
use crate::kmail::Kmail;
use crate::service;
use crate::session::Session;

/// Bundles a session with the inbox and outbox operations.
#[derive(Debug, Clone)]
pub struct Mailer<S> {
    session: S,
}

impl<S: Session> Mailer<S> {
    /// Creates a mailer over a session.
    #[must_use]
    pub const fn new(session: S) -> Self {
        Self { session }
    }

    /// Returns the underlying session.
    #[must_use]
    pub const fn session(&self) -> &S {
        &self.session
    }

    /// Consumes the mailer and returns the session.
    #[must_use]
    pub fn into_session(self) -> S {
        self.session
    }

    /// Fetches every pending kmail.
    ///
    /// # Errors
    ///
    /// See [`service::fetch_inbox`].
    pub async fn inbox(&self) -> Result<Vec<Kmail>> {
        service::fetch_inbox(&self.session).await
    }

    /// Deletes kmails and returns the count the server reports.
    ///
    /// # Errors
    ///
    /// See [`service::delete_messages`].
    pub async fn delete(&self, kmails: &[Kmail]) -> Result<u32> {
        service::delete_messages(&self.session, kmails).await
    }

    /// Sends a kmail with attachments.
    ///
    /// # Errors
    ///
    /// See [`service::send`].
    pub async fn send(
        &self,
        to: &Recipient,
        message: &str,
        attachments: impl Into<Attachments>,
        meat: u64,
    ) -> Result<bool> {
        service::send(&self.session, to, message, attachments, meat).await
    }

    /// Sends gift packages.
    ///
    /// # Errors
    ///
    /// See [`service::gift`].
    pub async fn gift(
        &self,
        to: &Recipient,
        message: &str,
        attachments: impl Into<Attachments>,
        meat: u64,
        inside_note: &str,
    ) -> Result<bool> {
        service::gift(&self.session, to, message, attachments, meat, inside_note).await
    }

    /// Replies to a received kmail.
    ///
    /// # Errors
    ///
    /// See [`Kmail::reply`].
    pub async fn reply(
        &self,
        kmail: &Kmail,
        message: &str,
        attachments: impl Into<Attachments>,
        meat: u64,
    ) -> Result<bool> {
        kmail.reply(&self.session, message, attachments, meat).await
    }
}
