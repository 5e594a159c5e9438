//! Kmail request builders.
//!
//! A [`Command`] describes one call against the game server; [`Command::to_request`]
//! lowers it to a [`GameRequest`] (path, method and ordered form fields) that a
//! transport can issue.

use url::form_urlencoded;

use crate::types::{ItemId, KmailId, Recipient};

/// Path of the JSON API endpoint.
pub const API_PATH: &str = "api.php";
/// Path of the message management page.
pub const MESSAGES_PATH: &str = "messages.php";
/// Path of the kmail compose handler.
pub const SEND_MESSAGE_PATH: &str = "sendmessage.php";
/// Path of the gift shop handler.
pub const SEND_GIFT_PATH: &str = "town_sendgift.php";

/// Value of the `for` field identifying this client to the API.
pub const API_CLIENT_TAG: &str = "kolmail";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read-only query.
    Get,
    /// Form submission with side effects.
    Post,
}

/// A transport-neutral request to the game server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRequest {
    path: String,
    method: Method,
    fields: Vec<(String, String)>,
    needs_pwd: bool,
}

impl GameRequest {
    /// Creates a request with no fields.
    #[must_use]
    pub fn new(path: impl Into<String>, method: Method) -> Self {
        Self {
            path: path.into(),
            method,
            fields: Vec::new(),
            needs_pwd: false,
        }
    }

    /// Appends a form field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((name.into(), value.to_string()));
        self
    }

    /// Appends several form fields in order.
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = (String, String)>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Marks the request as requiring the session password hash.
    #[must_use]
    pub const fn with_pwd(mut self) -> Self {
        self.needs_pwd = true;
        self
    }

    /// Returns the path relative to the server root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the form fields in order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Returns true if the session must supply its password hash.
    #[must_use]
    pub const fn needs_pwd(&self) -> bool {
        self.needs_pwd
    }

    /// Returns the first value of a field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Form-encodes the fields, placing `pwd` first when required.
    ///
    /// A missing hash still emits an empty `pwd` field so the server
    /// reports the problem rather than silently ignoring the request.
    #[must_use]
    pub fn encode(&self, pwd: Option<&str>) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.needs_pwd {
            serializer.append_pair("pwd", pwd.unwrap_or_default());
        }
        for (name, value) in &self.fields {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

/// Builds the numbered `whichitem<N>` / `howmany<N>` field pairs.
///
/// Positions are 1-based and restart for every request.
#[must_use]
pub fn item_fields(items: &[(ItemId, u32)]) -> Vec<(String, String)> {
    items
        .iter()
        .enumerate()
        .flat_map(|(index, (id, quantity))| {
            let position = index + 1;
            [
                (format!("whichitem{position}"), id.to_string()),
                (format!("howmany{position}"), quantity.to_string()),
            ]
        })
        .collect()
}

/// Kmail command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch every pending kmail as JSON.
    FetchInbox,
    /// Delete kmails from the inbox.
    DeleteMessages {
        /// Kmails to delete.
        ids: Vec<KmailId>,
    },
    /// Send a kmail, optionally carrying items and Meat.
    SendMessage {
        /// Recipient.
        to: Recipient,
        /// Message text.
        message: String,
        /// Attached items, at most one request's worth.
        items: Vec<(ItemId, u32)>,
        /// Meat attached to this request.
        meat: u64,
    },
    /// Send a gift package.
    SendGift {
        /// Recipient.
        to: Recipient,
        /// Note written on the outside of the package.
        note: String,
        /// Note placed inside the package.
        inside_note: String,
        /// Package tier; equals the number of item slots used.
        package: usize,
        /// Attached items, at most one package's worth.
        items: Vec<(ItemId, u32)>,
        /// Meat attached to this request.
        meat: u64,
    },
}

impl Command {
    /// Lowers the command to a request.
    #[must_use]
    pub fn to_request(&self) -> GameRequest {
        match self {
            Self::FetchInbox => GameRequest::new(API_PATH, Method::Get)
                .with_field("what", "kmail")
                .with_field("for", API_CLIENT_TAG),
            Self::DeleteMessages { ids } => GameRequest::new(MESSAGES_PATH, Method::Post)
                .with_pwd()
                .with_field("the_action", "delete")
                .with_field("box", "Inbox")
                .with_fields(ids.iter().map(|id| (id.selector(), "on".to_string()))),
            Self::SendMessage {
                to,
                message,
                items,
                meat,
            } => GameRequest::new(SEND_MESSAGE_PATH, Method::Post)
                .with_pwd()
                .with_field("action", "send")
                .with_field("towho", to.to_field())
                .with_field("message", message)
                .with_fields(item_fields(items))
                .with_field("sendmeat", meat),
            Self::SendGift {
                to,
                note,
                inside_note,
                package,
                items,
                meat,
            } => GameRequest::new(SEND_GIFT_PATH, Method::Post)
                .with_pwd()
                .with_field("action", "Yep.")
                .with_field("fromwhere", 0)
                .with_field("note", note)
                .with_field("insidenote", inside_note)
                .with_field("towho", to.to_field())
                .with_field("whichpackage", package)
                .with_fields(item_fields(items))
                .with_field("sendmeat", meat),
        }
    }
}
