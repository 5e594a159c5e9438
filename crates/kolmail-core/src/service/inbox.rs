//! Fetching and deleting received kmails.

use kolmail_protocol::parser::{parse_deleted_count, parse_inbox};
use kolmail_protocol::Command;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::kmail::Kmail;
use crate::session::Session;

/// Fetches every pending kmail.
///
/// Records keep the order the server returned them in; no sorting is
/// applied. A record with unusable ids is logged and skipped.
///
/// # Errors
///
/// Returns an error if the request fails or the response is not the inbox
/// JSON.
pub async fn fetch_inbox<S: Session>(session: &S) -> Result<Vec<Kmail>> {
    let body = session.request(&Command::FetchInbox.to_request()).await?;
    let kmails: Vec<Kmail> = parse_inbox(&body)?
        .into_iter()
        .filter_map(|raw| match Kmail::parse(raw) {
            Ok(kmail) => Some(kmail),
            Err(e) => {
                warn!(error = %e, "Skipping malformed kmail");
                None
            }
        })
        .collect();
    debug!(count = kmails.len(), "Fetched inbox");
    Ok(kmails)
}

/// Deletes kmails in a single request.
///
/// Returns the number the server reports as deleted, which can be lower
/// than `kmails.len()` when some were already gone, and 0 when the page
/// has no deletion banner. An empty slice still issues the request.
///
/// # Errors
///
/// Returns an error if the request cannot be issued.
pub async fn delete_messages<S: Session>(session: &S, kmails: &[Kmail]) -> Result<u32> {
    let ids = kmails.iter().map(Kmail::id).collect();
    let body = session
        .request(&Command::DeleteMessages { ids }.to_request())
        .await?;
    let deleted = parse_deleted_count(&body);
    info!(requested = kmails.len(), deleted, "Deleted kmails");
    Ok(deleted)
}
