#![allow(clippy::uninlined_format_args)]
//! Example: list the inbox of a logged-in session
//!
//! Login is not handled here; copy the session cookie and password hash
//! from a browser or another client that is already logged in.
//!
//! ## Running
//!
//! ```bash
//! export KOLMAIL_COOKIE="PHPSESSID=..."
//! export KOLMAIL_PWD="your-password-hash"
//! cargo run --package kolmail-core --example inbox
//! ```
//!
//! Pass `--delete-empty` to delete kmails with no attachments.

use kolmail_core::{HttpSession, Mailer, SessionConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kolmail_core=debug,kolmail_protocol=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let delete_empty = std::env::args().any(|arg| arg == "--delete-empty");

    let config = SessionConfig::from_env()?;
    info!(base_url = %config.base_url, "Connecting");
    let mailer = Mailer::new(HttpSession::new(&config)?);

    let kmails = mailer.inbox().await?;
    println!("{} kmail(s)", kmails.len());

    let mut empty = Vec::new();
    for kmail in &kmails {
        let date = kmail
            .date()
            .map_or_else(|| "unknown date".to_string(), |d| d.to_string());
        let meat = kmail.meat();
        println!(
            "#{} [{}] from {} (#{}) at {}: {} meat",
            kmail.id(),
            kmail.kind().as_str(),
            kmail.sender_name(),
            kmail.sender_id(),
            date,
            meat
        );
        if meat == 0 && !kmail.message().contains("You acquire") {
            empty.push(kmail.clone());
        }
    }

    if delete_empty && !empty.is_empty() {
        let deleted = mailer.delete(&empty).await?;
        println!("Deleted {deleted} of {} kmail(s) without attachments", empty.len());
    }

    Ok(())
}
