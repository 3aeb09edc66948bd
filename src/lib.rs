//! temp-mail Rust Client
//!
//! An async Rust client for the temp-mail.org disposable email service.
//!
//! temp-mail has no API: the client scrapes its server-rendered pages. A
//! mailbox is identified only by a `mail` cookie holding its address, so any
//! address returned by [`Client::new_address`] can be read later by passing it
//! to [`Client::messages`].
//!
//! # Example
//! ```no_run
//! use tempmail_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tempmail_client::Error> {
//!     let client = Client::new()?;
//!     let email = client.new_address(Some("myalias"), None).await?;
//!     println!("Created: {}", email);
//!
//!     for row in client.messages(&email, None).await? {
//!         println!("From: {}, Subject: {}", row.sender, row.subject);
//!         let body = client.read_message(&row.read_url).await?;
//!         println!("{body}");
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod extract;
mod identity;
mod models;
mod router;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use extract::MESSAGE_NOT_FOUND;
pub use identity::{COOKIE_NAME, DEFAULT_COOKIE_DOMAIN, IdentityCookie, MailboxAddress};
pub use models::InboxRow;

/// Result type alias for temp-mail operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
