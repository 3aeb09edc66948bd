//! Error types for the temp-mail client.

use thiserror::Error;

/// Errors that can occur during temp-mail operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed, or the server answered with a non-success status.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A configured header value (e.g. the user agent) is not a valid header.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// A message URL could not be resolved against the main URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The domain select control is missing from the catalog page.
    #[error("Failed to parse domain list from temp-mail page")]
    DomainParse,

    /// The mailbox address field is missing from the refresh page.
    #[error("Failed to parse mailbox address from temp-mail page")]
    AddressParse,

    /// The message body element is missing from the message page.
    #[error("Failed to parse message body from temp-mail page")]
    MessageParse,

    /// The catalog page advertised no domains.
    #[error("No domains available")]
    NoDomains,

    /// The requested domain is not part of the current catalog.
    #[error("Domain `{0}` is not offered by temp-mail")]
    UndefinedDomain(String),

    /// The domain does not look like an `@domain` suffix.
    #[error("Domain `{0}` is invalid, it must contain `@`")]
    InvalidDomain(String),

    /// A full mailbox address is required but none was given.
    #[error("A full mailbox address is required")]
    MissingAddress,

    /// A message read URL is required but none was given.
    #[error("A message read URL is required")]
    InvalidMailUrl,

    /// The server reported that the message does not exist.
    #[error("Message not found")]
    MessageNotFound,
}
