//! Mailbox identity.
//!
//! temp-mail has no login or session token: whichever address the `mail`
//! cookie names is the mailbox the server renders. This module builds that
//! cookie from an address and decides which hosts it is sent to.

use std::fmt;

/// Name of the cookie carrying the mailbox address.
pub const COOKIE_NAME: &str = "mail";

/// Default cookie scope. A bare `.` matches every host.
pub const DEFAULT_COOKIE_DOMAIN: &str = ".";

/// A mailbox address split into local part and `@domain` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MailboxAddress {
    local_part: String,
    domain: String,
}

impl MailboxAddress {
    /// Build an address from a local part and a catalog domain such as `@example.com`.
    pub fn new(local_part: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            local_part: local_part.into(),
            domain: domain.into(),
        }
    }

    /// The part before the `@`.
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    /// The `@domain` suffix, including the leading `@`.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Identity cookie naming this mailbox, scoped to `cookie_domain`.
    pub fn identity_cookie(&self, cookie_domain: &str) -> IdentityCookie {
        IdentityCookie::for_address(&self.to_string(), cookie_domain)
    }
}

impl fmt::Display for MailboxAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.local_part, self.domain)
    }
}

/// The `mail` cookie that selects a mailbox on the server.
///
/// Built fresh for every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityCookie {
    value: String,
    domain: String,
}

impl IdentityCookie {
    /// Cookie for a full address.
    ///
    /// The address is percent-encoded per RFC 3986: unreserved characters
    /// (`A-Z a-z 0-9 - . _ ~`) are kept and everything else, spaces included,
    /// becomes `%XX`.
    pub fn for_address(address: &str, cookie_domain: &str) -> Self {
        Self {
            value: urlencoding::encode(address).into_owned(),
            domain: cookie_domain.to_string(),
        }
    }

    /// Cookie name, always [`COOKIE_NAME`].
    pub fn name(&self) -> &str {
        COOKIE_NAME
    }

    /// URL-encoded address.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Domain scope the cookie was created for.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// `Cookie` request header value, e.g. `mail=alice%40example.com`.
    pub fn header_value(&self) -> String {
        format!("{}={}", COOKIE_NAME, self.value)
    }

    /// Whether a request to `host` should carry this cookie.
    ///
    /// Leading dots on the scope are ignored; an empty scope matches every host,
    /// otherwise the host must equal the scope or be a subdomain of it.
    pub fn matches_host(&self, host: &str) -> bool {
        let scope = self.domain.trim_start_matches('.').to_ascii_lowercase();
        if scope.is_empty() {
            return true;
        }
        let host = host.to_ascii_lowercase();
        host == scope || host.ends_with(&format!(".{scope}"))
    }
}
