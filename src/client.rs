//! temp-mail async client implementation.
//!
//! This module provides an async [`Client`] and [`ClientBuilder`] for scraping
//! the temp-mail.org disposable email service.
//!
//! Typical flow:
//! 1) Build a client (`Client::new` or `Client::builder().build()`)
//! 2) Optionally inspect the domain catalog via [`Client::domains`]
//! 3) Provision an address via [`Client::new_address`]
//! 4) Poll the inbox via [`Client::messages`]
//! 5) Fetch a message body via [`Client::read_message`]

use crate::identity::{DEFAULT_COOKIE_DOMAIN, IdentityCookie, MailboxAddress};
use crate::router::Router;
use crate::{Error, InboxRow, Result, extract};
use log::{debug, warn};
use rand::seq::SliceRandom;
use reqwest::Url;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use std::fmt;
use std::time::Duration;

/// Async client for the temp-mail disposable email service.
///
/// temp-mail renders everything server-side, so every operation fetches a page
/// and scrapes it. A mailbox is selected purely by the `mail` cookie naming its
/// address; the client keeps no session state of its own and attaches that
/// cookie explicitly on each request that needs it.
///
/// The type is `Clone`; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    router: Router,
    http_proxy: Option<String>,
    user_agent: HeaderValue,
    cookie_domain: String,
    main_url: String,
    refresh_url: String,
    domains_url: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("http", &"<reqwest::Client>")
            .field("proxy_prefix", &self.router.prefix())
            .field("http_proxy", &self.http_proxy)
            .field("user_agent", &self.user_agent)
            .field("cookie_domain", &self.cookie_domain)
            .field("main_url", &self.main_url)
            .field("refresh_url", &self.refresh_url)
            .field("domains_url", &self.domains_url)
            .finish()
    }
}

impl Client {
    /// Create a [`ClientBuilder`] for configuring a new client.
    ///
    /// Use this when you need a passthrough proxy, a transport proxy, a custom
    /// cookie scope, or different upstream URLs.
    ///
    /// # Examples
    /// ```no_run
    /// # use tempmail_client::Client;
    /// # fn main() -> Result<(), tempmail_client::Error> {
    /// let client = Client::builder()
    ///     .proxy_prefix("http://example.com/proxy.php?url=")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Set the passthrough proxy prefix used for every outbound URL.
    ///
    /// The value is trimmed; an empty value disables proxying. The format is
    /// whatever the proxy script expects, e.g. `http://example.com/proxy.php?url=`.
    pub fn set_proxy(&mut self, url: &str) {
        self.router.set_prefix(url);
    }

    /// Get the passthrough proxy prefix (if any).
    pub fn proxy(&self) -> Option<&str> {
        self.router.prefix()
    }

    /// Return the URL actually requested for `target`, with the proxy prefix applied.
    pub fn prepare_url(&self, target: &str) -> String {
        self.router.prepare_url(target)
    }

    /// Cookie domain the identity cookie is scoped to.
    pub fn cookie_domain(&self) -> &str {
        &self.cookie_domain
    }

    /// Fetch the domains currently offered for new mailboxes.
    ///
    /// Each entry is an `@domain` suffix. A fresh list is returned on every call.
    ///
    /// # Errors
    /// Returns an error if the request fails or the page has no domain selector.
    ///
    /// # Examples
    /// ```no_run
    /// # use tempmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), tempmail_client::Error> {
    /// let client = Client::new()?;
    /// for domain in client.domains().await? {
    ///     println!("{domain}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn domains(&self) -> Result<Vec<String>> {
        self.fetch_domains()
            .await
            .inspect_err(|err| warn!("failed to fetch domain catalog: {err}"))
    }

    /// Provision a mailbox address.
    ///
    /// * With neither argument, the server assigns a random address.
    /// * With a `domain`, it must be one of [`Client::domains`].
    /// * Without a `domain`, one is picked at random from the catalog.
    /// * With a `local_part`, the mailbox `local_part + domain` is requested.
    ///
    /// Empty strings count as absent.
    ///
    /// # Returns
    /// The full address echoed back by the server.
    ///
    /// # Errors
    /// - [`Error::UndefinedDomain`] if `domain` is not in the catalog,
    /// - [`Error::NoDomains`] if the catalog is empty and no domain was given,
    /// - [`Error::InvalidDomain`] if the domain has no `@`,
    /// - request or parse errors from the catalog or refresh page.
    ///
    /// The mailbox request is only sent once the domain checks pass.
    ///
    /// # Examples
    /// ```no_run
    /// # use tempmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), tempmail_client::Error> {
    /// let client = Client::new()?;
    /// let address = client.new_address(Some("alice"), None).await?;
    /// println!("{address}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new_address(
        &self,
        local_part: Option<&str>,
        domain: Option<&str>,
    ) -> Result<String> {
        self.provision_address(local_part, domain)
            .await
            .inspect_err(|err| warn!("failed to obtain a mailbox address: {err}"))
    }

    /// List the inbox of `address`.
    ///
    /// With a non-empty `filter`, only rows whose sender AND subject both
    /// contain it (ignoring case) are returned. Rows keep the page order.
    ///
    /// # Errors
    /// Returns [`Error::MissingAddress`] for an empty address, without any
    /// request, otherwise request errors.
    ///
    /// # Examples
    /// ```no_run
    /// # use tempmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), tempmail_client::Error> {
    /// let client = Client::new()?;
    /// for row in client.messages("alice@example.com", None).await? {
    ///     println!("{}: {}", row.sender, row.subject);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn messages(&self, address: &str, filter: Option<&str>) -> Result<Vec<InboxRow>> {
        self.list_messages(address, filter)
            .await
            .inspect_err(|err| warn!("failed to list messages for `{address}`: {err}"))
    }

    /// Fetch the body markup of a message.
    ///
    /// `read_url` is the [`InboxRow::read_url`] of a listed message. The server
    /// scopes it to its mailbox, so no identity cookie is sent. Relative URLs
    /// are resolved against the main site URL.
    ///
    /// # Errors
    /// - [`Error::InvalidMailUrl`] for an empty URL, without any request,
    /// - [`Error::MessageNotFound`] if the server reports the message missing,
    /// - request or parse errors otherwise.
    pub async fn read_message(&self, read_url: &str) -> Result<String> {
        self.fetch_message(read_url)
            .await
            .inspect_err(|err| warn!("failed to read message `{read_url}`: {err}"))
    }

    async fn fetch_domains(&self) -> Result<Vec<String>> {
        let html = self.fetch_page(&self.domains_url, None).await?;
        extract::domains(&html)
    }

    async fn provision_address(
        &self,
        local_part: Option<&str>,
        domain: Option<&str>,
    ) -> Result<String> {
        let catalog = self.fetch_domains().await?;

        let domain = match domain.filter(|d| !d.is_empty()) {
            Some(requested) => {
                if !catalog.iter().any(|d| d == requested) {
                    return Err(Error::UndefinedDomain(requested.to_string()));
                }
                requested.to_string()
            }
            None => catalog
                .choose(&mut rand::thread_rng())
                .cloned()
                .ok_or(Error::NoDomains)?,
        };

        if !domain.contains('@') {
            return Err(Error::InvalidDomain(domain));
        }

        let identity = local_part
            .filter(|l| !l.is_empty())
            .map(|l| MailboxAddress::new(l, domain.as_str()).identity_cookie(&self.cookie_domain));

        let html = self.fetch_page(&self.refresh_url, identity.as_ref()).await?;
        extract::mailbox_address(&html)
    }

    async fn list_messages(&self, address: &str, filter: Option<&str>) -> Result<Vec<InboxRow>> {
        if address.is_empty() {
            return Err(Error::MissingAddress);
        }

        let identity = IdentityCookie::for_address(address, &self.cookie_domain);
        let html = self.fetch_page(&self.refresh_url, Some(&identity)).await?;

        let mut rows = extract::inbox(&html);
        if let Some(needle) = filter.filter(|f| !f.is_empty()) {
            rows.retain(|row| row.matches(needle));
        }
        Ok(rows)
    }

    async fn fetch_message(&self, read_url: &str) -> Result<String> {
        let read_url = read_url.trim();
        if read_url.is_empty() {
            return Err(Error::InvalidMailUrl);
        }

        let target = self.resolve_read_url(read_url)?;
        let html = self.fetch_page(&target, None).await?;
        extract::message_body(&html)
    }

    /// GET `target` through the router and return the body text.
    ///
    /// The identity cookie is attached only when its scope covers the host
    /// actually contacted.
    async fn fetch_page(
        &self,
        target: &str,
        identity: Option<&IdentityCookie>,
    ) -> Result<String> {
        let url = self.router.prepare_url(target);
        let mut request = self.http.get(&url).headers(self.headers());

        let cookie = identity.filter(|cookie| Self::cookie_applies(&url, cookie));
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie.header_value());
        }
        debug!("GET {url} (identity cookie: {})", cookie.is_some());

        let response = request.send().await?.error_for_status()?;
        let status = response.status();
        let body = response.text().await?;
        debug!("GET {url} -> {} ({} bytes)", status.as_u16(), body.len());

        Ok(body)
    }

    fn cookie_applies(url: &str, cookie: &IdentityCookie) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|host| cookie.matches_host(host)))
            .unwrap_or(false)
    }

    fn resolve_read_url(&self, read_url: &str) -> Result<String> {
        match Url::parse(read_url) {
            Ok(_) => Ok(read_url.to_string()),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Url::parse(&self.main_url)?.join(read_url)?.to_string())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Construct the browser-like headers sent with every page request.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers
    }
}

const MAIN_URL: &str = "https://temp-mail.org/en/";
const REFRESH_URL: &str = "https://temp-mail.org/en/option/refresh/";
const DOMAINS_URL: &str = "http://temp-mail.org/en/option/change/";
const USER_AGENT_VALUE: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:131.0) Gecko/20100101 Firefox/131.0";

/// Builder for configuring a temp-mail [`Client`].
///
/// # Defaults
/// - The temp-mail.org page URLs
/// - Cookie domain `"."` (identity cookie sent to every host)
/// - No passthrough proxy prefix and no transport proxy
/// - `danger_accept_invalid_certs = false`
/// - A browser-like user agent
/// - Reqwest default timeout
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    proxy_prefix: Option<String>,
    http_proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    cookie_domain: String,
    main_url: String,
    refresh_url: String,
    domains_url: String,
    timeout: Option<Duration>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// See [`ClientBuilder`] for the list of defaults.
    pub fn new() -> Self {
        Self {
            proxy_prefix: None,
            http_proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            cookie_domain: DEFAULT_COOKIE_DOMAIN.to_string(),
            main_url: MAIN_URL.to_string(),
            refresh_url: REFRESH_URL.to_string(),
            domains_url: DOMAINS_URL.to_string(),
            timeout: None,
        }
    }

    /// Set a passthrough proxy prefix prepended to every outbound URL
    /// (e.g. `"http://example.com/proxy.php?url="`).
    ///
    /// Same semantics as [`Client::set_proxy`].
    pub fn proxy_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.proxy_prefix = Some(prefix.into());
        self
    }

    /// Set a transport-level HTTP proxy (e.g. `"http://127.0.0.1:8080"`).
    ///
    /// Unlike [`ClientBuilder::proxy_prefix`], this does not rewrite URLs; the
    /// proxy is applied by the underlying `reqwest::Client`.
    pub fn http_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.http_proxy = Some(proxy.into());
        self
    }

    /// Configure whether to accept invalid TLS certificates (default: `false`).
    ///
    /// # Security
    /// Accepting invalid certificates is unsafe on untrusted networks; it is mainly
    /// useful together with an intercepting [`ClientBuilder::http_proxy`].
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the domain the identity cookie is scoped to (default `"."`).
    pub fn cookie_domain(mut self, domain: impl Into<String>) -> Self {
        self.cookie_domain = domain.into();
        self
    }

    /// Point all page URLs at another site root, keeping temp-mail's paths.
    ///
    /// This is primarily useful for testing.
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Self {
        let root = base_url.as_ref().trim_end_matches('/');
        self.main_url = format!("{root}/en/");
        self.refresh_url = format!("{root}/en/option/refresh/");
        self.domains_url = format!("{root}/en/option/change/");
        self
    }

    /// Override the main site URL, used to resolve relative message links.
    pub fn main_url(mut self, url: impl Into<String>) -> Self {
        self.main_url = url.into();
        self
    }

    /// Override the mailbox refresh page URL.
    pub fn refresh_url(mut self, url: impl Into<String>) -> Self {
        self.refresh_url = url.into();
        self
    }

    /// Override the domain catalog page URL.
    pub fn domains_url(mut self, url: impl Into<String>) -> Self {
        self.domains_url = url.into();
        self
    }

    /// Set a request timeout applied to all operations.
    ///
    /// Defaults to reqwest's built-in timeout when not specified.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the [`Client`].
    ///
    /// No request is made. The HTTP client is created without a cookie store, so
    /// cookies set by the server are never replayed across mailboxes.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the transport proxy URL is invalid,
    /// - the user agent is not a valid header value,
    /// - the HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(proxy_url) = &self.http_proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build()?;
        let user_agent = HeaderValue::from_str(&self.user_agent)?;

        Ok(Client {
            http,
            router: Router::new(self.proxy_prefix.as_deref()),
            http_proxy: self.http_proxy,
            user_agent,
            cookie_domain: self.cookie_domain,
            main_url: self.main_url,
            refresh_url: self.refresh_url,
            domains_url: self.domains_url,
        })
    }
}
