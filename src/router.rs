//! Outbound URL routing through an optional passthrough proxy.
//!
//! A passthrough proxy is a script that fetches whatever URL is appended to it,
//! e.g. `http://example.com/proxy.php?url=`. When one is configured, every
//! upstream URL is prefixed with it verbatim.

/// Holds the optional proxy prefix and applies it to outbound URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Router {
    prefix: Option<String>,
}

impl Router {
    pub(crate) fn new(prefix: Option<&str>) -> Self {
        let mut router = Self::default();
        if let Some(prefix) = prefix {
            router.set_prefix(prefix);
        }
        router
    }

    /// Store the trimmed prefix. An empty value disables proxying.
    pub(crate) fn set_prefix(&mut self, prefix: &str) {
        let prefix = prefix.trim();
        self.prefix = (!prefix.is_empty()).then(|| prefix.to_string());
    }

    pub(crate) fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Prepend the proxy prefix to `target`. Neither part is escaped.
    pub(crate) fn prepare_url(&self, target: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{target}"),
            None => target.to_string(),
        }
    }
}
