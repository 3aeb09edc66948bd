//! Inbox model for temp-mail.

use serde::{Deserialize, Serialize};

/// One message row of a temp-mail inbox listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxRow {
    /// Sender as displayed in the inbox.
    pub sender: String,
    /// Subject line as displayed in the inbox.
    pub subject: String,
    /// Link to the message page, already scoped to the owning mailbox.
    pub read_url: String,
}

impl InboxRow {
    /// Whether `needle` occurs, ignoring case, in both the sender and the subject.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.sender.to_lowercase().contains(&needle)
            && self.subject.to_lowercase().contains(&needle)
    }
}
