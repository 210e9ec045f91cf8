//! Remote mirror configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the remote mirror client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Base URL for metadata operations (file listing, creation).
    pub api_base_url: String,

    /// Base URL for content upload (the media upload endpoint lives on a
    /// separate host in the Drive API).
    pub upload_base_url: String,

    /// Canonical name of the remote document.
    pub file_name: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.googleapis.com/drive/v3".to_string(),
            upload_base_url: "https://www.googleapis.com/upload/drive/v3".to_string(),
            file_name: "ledger.json".to_string(),
            timeout_secs: 30,
        }
    }
}
