//! Tunables of the session.

use std::time::Duration;

const DEFAULT_BROWSER_LAUNCH_GRACE_MS: u64 = 10_000;
const DEFAULT_YES_RESPONSE: &str = "YES";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Time the dispatcher holds after launching the browser, so that a text shown by the next
    /// command does not come up before the browser does.
    pub browser_launch_grace_ms: u64,

    /// Title of DisplayText when there is neither a selected item nor a root menu.
    pub fallback_title: String,

    /// Input text a yes/no prompt returns for "yes".
    pub yes_response: String,
}

impl Config {
    pub fn browser_launch_grace(&self) -> Duration {
        Duration::from_millis(self.browser_launch_grace_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_launch_grace_ms: DEFAULT_BROWSER_LAUNCH_GRACE_MS,
            fallback_title: String::new(),
            yes_response: DEFAULT_YES_RESPONSE.to_owned(),
        }
    }
}
