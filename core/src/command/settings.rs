use crate::command::text::TextMessage;

/// How the browser is launched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum LaunchBrowserMode {
    #[default]
    LaunchIfNotAlreadyLaunched,
    UseExistingBrowser,
    LaunchNewBrowser,
}

/// Settings of LaunchBrowser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BrowserSettings {
    /// None opens the home page.
    pub url: Option<String>,
    pub mode: LaunchBrowserMode,
}

/// Settings of SetupCall and OpenChannel.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CallSettings {
    /// Shown to ask the user for confirmation.
    pub confirm_msg: TextMessage,

    /// Shown while the call is being set up.
    pub call_msg: TextMessage,
}

/// Tone code of PlayTone (ETSI 102.223 §8.16).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Tone(pub u8);

/// Settings of PlayTone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToneSettings {
    pub tone: Tone,
    pub duration_ms: Option<u64>,
    pub vibrate: bool,
}
