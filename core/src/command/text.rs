use std::time::Duration;

/// Raw image data of an icon referenced by the card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Icon(pub Vec<u8>);

/// A text to be shown to the user, with the qualifiers of the command that carried it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextMessage {
    pub title: Option<String>,
    pub text: Option<String>,
    pub icon: Option<Icon>,

    /// Icon replaces the text when it could be displayed (ETSI 102.223 §6.5.4).
    pub icon_self_explanatory: bool,

    /// The card link has already acknowledged the command; the user response is not sent.
    pub immediate_response: bool,

    /// The text stays until the user clears it.
    pub user_clear: bool,

    /// The text may be shown over whatever is on screen.
    pub high_priority: bool,

    pub duration_ms: Option<u64>,
}

impl TextMessage {
    /// Creates a message carrying only the text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }

    /// Copies the message with another title, for presentation.
    pub fn titled(&self, title: Option<String>) -> Self {
        Self {
            title,
            ..self.clone()
        }
    }

    /// Decides what to render in a banner (toast or notification).
    /// The text is left out when a self-explanatory icon can be displayed instead.
    pub fn banner(&self, icon_load_failed: bool) -> Banner<'_> {
        let show_text = icon_load_failed || !self.icon_self_explanatory || self.icon.is_none();

        Banner {
            text: match show_text {
                true => self.text.as_deref(),
                _ => None,
            },
            icon: self.icon.as_ref(),
        }
    }
}

/// Content of a transient message or of the idle-mode notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Banner<'a> {
    pub text: Option<&'a str>,
    pub icon: Option<&'a Icon>,
}
