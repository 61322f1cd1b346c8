use crate::command::text::Icon;

/// Description of the text the user is asked to enter by GetInput or GetInkey.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Input {
    pub text: Option<String>,
    pub default_text: Option<String>,
    pub icon: Option<Icon>,
    pub min_len: u8,
    pub max_len: u8,
    pub ucs2: bool,
    pub digit_only: bool,
    pub echo: bool,

    /// A yes/no answer is requested instead of a text (GetInkey only).
    pub yes_no: bool,
    pub help_available: bool,
}

impl Input {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            text: Some(prompt.into()),
            max_len: 1,
            echo: true,
            ..Default::default()
        }
    }

    /// Creates a yes/no prompt.
    pub fn yes_no(prompt: impl Into<String>) -> Self {
        Self {
            yes_no: true,
            ..Self::new(prompt)
        }
    }
}
