//! Proactive commands issued by the card, as handed over by the card link.

pub mod input;
pub mod menu;
pub mod result;
pub mod settings;
pub mod text;

pub use self::input::Input;
pub use self::menu::{Item, Menu};
pub use self::result::ResultCode;
pub use self::settings::{BrowserSettings, CallSettings, LaunchBrowserMode, Tone, ToneSettings};
pub use self::text::{Banner, Icon, TextMessage};

use crate::event::EventCode;

/// Type of a proactive command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum CommandKind {
    DisplayText,
    SelectItem,
    SetupMenu,
    GetInput,
    GetInkey,
    SetupIdleModeText,
    SendDtmf,
    SendSms,
    SendSs,
    SendUssd,
    LaunchBrowser,
    OpenChannel,
    CloseChannel,
    SendData,
    ReceiveData,
    GetChannelStatus,
    SetupCall,
    PlayTone,
    SetupEventList,
}

impl CommandKind {
    /// Converts the variant into the "type of command" octet (ETSI 102.223 §9.4).
    pub fn value(self) -> u8 {
        match self {
            Self::SetupEventList => 0x05,
            Self::SetupCall => 0x10,
            Self::SendSs => 0x11,
            Self::SendUssd => 0x12,
            Self::SendSms => 0x13,
            Self::SendDtmf => 0x14,
            Self::LaunchBrowser => 0x15,
            Self::PlayTone => 0x20,
            Self::DisplayText => 0x21,
            Self::GetInkey => 0x22,
            Self::GetInput => 0x23,
            Self::SelectItem => 0x24,
            Self::SetupMenu => 0x25,
            Self::SetupIdleModeText => 0x28,
            Self::OpenChannel => 0x40,
            Self::CloseChannel => 0x41,
            Self::ReceiveData => 0x42,
            Self::SendData => 0x43,
            Self::GetChannelStatus => 0x44,
        }
    }

    /// Determines whether the command has to pass through the busy gate.
    /// Informative commands run immediately, even while another command is in progress.
    pub fn is_interactive(self) -> bool {
        !matches!(
            self,
            Self::SendDtmf
                | Self::SendSms
                | Self::SendSs
                | Self::SendUssd
                | Self::SetupIdleModeText
                | Self::SetupMenu
                | Self::SetupEventList
        )
    }

    /// Determines whether the gate stays closed until the user responds.
    /// Channel operations are gated but only notify the user.
    pub fn waits_for_user(self) -> bool {
        self.is_interactive()
            && !matches!(
                self,
                Self::CloseChannel | Self::SendData | Self::ReceiveData | Self::GetChannelStatus
            )
    }
}

/// Kind-specific content of a proactive command.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum CommandDetails {
    DisplayText(TextMessage),
    SelectItem(Menu),
    SetupMenu(Menu),
    GetInput(Input),
    GetInkey(Input),
    SetupIdleModeText(TextMessage),
    SendDtmf(TextMessage),
    SendSms(TextMessage),
    SendSs(TextMessage),
    SendUssd(TextMessage),
    LaunchBrowser {
        confirm: TextMessage,
        settings: BrowserSettings,
    },
    OpenChannel(CallSettings),
    CloseChannel(TextMessage),
    SendData(TextMessage),
    ReceiveData(TextMessage),
    GetChannelStatus(TextMessage),
    SetupCall(CallSettings),
    PlayTone {
        text: TextMessage,
        tone: ToneSettings,
    },
    SetupEventList(Vec<EventCode>),
}

impl CommandDetails {
    pub fn kind(&self) -> CommandKind {
        use CommandKind::*;

        match self {
            Self::DisplayText(_) => DisplayText,
            Self::SelectItem(_) => SelectItem,
            Self::SetupMenu(_) => SetupMenu,
            Self::GetInput(_) => GetInput,
            Self::GetInkey(_) => GetInkey,
            Self::SetupIdleModeText(_) => SetupIdleModeText,
            Self::SendDtmf(_) => SendDtmf,
            Self::SendSms(_) => SendSms,
            Self::SendSs(_) => SendSs,
            Self::SendUssd(_) => SendUssd,
            Self::LaunchBrowser { .. } => LaunchBrowser,
            Self::OpenChannel(_) => OpenChannel,
            Self::CloseChannel(_) => CloseChannel,
            Self::SendData(_) => SendData,
            Self::ReceiveData(_) => ReceiveData,
            Self::GetChannelStatus(_) => GetChannelStatus,
            Self::SetupCall(_) => SetupCall,
            Self::PlayTone { .. } => PlayTone,
            Self::SetupEventList(_) => SetupEventList,
        }
    }
}

/// A proactive command received from the card.
/// Immutable once received; the session shares it while the command is active.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Command {
    pub details: CommandDetails,

    /// Whether the terminal failed to load the icon the card referenced.
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon_load_failed: bool,
}

impl Command {
    pub fn new(details: CommandDetails) -> Self {
        Self {
            details,
            icon_load_failed: false,
        }
    }

    pub fn with_icon_load_failed(mut self, failed: bool) -> Self {
        self.icon_load_failed = failed;
        self
    }

    pub fn kind(&self) -> CommandKind {
        self.details.kind()
    }

    /// Gets the menu carried by SetupMenu or SelectItem.
    pub fn menu(&self) -> Option<&Menu> {
        match &self.details {
            CommandDetails::SetupMenu(menu) | CommandDetails::SelectItem(menu) => Some(menu),
            _ => None,
        }
    }

    /// Gets the input prompt carried by GetInput or GetInkey.
    pub fn input(&self) -> Option<&Input> {
        match &self.details {
            CommandDetails::GetInput(input) | CommandDetails::GetInkey(input) => Some(input),
            _ => None,
        }
    }

    /// Gets the text message of the command, if it has one.
    /// Call set-up and channel opening return their confirmation message.
    pub fn text(&self) -> Option<&TextMessage> {
        use CommandDetails::*;

        match &self.details {
            DisplayText(text)
            | SetupIdleModeText(text)
            | SendDtmf(text)
            | SendSms(text)
            | SendSs(text)
            | SendUssd(text)
            | CloseChannel(text)
            | SendData(text)
            | ReceiveData(text)
            | GetChannelStatus(text) => Some(text),
            LaunchBrowser { confirm, .. } => Some(confirm),
            PlayTone { text, .. } => Some(text),
            OpenChannel(call) | SetupCall(call) => Some(&call.confirm_msg),
            SelectItem(_) | SetupMenu(_) | GetInput(_) | GetInkey(_) | SetupEventList(_) => None,
        }
    }
}
