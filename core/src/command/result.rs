/// General result of a terminal response (ETSI 102.223 §8.12).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ResultCode {
    /// Command performed successfully.
    Ok,

    /// Command performed successfully, but the requested icon could not be displayed.
    IconNotDisplayed,

    /// Proactive UICC session terminated by the user.
    SessionTerminatedByUser,

    /// Backward move in the proactive UICC session requested by the user.
    BackwardMoveByUser,

    /// No response from the user.
    NoResponseFromUser,

    /// Help information required by the user.
    HelpInfoRequired,

    /// Terminal currently unable to process the command.
    TerminalCurrentlyUnableToProcess,

    /// User did not accept the call set-up or the channel opening.
    UserDidNotAccept,
}

impl ResultCode {
    pub fn value(self) -> u8 {
        match self {
            Self::Ok => 0x00,
            Self::IconNotDisplayed => 0x04,
            Self::SessionTerminatedByUser => 0x10,
            Self::BackwardMoveByUser => 0x11,
            Self::NoResponseFromUser => 0x12,
            Self::HelpInfoRequired => 0x13,
            Self::TerminalCurrentlyUnableToProcess => 0x20,
            Self::UserDidNotAccept => 0x22,
        }
    }

    /// Picks between `Ok` and `IconNotDisplayed`.
    pub fn performed(icon_load_failed: bool) -> Self {
        match icon_load_failed {
            true => Self::IconNotDisplayed,
            _ => Self::Ok,
        }
    }
}
