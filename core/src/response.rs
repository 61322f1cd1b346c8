//! Correlates what the user did with the active command into a terminal response.

use std::sync::Arc;

use crate::command::{BrowserSettings, CallSettings, Command, CommandDetails, ResultCode};
use crate::event::EventCode;
use crate::{Error, Result};

/// What the user (or a UI timer) did with the command on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum UserOutcome {
    MenuSelection { item: u8, help: bool },
    Input { text: String, help: bool },
    YesNo(bool),
    Confirm(bool),
    Done,
    Backward,
    EndSession,
    Timeout,
}

impl UserOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MenuSelection { .. } => "menu selection",
            Self::Input { .. } => "input",
            Self::YesNo(_) => "yes/no",
            Self::Confirm(_) => "confirmation",
            Self::Done => "done",
            Self::Backward => "backward",
            Self::EndSession => "end session",
            Self::Timeout => "timeout",
        }
    }
}

/// Additional data of a terminal response.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ResponseData {
    None,
    MenuSelection(u8),
    Input(String),
    YesNo(bool),
    Confirmation(bool),
    EventDownload { event: EventCode, added: Vec<u8> },
}

/// A response to be sent to the card, correlated to the command it answers.
#[derive(Clone, Debug, PartialEq)]
pub struct TerminalResponse {
    pub command: Arc<Command>,
    pub code: ResultCode,
    pub data: ResponseData,
}

impl TerminalResponse {
    pub fn new(command: Arc<Command>, code: ResultCode) -> Self {
        Self {
            command,
            code,
            data: ResponseData::None,
        }
    }

    fn with_data(mut self, data: ResponseData) -> Self {
        self.data = data;
        self
    }
}

/// Something the terminal has to do once the response is built.
#[derive(Clone, Debug, PartialEq)]
pub enum FollowUp {
    /// Launch the browser when the current session ends.
    LaunchBrowser(BrowserSettings),

    /// Place the call now.
    PlaceCall(CallSettings),
}

/// Result of correlating an outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Correlation {
    pub response: TerminalResponse,
    pub follow_up: Option<FollowUp>,

    /// Label of the menu item the user picked.
    pub selected_label: Option<String>,
}

impl From<TerminalResponse> for Correlation {
    fn from(response: TerminalResponse) -> Self {
        Self {
            response,
            follow_up: None,
            selected_label: None,
        }
    }
}

/// Maps the outcome onto a result code and payload for the command.
/// `yes_response` is the input text meaning "yes" for a yes/no prompt.
pub fn correlate(
    command: &Arc<Command>,
    outcome: &UserOutcome,
    yes_response: &str,
) -> Result<Correlation> {
    let response = |code| TerminalResponse::new(Arc::clone(command), code);
    let unexpected = || Error::UnexpectedOutcome {
        kind: command.kind(),
        outcome: outcome.name(),
    };
    let performed = ResultCode::performed(command.icon_load_failed);

    Ok(match outcome {
        UserOutcome::MenuSelection { item, help } => {
            let menu = command.menu().ok_or_else(unexpected)?;
            let code = match help {
                true => ResultCode::HelpInfoRequired,
                _ => performed,
            };

            Correlation {
                response: response(code).with_data(ResponseData::MenuSelection(*item)),
                follow_up: None,
                selected_label: menu.item_text(*item).map(str::to_owned),
            }
        }
        UserOutcome::Input { text, help } => {
            let input = command.input().ok_or_else(unexpected)?;

            if input.yes_no {
                response(ResultCode::Ok)
                    .with_data(ResponseData::YesNo(text == yes_response))
                    .into()
            } else if *help {
                response(ResultCode::HelpInfoRequired).into()
            } else {
                response(performed)
                    .with_data(ResponseData::Input(text.clone()))
                    .into()
            }
        }
        UserOutcome::YesNo(yes) => match command.input() {
            Some(input) if input.yes_no => response(ResultCode::Ok)
                .with_data(ResponseData::YesNo(*yes))
                .into(),
            _ => return Err(unexpected()),
        },
        UserOutcome::Confirm(confirmed) => match (&command.details, confirmed) {
            (CommandDetails::DisplayText(_), true) => response(performed).into(),
            (CommandDetails::DisplayText(_), false) => {
                response(ResultCode::SessionTerminatedByUser).into()
            }
            (CommandDetails::LaunchBrowser { settings, .. }, true) => Correlation {
                response: response(ResultCode::Ok),
                follow_up: Some(FollowUp::LaunchBrowser(settings.clone())),
                selected_label: None,
            },
            (CommandDetails::LaunchBrowser { .. }, false) => {
                response(ResultCode::SessionTerminatedByUser).into()
            }
            (CommandDetails::SetupCall(call), _) => Correlation {
                response: response(ResultCode::Ok)
                    .with_data(ResponseData::Confirmation(*confirmed)),
                follow_up: match confirmed {
                    true => Some(FollowUp::PlaceCall(call.clone())),
                    _ => None,
                },
                selected_label: None,
            },
            (CommandDetails::OpenChannel(_), true) => response(ResultCode::Ok)
                .with_data(ResponseData::Confirmation(true))
                .into(),
            (CommandDetails::OpenChannel(_), false) => {
                response(ResultCode::UserDidNotAccept).into()
            }
            _ => return Err(unexpected()),
        },
        UserOutcome::Done => response(ResultCode::Ok).into(),
        UserOutcome::Backward => response(ResultCode::BackwardMoveByUser).into(),
        UserOutcome::EndSession => response(ResultCode::SessionTerminatedByUser).into(),
        UserOutcome::Timeout => match &command.details {
            // Clearing the text after a delay is a successful outcome (GCF 27.22.4.1.1 seq 1.5).
            CommandDetails::DisplayText(text) if !text.user_clear => response(ResultCode::Ok).into(),
            _ => response(ResultCode::NoResponseFromUser).into(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Input, Item, Menu, TextMessage};
    use crate::testing::*;

    const YES: &str = "YES";

    #[test]
    fn test_menu_selection() {
        let command = Arc::new(setup_menu("SIM", &[(1, "News"), (2, "Weather")]));
        let correlation = correlate(
            &command,
            &UserOutcome::MenuSelection {
                item: 2,
                help: false,
            },
            YES,
        )
        .unwrap();

        assert_eq!(ResultCode::Ok, correlation.response.code);
        assert_eq!(ResponseData::MenuSelection(2), correlation.response.data);
        assert_eq!(Some("Weather"), correlation.selected_label.as_deref());
    }

    #[test]
    fn test_menu_selection_help_and_icon() {
        let menu = Menu::new("Pick", vec![Item::new(3, "Three")]);
        let command = Arc::new(
            Command::new(CommandDetails::SelectItem(menu)).with_icon_load_failed(true),
        );

        let plain = UserOutcome::MenuSelection {
            item: 3,
            help: false,
        };
        let help = UserOutcome::MenuSelection {
            item: 3,
            help: true,
        };

        assert_eq!(
            ResultCode::IconNotDisplayed,
            correlate(&command, &plain, YES).unwrap().response.code,
        );
        assert_eq!(
            ResultCode::HelpInfoRequired,
            correlate(&command, &help, YES).unwrap().response.code,
        );
    }

    #[test]
    fn test_menu_selection_on_text_is_unexpected() {
        let command = Arc::new(display_text("Hello"));
        let outcome = UserOutcome::MenuSelection {
            item: 1,
            help: false,
        };

        assert!(matches!(
            correlate(&command, &outcome, YES),
            Err(Error::UnexpectedOutcome {
                kind: crate::CommandKind::DisplayText,
                ..
            }),
        ));
    }

    #[test]
    fn test_input() {
        let command = Arc::new(Command::new(CommandDetails::GetInput(Input::new("PIN?"))));
        let typed = UserOutcome::Input {
            text: "1234".to_owned(),
            help: false,
        };
        let help = UserOutcome::Input {
            text: "12".to_owned(),
            help: true,
        };

        let response = correlate(&command, &typed, YES).unwrap().response;
        assert_eq!(ResultCode::Ok, response.code);
        assert_eq!(ResponseData::Input("1234".to_owned()), response.data);

        let response = correlate(&command, &help, YES).unwrap().response;
        assert_eq!(ResultCode::HelpInfoRequired, response.code);
        assert_eq!(ResponseData::None, response.data);
    }

    #[test]
    fn test_yes_no_input_ignores_icon_and_help() {
        let command = Arc::new(
            Command::new(CommandDetails::GetInkey(Input::yes_no("Continue?")))
                .with_icon_load_failed(true),
        );

        let yes = UserOutcome::Input {
            text: "YES".to_owned(),
            help: true,
        };
        let no = UserOutcome::Input {
            text: "NO".to_owned(),
            help: false,
        };

        let response = correlate(&command, &yes, YES).unwrap().response;
        assert_eq!(ResultCode::Ok, response.code);
        assert_eq!(ResponseData::YesNo(true), response.data);

        let response = correlate(&command, &no, YES).unwrap().response;
        assert_eq!(ResponseData::YesNo(false), response.data);

        let response = correlate(&command, &UserOutcome::YesNo(true), YES)
            .unwrap()
            .response;
        assert_eq!(ResponseData::YesNo(true), response.data);
    }

    #[test]
    fn test_display_text_confirmation() {
        let command = Arc::new(display_text("Hello").with_icon_load_failed(true));

        assert_eq!(
            ResultCode::IconNotDisplayed,
            correlate(&command, &UserOutcome::Confirm(true), YES)
                .unwrap()
                .response
                .code,
        );
        assert_eq!(
            ResultCode::SessionTerminatedByUser,
            correlate(&command, &UserOutcome::Confirm(false), YES)
                .unwrap()
                .response
                .code,
        );
    }

    #[test]
    fn test_launch_browser_confirmation() {
        let command = Arc::new(launch_browser("https://example.com"));

        let declined = correlate(&command, &UserOutcome::Confirm(false), YES).unwrap();
        assert_eq!(ResultCode::SessionTerminatedByUser, declined.response.code);
        assert_eq!(None, declined.follow_up);

        let confirmed = correlate(&command, &UserOutcome::Confirm(true), YES).unwrap();
        assert_eq!(ResultCode::Ok, confirmed.response.code);
        assert_eq!(
            Some(FollowUp::LaunchBrowser(BrowserSettings {
                url: Some("https://example.com".to_owned()),
                ..Default::default()
            })),
            confirmed.follow_up,
        );
    }

    #[test]
    fn test_setup_call_confirmation_is_always_ok() {
        let command = Arc::new(setup_call("Call?"));

        let declined = correlate(&command, &UserOutcome::Confirm(false), YES).unwrap();
        assert_eq!(ResultCode::Ok, declined.response.code);
        assert_eq!(ResponseData::Confirmation(false), declined.response.data);
        assert_eq!(None, declined.follow_up);

        let confirmed = correlate(&command, &UserOutcome::Confirm(true), YES).unwrap();
        assert_eq!(ResponseData::Confirmation(true), confirmed.response.data);
        assert!(matches!(confirmed.follow_up, Some(FollowUp::PlaceCall(_))));
    }

    #[test]
    fn test_open_channel_declined() {
        let command = Arc::new(Command::new(CommandDetails::OpenChannel(CallSettings {
            confirm_msg: TextMessage::new("Open channel?"),
            ..Default::default()
        })));

        assert_eq!(
            ResultCode::UserDidNotAccept,
            correlate(&command, &UserOutcome::Confirm(false), YES)
                .unwrap()
                .response
                .code,
        );
    }

    #[test]
    fn test_confirmation_on_input_is_unexpected() {
        let command = Arc::new(Command::new(CommandDetails::GetInput(Input::new("?"))));

        assert!(correlate(&command, &UserOutcome::Confirm(true), YES).is_err());
    }

    #[test]
    fn test_plain_outcomes() {
        let command = Arc::new(Command::new(CommandDetails::PlayTone {
            text: TextMessage::new("Beep"),
            tone: Default::default(),
        }));
        let code = |outcome| correlate(&command, &outcome, YES).unwrap().response.code;

        assert_eq!(ResultCode::Ok, code(UserOutcome::Done));
        assert_eq!(ResultCode::BackwardMoveByUser, code(UserOutcome::Backward));
        assert_eq!(
            ResultCode::SessionTerminatedByUser,
            code(UserOutcome::EndSession),
        );
        assert_eq!(ResultCode::NoResponseFromUser, code(UserOutcome::Timeout));
    }

    #[test]
    fn test_timeout_on_display_text() {
        let auto_clear = Arc::new(display_text("Hello"));
        let user_clear = Arc::new(Command::new(CommandDetails::DisplayText(TextMessage {
            user_clear: true,
            ..TextMessage::new("Hello")
        })));

        assert_eq!(
            ResultCode::Ok,
            correlate(&auto_clear, &UserOutcome::Timeout, YES)
                .unwrap()
                .response
                .code,
        );
        assert_eq!(
            ResultCode::NoResponseFromUser,
            correlate(&user_clear, &UserOutcome::Timeout, YES)
                .unwrap()
                .response
                .code,
        );
    }
}
