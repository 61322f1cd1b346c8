use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use stk::{BrowserTerminationCause, Command, Handle, UserOutcome};

use crate::Result;

/// A recorded session: what the card and the user did, in order.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Language the console reports on a locale change.
    #[serde(default = "default_language")]
    pub language: String,
    pub steps: Vec<Step>,
}

fn default_language() -> String {
    "en".to_owned()
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Step {
    NewCommand { command: Command },
    UserResponse { outcome: UserOutcome },
    LaunchMainMenu,
    SessionEnd,
    BootCompleted,
    BrowserClosed { cause: BrowserTerminationCause },
    ScreenStatusChanged { idle: bool },
    LocaleChanged,
    MenuVisibility { visible: bool },
}

impl Step {
    pub fn is_user_response(&self) -> bool {
        matches!(self, Self::UserResponse { .. })
    }

    /// Posts the step to the dispatcher.
    pub fn post(self, handle: &Handle) -> stk::Result<()> {
        match self {
            Self::NewCommand { command } => handle.new_command(command),
            Self::UserResponse { outcome } => handle.user_response(outcome),
            Self::LaunchMainMenu => handle.launch_main_menu(),
            Self::SessionEnd => handle.session_end(),
            Self::BootCompleted => handle.boot_completed(),
            Self::BrowserClosed { cause } => handle.browser_closed(cause),
            Self::ScreenStatusChanged { idle } => handle.screen_status_changed(idle),
            Self::LocaleChanged => handle.locale_changed(),
            Self::MenuVisibility { visible } => handle.menu_visibility(visible),
        }
    }
}

impl Scenario {
    pub fn open(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);

        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "steps": [
                    {
                        "event": "new_command",
                        "command": {
                            "details": {
                                "SetupMenu": {
                                    "title": "SIM",
                                    "items": [{ "id": 1, "text": "News" }]
                                }
                            }
                        }
                    },
                    { "event": "user_response", "outcome": { "MenuSelection": { "item": 1, "help": false } } },
                    { "event": "user_response", "outcome": { "Confirm": true } },
                    { "event": "browser_closed", "cause": "UserTermination" },
                    { "event": "screen_status_changed", "idle": true },
                    { "event": "session_end" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!("en", scenario.language);
        assert_eq!(6, scenario.steps.len());
        assert!(matches!(
            &scenario.steps[0],
            Step::NewCommand { command } if command.kind() == stk::CommandKind::SetupMenu
        ));
        assert!(scenario.steps[1].is_user_response());
        assert!(matches!(
            scenario.steps[2],
            Step::UserResponse {
                outcome: UserOutcome::Confirm(true)
            }
        ));
        assert!(matches!(scenario.steps[5], Step::SessionEnd));
    }
}
