//! Recording collaborators and command builders for tests.

use crate::card::CardLink;
use crate::command::{
    Banner, BrowserSettings, CallSettings, Command, CommandDetails, Input, Item, Menu,
    TextMessage, ToneSettings,
};
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::event::EventCode;
use crate::presenter::{MenuLevel, Presenter};
use crate::response::TerminalResponse;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    ShowMenu(Option<String>, MenuLevel),
    ShowInput(Option<String>),
    ShowTextPrompt(TextMessage),
    ShowConfirmation(TextMessage),
    ShowToneDialog(Option<String>),
    ShowTransientMessage(Option<String>),
    SetIdleModeNotification(Option<Option<String>>),
    RequestScreenIdleStatus(bool),
    LaunchBrowser(BrowserSettings),
    LaunchCall(CallSettings),
    SetInstalled(bool),
}

pub struct RecordingPresenter {
    pub calls: Vec<Call>,
    pub language: String,
}

impl RecordingPresenter {
    pub fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| f(call)).count()
    }

    pub fn last(&self) -> Option<&Call> {
        self.calls.last()
    }
}

impl Presenter for RecordingPresenter {
    fn show_menu(&mut self, menu: &Menu, level: MenuLevel) {
        self.calls.push(Call::ShowMenu(menu.title.clone(), level));
    }

    fn show_input(&mut self, input: &Input) {
        self.calls.push(Call::ShowInput(input.text.clone()));
    }

    fn show_text_prompt(&mut self, text: &TextMessage) {
        self.calls.push(Call::ShowTextPrompt(text.clone()));
    }

    fn show_confirmation(&mut self, text: &TextMessage) {
        self.calls.push(Call::ShowConfirmation(text.clone()));
    }

    fn show_tone_dialog(&mut self, text: &TextMessage, _: &ToneSettings) {
        self.calls.push(Call::ShowToneDialog(text.text.clone()));
    }

    fn show_transient_message(&mut self, banner: Banner<'_>) {
        self.calls
            .push(Call::ShowTransientMessage(banner.text.map(str::to_owned)));
    }

    fn set_idle_mode_notification(&mut self, banner: Option<Banner<'_>>) {
        self.calls.push(Call::SetIdleModeNotification(
            banner.map(|b| b.text.map(str::to_owned)),
        ));
    }

    fn request_screen_idle_status(&mut self, want: bool) {
        self.calls.push(Call::RequestScreenIdleStatus(want));
    }

    fn launch_browser(&mut self, settings: &BrowserSettings) {
        self.calls.push(Call::LaunchBrowser(settings.clone()));
    }

    fn launch_call(&mut self, settings: &CallSettings) {
        self.calls.push(Call::LaunchCall(settings.clone()));
    }

    fn set_installed(&mut self, installed: bool) {
        self.calls.push(Call::SetInstalled(installed));
    }

    fn current_language(&self) -> String {
        self.language.clone()
    }
}

#[derive(Default)]
pub struct RecordingCard {
    pub responses: Vec<TerminalResponse>,
}

impl CardLink for RecordingCard {
    fn send_response(&mut self, response: TerminalResponse) {
        self.responses.push(response);
    }
}

pub type TestDispatcher = Dispatcher<RecordingPresenter, RecordingCard>;

/// Creates a dispatcher that does not wait after launching the browser.
pub fn dispatcher() -> TestDispatcher {
    dispatcher_with(Config {
        browser_launch_grace_ms: 0,
        ..Default::default()
    })
}

pub fn dispatcher_with(config: Config) -> TestDispatcher {
    let presenter = RecordingPresenter {
        calls: vec![],
        language: "en".to_owned(),
    };

    Dispatcher::new(presenter, RecordingCard::default(), config)
}

pub fn responses(dispatcher: &TestDispatcher) -> &[TerminalResponse] {
    &dispatcher.session().card().responses
}

pub fn calls(dispatcher: &TestDispatcher) -> &[Call] {
    &dispatcher.session().presenter().calls
}

/// A DisplayText that is shown at once.
pub fn display_text(text: &str) -> Command {
    Command::new(CommandDetails::DisplayText(TextMessage {
        high_priority: true,
        ..TextMessage::new(text)
    }))
}

/// A DisplayText that waits for the idle screen.
pub fn low_priority_text(text: &str) -> Command {
    Command::new(CommandDetails::DisplayText(TextMessage::new(text)))
}

pub fn setup_menu(title: &str, items: &[(u8, &str)]) -> Command {
    let items = items.iter().map(|(id, text)| Item::new(*id, *text)).collect();

    Command::new(CommandDetails::SetupMenu(Menu::new(title, items)))
}

pub fn removal_menu() -> Command {
    Command::new(CommandDetails::SetupMenu(Menu {
        items: vec![None],
        ..Default::default()
    }))
}

pub fn select_item(title: &str, items: &[(u8, &str)]) -> Command {
    let items = items.iter().map(|(id, text)| Item::new(*id, *text)).collect();

    Command::new(CommandDetails::SelectItem(Menu::new(title, items)))
}

pub fn get_input(prompt: &str) -> Command {
    Command::new(CommandDetails::GetInput(Input::new(prompt)))
}

pub fn launch_browser(url: &str) -> Command {
    Command::new(CommandDetails::LaunchBrowser {
        confirm: TextMessage::new("Open the browser?"),
        settings: BrowserSettings {
            url: Some(url.to_owned()),
            ..Default::default()
        },
    })
}

pub fn setup_call(confirm: &str) -> Command {
    Command::new(CommandDetails::SetupCall(CallSettings {
        confirm_msg: TextMessage::new(confirm),
        call_msg: TextMessage::new("Calling"),
    }))
}

pub fn send_sms(text: &str) -> Command {
    Command::new(CommandDetails::SendSms(TextMessage::new(text)))
}

pub fn idle_mode_text(text: Option<&str>) -> Command {
    Command::new(CommandDetails::SetupIdleModeText(TextMessage {
        text: text.map(str::to_owned),
        ..Default::default()
    }))
}

pub fn setup_event_list(events: &[EventCode]) -> Command {
    Command::new(CommandDetails::SetupEventList(events.to_vec()))
}
