use std::io::Write;

use crossbeam_channel::Sender;
use serde::Serialize;
use stk::command::{Banner, BrowserSettings, CallSettings, Input, Menu, TextMessage, ToneSettings};
use stk::presenter::MenuLevel;
use stk::{CardLink, CommandKind, Presenter, ResponseData, ResultCode, TerminalResponse};
use tracing::{info, warn};

use crate::prompt::Prompt;

/// Presents commands on the console.
/// With a prompt channel, everything the user has to answer is forwarded to the prompt thread.
pub struct ConsolePresenter {
    language: String,
    prompts: Option<Sender<Prompt>>,
}

impl ConsolePresenter {
    pub fn new(language: String, prompts: Option<Sender<Prompt>>) -> Self {
        Self { language, prompts }
    }

    fn prompt(&self, prompt: Prompt) {
        if let Some(prompts) = &self.prompts {
            if prompts.send(prompt).is_err() {
                warn!("The prompt thread is gone");
            }
        }
    }
}

impl Presenter for ConsolePresenter {
    fn show_menu(&mut self, menu: &Menu, level: MenuLevel) {
        info!(menu_level = ?level, title = ?menu.title, items = menu.items.len(), "Menu");
        self.prompt(Prompt::Menu(menu.clone(), level));
    }

    fn show_input(&mut self, input: &Input) {
        info!(prompt = ?input.text, yes_no = input.yes_no, "Input");
        self.prompt(Prompt::Input(input.clone()));
    }

    fn show_text_prompt(&mut self, text: &TextMessage) {
        info!(title = ?text.title, text = ?text.text, duration = ?text.duration(), "Text");
        self.prompt(Prompt::Text(text.clone()));
    }

    fn show_confirmation(&mut self, text: &TextMessage) {
        info!(title = ?text.title, text = ?text.text, "Confirmation");
        self.prompt(Prompt::Confirm(text.clone()));
    }

    fn show_tone_dialog(&mut self, text: &TextMessage, tone: &ToneSettings) {
        info!(text = ?text.text, tone = tone.tone.0, "Tone");
        self.prompt(Prompt::Tone(text.clone()));
    }

    fn show_transient_message(&mut self, banner: Banner<'_>) {
        info!(text = ?banner.text, "Transient message");
    }

    fn set_idle_mode_notification(&mut self, banner: Option<Banner<'_>>) {
        match banner {
            Some(banner) => info!(text = ?banner.text, "Idle-mode text"),
            None => info!("Idle-mode text cleared"),
        }
    }

    fn request_screen_idle_status(&mut self, want: bool) {
        info!(want, "Screen status request");
    }

    fn launch_browser(&mut self, settings: &BrowserSettings) {
        info!(url = ?settings.url, mode = ?settings.mode, "Launching browser");
    }

    fn launch_call(&mut self, settings: &CallSettings) {
        info!(call_message = ?settings.call_msg.text, "Placing call");
    }

    fn set_installed(&mut self, installed: bool) {
        info!(installed, "Toolkit application");
    }

    fn current_language(&self) -> String {
        self.language.clone()
    }
}

#[derive(Serialize)]
struct Line<'a> {
    command: CommandKind,
    command_type: u8,
    result: ResultCode,
    result_value: u8,
    data: &'a ResponseData,
}

/// Writes every response as a JSON line.
pub struct JsonCard<W: Write> {
    writer: W,
}

impl<W: Write> JsonCard<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> CardLink for JsonCard<W> {
    fn send_response(&mut self, response: TerminalResponse) {
        let line = Line {
            command: response.command.kind(),
            command_type: response.command.kind().value(),
            result: response.code,
            result_value: response.code.value(),
            data: &response.data,
        };

        let written = serde_json::to_writer(&mut self.writer, &line)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.writer));

        if let Err(e) = written {
            warn!("Failed to write a response: {}", e);
        }
    }
}
