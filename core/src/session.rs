//! The session state machine, owned by the dispatcher.

use std::sync::Arc;
use std::thread::sleep;

#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::card::CardLink;
use crate::command::{BrowserSettings, Command, CommandDetails, Menu, ResultCode, TextMessage};
use crate::config::Config;
use crate::event::{BrowserTerminationCause, EventCode, EventRegistry, Signal};
use crate::presenter::{MenuLevel, Presenter};
use crate::queue::{Admission, Deferred, Gate, Release};
use crate::response::{self, FollowUp, TerminalResponse, UserOutcome};
use crate::Result;

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($t: tt)*) => {{
        if false {
            let _ = format!($($t)*);
        }
    }};
}

#[cfg(not(feature = "tracing"))]
macro_rules! info {
    ($($t: tt)*) => {{
        if false {
            let _ = format!($($t)*);
        }
    }};
}

/// State of the toolkit session between the card and the terminal UI.
/// Lives as long as the dispatcher; a session end resets it field by field.
pub struct Session<P, C>
where
    P: Presenter,
    C: CardLink,
{
    presenter: P,
    card: C,
    config: Config,

    gate: Gate,
    drain_pending: bool,
    awaiting_response: bool,
    events: EventRegistry,

    root_menu: Option<Arc<Command>>,
    active_command: Option<Arc<Command>>,
    active_menu: Option<Menu>,
    last_selected_item: Option<String>,
    menu_visible: bool,
    response_needed: bool,

    idle_mode_text: Option<Arc<Command>>,
    screen_is_idle: bool,
    pending_display_text: Option<TextMessage>,
    pending_browser: Option<BrowserSettings>,
}

impl<P, C> Session<P, C>
where
    P: Presenter,
    C: CardLink,
{
    pub(crate) fn new(presenter: P, card: C, config: Config) -> Self {
        Self {
            presenter,
            card,
            config,
            gate: Gate::new(),
            drain_pending: false,
            awaiting_response: false,
            events: EventRegistry::new(),
            root_menu: None,
            active_command: None,
            active_menu: None,
            last_selected_item: None,
            menu_visible: false,
            response_needed: true,
            idle_mode_text: None,
            screen_is_idle: true,
            pending_display_text: None,
            pending_browser: None,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn card(&self) -> &C {
        &self.card
    }

    /// Determines whether an interactive exchange is outstanding.
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Number of commands and session ends waiting behind the exchange in progress.
    pub fn pending(&self) -> usize {
        self.gate.pending()
    }

    /// Determines whether the next deferred item has to run before any other message.
    pub fn drain_pending(&self) -> bool {
        self.drain_pending
    }

    /// Determines whether the active command is on screen and still expects the user.
    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    pub fn root_menu(&self) -> Option<&Arc<Command>> {
        self.root_menu.as_ref()
    }

    pub fn active_command(&self) -> Option<&Arc<Command>> {
        self.active_command.as_ref()
    }

    pub fn active_menu(&self) -> Option<&Menu> {
        self.active_menu.as_ref()
    }

    pub fn last_selected_item(&self) -> Option<&str> {
        self.last_selected_item.as_deref()
    }

    pub fn idle_mode_text(&self) -> Option<&Arc<Command>> {
        self.idle_mode_text.as_ref()
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    pub fn screen_is_idle(&self) -> bool {
        self.screen_is_idle
    }

    pub fn has_pending_display_text(&self) -> bool {
        self.pending_display_text.is_some()
    }

    /// Takes a new proactive command from the card.
    pub fn on_command(&mut self, command: Arc<Command>) {
        match self.gate.admit_command(&command) {
            Admission::Execute | Admission::Bypass => self.execute(command),
            Admission::Queued => debug!("{:?} queued behind the command in progress", command.kind()),
        }
    }

    /// Takes what the user did with the command on screen.
    /// An outcome nothing waits for is dropped; at rest only the main menu takes one.
    /// The gate is released even when the outcome cannot be correlated.
    pub fn on_user_response(&mut self, outcome: UserOutcome) -> Result<()> {
        let gated = self.awaiting_response;
        if !gated && (self.gate.is_busy() || !self.is_at_root_menu()) {
            debug!("No command awaits the {}, dropping it", outcome.name());
            return Ok(());
        }

        self.awaiting_response = false;
        let result = match self.response_needed {
            true => self.respond(&outcome),
            _ => {
                debug!("The card does not expect a response, dropping {}", outcome.name());
                Ok(())
            }
        };

        if gated {
            self.release();
        }
        self.response_needed = true;

        result
    }

    /// Takes the end of the proactive session signalled by the card.
    pub fn on_session_end(&mut self) {
        match self.gate.admit_end_session() {
            Admission::Execute => self.end_session(),
            _ => debug!("Session end queued behind the command in progress"),
        }
    }

    /// Runs the oldest deferred item, once the exchange ahead of it has completed.
    pub fn on_drain_queue(&mut self) {
        if !std::mem::take(&mut self.drain_pending) {
            debug!("Nothing to drain");
            return;
        }

        match self.gate.pop() {
            Some(Deferred::RunCommand(command)) => self.execute(command),
            Some(Deferred::EndSession) => self.end_session(),
            None => debug!("Nothing to drain"),
        }
    }

    /// Opens the main menu on the user's request.
    pub fn on_launch_main_menu(&mut self) {
        if self.root_menu.is_none() {
            debug!("No menu has been set up, ignoring the launch");
            return;
        }

        self.show_main_menu();
    }

    pub fn on_boot_completed(&mut self) {
        if self.root_menu.is_none() {
            info!("No menu has been set up, uninstalling the toolkit application");
            self.presenter.set_installed(false);
        }
    }

    pub fn on_menu_visibility(&mut self, visible: bool) {
        self.menu_visible = visible;
    }

    pub fn on_browser_closed(&mut self, cause: BrowserTerminationCause) {
        self.fire(Signal::BrowserTermination(cause));
    }

    pub fn on_locale_changed(&mut self) {
        let language = self.presenter.current_language();

        self.fire(Signal::LanguageSelection(language));
    }

    pub fn on_screen_status_changed(&mut self, idle: bool) {
        self.screen_is_idle = idle;

        if idle {
            self.fire(Signal::IdleScreenAvailable);
        }

        if let Some(command) = &self.idle_mode_text {
            if let Some(text) = command.text() {
                self.presenter
                    .set_idle_mode_notification(Some(text.banner(command.icon_load_failed)));
            }
        }

        if let Some(text) = self.pending_display_text.take() {
            match idle {
                true => self.presenter.show_text_prompt(&text),
                _ => self.send_screen_busy_response(),
            }

            if self.idle_mode_text.is_none() {
                self.presenter.request_screen_idle_status(false);
            }
        }
    }

    fn execute(&mut self, command: Arc<Command>) {
        let kind = command.kind();
        info!("Executing {:?}", kind);

        if kind.is_interactive() {
            self.active_command = Some(Arc::clone(&command));
            self.awaiting_response = kind.waits_for_user();
        }

        match &command.details {
            CommandDetails::DisplayText(text) => {
                self.response_needed = !text.immediate_response;

                let text = text.titled(Some(self.display_title()));
                match text.high_priority {
                    true => self.presenter.show_text_prompt(&text),
                    _ => {
                        self.pending_display_text = Some(text);
                        self.presenter.request_screen_idle_status(true);
                    }
                }
            }
            CommandDetails::SelectItem(menu) => {
                self.active_menu = Some(menu.clone());
                self.presenter.show_menu(menu, MenuLevel::Secondary);
            }
            CommandDetails::SetupMenu(menu) => {
                match menu.is_removal() {
                    true => {
                        info!("Uninstalling the toolkit application");
                        self.root_menu = None;
                        self.active_menu = None;
                        self.presenter.set_installed(false);
                    }
                    _ => {
                        info!("Installing the toolkit application");
                        self.root_menu = Some(Arc::clone(&command));
                        self.active_menu = Some(menu.clone());
                        self.presenter.set_installed(true);
                    }
                }

                self.restore_root_menu();
                if self.menu_visible {
                    self.show_main_menu();
                }
            }
            CommandDetails::GetInput(input) | CommandDetails::GetInkey(input) => {
                self.presenter.show_input(input);
            }
            CommandDetails::SetupIdleModeText(text) => {
                match text.text {
                    Some(_) => {
                        self.idle_mode_text = Some(Arc::clone(&command));
                        self.presenter
                            .set_idle_mode_notification(Some(text.banner(command.icon_load_failed)));
                        self.presenter.request_screen_idle_status(true);
                    }
                    None => {
                        self.idle_mode_text = None;
                        self.presenter.set_idle_mode_notification(None);
                        self.presenter.request_screen_idle_status(false);
                    }
                }

                self.restore_root_menu();
            }
            CommandDetails::SendDtmf(text)
            | CommandDetails::SendSms(text)
            | CommandDetails::SendSs(text)
            | CommandDetails::SendUssd(text)
            | CommandDetails::CloseChannel(text)
            | CommandDetails::SendData(text)
            | CommandDetails::ReceiveData(text)
            | CommandDetails::GetChannelStatus(text) => {
                self.show_banner(text, command.icon_load_failed);
            }
            CommandDetails::LaunchBrowser { confirm, .. } => {
                let confirm = confirm.titled(self.last_selected_item.clone());
                self.presenter.show_confirmation(&confirm);
            }
            CommandDetails::OpenChannel(call) | CommandDetails::SetupCall(call) => {
                let confirm = call.confirm_msg.titled(self.last_selected_item.clone());
                self.presenter.show_confirmation(&confirm);
            }
            CommandDetails::PlayTone { text, tone } => {
                self.presenter.show_tone_dialog(text, tone);
            }
            CommandDetails::SetupEventList(list) => {
                self.events.install(Arc::clone(&command), list);
                self.restore_root_menu();

                if self.idle_mode_text.is_none()
                    && self.pending_display_text.is_none()
                    && self.events.contains(EventCode::IdleScreenAvailable)
                {
                    self.presenter.request_screen_idle_status(true);
                }
            }
        }

        if kind.is_interactive() && !kind.waits_for_user() {
            self.release();
        }
    }

    fn respond(&mut self, outcome: &UserOutcome) -> Result<()> {
        let command = match &self.active_command {
            Some(command) => Arc::clone(command),
            None => {
                debug!("No active command to correlate {} with", outcome.name());
                return Ok(());
            }
        };

        let correlation = response::correlate(&command, outcome, &self.config.yes_response)?;
        if let UserOutcome::MenuSelection { .. } = outcome {
            self.last_selected_item = correlation.selected_label;
        }

        debug!(
            "Responding to {:?} with {:?}",
            command.kind(),
            correlation.response.code
        );
        self.card.send_response(correlation.response);

        match correlation.follow_up {
            Some(FollowUp::LaunchBrowser(settings)) => self.pending_browser = Some(settings),
            Some(FollowUp::PlaceCall(call)) => {
                let call_msg = call.call_msg.titled(self.last_selected_item.clone());
                self.show_banner(&call_msg, command.icon_load_failed);
                self.presenter.launch_call(&call);
            }
            None => {}
        }

        Ok(())
    }

    fn end_session(&mut self) {
        if self.active_command.is_none() {
            debug!("No session to end");
            self.release();
            return;
        }

        info!("Session ended");
        self.awaiting_response = false;
        self.active_command = self.root_menu.clone();
        self.last_selected_item = None;

        // A menu that removed the application leaves nothing to go back to.
        if self.active_menu.is_some() {
            if let Some(menu) = self.root_menu.as_ref().and_then(|root| root.menu()) {
                self.active_menu = Some(menu.clone());
            }
        }

        if self.menu_visible {
            self.show_main_menu();
        }

        self.release();

        if let Some(settings) = self.pending_browser.take() {
            info!("Launching the browser");
            self.presenter.launch_browser(&settings);

            let grace = self.config.browser_launch_grace();
            if !grace.is_zero() {
                sleep(grace);
            }
        }
    }

    fn send_screen_busy_response(&mut self) {
        let command = match &self.active_command {
            Some(command) => Arc::clone(command),
            None => return,
        };

        info!("Screen is busy, rejecting {:?}", command.kind());
        self.card.send_response(TerminalResponse::new(
            command,
            ResultCode::TerminalCurrentlyUnableToProcess,
        ));

        self.response_needed = true;
        self.awaiting_response = false;
        self.release();
    }

    fn fire(&mut self, signal: Signal) {
        if let Some(response) = self.events.fire(&signal) {
            self.card.send_response(response);
        }
    }

    fn release(&mut self) {
        match self.gate.complete() {
            Release::Drain => self.drain_pending = true,
            Release::Idle => debug!("Gate is open"),
        }
    }

    fn is_at_root_menu(&self) -> bool {
        match (&self.active_command, &self.root_menu) {
            (Some(active), Some(root)) => Arc::ptr_eq(active, root),
            _ => false,
        }
    }

    /// Points the active command back at the main menu, unless an exchange is in progress.
    fn restore_root_menu(&mut self) {
        if !self.gate.is_busy() {
            self.active_command = self.root_menu.clone();
        }
    }

    fn show_main_menu(&mut self) {
        if let Some(menu) = self.root_menu.as_ref().and_then(|root| root.menu()) {
            self.presenter.show_menu(menu, MenuLevel::Main);
        }
    }

    fn show_banner(&mut self, text: &TextMessage, icon_load_failed: bool) {
        if text.text.is_none() {
            return;
        }

        self.presenter
            .show_transient_message(text.banner(icon_load_failed));
    }

    fn display_title(&self) -> String {
        self.last_selected_item
            .clone()
            .or_else(|| {
                self.root_menu
                    .as_ref()
                    .and_then(|root| root.menu())
                    .and_then(|menu| menu.title.clone())
            })
            .unwrap_or_else(|| self.config.fallback_title.clone())
    }
}
