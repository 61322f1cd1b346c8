//! The boundary to the terminal UI.
//! Every call is fire-and-forget: the user's answer comes back later as a user response.

use crate::command::{Banner, BrowserSettings, CallSettings, Input, Menu, TextMessage, ToneSettings};

/// Which menu is being shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuLevel {
    /// The toolkit's main menu, from SetupMenu. Usually opened by the user.
    Main,

    /// A menu from SelectItem.
    Secondary,
}

/// A delegate to present commands on the terminal.
pub trait Presenter {
    fn show_menu(&mut self, menu: &Menu, level: MenuLevel);

    fn show_input(&mut self, input: &Input);

    fn show_text_prompt(&mut self, text: &TextMessage);

    fn show_confirmation(&mut self, text: &TextMessage);

    fn show_tone_dialog(&mut self, text: &TextMessage, tone: &ToneSettings);

    /// Shows a short-lived message, such as a toast.
    fn show_transient_message(&mut self, banner: Banner<'_>);

    /// Posts the idle-mode text as a persistent notification, or removes it with `None`.
    fn set_idle_mode_notification(&mut self, banner: Option<Banner<'_>>);

    /// Asks the terminal to report (or stop reporting) whether the idle screen is showing.
    fn request_screen_idle_status(&mut self, want: bool);

    fn launch_browser(&mut self, settings: &BrowserSettings);

    fn launch_call(&mut self, settings: &CallSettings);

    /// Registers or unregisters the toolkit application with the host UI.
    fn set_installed(&mut self, installed: bool);

    /// Gets the two-letter language code of the terminal UI.
    fn current_language(&self) -> String;
}
