//! The single-threaded event loop that owns the session.
//!
//! The card link and the UI never touch the session directly: they post [`Message`]s through a
//! [`Handle`], and the dispatcher processes them one at a time, in arrival order.

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::card::CardLink;
use crate::command::Command;
use crate::config::Config;
use crate::event::BrowserTerminationCause;
use crate::presenter::Presenter;
use crate::response::UserOutcome;
use crate::session::Session;
use crate::{Error, Result};

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($t: tt)*) => {{
        if false {
            let _ = format!($($t)*);
        }
    }};
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn {
    ($($t: tt)*) => {{
        if false {
            let _ = format!($($t)*);
        }
    }};
}

/// An inbound event.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// A proactive command from the card. Nothing happens without one.
    NewCommand(Option<Arc<Command>>),

    /// What the user did with the command on screen.
    UserResponse(UserOutcome),

    /// The user opened the toolkit application.
    LaunchMainMenu,

    /// The card ended the proactive session.
    SessionEnd,

    BootCompleted,

    /// Runs the next deferred item when the exchange ahead of it has completed.
    /// The dispatcher drains on its own before taking the next message, so this is only a nudge.
    DrainQueue,

    BrowserClosed(BrowserTerminationCause),

    ScreenStatusChanged(bool),

    LocaleChanged,

    /// The toolkit menu came to or left the foreground.
    MenuVisibility(bool),

    /// Stops [`Dispatcher::run`].
    Shutdown,
}

impl Message {
    fn name(&self) -> &'static str {
        match self {
            Self::NewCommand(_) => "NewCommand",
            Self::UserResponse(_) => "UserResponse",
            Self::LaunchMainMenu => "LaunchMainMenu",
            Self::SessionEnd => "SessionEnd",
            Self::BootCompleted => "BootCompleted",
            Self::DrainQueue => "DrainQueue",
            Self::BrowserClosed(_) => "BrowserClosed",
            Self::ScreenStatusChanged(_) => "ScreenStatusChanged",
            Self::LocaleChanged => "LocaleChanged",
            Self::MenuVisibility(_) => "MenuVisibility",
            Self::Shutdown => "Shutdown",
        }
    }
}

/// A cloneable handle to post messages to the dispatcher from any thread.
#[derive(Clone, Debug)]
pub struct Handle {
    sender: Sender<Message>,
}

impl Handle {
    pub fn post(&self, message: Message) -> Result<()> {
        self.sender.send(message).map_err(|_| Error::Disconnected)
    }

    pub fn new_command(&self, command: Command) -> Result<()> {
        self.post(Message::NewCommand(Some(Arc::new(command))))
    }

    pub fn user_response(&self, outcome: UserOutcome) -> Result<()> {
        self.post(Message::UserResponse(outcome))
    }

    pub fn launch_main_menu(&self) -> Result<()> {
        self.post(Message::LaunchMainMenu)
    }

    pub fn session_end(&self) -> Result<()> {
        self.post(Message::SessionEnd)
    }

    pub fn boot_completed(&self) -> Result<()> {
        self.post(Message::BootCompleted)
    }

    pub fn browser_closed(&self, cause: BrowserTerminationCause) -> Result<()> {
        self.post(Message::BrowserClosed(cause))
    }

    pub fn screen_status_changed(&self, idle: bool) -> Result<()> {
        self.post(Message::ScreenStatusChanged(idle))
    }

    pub fn locale_changed(&self) -> Result<()> {
        self.post(Message::LocaleChanged)
    }

    pub fn menu_visibility(&self, visible: bool) -> Result<()> {
        self.post(Message::MenuVisibility(visible))
    }

    pub fn shutdown(&self) -> Result<()> {
        self.post(Message::Shutdown)
    }
}

/// Owns the session and its inbox.
pub struct Dispatcher<P, C>
where
    P: Presenter,
    C: CardLink,
{
    session: Session<P, C>,
    inbox: Receiver<Message>,
    handle: Handle,
}

impl<P, C> Dispatcher<P, C>
where
    P: Presenter,
    C: CardLink,
{
    /// Creates a dispatcher with an empty session.
    pub fn new(presenter: P, card: C, config: Config) -> Self {
        let (sender, inbox) = unbounded();

        Self {
            session: Session::new(presenter, card, config),
            inbox,
            handle: Handle { sender },
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }

    pub fn session(&self) -> &Session<P, C> {
        &self.session
    }

    /// Processes messages until [`Message::Shutdown`] arrives.
    pub fn run(&mut self) {
        while let Ok(message) = self.inbox.recv() {
            if !self.dispatch(message) {
                break;
            }
        }
    }

    /// Processes every message already posted, including the ones raised meanwhile, without
    /// blocking. Returns the number of messages processed.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;

        while let Ok(message) = self.inbox.try_recv() {
            count += 1;

            if !self.dispatch(message) {
                break;
            }
        }

        count
    }

    /// Processes a message, then every deferred item it released. Returns false on shutdown.
    pub fn dispatch(&mut self, message: Message) -> bool {
        debug!("Dispatching {}", message.name());

        let result = match message {
            Message::NewCommand(Some(command)) => {
                self.session.on_command(command);
                Ok(())
            }
            Message::NewCommand(None) => {
                debug!("NewCommand without a command, ignoring");
                Ok(())
            }
            Message::UserResponse(outcome) => self.session.on_user_response(outcome),
            Message::LaunchMainMenu => {
                self.session.on_launch_main_menu();
                Ok(())
            }
            Message::SessionEnd => {
                self.session.on_session_end();
                Ok(())
            }
            Message::BootCompleted => {
                self.session.on_boot_completed();
                Ok(())
            }
            Message::DrainQueue => {
                self.session.on_drain_queue();
                Ok(())
            }
            Message::BrowserClosed(cause) => {
                self.session.on_browser_closed(cause);
                Ok(())
            }
            Message::ScreenStatusChanged(idle) => {
                self.session.on_screen_status_changed(idle);
                Ok(())
            }
            Message::LocaleChanged => {
                self.session.on_locale_changed();
                Ok(())
            }
            Message::MenuVisibility(visible) => {
                self.session.on_menu_visibility(visible);
                Ok(())
            }
            Message::Shutdown => return false,
        };

        if let Err(e) = result {
            warn!("Dropped a message: {}", e);
        }

        while self.session.drain_pending() {
            self.session.on_drain_queue();
        }

        true
    }
}
