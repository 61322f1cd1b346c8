//! A crate to run a SIM Application Toolkit (ETSI 102.223) session between a card and a terminal.
//!
//! Proactive commands from the card are posted to a [`Dispatcher`] through a [`Handle`].
//! The dispatcher decides whether to show them now, queue them behind the interactive command
//! in progress, or run them at once, and correlates whatever the user did back into a
//! [`TerminalResponse`] for the card.
//!
//! The UI and the card interface stay outside: implement [`Presenter`] and [`CardLink`] to plug
//! them in.

pub mod card;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod gsm;
pub mod presenter;
pub mod queue;
pub mod response;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use card::CardLink;
pub use command::{Command, CommandDetails, CommandKind, ResultCode};
pub use config::Config;
pub use dispatcher::{Dispatcher, Handle, Message};
pub use event::{BrowserTerminationCause, EventCode};
pub use presenter::Presenter;
pub use response::{ResponseData, TerminalResponse, UserOutcome};
pub use session::Session;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The dispatcher is no longer running")]
    Disconnected,

    #[error("The outcome {outcome} does not apply to a {kind:?} command")]
    UnexpectedOutcome {
        kind: CommandKind,
        outcome: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
