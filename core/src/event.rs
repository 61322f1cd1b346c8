//! Event subscriptions installed by SetupEventList, and the event downloads they produce.

use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::command::{Command, ResultCode};
use crate::gsm;
use crate::response::{ResponseData, TerminalResponse};

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

/// Event code of an event list (ETSI 102.223 §8.25).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum EventCode {
    MtCall,
    CallConnected,
    CallDisconnected,
    LocationStatus,
    UserActivity,
    IdleScreenAvailable,
    CardReaderStatus,
    LanguageSelection,
    BrowserTermination,
    DataAvailable,
    ChannelStatus,
}

impl EventCode {
    pub fn value(self) -> u8 {
        match self {
            Self::MtCall => 0x00,
            Self::CallConnected => 0x01,
            Self::CallDisconnected => 0x02,
            Self::LocationStatus => 0x03,
            Self::UserActivity => 0x04,
            Self::IdleScreenAvailable => 0x05,
            Self::CardReaderStatus => 0x06,
            Self::LanguageSelection => 0x07,
            Self::BrowserTermination => 0x08,
            Self::DataAvailable => 0x09,
            Self::ChannelStatus => 0x0A,
        }
    }
}

/// Why the browser was closed (ETSI 102.223 §8.51).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum BrowserTerminationCause {
    UserTermination,
    ErrorTermination,
}

impl BrowserTerminationCause {
    pub fn value(self) -> u8 {
        match self {
            Self::UserTermination => 0x00,
            Self::ErrorTermination => 0x01,
        }
    }
}

/// An environment change the terminal is able to report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    BrowserTermination(BrowserTerminationCause),
    IdleScreenAvailable,

    /// Carries the two-letter language code now in use.
    LanguageSelection(String),
}

impl Signal {
    pub fn event(&self) -> EventCode {
        match self {
            Self::BrowserTermination(_) => EventCode::BrowserTermination,
            Self::IdleScreenAvailable => EventCode::IdleScreenAvailable,
            Self::LanguageSelection(_) => EventCode::LanguageSelection,
        }
    }

    fn added_data(&self) -> Vec<u8> {
        match self {
            Self::BrowserTermination(cause) => vec![cause.value()],
            Self::IdleScreenAvailable => vec![],
            Self::LanguageSelection(language) => gsm::to_gsm_8bit(language),
        }
    }
}

/// Subscriptions of the last SetupEventList.
/// A retired slot stays in place as `None` so the list keeps its order.
#[derive(Default)]
pub struct EventRegistry {
    slots: Option<Vec<Option<EventCode>>>,
    command: Option<Arc<Command>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the subscriptions with the list of the command.
    pub fn install(&mut self, command: Arc<Command>, events: &[EventCode]) {
        debug!("Subscribing to events: {:?}", events);

        self.slots = Some(events.iter().copied().map(Some).collect());
        self.command = Some(command);
    }

    /// Determines whether the event is currently subscribed.
    pub fn contains(&self, event: EventCode) -> bool {
        self.slots
            .as_ref()
            .map(|slots| slots.contains(&Some(event)))
            .unwrap_or(false)
    }

    /// Builds the event download for the signal when its event is subscribed.
    /// IdleScreenAvailable is retired after firing; other events keep firing.
    pub fn fire(&mut self, signal: &Signal) -> Option<TerminalResponse> {
        let event = signal.event();

        if self.slots.is_none() {
            debug!("No event list installed, ignoring {:?}", event);
            return None;
        }

        if !self.contains(event) {
            debug!("{:?} is not in the event list", event);
            return None;
        }

        let command = Arc::clone(self.command.as_ref()?);
        if event == EventCode::IdleScreenAvailable {
            self.retire(event);
        }

        info!("Reporting {:?} to the card", event);

        Some(TerminalResponse {
            command,
            code: ResultCode::Ok,
            data: ResponseData::EventDownload {
                event,
                added: signal.added_data(),
            },
        })
    }

    fn retire(&mut self, event: EventCode) {
        if let Some(slot) = self
            .slots
            .iter_mut()
            .flatten()
            .find(|slot| **slot == Some(event))
        {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandDetails;

    fn registry(events: Vec<EventCode>) -> (EventRegistry, Arc<Command>) {
        let command = Arc::new(Command::new(CommandDetails::SetupEventList(events.clone())));
        let mut registry = EventRegistry::new();
        registry.install(Arc::clone(&command), &events);

        (registry, command)
    }

    #[test]
    fn test_ignored_without_event_list() {
        let mut registry = EventRegistry::new();

        assert!(registry.fire(&Signal::IdleScreenAvailable).is_none());
    }

    #[test]
    fn test_ignored_when_not_subscribed() {
        let (mut registry, _) = registry(vec![EventCode::LanguageSelection]);

        assert!(registry.fire(&Signal::IdleScreenAvailable).is_none());
    }

    #[test]
    fn test_idle_screen_fires_once() {
        let (mut registry, command) = registry(vec![
            EventCode::IdleScreenAvailable,
            EventCode::BrowserTermination,
        ]);

        let response = registry.fire(&Signal::IdleScreenAvailable).unwrap();
        assert!(Arc::ptr_eq(&command, &response.command));
        assert_eq!(ResultCode::Ok, response.code);
        assert_eq!(
            ResponseData::EventDownload {
                event: EventCode::IdleScreenAvailable,
                added: vec![],
            },
            response.data,
        );

        assert!(registry.fire(&Signal::IdleScreenAvailable).is_none());
        assert!(registry.contains(EventCode::BrowserTermination));
    }

    // Only the idle screen event is retired; the others stay subscribed on purpose.
    #[test]
    fn test_browser_termination_keeps_firing() {
        let (mut registry, _) = registry(vec![EventCode::BrowserTermination]);
        let signal = Signal::BrowserTermination(BrowserTerminationCause::ErrorTermination);

        for _ in 0..2 {
            let response = registry.fire(&signal).unwrap();
            assert_eq!(
                ResponseData::EventDownload {
                    event: EventCode::BrowserTermination,
                    added: vec![0x01],
                },
                response.data,
            );
        }
    }

    #[test]
    fn test_language_selection_keeps_firing() {
        let (mut registry, _) = registry(vec![EventCode::LanguageSelection]);
        let signal = Signal::LanguageSelection("de".to_owned());

        for _ in 0..2 {
            let response = registry.fire(&signal).unwrap();
            assert_eq!(
                ResponseData::EventDownload {
                    event: EventCode::LanguageSelection,
                    added: vec![0x64, 0x65],
                },
                response.data,
            );
        }
    }

    #[test]
    fn test_install_replaces_list() {
        let (mut registry, _) = registry(vec![EventCode::IdleScreenAvailable]);
        registry.fire(&Signal::IdleScreenAvailable);

        let next = Arc::new(Command::new(CommandDetails::SetupEventList(vec![
            EventCode::IdleScreenAvailable,
        ])));
        registry.install(Arc::clone(&next), &[EventCode::IdleScreenAvailable]);

        let response = registry.fire(&Signal::IdleScreenAvailable).unwrap();
        assert!(Arc::ptr_eq(&next, &response.command));
    }
}
