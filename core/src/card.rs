//! The link to the card, seen from the session.

use crate::response::TerminalResponse;

/// A delegate to deliver responses to the card outside.
pub trait CardLink {
    /// Sends the response to the card.
    /// Implementations must encode it as a TERMINAL RESPONSE, or as an ENVELOPE (EVENT DOWNLOAD)
    /// when it carries an event, then transmit it through the card interface.
    fn send_response(&mut self, response: TerminalResponse);
}
