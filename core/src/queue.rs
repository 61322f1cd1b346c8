//! The busy gate: at most one interactive exchange is in progress, the rest waits in order.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::command::Command;

/// Work deferred while the gate was busy.
#[derive(Clone, Debug, PartialEq)]
pub enum Deferred {
    RunCommand(Arc<Command>),
    EndSession,
}

/// What to do with an incoming piece of work.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Run it now; the gate is closed until it completes.
    Execute,

    /// Run it now without touching the gate.
    Bypass,

    /// It was queued behind the exchange in progress.
    Queued,
}

/// What to do once the exchange in progress completes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Release {
    /// Work is waiting: the gate stays closed and the next item has to be drained.
    Drain,

    /// Nothing is waiting: the gate is open again.
    Idle,
}

#[derive(Debug, Default)]
pub struct Gate {
    busy: bool,
    queue: VecDeque<Deferred>,
}

impl Gate {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Admits a new command from the card.
    pub fn admit_command(&mut self, command: &Arc<Command>) -> Admission {
        if !command.kind().is_interactive() {
            return Admission::Bypass;
        }

        self.admit(Deferred::RunCommand(Arc::clone(command)))
    }

    /// Admits the end of the session signalled by the card.
    pub fn admit_end_session(&mut self) -> Admission {
        self.admit(Deferred::EndSession)
    }

    fn admit(&mut self, item: Deferred) -> Admission {
        match self.busy {
            true => {
                self.queue.push_back(item);
                Admission::Queued
            }
            _ => {
                self.busy = true;
                Admission::Execute
            }
        }
    }

    /// Completes the exchange in progress.
    pub fn complete(&mut self) -> Release {
        match self.queue.is_empty() {
            true => {
                self.busy = false;
                Release::Idle
            }
            _ => Release::Drain,
        }
    }

    /// Takes the oldest deferred item. The gate stays closed while it runs.
    pub fn pop(&mut self) -> Option<Deferred> {
        self.queue.pop_front()
    }
}
