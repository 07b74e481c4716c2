use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;

use crate::app::Command;
use crate::error::OrchestratorError;
use crate::orchestrator::Notice;

/// All events that can occur in the application.
/// Sourced from keyboard input, timers, and completed backend commands.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input event
    Key(KeyEvent),

    /// Timer tick (spinner animation)
    Tick(DateTime<Utc>),

    /// A queued command finished running against the orchestrator
    CommandFinished {
        command: Command,
        result: Result<Vec<Notice>, OrchestratorError>,
    },
}
