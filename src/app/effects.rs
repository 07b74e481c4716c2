//! Imperative shell: executes queued commands against the orchestrator.

use crate::app::Command;
use crate::error::OrchestratorError;
use crate::orchestrator::{ChatOrchestrator, Notice, SessionState};

/// Run one command to completion, mutating the user's session in place.
pub async fn run_command(
    orchestrator: &ChatOrchestrator,
    session: &mut SessionState,
    command: &Command,
) -> Result<Vec<Notice>, OrchestratorError> {
    match command {
        Command::Login { email, password } => orchestrator.login(session, email, password).await,
        Command::SwitchAgent(agent) => orchestrator.switch_agent(session, agent).await,
        Command::Submit(text) => orchestrator.submit(session, text).await,
        Command::Logout => {
            orchestrator.logout(session);
            Ok(Vec::new())
        }
    }
}
