use crate::app::{handle_key, AppState, Command, NoticeLevel};
use crate::error::OrchestratorError;
use crate::event::AppEvent;
use crate::orchestrator::Notice;

/// Spinner frames for the "thinking" indicator
pub const SPINNER_FRAMES: usize = 4;

/// Pure update function following Elm Architecture.
/// Takes current state and event, returns new state.
/// No I/O, no side effects - fully deterministic and unit testable.
pub fn update(mut state: AppState, event: AppEvent) -> AppState {
    match event {
        AppEvent::Key(key) => handle_key(state, key),

        AppEvent::Tick(_) => {
            if state.is_busy() {
                state.spinner_frame = (state.spinner_frame + 1) % SPINNER_FRAMES;
            }
            state
        }

        AppEvent::CommandFinished { command, result } => {
            state.running = None;
            match result {
                Ok(notices) => {
                    for notice in notices {
                        let level = notice_level(&notice);
                        state.push_notice(level, notice.to_string());
                    }
                    after_success(state, command)
                }
                Err(error) => after_failure(state, command, error),
            }
        }
    }
}

fn notice_level(notice: &Notice) -> NoticeLevel {
    match notice {
        Notice::ProfileSaveFailed(_) => NoticeLevel::Warning,
        _ => NoticeLevel::Error,
    }
}

fn after_success(mut state: AppState, command: Command) -> AppState {
    match command {
        Command::Login { .. } => {
            // The picker always has a value, so the first agent's history
            // is resolved straight after sign-in.
            state.login = Default::default();
            state.selected_agent = 0;
            state.transcript_scroll = 0;
            if let Some(agent) = state.agents.first().cloned() {
                state.pending.push_back(Command::SwitchAgent(agent));
            }
            state
        }
        Command::SwitchAgent(_) | Command::Submit(_) => {
            state.transcript_scroll = 0;
            state
        }
        Command::Logout => {
            state.input.clear();
            state.selected_agent = 0;
            state.transcript_scroll = 0;
            state.pending.clear();
            state
        }
    }
}

fn after_failure(mut state: AppState, command: Command, error: OrchestratorError) -> AppState {
    if matches!(command, Command::Login { .. }) {
        state.login.password.clear();
    }
    if matches!(error, OrchestratorError::NotAuthenticated) {
        // Session vanished under us: drop anything queued for it
        state.pending.clear();
        state.input.clear();
    }
    state.push_notice(NoticeLevel::Error, error.to_string());
    state
}
