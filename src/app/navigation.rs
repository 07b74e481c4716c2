use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{AppState, Command, LoginField, NoticeLevel, Screen};

/// Transcript lines moved per PageUp / PageDown
const PAGE_JUMP: usize = 10;

/// Typed into the chat input to sign out
const LOGOUT_COMMAND: &str = "/logout";

/// Pure key handling.
/// Takes current state + keyboard event, returns new state.
/// Backend work is only queued on `state.pending`, never performed here.
pub fn handle_key(mut state: AppState, key: KeyEvent) -> AppState {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_quit = true;
        return state;
    }

    // One backend call at a time; input waits for it to finish
    if state.is_busy() {
        return state;
    }

    // Help overlay has priority
    if state.show_help {
        state.show_help = false;
        return state;
    }

    match state.screen() {
        Screen::Login => handle_login_key(state, key),
        Screen::Chat => handle_chat_key(state, key),
    }
}

fn handle_login_key(mut state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Esc => {
            state.should_quit = true;
            state
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.login.focus = match state.login.focus {
                LoginField::Email => LoginField::Password,
                LoginField::Password => LoginField::Email,
            };
            state
        }
        KeyCode::Enter => submit_login(state),
        KeyCode::Backspace => {
            focused_field(&mut state).pop();
            state
        }
        KeyCode::Char(c) => {
            focused_field(&mut state).push(c);
            state
        }
        _ => state,
    }
}

fn focused_field(state: &mut AppState) -> &mut String {
    match state.login.focus {
        LoginField::Email => &mut state.login.email,
        LoginField::Password => &mut state.login.password,
    }
}

/// Enter on the email field advances to the password; otherwise authenticate.
fn submit_login(mut state: AppState) -> AppState {
    if state.login.focus == LoginField::Email && state.login.password.is_empty() {
        state.login.focus = LoginField::Password;
        return state;
    }

    let email = state.login.email.trim().to_string();
    if email.is_empty() || state.login.password.is_empty() {
        state.push_notice(NoticeLevel::Warning, "Email and password are required");
        return state;
    }

    let password = std::mem::take(&mut state.login.password);
    state.pending.push_back(Command::Login { email, password });
    state
}

fn handle_chat_key(mut state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.pending.push_back(Command::Logout);
            state
        }
        KeyCode::F(1) => {
            state.show_help = true;
            state
        }
        KeyCode::Char('?') if state.input.is_empty() => {
            state.show_help = true;
            state
        }
        KeyCode::Up => select_agent(state, -1),
        KeyCode::Down => select_agent(state, 1),
        KeyCode::PageUp => {
            state.transcript_scroll = state.transcript_scroll.saturating_add(PAGE_JUMP);
            state
        }
        KeyCode::PageDown => {
            state.transcript_scroll = state.transcript_scroll.saturating_sub(PAGE_JUMP);
            state
        }
        KeyCode::End => {
            state.transcript_scroll = 0;
            state
        }
        KeyCode::Esc => {
            state.input.clear();
            state
        }
        KeyCode::Enter => submit_input(state),
        KeyCode::Backspace => {
            state.input.pop();
            state
        }
        KeyCode::Char(c) => {
            state.input.push(c);
            state
        }
        _ => state,
    }
}

/// Move the picker highlight and queue the switch when it lands elsewhere.
fn select_agent(mut state: AppState, delta: isize) -> AppState {
    if state.agents.is_empty() {
        return state;
    }
    let last = state.agents.len() - 1;
    let next = state.selected_agent.saturating_add_signed(delta).min(last);
    if next == state.selected_agent {
        return state;
    }

    state.selected_agent = next;
    state.transcript_scroll = 0;
    let agent = state.agents[next].clone();
    state.pending.push_back(Command::SwitchAgent(agent));
    state
}

fn submit_input(mut state: AppState) -> AppState {
    let text = state.input.trim();
    if text.is_empty() {
        return state;
    }

    let command = if text == LOGOUT_COMMAND {
        Command::Logout
    } else {
        Command::Submit(text.to_string())
    };
    state.input.clear();
    state.transcript_scroll = 0;
    state.pending.push_back(command);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthenticatedUser, SessionBookmark};
    use crate::orchestrator::{SessionContext, SessionState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn signed_in() -> AppState {
        let mut state = AppState::new("local", vec!["Sales".into(), "Support".into()]);
        let user = AuthenticatedUser::new("u1".into(), "a@b.c", "");
        state.session = SessionState::Authenticated(SessionContext::new(user, SessionBookmark::new()));
        state
    }

    #[test]
    fn ctrl_c_quits_from_any_screen() {
        let state = AppState::new("local", vec![]);
        let state = handle_key(state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }

    #[test]
    fn enter_on_email_moves_to_password() {
        let mut state = AppState::new("local", vec![]);
        state.login.email = "a@b.c".into();
        let state = handle_key(state, key(KeyCode::Enter));
        assert_eq!(state.login.focus, LoginField::Password);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn login_queues_command_and_clears_password() {
        let mut state = AppState::new("local", vec![]);
        state.login.email = " a@b.c ".into();
        state.login.password = "pw".into();
        state.login.focus = LoginField::Password;

        let state = handle_key(state, key(KeyCode::Enter));

        assert_eq!(
            state.pending.front(),
            Some(&Command::Login {
                email: "a@b.c".into(),
                password: "pw".into()
            })
        );
        assert!(state.login.password.is_empty());
    }

    #[test]
    fn login_with_blank_email_warns() {
        let mut state = AppState::new("local", vec![]);
        state.login.password = "pw".into();
        state.login.focus = LoginField::Password;

        let state = handle_key(state, key(KeyCode::Enter));

        assert!(state.pending.is_empty());
        assert_eq!(state.latest_notice().unwrap().text, "Email and password are required");
    }

    #[test]
    fn down_queues_switch_to_next_agent() {
        let state = handle_key(signed_in(), key(KeyCode::Down));
        assert_eq!(state.selected_agent, 1);
        assert_eq!(state.pending.front(), Some(&Command::SwitchAgent("Support".into())));
    }

    #[test]
    fn up_at_top_is_noop() {
        let state = handle_key(signed_in(), key(KeyCode::Up));
        assert_eq!(state.selected_agent, 0);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn enter_submits_trimmed_input() {
        let mut state = signed_in();
        state.input = "  hello ".into();
        let state = handle_key(state, key(KeyCode::Enter));
        assert_eq!(state.pending.front(), Some(&Command::Submit("hello".into())));
        assert!(state.input.is_empty());
    }

    #[test]
    fn logout_command_in_input() {
        let mut state = signed_in();
        state.input = "/logout".into();
        let state = handle_key(state, key(KeyCode::Enter));
        assert_eq!(state.pending.front(), Some(&Command::Logout));
    }

    #[test]
    fn keys_ignored_while_busy() {
        let mut state = signed_in();
        state.running = Some(Command::Submit("x".into()));
        let state = handle_key(state, key(KeyCode::Char('a')));
        assert!(state.input.is_empty());
    }

    #[test]
    fn question_mark_opens_help_only_with_empty_input() {
        let state = handle_key(signed_in(), key(KeyCode::Char('?')));
        assert!(state.show_help);

        let mut state = signed_in();
        state.input = "why".into();
        let state = handle_key(state, key(KeyCode::Char('?')));
        assert!(!state.show_help);
        assert_eq!(state.input, "why?");
    }
}
