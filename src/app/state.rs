use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::model::{AgentName, Transcript};
use crate::orchestrator::SessionState;

/// Max notices kept for the status line.
pub const NOTICE_CAPACITY: usize = 100;

/// Main application state.
/// Updated via pure `update(state, event) -> state` function; commands that
/// need I/O are queued in `pending` and run by the event loop.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Deployment environment name, shown in the header
    pub environment: String,

    /// Agents offered in the picker, in configured order
    pub agents: Vec<AgentName>,

    /// Index into `agents` highlighted in the picker
    pub selected_agent: usize,

    /// Login form contents
    pub login: LoginForm,

    /// Chat input line
    pub input: String,

    /// Signed-in user's session (bookmark, transcript, current agent)
    pub session: SessionState,

    /// Ring buffer of user-visible warnings and errors
    pub notices: VecDeque<StatusNotice>,

    /// Commands waiting for the event loop
    pub pending: VecDeque<Command>,

    /// Command currently awaiting a backend reply
    pub running: Option<Command>,

    /// Transcript lines scrolled up from the bottom
    pub transcript_scroll: usize,

    /// Spinner animation frame, advanced on tick
    pub spinner_frame: usize,

    /// Show help overlay
    pub show_help: bool,

    /// Signal to quit the application
    pub should_quit: bool,
}

/// Which top-level screen is shown. Derived from the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"***")
            .field("focus", &self.focus)
            .finish()
    }
}

/// Side-effecting request produced by `update`.
#[derive(Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    SwitchAgent(AgentName),
    Submit(String),
    Logout,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .field("password", &"***")
                .finish(),
            Command::SwitchAgent(agent) => f.debug_tuple("SwitchAgent").field(agent).finish(),
            Command::Submit(text) => f.debug_tuple("Submit").field(text).finish(),
            Command::Logout => f.write_str("Logout"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    pub at: DateTime<Utc>,
    pub level: NoticeLevel,
    pub text: String,
}

impl AppState {
    /// Create state for a fresh, signed-out run
    pub fn new(environment: impl Into<String>, agents: Vec<AgentName>) -> Self {
        Self {
            environment: environment.into(),
            agents,
            selected_agent: 0,
            login: LoginForm::default(),
            input: String::new(),
            session: SessionState::Unauthenticated,
            notices: VecDeque::with_capacity(NOTICE_CAPACITY),
            pending: VecDeque::new(),
            running: None,
            transcript_scroll: 0,
            spinner_frame: 0,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.session.is_authenticated() {
            Screen::Chat
        } else {
            Screen::Login
        }
    }

    pub fn highlighted_agent(&self) -> Option<&AgentName> {
        self.agents.get(self.selected_agent)
    }

    /// Agent whose transcript is on screen, once its history has resolved.
    pub fn viewed_agent(&self) -> Option<&AgentName> {
        self.session.context().and_then(|ctx| ctx.current_agent.as_ref())
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.session.context().map(|ctx| &ctx.transcript)
    }

    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    pub fn latest_notice(&self) -> Option<&StatusNotice> {
        self.notices.back()
    }

    /// Push a notice, evicting the oldest at capacity.
    pub fn push_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        if self.notices.len() >= NOTICE_CAPACITY {
            self.notices.pop_front();
        }
        self.notices.push_back(StatusNotice {
            at: Utc::now(),
            level,
            text: text.into(),
        });
    }
}
