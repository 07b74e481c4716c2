#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use agent_desk::error::{AuthError, ProfileStoreError, WrapperError};
use agent_desk::identity::Authenticator;
use agent_desk::model::{AgentName, AuthenticatedUser, Message, SessionBookmark, SessionId, UserId};
use agent_desk::orchestrator::ChatOrchestrator;
use agent_desk::profile::ProfileStore;
use agent_desk::resolver::SessionResolver;
use agent_desk::wrapper::{AgentWrapper, HistoryOutcome, TurnOutcome, TurnRequest};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTurn {
    pub agent: AgentName,
    pub message: String,
    pub user_id: UserId,
    pub session_id: Option<SessionId>,
}

/// Scripted wrapper. Turns pop from `replies`; history is looked up by
/// session id. An absent session id short-circuits like the real client.
#[derive(Default)]
pub struct FakeWrapper {
    pub replies: Mutex<VecDeque<TurnOutcome>>,
    pub histories: Mutex<HashMap<String, Vec<Message>>>,
    pub fail_history: AtomicBool,
    pub turns: Mutex<Vec<RecordedTurn>>,
    pub history_calls: Mutex<Vec<(AgentName, Option<SessionId>)>>,
}

impl FakeWrapper {
    pub fn reply(&self, text: &str, session: Option<&str>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(TurnOutcome::replied(text, session.map(SessionId::new)));
    }

    pub fn degrade(&self, reason: WrapperError) {
        self.replies
            .lock()
            .unwrap()
            .push_back(TurnOutcome::Degraded { reason });
    }

    pub fn history(&self, session: &str, messages: Vec<Message>) {
        self.histories
            .lock()
            .unwrap()
            .insert(session.to_string(), messages);
    }

    pub fn history_calls(&self) -> Vec<(AgentName, Option<SessionId>)> {
        self.history_calls.lock().unwrap().clone()
    }

    pub fn turns(&self) -> Vec<RecordedTurn> {
        self.turns.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentWrapper for FakeWrapper {
    async fn send_turn(&self, request: TurnRequest<'_>) -> TurnOutcome {
        self.turns.lock().unwrap().push(RecordedTurn {
            agent: request.agent.clone(),
            message: request.message.to_string(),
            user_id: request.user_id.clone(),
            session_id: request.session_id.cloned(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| TurnOutcome::replied("ok", None))
    }

    async fn fetch_history(
        &self,
        agent: &AgentName,
        _user_id: &UserId,
        session_id: Option<&SessionId>,
    ) -> HistoryOutcome {
        self.history_calls
            .lock()
            .unwrap()
            .push((agent.clone(), session_id.cloned()));

        let Some(session_id) = session_id else {
            return HistoryOutcome::NoSession;
        };
        if self.fail_history.load(Ordering::SeqCst) {
            return HistoryOutcome::Failed(WrapperError::Transport("connection refused".into()));
        }
        HistoryOutcome::Loaded(
            self.histories
                .lock()
                .unwrap()
                .get(session_id.as_str())
                .cloned()
                .unwrap_or_default(),
        )
    }
}

/// In-memory profile store recording every save payload.
#[derive(Default)]
pub struct MemoryStore {
    pub records: Mutex<HashMap<UserId, SessionBookmark>>,
    pub saves: Mutex<Vec<SessionBookmark>>,
    pub fail_fetch: AtomicBool,
    pub fail_save: AtomicBool,
}

impl MemoryStore {
    pub fn with_record(user_id: &str, bookmark: SessionBookmark) -> Self {
        let store = Self::default();
        store.records.lock().unwrap().insert(UserId::new(user_id), bookmark);
        store
    }

    pub fn saves(&self) -> Vec<SessionBookmark> {
        self.saves.lock().unwrap().clone()
    }

    pub fn record(&self, user_id: &str) -> Option<SessionBookmark> {
        self.records.lock().unwrap().get(user_id).cloned()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn fetch(&self, user: &AuthenticatedUser) -> Result<SessionBookmark, ProfileStoreError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ProfileStoreError::Http("store offline".into()));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&user.user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(
        &self,
        user: &AuthenticatedUser,
        bookmark: &SessionBookmark,
    ) -> Result<(), ProfileStoreError> {
        self.saves.lock().unwrap().push(bookmark.clone());
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(ProfileStoreError::Status {
                status: 503,
                body: "unavailable".into(),
            });
        }
        self.records
            .lock()
            .unwrap()
            .insert(user.user_id.clone(), bookmark.clone());
        Ok(())
    }
}

/// Accepts password "pw"; the user id is "u-" + email.
pub struct FakeAuth;

#[async_trait]
impl Authenticator for FakeAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        if password != "pw" {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(AuthenticatedUser::new(
            UserId::new(format!("u-{email}")),
            email,
            "token",
        ))
    }
}

pub fn user() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new("u-ana"), "ana", "token")
}

pub fn agents() -> Vec<AgentName> {
    vec![AgentName::new("Sales"), AgentName::new("Support")]
}

pub struct Harness {
    pub wrapper: Arc<FakeWrapper>,
    pub store: Arc<MemoryStore>,
    pub orchestrator: ChatOrchestrator,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::default())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        let wrapper = Arc::new(FakeWrapper::default());
        let store = Arc::new(store);
        let resolver = SessionResolver::new(wrapper.clone(), store.clone());
        let orchestrator = ChatOrchestrator::new(Arc::new(FakeAuth), resolver, agents());
        Self {
            wrapper,
            store,
            orchestrator,
        }
    }

    pub fn resolver(&self) -> SessionResolver {
        SessionResolver::new(self.wrapper.clone(), self.store.clone())
    }
}

/// Request captured by [`StubServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// One-request-per-connection HTTP stub. Serves `responses` in order, then exits.
pub struct StubServer {
    pub base_url: String,
    requests: std::sync::mpsc::Receiver<CapturedRequest>,
}

impl StubServer {
    pub fn start(responses: Vec<(u16, &str)>) -> Self {
        use std::io::{BufRead, BufReader, Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = std::sync::mpsc::channel();
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        std::thread::spawn(move || {
            for (status, body) in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let mut reader = BufReader::new(stream);

                let mut head = String::new();
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                        break;
                    }
                    head.push_str(&line);
                }
                let length = head
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length")
                            .then(|| v.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                let mut buf = vec![0; length];
                reader.read_exact(&mut buf).unwrap();

                let _ = tx.send(CapturedRequest {
                    head,
                    body: String::from_utf8_lossy(&buf).into_owned(),
                });

                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let mut stream = reader.into_inner();
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url,
            requests: rx,
        }
    }

    pub fn next_request(&self) -> CapturedRequest {
        self.requests
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap()
    }
}

/// Base URL nothing listens on.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}

/// Accepts connections and never answers, so every request runs into its timeout.
pub fn silent_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    url
}
