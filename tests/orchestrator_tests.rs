mod common;

use std::sync::atomic::Ordering;

use agent_desk::error::{AuthError, OrchestratorError, WrapperError};
use agent_desk::model::{AgentName, Message, Role, SessionBookmark, SessionId};
use agent_desk::orchestrator::{Notice, SessionState};
use agent_desk::wrapper::NOT_CONFIGURED_TEXT;
use common::{Harness, MemoryStore};

fn sales() -> AgentName {
    AgentName::new("Sales")
}

fn support() -> AgentName {
    AgentName::new("Support")
}

async fn logged_in(h: &Harness) -> SessionState {
    let mut state = SessionState::default();
    let notices = h.orchestrator.login(&mut state, "ana", "pw").await.unwrap();
    assert!(notices.is_empty());
    state
}

fn transcript(state: &SessionState) -> Vec<Message> {
    state.context().unwrap().transcript.messages().to_vec()
}

fn bookmark(state: &SessionState) -> SessionBookmark {
    state.context().unwrap().bookmark.clone()
}

// Login / gate

#[tokio::test]
async fn login_loads_stored_bookmark() {
    let stored: SessionBookmark = [(sales(), SessionId::new("sess-1"))].into_iter().collect();
    let h = Harness::with_store(MemoryStore::with_record("u-ana", stored.clone()));

    let state = logged_in(&h).await;

    let ctx = state.context().unwrap();
    assert_eq!(ctx.bookmark, stored);
    assert_eq!(ctx.current_agent, None);
    assert!(ctx.transcript.is_empty());
}

#[tokio::test]
async fn bad_credentials_stay_unauthenticated() {
    let h = Harness::new();
    let mut state = SessionState::default();

    let err = h.orchestrator.login(&mut state, "ana", "nope").await.unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::Authentication(AuthError::InvalidCredentials)
    ));
    assert!(!state.is_authenticated());
}

#[tokio::test]
async fn profile_fetch_failure_signs_in_with_empty_bookmark() {
    let h = Harness::new();
    h.store.fail_fetch.store(true, Ordering::SeqCst);
    let mut state = SessionState::default();

    let notices = h.orchestrator.login(&mut state, "ana", "pw").await.unwrap();

    assert!(state.is_authenticated());
    assert!(bookmark(&state).is_empty());
    assert!(matches!(notices.as_slice(), [Notice::ProfileFetchFailed(_)]));
    assert!(notices[0].to_string().starts_with("Error fetching profile:"));
}

#[tokio::test]
async fn chat_operations_require_login() {
    let h = Harness::new();
    let mut state = SessionState::default();

    let switch = h.orchestrator.switch_agent(&mut state, &sales()).await;
    let submit = h.orchestrator.submit(&mut state, "hello").await;

    assert!(matches!(switch, Err(OrchestratorError::NotAuthenticated)));
    assert!(matches!(submit, Err(OrchestratorError::NotAuthenticated)));
    assert_eq!(
        OrchestratorError::NotAuthenticated.to_string(),
        "You must be logged in to access this page."
    );
    assert!(h.wrapper.turns().is_empty());
    assert!(h.wrapper.history_calls().is_empty());
}

// Agent switching

#[tokio::test]
async fn switching_to_unknown_agent_is_rejected() {
    let h = Harness::new();
    let mut state = logged_in(&h).await;

    let err = h
        .orchestrator
        .switch_agent(&mut state, &AgentName::new("Billing"))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::UnknownAgent(name) if name == "Billing"));
    assert!(h.wrapper.history_calls().is_empty());
}

#[tokio::test]
async fn reselecting_current_agent_does_not_refetch() {
    let h = Harness::new();
    let mut state = logged_in(&h).await;

    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();
    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();

    assert_eq!(h.wrapper.history_calls().len(), 1);
}

#[tokio::test]
async fn history_failure_is_reported_as_notice() {
    let stored: SessionBookmark = [(sales(), SessionId::new("sess-1"))].into_iter().collect();
    let h = Harness::with_store(MemoryStore::with_record("u-ana", stored.clone()));
    h.wrapper.fail_history.store(true, Ordering::SeqCst);
    let mut state = logged_in(&h).await;

    let notices = h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();

    assert!(matches!(
        notices.as_slice(),
        [Notice::HistoryUnavailable { agent, .. }] if agent == &sales()
    ));
    assert!(transcript(&state).is_empty());
    assert_eq!(bookmark(&state), stored);
}

// Submitting turns

#[tokio::test]
async fn submit_without_agent_is_rejected() {
    let h = Harness::new();
    let mut state = logged_in(&h).await;

    let err = h.orchestrator.submit(&mut state, "hello").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::NoAgentSelected));
}

#[tokio::test]
async fn blank_submit_is_ignored() {
    let h = Harness::new();
    let mut state = logged_in(&h).await;
    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();

    h.orchestrator.submit(&mut state, "   ").await.unwrap();

    assert!(transcript(&state).is_empty());
    assert!(h.wrapper.turns().is_empty());
}

#[tokio::test]
async fn submit_appends_user_then_one_assistant_message() {
    let h = Harness::new();
    let mut state = logged_in(&h).await;
    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();
    h.wrapper.reply("hi", None);

    h.orchestrator.submit(&mut state, "hello").await.unwrap();

    assert_eq!(
        transcript(&state),
        vec![Message::user("hello"), Message::assistant("hi")]
    );
}

#[tokio::test]
async fn submit_sends_bookmarked_session() {
    let stored: SessionBookmark = [(sales(), SessionId::new("sess-1"))].into_iter().collect();
    let h = Harness::with_store(MemoryStore::with_record("u-ana", stored));
    let mut state = logged_in(&h).await;
    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();

    h.orchestrator.submit(&mut state, "again").await.unwrap();

    let turns = h.wrapper.turns();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].agent, sales());
    assert_eq!(turns[0].user_id.as_str(), "u-ana");
    assert_eq!(turns[0].session_id, Some(SessionId::new("sess-1")));
}

#[tokio::test]
async fn unreachable_wrapper_yields_error_text_and_notice() {
    let h = Harness::new();
    let mut state = logged_in(&h).await;
    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();
    h.wrapper
        .degrade(WrapperError::Transport("connection refused".into()));

    let notices = h.orchestrator.submit(&mut state, "hello").await.unwrap();

    let messages = transcript(&state);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(
        messages[1].content,
        "Error: Could not reach Agent Wrapper. Details: connection refused"
    );
    assert!(matches!(notices.as_slice(), [Notice::TurnFailed { .. }]));
    assert!(bookmark(&state).is_empty());
}

#[tokio::test]
async fn unconfigured_wrapper_yields_fixed_text() {
    let h = Harness::new();
    let mut state = logged_in(&h).await;
    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();
    h.wrapper.degrade(WrapperError::NotConfigured);

    h.orchestrator.submit(&mut state, "hello").await.unwrap();

    assert_eq!(transcript(&state)[1].content, NOT_CONFIGURED_TEXT);
}

#[tokio::test]
async fn save_failure_keeps_reply_and_warns() {
    let h = Harness::new();
    h.store.fail_save.store(true, Ordering::SeqCst);
    let mut state = logged_in(&h).await;
    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();
    h.wrapper.reply("hi", Some("sess-1"));

    let notices = h.orchestrator.submit(&mut state, "hello").await.unwrap();

    assert_eq!(transcript(&state)[1].content, "hi");
    assert_eq!(bookmark(&state).get(&sales()), Some(&SessionId::new("sess-1")));
    assert!(matches!(notices.as_slice(), [Notice::ProfileSaveFailed(_)]));
}

// Full flow

#[tokio::test]
async fn first_turn_session_is_resumed_after_switching_away_and_back() {
    let h = Harness::new();
    let mut state = logged_in(&h).await;

    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();
    assert!(transcript(&state).is_empty());

    h.wrapper.reply("hi", Some("sess-1"));
    h.orchestrator.submit(&mut state, "hello").await.unwrap();

    let expected: SessionBookmark = [(sales(), SessionId::new("sess-1"))].into_iter().collect();
    assert_eq!(bookmark(&state), expected);
    assert_eq!(h.store.saves(), vec![expected.clone()]);
    assert_eq!(h.store.record("u-ana"), Some(expected));

    h.orchestrator.switch_agent(&mut state, &support()).await.unwrap();
    assert!(transcript(&state).is_empty());

    h.wrapper.history(
        "sess-1",
        vec![Message::user("hello"), Message::assistant("hi")],
    );
    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();

    assert_eq!(
        h.wrapper.history_calls(),
        vec![
            (sales(), None),
            (support(), None),
            (sales(), Some(SessionId::new("sess-1"))),
        ]
    );
    assert_eq!(
        transcript(&state),
        vec![Message::user("hello"), Message::assistant("hi")]
    );
}

#[tokio::test]
async fn logout_drops_session_but_keeps_durable_record() {
    let h = Harness::new();
    let mut state = logged_in(&h).await;
    h.orchestrator.switch_agent(&mut state, &sales()).await.unwrap();
    h.wrapper.reply("hi", Some("sess-1"));
    h.orchestrator.submit(&mut state, "hello").await.unwrap();

    h.orchestrator.logout(&mut state);

    assert!(!state.is_authenticated());
    assert!(h.store.record("u-ana").is_some());

    let mut again = logged_in(&h).await;
    assert_eq!(bookmark(&again).get(&sales()), Some(&SessionId::new("sess-1")));
    h.orchestrator.switch_agent(&mut again, &sales()).await.unwrap();
    assert_eq!(
        h.wrapper.history_calls().last(),
        Some(&(sales(), Some(SessionId::new("sess-1"))))
    );
}
