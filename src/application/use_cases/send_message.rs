use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::{ChatTransport, SessionStore};
use crate::domain::{interpret, DomainError, Role, UpstreamIdentity, UpstreamPayload};

/// Answer returned to the caller when the upstream round trip fails.
pub const RELAY_FAILURE_ANSWER: &str = "Error processing the response.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayReply {
    pub answer: String,
    pub session_id: String,
}

/// Relays one message to the upstream endpoint and records both turns.
pub struct SendMessageUseCase {
    transport: Arc<dyn ChatTransport>,
    session_store: Arc<dyn SessionStore>,
    identity: UpstreamIdentity,
}

impl SendMessageUseCase {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        session_store: Arc<dyn SessionStore>,
        identity: UpstreamIdentity,
    ) -> Self {
        Self {
            transport,
            session_store,
            identity,
        }
    }

    /// Upstream failures are not returned as errors: the human turn stays in
    /// the transcript unanswered and the caller receives
    /// [`RELAY_FAILURE_ANSWER`]. Only a blank message or an internal failure
    /// produce `Err`.
    pub async fn execute(
        &self,
        session_key: Option<&str>,
        message: &str,
    ) -> Result<RelayReply, DomainError> {
        if message.trim().is_empty() {
            return Err(DomainError::invalid_input("message must not be empty"));
        }

        // A keyed session may be switched away while this call waits for its
        // lock; look it up again so the turns land under the requested id.
        let mut session = loop {
            let handle = self.session_store.session(session_key).await;
            let session = handle.lock_owned().await;
            match session_key {
                Some(key) if !key.is_empty() && session.id() != key => {
                    debug!("Session {} was switched while waiting, retrying", key);
                }
                _ => break session,
            }
        };
        let session_id = session.id().to_string();

        session.append(Role::Human, message);
        let payload = UpstreamPayload::build(&self.identity, message, session.transcript())?;

        info!(
            "Relaying message for session {} ({} turns of context)",
            session_id,
            session.len()
        );

        let answer = match self.transport.post(&payload).await {
            Ok(body) => {
                let answer = interpret(&body);
                session.append(Role::Assistant, answer.clone());
                answer
            }
            Err(e) => {
                warn!("Upstream call failed for session {}: {}", session_id, e);
                RELAY_FAILURE_ANSWER.to_string()
            }
        };

        Ok(RelayReply { answer, session_id })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;
    use crate::connector::InMemorySessionStore;
    use crate::domain::{Turn, FALLBACK_ANSWER};

    enum StubReply {
        Body(String),
        Status(u16),
        Echo,
    }

    struct StubTransport {
        reply: StubReply,
        delay: Duration,
        payloads: Mutex<Vec<UpstreamPayload>>,
    }

    impl StubTransport {
        fn new(reply: StubReply) -> Self {
            Self {
                reply,
                delay: Duration::ZERO,
                payloads: Mutex::new(Vec::new()),
            }
        }
    }

    fn delta(content: &str) -> String {
        format!(
            "data: {}\n",
            serde_json::json!({ "choices": [{ "delta": { "content": content } }] })
        )
    }

    #[async_trait]
    impl ChatTransport for StubTransport {
        async fn post(&self, payload: &UpstreamPayload) -> Result<String, DomainError> {
            self.payloads.lock().await.push(payload.clone());
            tokio::time::sleep(self.delay).await;
            match &self.reply {
                StubReply::Body(body) => Ok(body.clone()),
                StubReply::Status(code) => {
                    Err(DomainError::upstream(format!("upstream returned {code}")))
                }
                StubReply::Echo => Ok(delta(payload.get("message").unwrap_or_default())),
            }
        }
    }

    fn identity() -> UpstreamIdentity {
        UpstreamIdentity {
            nonce: "n".to_string(),
            post_id: "1".to_string(),
            site_url: "https://chat.example".to_string(),
            bot_id: "0".to_string(),
            chatbot_identity: "shortcode".to_string(),
            client_id: "c".to_string(),
            chat_id: "c".to_string(),
        }
    }

    fn use_case(
        transport: Arc<StubTransport>,
        store: Arc<InMemorySessionStore>,
    ) -> SendMessageUseCase {
        SendMessageUseCase::new(transport, store, identity())
    }

    async fn transcript(store: &InMemorySessionStore) -> Vec<Turn> {
        store.session(None).await.lock().await.transcript().to_vec()
    }

    #[tokio::test]
    async fn test_successful_call_appends_both_turns() {
        let body = format!("{}{}", delta("Hi "), delta("there"));
        let transport = Arc::new(StubTransport::new(StubReply::Body(body)));
        let store = Arc::new(InMemorySessionStore::new());
        let relay = use_case(transport.clone(), store.clone());

        let reply = relay.execute(None, "Hi").await.unwrap();

        assert_eq!(reply.answer, "Hi there");
        assert_eq!(reply.session_id, store.default_id().await);
        assert_eq!(
            transcript(&store).await,
            vec![Turn::human("Hi"), Turn::assistant("Hi there")]
        );
    }

    #[tokio::test]
    async fn test_failed_call_leaves_dangling_human_turn() {
        let transport = Arc::new(StubTransport::new(StubReply::Status(500)));
        let store = Arc::new(InMemorySessionStore::new());
        let relay = use_case(transport, store.clone());

        let reply = relay.execute(None, "Hi").await.unwrap();

        assert_eq!(reply.answer, RELAY_FAILURE_ANSWER);
        assert_eq!(transcript(&store).await, vec![Turn::human("Hi")]);
    }

    #[tokio::test]
    async fn test_payload_history_includes_new_message() {
        let transport = Arc::new(StubTransport::new(StubReply::Echo));
        let store = Arc::new(InMemorySessionStore::new());
        let relay = use_case(transport.clone(), store);

        relay.execute(None, "first").await.unwrap();
        relay.execute(None, "second").await.unwrap();

        let payloads = transport.payloads.lock().await;
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[1].get("message"), Some("second"));
        assert_eq!(
            payloads[1].get("wpaicg_chat_history"),
            Some(
                r#"[{"role":"human","text":"first"},{"role":"assistant","text":"first"},{"role":"human","text":"second"}]"#
            )
        );
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected_without_upstream_call() {
        let transport = Arc::new(StubTransport::new(StubReply::Echo));
        let store = Arc::new(InMemorySessionStore::new());
        let relay = use_case(transport.clone(), store.clone());

        let err = relay.execute(None, "   ").await.unwrap_err();

        assert!(err.is_invalid_input());
        assert!(transport.payloads.lock().await.is_empty());
        assert!(transcript(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_stream_records_fallback_answer() {
        let transport = Arc::new(StubTransport::new(StubReply::Body(": ping\n".to_string())));
        let store = Arc::new(InMemorySessionStore::new());
        let relay = use_case(transport, store.clone());

        let reply = relay.execute(None, "Hi").await.unwrap();

        assert_eq!(reply.answer, FALLBACK_ANSWER);
        assert_eq!(
            transcript(&store).await,
            vec![Turn::human("Hi"), Turn::assistant(FALLBACK_ANSWER)]
        );
    }

    #[tokio::test]
    async fn test_keyed_sessions_are_independent() {
        let transport = Arc::new(StubTransport::new(StubReply::Echo));
        let store = Arc::new(InMemorySessionStore::new());
        let relay = use_case(transport, store.clone());

        let reply = relay.execute(Some("alice"), "hello").await.unwrap();

        assert_eq!(reply.session_id, "alice");
        assert!(transcript(&store).await.is_empty());
        let alice = store.session(Some("alice")).await;
        assert_eq!(alice.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn test_send_to_switched_key_does_not_reach_new_session() {
        let transport = Arc::new(StubTransport::new(StubReply::Echo));
        let store = Arc::new(InMemorySessionStore::new());
        let relay = Arc::new(use_case(transport, store.clone()));
        let busy = store.session(Some("old")).await;
        let guard = busy.lock().await;

        let switching = {
            let store = store.clone();
            tokio::spawn(async move { store.switch(Some("old"), "new").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let sending = {
            let relay = relay.clone();
            tokio::spawn(async move { relay.execute(Some("old"), "late").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(guard);

        switching.await.unwrap().unwrap();
        let reply = sending.await.unwrap().unwrap();

        assert_eq!(reply.session_id, "old");
        let new = store.find(Some("new")).await.unwrap();
        assert!(new.lock().await.is_empty());
        let old = store.find(Some("old")).await.unwrap();
        assert_eq!(old.lock().await.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_do_not_interleave() {
        let mut stub = StubTransport::new(StubReply::Echo);
        stub.delay = Duration::from_millis(20);
        let transport = Arc::new(stub);
        let store = Arc::new(InMemorySessionStore::new());
        let relay = Arc::new(use_case(transport, store.clone()));

        let mut tasks = Vec::new();
        for i in 0..4 {
            let relay = relay.clone();
            tasks.push(tokio::spawn(async move {
                relay.execute(None, &format!("msg-{i}")).await.unwrap()
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let turns = transcript(&store).await;
        assert_eq!(turns.len(), 8);
        for pair in turns.chunks(2) {
            assert_eq!(pair[0].role(), Role::Human);
            assert_eq!(pair[1].role(), Role::Assistant);
            assert_eq!(pair[0].text(), pair[1].text());
        }
    }
}
