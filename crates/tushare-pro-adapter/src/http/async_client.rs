/*
[INPUT]:  API token, client configuration, optional injected session
[OUTPUT]: Result tables from non-blocking queries over one shared session
[POS]:    HTTP layer - async client and its session lifecycle
[UPDATE]: When changing session lifecycle, scoping or the query path
*/

use futures_util::future::BoxFuture;
use reqwest::Url;
use std::future::IntoFuture;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

use crate::http::client::{decode_response, log_request};
use crate::http::session::{HttpSession, Session};
use crate::http::{ClientConfig, Credentials, Result, TushareError};
use crate::types::{ApiName, DataFrame, Params, Query};

/// Session lifecycle: `Uninitialized -> Open -> Closed`, never back.
#[derive(Debug)]
enum SessionState {
    Uninitialized,
    Open(Arc<dyn Session>),
    Closed(Option<Arc<dyn Session>>),
}

/// Async client for Tushare Pro.
///
/// The session is created on the first query (or injected) and shared by
/// every query on this client until [`close`](Self::close). A closed client
/// stays closed: further queries fail with [`TushareError::SessionClosed`].
#[derive(Debug)]
pub struct AsyncDataApi {
    credentials: Credentials,
    endpoint: Url,
    timeout: Duration,
    state: Mutex<SessionState>,
}

impl AsyncDataApi {
    /// Create a client with default configuration
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            credentials: Credentials::new(token),
            endpoint: config.endpoint()?,
            timeout: config.timeout,
            state: Mutex::new(SessionState::Uninitialized),
        })
    }

    /// Create a client that reuses a prebuilt session
    pub fn with_session(
        token: impl Into<String>,
        config: ClientConfig,
        session: Arc<dyn Session>,
    ) -> Result<Self> {
        let api = Self::with_config(token, config)?;
        *api.lock_state() = SessionState::Open(session);
        Ok(api)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Query `api_name`, optionally restricted to the comma-delimited `fields`
    pub async fn query(&self, api_name: &str, fields: &str, params: Params) -> Result<DataFrame> {
        let query = Query::new(api_name).fields(fields).params(params);
        self.execute(&query).await
    }

    /// Send a prepared query
    pub async fn execute(&self, query: &Query) -> Result<DataFrame> {
        let session = self.session()?;
        if session.is_closed() {
            return Err(TushareError::SessionClosed);
        }

        let envelope = self.credentials.envelope(query);
        log_request(&envelope);
        let body = session.post_json(self.endpoint.clone(), &envelope).await?;
        decode_response(query.api_name(), &body)
    }

    /// Start a call to any endpoint by name
    pub fn call(&self, api_name: impl Into<String>) -> AsyncCall<'_> {
        AsyncCall {
            api: self,
            query: Query::new(api_name),
        }
    }

    /// Start a call to a well-known endpoint
    pub fn endpoint(&self, api_name: ApiName) -> AsyncCall<'_> {
        self.call(api_name.as_str())
    }

    /// Release the session's connections.
    ///
    /// Fails with [`TushareError::SessionNotInitialized`] when no session was
    /// ever created or injected. Closing twice is a no-op.
    pub async fn close(&self) -> Result<()> {
        let mut state = self.lock_state();
        match &*state {
            SessionState::Uninitialized => Err(TushareError::SessionNotInitialized),
            SessionState::Closed(_) => Ok(()),
            SessionState::Open(session) => {
                let session = Arc::clone(session);
                session.close();
                *state = SessionState::Closed(Some(session));
                debug!("http session closed");
                Ok(())
            }
        }
    }

    /// Whether the underlying session reports itself closed
    pub fn closed(&self) -> Result<bool> {
        match &*self.lock_state() {
            SessionState::Uninitialized => Err(TushareError::SessionNotInitialized),
            SessionState::Open(session) => Ok(session.is_closed()),
            SessionState::Closed(Some(session)) => Ok(session.is_closed()),
            SessionState::Closed(None) => Ok(true),
        }
    }

    /// Run `body` with this client, then close it on every exit path.
    ///
    /// The client is closed when the body finishes, fails, or when the
    /// returned future is dropped before completion (timeout, `select!`,
    /// task abort).
    ///
    /// ```no_run
    /// # async fn run() -> tushare_pro_adapter::Result<()> {
    /// use tushare_pro_adapter::AsyncDataApi;
    ///
    /// let api = AsyncDataApi::new("token")?;
    /// let table = api
    ///     .scope(|api| Box::pin(async move { api.call("trade_cal").await }))
    ///     .await?;
    /// println!("{} rows", table.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scope<T, F>(&self, body: F) -> Result<T>
    where
        F: for<'a> FnOnce(&'a Self) -> BoxFuture<'a, Result<T>>,
    {
        let _release = ScopeRelease { api: self };
        body(self).await
    }

    /// Close for scoped exit; a client that never opened a session is
    /// still moved to `Closed`.
    fn release(&self) {
        let mut state = self.lock_state();
        match std::mem::replace(&mut *state, SessionState::Closed(None)) {
            SessionState::Uninitialized => {}
            SessionState::Closed(session) => *state = SessionState::Closed(session),
            SessionState::Open(session) => {
                session.close();
                *state = SessionState::Closed(Some(session));
                debug!("http session closed on scope exit");
            }
        }
    }

    /// Current session, creating it on first use.
    fn session(&self) -> Result<Arc<dyn Session>> {
        let mut state = self.lock_state();
        match &*state {
            SessionState::Open(session) => Ok(Arc::clone(session)),
            SessionState::Closed(_) => Err(TushareError::SessionClosed),
            SessionState::Uninitialized => {
                let session: Arc<dyn Session> = Arc::new(HttpSession::new(self.timeout)?);
                *state = SessionState::Open(Arc::clone(&session));
                debug!(timeout_secs = self.timeout.as_secs_f64(), "http session created");
                Ok(session)
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the client when a scope ends, including when it is cancelled.
struct ScopeRelease<'a> {
    api: &'a AsyncDataApi,
}

impl Drop for ScopeRelease<'_> {
    fn drop(&mut self) {
        self.api.release();
    }
}

/// Pending call built from [`AsyncDataApi::call`]; `.await` it or call `send`.
#[derive(Debug)]
#[must_use = "a call does nothing until awaited"]
pub struct AsyncCall<'a> {
    api: &'a AsyncDataApi,
    query: Query,
}

impl<'a> AsyncCall<'a> {
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.query = self.query.fields(fields);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.query = self.query.param(key, value);
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.query = self.query.params(params);
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub async fn send(self) -> Result<DataFrame> {
        self.api.execute(&self.query).await
    }
}

impl<'a> IntoFuture for AsyncCall<'a> {
    type Output = Result<DataFrame>;
    type IntoFuture = BoxFuture<'a, Result<DataFrame>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::types::RequestEnvelope;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Debug, Default)]
    struct CannedSession {
        closed: AtomicBool,
        sent: Mutex<Vec<RequestEnvelope>>,
    }

    #[async_trait]
    impl Session for CannedSession {
        async fn post_json(&self, _url: Url, envelope: &RequestEnvelope) -> Result<String> {
            self.sent.lock().unwrap().push(envelope.clone());
            Ok(r#"{"code":0,"msg":"","data":{"fields":["cal_date"],"items":[["20240102"]]}}"#
                .to_string())
        }

        fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }

        fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }
    }

    fn api_with(session: Arc<CannedSession>) -> AsyncDataApi {
        AsyncDataApi::with_session("abc", ClientConfig::default(), session).unwrap()
    }

    #[tokio::test]
    async fn test_uninitialized_session_guards() {
        let api = AsyncDataApi::new("abc").unwrap();
        assert!(matches!(api.closed(), Err(TushareError::SessionNotInitialized)));
        assert!(matches!(
            api.close().await,
            Err(TushareError::SessionNotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_injected_session_is_used() {
        let session = Arc::new(CannedSession::default());
        let api = api_with(session.clone());

        assert!(!api.closed().unwrap());
        let table = api.call("trade_cal").param("exchange", "SSE").await.unwrap();
        assert_eq!(table.columns(), ["cal_date"]);

        let sent = session.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].api_name, "trade_cal");
        assert_eq!(sent[0].token, "abc");
    }

    #[tokio::test]
    async fn test_close_then_closed_and_no_resurrection() {
        let session = Arc::new(CannedSession::default());
        let api = api_with(session.clone());

        api.close().await.unwrap();
        assert!(api.closed().unwrap());
        assert!(session.is_closed());

        let err = api.call("daily").await.unwrap_err();
        assert!(matches!(err, TushareError::SessionClosed));
        assert!(session.sent.lock().unwrap().is_empty());

        api.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_externally_closed_session_is_reported() {
        let session = Arc::new(CannedSession::default());
        let api = api_with(session.clone());

        session.close();
        assert!(api.closed().unwrap());
        assert!(matches!(
            api.endpoint(ApiName::Daily).await,
            Err(TushareError::SessionClosed)
        ));
    }

    #[tokio::test]
    async fn test_scope_closes_after_error() {
        let session = Arc::new(CannedSession::default());
        let api = api_with(session.clone());

        let result: Result<()> = api
            .scope(|_| Box::pin(async { Err(TushareError::InvalidResponse("boom".into())) }))
            .await;

        assert!(matches!(result, Err(TushareError::InvalidResponse(_))));
        assert!(api.closed().unwrap());
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn test_scope_without_session_ends_closed() {
        let api = AsyncDataApi::new("abc").unwrap();
        let value = api.scope(|_| Box::pin(async { Ok(7) })).await.unwrap();

        assert_eq!(value, 7);
        assert!(api.closed().unwrap());
        assert!(matches!(
            api.call("daily").await,
            Err(TushareError::SessionClosed)
        ));
    }

    #[tokio::test]
    async fn test_cancelled_scope_still_closes() {
        let session = Arc::new(CannedSession::default());
        let api = api_with(session.clone());

        let outcome = tokio::time::timeout(
            Duration::from_millis(20),
            api.scope(|_| Box::pin(std::future::pending::<Result<()>>())),
        )
        .await;

        assert!(outcome.is_err());
        assert!(api.closed().unwrap());
        assert!(session.is_closed());
        assert!(matches!(
            api.call("daily").await,
            Err(TushareError::SessionClosed)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_use_creates_one_session() {
        const TASKS: usize = 16;
        let api = Arc::new(AsyncDataApi::new("abc").unwrap());
        let barrier = Arc::new(tokio::sync::Barrier::new(TASKS));

        let handles: Vec<_> = (0..TASKS)
            .map(|_| {
                let api = Arc::clone(&api);
                let barrier = Arc::clone(&barrier);
                tokio::spawn(async move {
                    barrier.wait().await;
                    api.session().unwrap()
                })
            })
            .collect();

        let mut sessions = Vec::with_capacity(TASKS);
        for handle in handles {
            sessions.push(handle.await.unwrap());
        }
        assert!(sessions.iter().all(|session| Arc::ptr_eq(session, &sessions[0])));
        assert!(Arc::ptr_eq(&sessions[0], &api.session().unwrap()));
    }

    #[tokio::test]
    async fn test_lazy_session_created_once() {
        let api = AsyncDataApi::new("abc").unwrap();
        let first = api.session().unwrap();
        let second = api.session().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!api.closed().unwrap());
    }
}
