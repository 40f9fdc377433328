//! Interface-style Smocker client.
//!
//! # Design
//! `SmockerApi` lists one method per admin endpoint. `Smocker` implements it
//! by pairing `SmockerClient` (build/parse) with a `Transport` (I/O): every
//! call is build → execute → parse, one round-trip, no retries.

use tracing::{debug, warn};

use crate::client::SmockerClient;
use crate::config::SmockerConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Mock, MocksAck, Session, Version, DEFAULT_SESSION_NAME};

/// Operations exposed by the Smocker admin API.
pub trait SmockerApi {
    /// `POST /reset`: drop every mock and session on the server.
    fn reset(&self) -> Result<(), ApiError>;

    /// `POST /mocks` into `DEFAULT_SESSION_NAME`.
    fn add_mocks(&self, reset: bool, mocks: &[Mock]) -> Result<MocksAck, ApiError> {
        self.add_mocks_in_session(reset, DEFAULT_SESSION_NAME, mocks)
    }

    /// `POST /mocks` into `session`. With `reset`, the server clears its
    /// mocks before registering these.
    fn add_mocks_in_session(
        &self,
        reset: bool,
        session: &str,
        mocks: &[Mock],
    ) -> Result<MocksAck, ApiError>;

    /// `GET /mocks`
    fn get_mocks(&self, session: &str) -> Result<Vec<Mock>, ApiError>;

    /// `POST /sessions`
    fn start_session(&self, name: &str) -> Result<Session, ApiError>;

    /// `GET /sessions`
    fn get_sessions(&self) -> Result<Vec<Session>, ApiError>;

    /// `GET /version`
    fn healthcheck(&self) -> Result<Version, ApiError>;
}

/// `SmockerApi` over a `Transport`, by default a blocking ureq agent.
#[derive(Debug, Clone)]
pub struct Smocker<T = UreqTransport> {
    client: SmockerClient,
    transport: T,
}

impl Smocker<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(SmockerClient::new(base_url), UreqTransport::default())
    }

    pub fn from_config(config: &SmockerConfig) -> Self {
        Self::with_transport(
            SmockerClient::new(&config.base_url),
            UreqTransport::new(config.timeout),
        )
    }
}

impl<T: Transport> Smocker<T> {
    pub fn with_transport(client: SmockerClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &SmockerClient {
        &self.client
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(
            method = %request.method,
            url = %request.url,
            query = ?request.query,
            "smocker request"
        );
        let response = self.transport.execute(request)?;
        if response.is_success() {
            debug!(status = response.status, "smocker response");
        } else {
            warn!(
                status = response.status,
                body = %response.body,
                "smocker returned an error status"
            );
        }
        Ok(response)
    }
}

impl<T: Transport> SmockerApi for Smocker<T> {
    fn reset(&self) -> Result<(), ApiError> {
        let response = self.send(self.client.build_reset())?;
        self.client.parse_reset(response)
    }

    fn add_mocks_in_session(
        &self,
        reset: bool,
        session: &str,
        mocks: &[Mock],
    ) -> Result<MocksAck, ApiError> {
        let request = self.client.build_add_mocks(reset, session, mocks)?;
        let response = self.send(request)?;
        self.client.parse_add_mocks(response)
    }

    fn get_mocks(&self, session: &str) -> Result<Vec<Mock>, ApiError> {
        let response = self.send(self.client.build_get_mocks(session))?;
        self.client.parse_get_mocks(response)
    }

    fn start_session(&self, name: &str) -> Result<Session, ApiError> {
        let response = self.send(self.client.build_start_session(name))?;
        self.client.parse_start_session(response)
    }

    fn get_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let response = self.send(self.client.build_get_sessions())?;
        self.client.parse_get_sessions(response)
    }

    fn healthcheck(&self) -> Result<Version, ApiError> {
        let response = self.send(self.client.build_healthcheck())?;
        self.client.parse_healthcheck(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::HttpMethod;
    use crate::types::{Request, Response, DEFAULT_RESET};

    /// Records every request and answers with a canned response.
    struct Canned {
        status: u16,
        body: String,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for &Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.clone(),
            })
        }
    }

    struct Unreachable;

    impl Transport for Unreachable {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        }
    }

    fn smocker(transport: &Canned) -> Smocker<&Canned> {
        Smocker::with_transport(SmockerClient::new("http://smocker:8081"), transport)
    }

    fn mocks() -> Vec<Mock> {
        vec![Mock::new(Request::new("GET", "/hello"), Response::ok("Hello"))]
    }

    #[test]
    fn add_mocks_uses_default_session() {
        let implicit = Canned::new(200, r#"{"message":"ok"}"#);
        smocker(&implicit).add_mocks(DEFAULT_RESET, &mocks()).unwrap();

        let explicit = Canned::new(200, r#"{"message":"ok"}"#);
        smocker(&explicit)
            .add_mocks_in_session(false, "my-session", &mocks())
            .unwrap();

        assert_eq!(implicit.requests(), explicit.requests());
        let req = &implicit.requests()[0];
        assert_eq!(req.query_param("session"), Some("my-session"));
        assert_eq!(req.query_param("reset"), Some("false"));
    }

    #[test]
    fn add_mocks_surfaces_server_error() {
        let transport = Canned::new(500, r#"{"error":"boom"}"#);
        let err = smocker(&transport).add_mocks(false, &mocks()).unwrap_err();
        match err {
            ApiError::Server { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, r#"{"error":"boom"}"#);
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn get_mocks_empty_list() {
        let transport = Canned::new(200, "[]");
        let mocks = smocker(&transport).get_mocks("foo").unwrap();
        assert!(mocks.is_empty());
        let req = &transport.requests()[0];
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://smocker:8081/mocks");
        assert_eq!(req.query_param("session"), Some("foo"));
    }

    #[test]
    fn start_session_sends_name() {
        let transport = Canned::new(200, r#"{"id":"1","name":"my-session"}"#);
        let session = smocker(&transport)
            .start_session(DEFAULT_SESSION_NAME)
            .unwrap();
        assert_eq!(session.name, "my-session");
        assert_eq!(transport.requests()[0].query_param("name"), Some("my-session"));
    }

    #[test]
    fn reset_posts_to_reset() {
        let transport = Canned::new(200, "");
        smocker(&transport).reset().unwrap();
        let req = &transport.requests()[0];
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://smocker:8081/reset");
    }

    #[test]
    fn healthcheck_decoding_error_is_distinct() {
        let transport = Canned::new(200, "<html>");
        let err = smocker(&transport).healthcheck().unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn transport_failure_is_passed_through() {
        let smocker = Smocker::with_transport(SmockerClient::new("http://nowhere"), Unreachable);
        let err = smocker.get_sessions().unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn smocker_is_shareable_across_threads() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Smocker>();
    }
}
