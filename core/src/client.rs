//! Stateless HTTP request builder and response parser for the Smocker API.
//!
//! # Design
//! `SmockerClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. A `Transport` executes the round-trip in between.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Mock, MocksAck, Session, Version};

/// Request builder and response parser for the Smocker admin API.
#[derive(Debug, Clone)]
pub struct SmockerClient {
    base_url: String,
}

impl SmockerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_reset(&self) -> HttpRequest {
        self.request(HttpMethod::Post, "/reset", Vec::new())
    }

    /// `POST /mocks?reset=..&session=..` with the mocks as a JSON array.
    pub fn build_add_mocks(
        &self,
        reset: bool,
        session: &str,
        mocks: &[Mock],
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(mocks).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut req = self.request(
            HttpMethod::Post,
            "/mocks",
            vec![
                ("reset".to_string(), reset.to_string()),
                ("session".to_string(), session.to_string()),
            ],
        );
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }

    pub fn build_get_mocks(&self, session: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            "/mocks",
            vec![("session".to_string(), session.to_string())],
        )
    }

    pub fn build_start_session(&self, name: &str) -> HttpRequest {
        self.request(
            HttpMethod::Post,
            "/sessions",
            vec![("name".to_string(), name.to_string())],
        )
    }

    pub fn build_get_sessions(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/sessions", Vec::new())
    }

    pub fn build_healthcheck(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/version", Vec::new())
    }

    pub fn parse_reset(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// Smocker acknowledges with a small JSON object; an empty body is
    /// accepted as an empty acknowledgment.
    pub fn parse_add_mocks(&self, response: HttpResponse) -> Result<MocksAck, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(MocksAck::default());
        }
        decode(&response)
    }

    pub fn parse_get_mocks(&self, response: HttpResponse) -> Result<Vec<Mock>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_start_session(&self, response: HttpResponse) -> Result<Session, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_get_sessions(&self, response: HttpResponse) -> Result<Vec<Session>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_healthcheck(&self, response: HttpResponse) -> Result<Version, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    fn request(&self, method: HttpMethod, path: &str, query: Vec<(String, String)>) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query,
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }
}

/// Map any non-2xx status to `ApiError::Server`, keeping the raw body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Server {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
