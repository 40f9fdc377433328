//! Domain DTOs for the Smocker admin API.
//!
//! # Design
//! Mock definitions are immutable value records; equality is structural.
//! Optional request fields use `Option` and are omitted from the JSON when
//! absent, so a definition read back from the server compares equal to the
//! one that was sent. Records whose schema belongs to the server (`Session`,
//! `Version`, `MocksAck`) type the fields we know about and keep every other
//! field in `extra`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Session used by every session-scoped operation when the caller has no
/// particular session in mind.
pub const DEFAULT_SESSION_NAME: &str = "my-session";

/// Whether `add_mocks` clears previously registered mocks by default.
pub const DEFAULT_RESET: bool = false;

/// A request matcher paired with the response Smocker serves for it.
///
/// ```json
/// {
///   "request":  { "method": "GET", "path": "/hello" },
///   "response": { "status": 200, "headers": { "Content-Type": "text/plain" }, "body": "Hello" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mock {
    pub request: Request,
    pub response: Response,
}

impl Mock {
    pub fn new(request: Request, response: Response) -> Self {
        Self { request, response }
    }
}

/// Request section of a mock definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_params: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyMatch>,
}

impl Request {
    /// Matcher for `method` on `path` that expects an `Accept: application/json` header.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        Self {
            method: method.into(),
            headers: Some(headers),
            path: path.into(),
            query_params: None,
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: BodyMatch) -> Self {
        self.body = Some(body);
        self
    }
}

/// Expected request body, compared server-side using `matcher`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyMatch {
    pub matcher: MatcherType,
    pub value: String,
}

impl BodyMatch {
    pub fn new(matcher: MatcherType, value: impl Into<String>) -> Self {
        Self {
            matcher,
            value: value.into(),
        }
    }
}

/// Response section of a mock definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Smocker omits an empty body when listing mocks.
    #[serde(default)]
    pub body: String,
}

impl Response {
    /// JSON response with the given status.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// JSON response with status 200.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Body comparison strategy. Interpreted by the Smocker server only; see
/// <https://smocker.dev/technical-documentation/mock-definition.html>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatcherType {
    #[serde(rename = "ShouldEqualJSON")]
    ShouldEqualJson,
    ShouldEqual,
    ShouldNotEqual,
    ShouldResemble,
    ShouldNotResemble,
    ShouldContainSubstring,
    ShouldNotContainSubstring,
    ShouldStartWith,
    ShouldNotStartWith,
    ShouldEndWith,
    ShouldNotEndWith,
    ShouldMatch,
    ShouldNotMatch,
    ShouldBeEmpty,
    ShouldNotBeEmpty,
}

impl MatcherType {
    pub const ALL: [MatcherType; 15] = [
        MatcherType::ShouldEqualJson,
        MatcherType::ShouldEqual,
        MatcherType::ShouldNotEqual,
        MatcherType::ShouldResemble,
        MatcherType::ShouldNotResemble,
        MatcherType::ShouldContainSubstring,
        MatcherType::ShouldNotContainSubstring,
        MatcherType::ShouldStartWith,
        MatcherType::ShouldNotStartWith,
        MatcherType::ShouldEndWith,
        MatcherType::ShouldNotEndWith,
        MatcherType::ShouldMatch,
        MatcherType::ShouldNotMatch,
        MatcherType::ShouldBeEmpty,
        MatcherType::ShouldNotBeEmpty,
    ];

    /// Token sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            MatcherType::ShouldEqualJson => "ShouldEqualJSON",
            MatcherType::ShouldEqual => "ShouldEqual",
            MatcherType::ShouldNotEqual => "ShouldNotEqual",
            MatcherType::ShouldResemble => "ShouldResemble",
            MatcherType::ShouldNotResemble => "ShouldNotResemble",
            MatcherType::ShouldContainSubstring => "ShouldContainSubstring",
            MatcherType::ShouldNotContainSubstring => "ShouldNotContainSubstring",
            MatcherType::ShouldStartWith => "ShouldStartWith",
            MatcherType::ShouldNotStartWith => "ShouldNotStartWith",
            MatcherType::ShouldEndWith => "ShouldEndWith",
            MatcherType::ShouldNotEndWith => "ShouldNotEndWith",
            MatcherType::ShouldMatch => "ShouldMatch",
            MatcherType::ShouldNotMatch => "ShouldNotMatch",
            MatcherType::ShouldBeEmpty => "ShouldBeEmpty",
            MatcherType::ShouldNotBeEmpty => "ShouldNotBeEmpty",
        }
    }
}

impl fmt::Display for MatcherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A server-side session as returned by `POST /sessions` and `GET /sessions`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `GET /version`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Version {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Acknowledgment returned by `POST /mocks`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MocksAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
