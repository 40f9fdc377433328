//! Typed client for the Smocker admin API.
//!
//! # Overview
//! `SmockerClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. `Smocker` pairs it with a
//! `Transport` to expose the `SmockerApi` operations as plain method calls.
//!
//! # Design
//! - Every operation maps to exactly one REST endpoint and one round trip.
//! - The client holds only its base URL and transport; session state lives on
//!   the Smocker server.
//! - Defaults (`DEFAULT_SESSION_NAME`, `DEFAULT_RESET`) are constants applied
//!   explicitly at call sites.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::{Smocker, SmockerApi};
pub use client::SmockerClient;
pub use config::SmockerConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    BodyMatch, MatcherType, Mock, MocksAck, Request, Response, Session, Version, DEFAULT_RESET,
    DEFAULT_SESSION_NAME,
};
