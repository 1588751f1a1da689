//! Blocking client for the PetFriends pet-management API.
//!
//! # Overview
//! `PetFriendsClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO). `PetFriends` pairs it
//! with a `Transport` and exposes one method per API operation, each
//! returning the status code and body as data.
//!
//! # Design
//! - Non-2xx statuses are results, not errors; the status code is the oracle
//!   the end-to-end suite asserts on.
//! - `ApiError` covers transport failures and unreadable photo files only.
//! - DTOs are defined independently from the mock-server crate; the
//!   integration suite catches schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod multipart;
pub mod response;
pub mod settings;
pub mod transport;
pub mod types;

pub use api::PetFriends;
pub use client::PetFriendsClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::{ApiResponse, ResponseBody};
pub use settings::{Settings, SettingsError};
pub use transport::{Transport, UreqTransport};
pub use types::{ApiKey, Credentials, NewPet, Pet, PetFilter, PetList, PetPhoto, PetUpdate};
