//! Client core for the employee directory API.
//!
//! # Overview
//! Talks to a remote `/employee` REST resource and keeps an observable,
//! in-memory cache of its contents for any number of views.
//!
//! # Design
//! - `EmployeeClient` is stateless: it builds `HttpRequest` values and
//!   parses `HttpResponse` values (host-does-IO pattern). A `Transport`
//!   performs the round-trip; `EmployeeApi` joins the two.
//! - `EmployeeStore` is the one place employee state lives. It validates
//!   writes locally, calls the API and publishes immutable `Snapshot`s
//!   through a `tokio::sync::watch` channel.
//! - Saved and unsaved employees are distinct types (`Employee`,
//!   `EmployeeDraft`); `EmployeeRecord` chooses between them at the API
//!   boundary.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod route;
pub mod store;
pub mod transport;
pub mod types;
pub mod validation;

pub use api::EmployeeApi;
pub use client::EmployeeClient;
pub use config::ApiConfig;
pub use error::{ApiError, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use route::Route;
pub use store::{EmployeeStore, Snapshot};
pub use transport::{Transport, UreqTransport};
pub use types::{Address, Employee, EmployeeDraft, EmployeeId, EmployeeRecord};
pub use validation::{FieldError, ValidationErrors};
