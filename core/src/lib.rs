//! Synchronous client core for the customers ("clientes") API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that,
//! `CustomerSession` keeps the state of a customers screen: the cached list,
//! search by id, the add/edit form, and delete confirmation.
//!
//! # Design
//! - `CustomerClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - The host plugs its HTTP stack in through the `Transport` trait.
//! - After every successful mutation the session refetches the whole list;
//!   the last refresh wins.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;

pub use client::CustomerClient;
pub use config::{ClientConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, LoggingConfig};
pub use error::{ApiError, SessionError, TransportError, ValidationError};
pub use form::{CustomerForm, FormMode};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{
    CustomerSession, DeleteConfirmation, Notice, RefreshIndicator, SearchMessage, SearchState,
};
pub use transport::Transport;
pub use types::{Customer, CustomerId, CustomerInput};
