//! REST clients for the wallet backend.
//!
//! Two clients over one HTTP wrapper: [`UserApi`] for the authenticated user
//! surface (auth, wallet, points, deposits, withdrawals, transactions) and
//! [`AdminApi`] for the operations surface (dashboard overview, scanner and
//! sweep controls, withdrawal queue management). The wrapper normalizes the
//! backend's loose response envelope before payloads are deserialized.

pub mod admin;
pub mod error;
pub mod http;
pub mod user;

pub use admin::AdminApi;
pub use error::ApiError;
pub use http::HttpClient;
pub use user::{TransferPointsRequest, UserApi, WithdrawalConfirmRequest};
