//! Core data types for the wallet dashboard client.

pub mod account;
pub mod admin;
pub mod connection;
pub mod notification;
pub mod wallet;

pub use account::*;
pub use admin::*;
pub use connection::*;
pub use notification::*;
pub use wallet::*;
