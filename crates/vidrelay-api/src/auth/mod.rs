//! Caller credentials
//!
//! The relay holds no credentials of its own. Each request carries the
//! caller's OAuth access token, which is forwarded to the video host as-is.

pub mod bearer;

pub use bearer::{parse_authorization, Bearer, MISSING_TOKEN_MESSAGE};
