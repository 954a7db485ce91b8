//! RFC 7807 Problem Details for HTTP APIs
//!
//! This crate provides the pure data model for Problem Details, with no
//! dependencies on HTTP frameworks. It includes:
//! - The `Problem` entity with its `about:blank` default type
//! - A JSON codec that hoists extension members to the top-level object
//! - Optional `axum` integration (`IntoResponse`), feature-gated
//! - Optional `utoipa` schema with a documented example payload, feature-gated
//!
//! # Example
//!
//! ```
//! use http::StatusCode;
//! use problemkit::Problem;
//!
//! let problem = Problem::of_type("http://example.invalid/problems/invalid-order-id")
//!     .with_title("Invalid Order ID")
//!     .with_status(StatusCode::BAD_REQUEST)
//!     .with_detail("An Order ID must be non-negative.")
//!     .with_extension("id", -42i64);
//!
//! let json = serde_json::to_string(&problem)?;
//! assert!(json.contains("\"id\":-42"));
//! # Ok::<(), serde_json::Error>(())
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod codec;
pub mod problem;

#[cfg(feature = "utoipa")]
mod schema;

pub use problem::{
    ABOUT_BLANK, APPLICATION_PROBLEM_JSON, Problem, bad_request, conflict, internal_error,
    not_found,
};
