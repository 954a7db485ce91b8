//! Output-formatter pipeline integration for `problemkit`
//!
//! This crate adapts the Problem JSON codec to a content-negotiating HTTP
//! response pipeline:
//! - A type-erased [`ResponseValue`] for candidate response payloads
//! - The [`OutputFormatter`] trait and two implementations: the generic JSON
//!   formatter and the `application/problem+json` formatter, which applies
//!   only when the declared response type is exactly [`problemkit::Problem`]
//! - An ordered, extensible [`OutputFormatters`] registry with
//!   first-applicable-wins selection
//! - Fail-fast registration via [`ProblemJsonSetup`]
//! - A reusable output [`BufPool`], safe for concurrent checkout/return
//!
//! # Example
//!
//! ```
//! use problemkit::bad_request;
//! use problemkit_http::{BufPool, JsonSettings, OutputFormatters, ProblemJsonSetup};
//!
//! let mut formatters = OutputFormatters::new();
//! ProblemJsonSetup::new()
//!     .serializer_settings(JsonSettings::default())
//!     .buffer_pool(BufPool::new())
//!     .register(&mut formatters)?;
//!
//! let problem = bad_request("An Order ID must be non-negative.");
//! let formatter = formatters
//!     .select(&problem, "application/problem+json")
//!     .ok_or("no formatter applied")?;
//!
//! let mut body = Vec::new();
//! formatter.write(&problem, &mut body)?;
//! assert!(body.starts_with(b"{"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod buffer;
mod formatter;
mod registry;
mod setup;

pub use buffer::{BufPool, PooledBuf};
pub use formatter::{
    APPLICATION_JSON, JsonOutputFormatter, JsonSettings, OutputFormatter,
    ProblemJsonOutputFormatter, ResponseValue, WriteError,
};
pub use registry::OutputFormatters;
pub use setup::{ProblemJsonSetup, SetupError};

pub use problemkit::APPLICATION_PROBLEM_JSON;
