//! Output formatters for JSON response bodies
//!
//! A formatter advertises one media type, decides applicability from the
//! candidate value's declared type, and writes the serialized bytes to the
//! response stream. Declining a value is a normal negotiation outcome, not an
//! error; the registry simply asks the next formatter.

use std::any::Any;
use std::io;
use std::sync::Arc;

use problemkit::{APPLICATION_PROBLEM_JSON, Problem};
use thiserror::Error;

use crate::buffer::BufPool;

/// Media type served by the generic JSON formatter.
pub const APPLICATION_JSON: &str = "application/json";

/// Serializer settings shared by the JSON formatters.
#[derive(Debug, Clone, Default)]
pub struct JsonSettings {
    /// Pretty-print response bodies. Off by default.
    pub pretty: bool,
}

/// A type-erased candidate response payload.
///
/// Blanket-implemented for every serializable type, so handlers can pass
/// their response values straight to the formatter pipeline.
pub trait ResponseValue: Send + Sync {
    /// The payload as `Any`, for declared-type applicability checks.
    fn as_any(&self) -> &dyn Any;

    /// Write the payload as JSON to `out`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when serialization or the
    /// write to `out` fails.
    fn write_json(&self, out: &mut dyn io::Write, pretty: bool) -> Result<(), serde_json::Error>;
}

impl<T> ResponseValue for T
where
    T: serde::Serialize + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn write_json(&self, out: &mut dyn io::Write, pretty: bool) -> Result<(), serde_json::Error> {
        if pretty {
            serde_json::to_writer_pretty(out, self)
        } else {
            serde_json::to_writer(out, self)
        }
    }
}

/// Failure writing a response body.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The formatter was handed a value it declared itself inapplicable to.
    #[error("formatter does not apply to this value")]
    Unsupported,

    /// Serialization failed.
    #[error("failed to serialize response body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The response stream rejected the bytes.
    #[error("failed to write response body: {0}")]
    Io(#[from] io::Error),
}

/// One candidate formatter in a content-negotiating response pipeline.
pub trait OutputFormatter: Send + Sync {
    /// The single media type this formatter produces.
    fn media_type(&self) -> &'static str;

    /// Whether this formatter applies to the given response value.
    fn can_write(&self, value: &dyn ResponseValue) -> bool;

    /// Serialize `value` and write the bytes to `out`.
    ///
    /// # Errors
    ///
    /// [`WriteError::Unsupported`] when `value` fails [`Self::can_write`],
    /// otherwise serialization and I/O failures.
    fn write(&self, value: &dyn ResponseValue, out: &mut dyn io::Write) -> Result<(), WriteError>;
}

fn write_pooled(
    pool: &Arc<BufPool>,
    settings: &JsonSettings,
    media_type: &'static str,
    value: &dyn ResponseValue,
    out: &mut dyn io::Write,
) -> Result<(), WriteError> {
    let mut buf = pool.checkout();
    value.write_json(&mut *buf, settings.pretty)?;
    out.write_all(&buf)?;
    tracing::trace!(media_type, bytes = buf.len(), "wrote response body");
    Ok(())
}

/// The generic JSON formatter: applies to any serializable value.
pub struct JsonOutputFormatter {
    settings: JsonSettings,
    pool: Arc<BufPool>,
}

impl JsonOutputFormatter {
    #[must_use]
    pub fn new(settings: JsonSettings, pool: Arc<BufPool>) -> Self {
        Self { settings, pool }
    }
}

impl OutputFormatter for JsonOutputFormatter {
    fn media_type(&self) -> &'static str {
        APPLICATION_JSON
    }

    fn can_write(&self, _value: &dyn ResponseValue) -> bool {
        true
    }

    fn write(&self, value: &dyn ResponseValue, out: &mut dyn io::Write) -> Result<(), WriteError> {
        write_pooled(&self.pool, &self.settings, APPLICATION_JSON, value, out)
    }
}

/// The `application/problem+json` formatter.
///
/// Applies only when the value's declared type is exactly [`Problem`], never
/// to arbitrary JSON payloads, even ones with compatible field names.
pub struct ProblemJsonOutputFormatter {
    settings: JsonSettings,
    pool: Arc<BufPool>,
}

impl ProblemJsonOutputFormatter {
    #[must_use]
    pub fn new(settings: JsonSettings, pool: Arc<BufPool>) -> Self {
        Self { settings, pool }
    }
}

impl OutputFormatter for ProblemJsonOutputFormatter {
    fn media_type(&self) -> &'static str {
        APPLICATION_PROBLEM_JSON
    }

    fn can_write(&self, value: &dyn ResponseValue) -> bool {
        value.as_any().is::<Problem>()
    }

    fn write(&self, value: &dyn ResponseValue, out: &mut dyn io::Write) -> Result<(), WriteError> {
        if !self.can_write(value) {
            return Err(WriteError::Unsupported);
        }
        write_pooled(
            &self.pool,
            &self.settings,
            APPLICATION_PROBLEM_JSON,
            value,
            out,
        )
    }
}
