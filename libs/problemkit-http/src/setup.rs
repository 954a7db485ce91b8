//! Registration of the problem+json formatter into a formatter pipeline
//!
//! One `register` call appends the `application/problem+json` formatter and,
//! when the pipeline has no generic JSON formatter yet, appends one after it.
//! Missing collaborators surface as [`SetupError`] at registration time, not
//! at first request.

use std::sync::Arc;

use thiserror::Error;

use crate::buffer::BufPool;
use crate::formatter::{
    APPLICATION_JSON, JsonOutputFormatter, JsonSettings, ProblemJsonOutputFormatter,
};
use crate::registry::OutputFormatters;

/// Startup-time configuration failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// No JSON serializer settings were supplied.
    #[error("problem+json formatter requires JSON serializer settings")]
    MissingSerializerSettings,

    /// No output buffer pool was supplied.
    #[error("problem+json formatter requires an output buffer pool")]
    MissingBufferPool,
}

/// Builder that wires the problem+json formatter into an [`OutputFormatters`]
/// collection.
///
/// Serializer settings and the output buffer pool are required collaborators;
/// registration fails fast when either is absent.
#[derive(Default)]
#[must_use]
pub struct ProblemJsonSetup {
    settings: Option<JsonSettings>,
    pool: Option<Arc<BufPool>>,
}

impl ProblemJsonSetup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serializer_settings(mut self, settings: JsonSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn buffer_pool(mut self, pool: Arc<BufPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Append the problem+json formatter (and a generic JSON formatter when
    /// the collection has none) without touching existing entries.
    ///
    /// # Errors
    ///
    /// [`SetupError`] when the serializer settings or the buffer pool were
    /// not supplied.
    pub fn register(self, formatters: &mut OutputFormatters) -> Result<(), SetupError> {
        let settings = self.settings.ok_or(SetupError::MissingSerializerSettings)?;
        let pool = self.pool.ok_or(SetupError::MissingBufferPool)?;

        formatters.add(Arc::new(ProblemJsonOutputFormatter::new(
            settings.clone(),
            Arc::clone(&pool),
        )));
        if !formatters.contains_media_type(APPLICATION_JSON) {
            formatters.add(Arc::new(JsonOutputFormatter::new(settings, pool)));
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use problemkit::APPLICATION_PROBLEM_JSON;

    #[test]
    fn registration_fails_fast_without_serializer_settings() {
        let mut formatters = OutputFormatters::new();
        let err = ProblemJsonSetup::new()
            .buffer_pool(BufPool::new())
            .register(&mut formatters)
            .unwrap_err();
        assert_eq!(err, SetupError::MissingSerializerSettings);
        assert!(formatters.is_empty());
    }

    #[test]
    fn registration_fails_fast_without_a_buffer_pool() {
        let mut formatters = OutputFormatters::new();
        let err = ProblemJsonSetup::new()
            .serializer_settings(JsonSettings::default())
            .register(&mut formatters)
            .unwrap_err();
        assert_eq!(err, SetupError::MissingBufferPool);
        assert!(formatters.is_empty());
    }

    #[test]
    fn registration_appends_problem_and_generic_json_formatters() {
        let mut formatters = OutputFormatters::new();
        ProblemJsonSetup::new()
            .serializer_settings(JsonSettings::default())
            .buffer_pool(BufPool::new())
            .register(&mut formatters)
            .unwrap();

        let order: Vec<_> = formatters.iter().map(|f| f.media_type()).collect();
        assert_eq!(order, [APPLICATION_PROBLEM_JSON, APPLICATION_JSON]);
    }

    #[test]
    fn registration_keeps_existing_formatters_in_place() {
        let pool = BufPool::new();
        let mut formatters = OutputFormatters::new();
        formatters.add(Arc::new(JsonOutputFormatter::new(
            JsonSettings::default(),
            Arc::clone(&pool),
        )));

        ProblemJsonSetup::new()
            .serializer_settings(JsonSettings::default())
            .buffer_pool(pool)
            .register(&mut formatters)
            .unwrap();

        // The pre-existing generic formatter stays first and is not duplicated.
        let order: Vec<_> = formatters.iter().map(|f| f.media_type()).collect();
        assert_eq!(order, [APPLICATION_JSON, APPLICATION_PROBLEM_JSON]);
    }
}
