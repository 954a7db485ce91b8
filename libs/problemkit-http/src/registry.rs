//! Ordered collection of output formatters
//!
//! The registry owns the candidate formatters in registration order. `add`
//! only ever appends; existing entries are never removed or reordered.
//! Selection is first-applicable-wins over (accepted media type, declared
//! response type).

use std::sync::Arc;

use crate::formatter::{OutputFormatter, ResponseValue};

#[derive(Default)]
pub struct OutputFormatters {
    entries: Vec<Arc<dyn OutputFormatter>>,
}

impl OutputFormatters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a formatter. Existing formatters keep their position.
    pub fn add(&mut self, formatter: Arc<dyn OutputFormatter>) {
        tracing::debug!(
            media_type = formatter.media_type(),
            position = self.entries.len(),
            "registered output formatter"
        );
        self.entries.push(formatter);
    }

    /// Pick the first formatter whose media type satisfies `accept` and whose
    /// applicability predicate accepts `value`.
    ///
    /// `None` is the normal "no formatter applied" negotiation outcome.
    pub fn select(&self, value: &dyn ResponseValue, accept: &str) -> Option<&dyn OutputFormatter> {
        let selected = self
            .entries
            .iter()
            .find(|f| accepts(accept, f.media_type()) && f.can_write(value))
            .map(|f| &**f);
        tracing::trace!(
            accept,
            media_type = selected.map(|f| f.media_type()),
            "selected output formatter"
        );
        selected
    }

    /// Whether any registered formatter produces the given media type.
    #[must_use]
    pub fn contains_media_type(&self, media_type: &str) -> bool {
        self.entries.iter().any(|f| f.media_type() == media_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn OutputFormatter> {
        self.entries.iter().map(|f| &**f)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether an Accept header value admits the given media type.
///
/// Understands exact matches, `*/*` and `type/*` ranges; quality parameters
/// are ignored for ordering purposes (the registry order decides).
fn accepts(accept: &str, media_type: &str) -> bool {
    accept
        .split(',')
        .filter_map(|part| part.split(';').next())
        .map(str::trim)
        .any(|range| {
            if range == "*/*" || range == media_type {
                return true;
            }
            match (range.split_once('/'), media_type.split_once('/')) {
                (Some((main, "*")), Some((candidate, _))) => main == candidate,
                _ => false,
            }
        })
}
