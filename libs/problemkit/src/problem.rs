//! RFC 7807 Problem Details (pure data model, no HTTP framework dependencies)

use std::collections::BTreeMap;

use http::StatusCode;
use serde_json::Value;

/// Content type for Problem Details as per RFC 7807.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Reserved type URI meaning "no specific problem type was given".
///
/// Process-wide constant; a `Problem` whose type equals this value omits the
/// `type` member from its serialization.
pub const ABOUT_BLANK: &str = "about:blank";

/// RFC 7807 Problem Details for HTTP APIs.
///
/// Represents one occurrence of an error condition in an HTTP response. The
/// problem type is fixed at construction; every other member stays mutable
/// until the value is serialized.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Problem {
    /// A URI reference that identifies the problem type, `about:blank` when
    /// no specific type was given.
    pub(crate) type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: Option<String>,
    /// The HTTP status code for this occurrence of the problem.
    /// Must match the status code of the surrounding response.
    /// Serializes as a bare u16.
    pub status: Option<StatusCode>,
    /// A human-readable explanation specific to this occurrence of the problem.
    pub detail: Option<String>,
    /// A URI reference that identifies the specific occurrence of the problem.
    pub instance: Option<String>,
    /// Extension members for this problem type, serialized as siblings of the
    /// named members. Extension members are namespaced by [`Problem::type_url`]:
    /// they belong to the problem type, not to the occurrence.
    pub extensions: BTreeMap<String, Value>,
}

impl Problem {
    /// Create a new Problem with the default `about:blank` type.
    pub fn new() -> Self {
        Self::of_type(ABOUT_BLANK)
    }

    /// Create a new Problem with the given problem type URI.
    pub fn of_type(type_url: impl Into<String>) -> Self {
        Self {
            type_url: type_url.into(),
            title: None,
            status: None,
            detail: None,
            instance: None,
            extensions: BTreeMap::new(),
        }
    }

    /// Create a new Problem for the given status code, with the title filled
    /// in from the status code's canonical reason phrase.
    pub fn from_status(status: StatusCode) -> Self {
        let mut problem = Self::new().with_status(status);
        problem.title = status.canonical_reason().map(ToOwned::to_owned);
        problem
    }

    /// The URI reference identifying the problem type.
    #[must_use]
    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    /// Whether the `type` member should be written to the serialization.
    ///
    /// True iff the type is not the `about:blank` sentinel. The codec
    /// consults this predicate rather than hard-coding the rule, so
    /// alternative codecs can reuse the entity unchanged.
    #[must_use]
    pub fn should_serialize_type(&self) -> bool {
        self.type_url != ABOUT_BLANK
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = Some(uri.into());
        self
    }

    /// Add a single extension member.
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// Replace the extension members with an initial mapping.
    pub fn with_extensions(mut self, extensions: BTreeMap<String, Value>) -> Self {
        self.extensions = extensions;
        self
    }
}

impl Default for Problem {
    fn default() -> Self {
        Self::new()
    }
}

// Convenience constructors for the common error statuses.

pub fn bad_request(detail: impl Into<String>) -> Problem {
    Problem::from_status(StatusCode::BAD_REQUEST).with_detail(detail)
}

pub fn not_found(detail: impl Into<String>) -> Problem {
    Problem::from_status(StatusCode::NOT_FOUND).with_detail(detail)
}

pub fn conflict(detail: impl Into<String>) -> Problem {
    Problem::from_status(StatusCode::CONFLICT).with_detail(detail)
}

pub fn internal_error(detail: impl Into<String>) -> Problem {
    Problem::from_status(StatusCode::INTERNAL_SERVER_ERROR).with_detail(detail)
}

/// Axum integration: make Problem directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Problem {
    fn into_response(self) -> axum::response::Response {
        use axum::http::HeaderValue;

        let status = self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}
