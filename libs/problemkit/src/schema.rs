//! OpenAPI schema for [`Problem`]
//!
//! Hand-written because the serde impls are hand-written too: extension
//! members surface as free-form additional properties, and the schema carries
//! one fixed example payload for documentation tooling.

use std::borrow::Cow;

use serde_json::json;
use utoipa::openapi::schema::{
    AdditionalProperties, ObjectBuilder, Schema, SchemaType, Type,
};
use utoipa::openapi::RefOr;

use crate::problem::Problem;

fn string_property(description: &str) -> Schema {
    Schema::Object(
        ObjectBuilder::new()
            .schema_type(SchemaType::Type(Type::String))
            .description(Some(description))
            .build(),
    )
}

impl utoipa::PartialSchema for Problem {
    fn schema() -> RefOr<Schema> {
        let status = Schema::Object(
            ObjectBuilder::new()
                .schema_type(SchemaType::Type(Type::Integer))
                .description(Some("An HTTP status code for this occurrence of the problem."))
                .build(),
        );

        RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .schema_type(SchemaType::Type(Type::Object))
                .description(Some("Represents an error in an HTTP response."))
                .property("type", string_property("An identifier of the problem type."))
                .property(
                    "title",
                    string_property("A short, human-readable summary of the problem type."),
                )
                .property("status", status)
                .property(
                    "detail",
                    string_property(
                        "A human-readable explanation specific to this occurrence of the problem.",
                    ),
                )
                .property(
                    "instance",
                    string_property("An identifier for this occurrence of the problem."),
                )
                .additional_properties(Some(AdditionalProperties::FreeForm(true)))
                .examples([json!({
                    "type": "http://example.invalid/problems/invalid-order-id",
                    "title": "Invalid Order ID",
                    "status": 400,
                    "detail": "An Order ID must be non-negative.",
                    "id": -42
                })])
                .build(),
        ))
    }
}

impl utoipa::ToSchema for Problem {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Problem")
    }
}
