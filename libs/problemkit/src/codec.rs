//! JSON codec for [`Problem`]
//!
//! Hand-written `Serialize`/`Deserialize` impls: the derive cannot express
//! the extension-hoisting rules below.
//!
//! - Named members (`type`, `title`, `status`, `detail`, `instance`) are
//!   written only when present; `type` is additionally omitted when it equals
//!   `about:blank` (the entity's [`Problem::should_serialize_type`] decides).
//! - Extension members are merged into the same top-level object as sibling
//!   keys, never nested under a sub-key.
//! - Extension keys are compared to the named members case-sensitively
//!   (ordinal policy). An extension keyed exactly `type`, `title`, `status`,
//!   `detail` or `instance` is never written: the named member wins the
//!   collision. A case variant such as `Type` is a distinct key.
//! - On input, anything that is not one of the five named keys lands in
//!   [`Problem::extensions`]; a missing `type` defaults back to `about:blank`.

use std::collections::BTreeMap;
use std::fmt;

use http::StatusCode;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::problem::{ABOUT_BLANK, Problem};

/// The five member names RFC 7807 reserves at the top level.
const RESERVED_KEYS: [&str; 5] = ["type", "title", "status", "detail", "instance"];

impl Serialize for Problem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if self.should_serialize_type() {
            map.serialize_entry("type", &self.type_url)?;
        }
        if let Some(title) = &self.title {
            map.serialize_entry("title", title)?;
        }
        if let Some(status) = self.status {
            map.serialize_entry("status", &status.as_u16())?;
        }
        if let Some(detail) = &self.detail {
            map.serialize_entry("detail", detail)?;
        }
        if let Some(instance) = &self.instance {
            map.serialize_entry("instance", instance)?;
        }
        for (key, value) in &self.extensions {
            // Ordinal comparison: `Type` is a distinct key and passes through.
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ProblemVisitor;

impl<'de> Visitor<'de> for ProblemVisitor {
    type Value = Problem;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an RFC 7807 problem details object")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Problem, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut type_url: Option<String> = None;
        let mut title: Option<String> = None;
        let mut status: Option<StatusCode> = None;
        let mut detail: Option<String> = None;
        let mut instance: Option<String> = None;
        let mut extensions: BTreeMap<String, Value> = BTreeMap::new();

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "type" => {
                    if type_url.is_some() {
                        return Err(de::Error::duplicate_field("type"));
                    }
                    type_url = access.next_value::<Option<String>>()?;
                }
                "title" => {
                    if title.is_some() {
                        return Err(de::Error::duplicate_field("title"));
                    }
                    title = access.next_value::<Option<String>>()?;
                }
                "status" => {
                    if status.is_some() {
                        return Err(de::Error::duplicate_field("status"));
                    }
                    status = access
                        .next_value::<Option<u16>>()?
                        .map(|code| StatusCode::from_u16(code).map_err(de::Error::custom))
                        .transpose()?;
                }
                "detail" => {
                    if detail.is_some() {
                        return Err(de::Error::duplicate_field("detail"));
                    }
                    detail = access.next_value::<Option<String>>()?;
                }
                "instance" => {
                    if instance.is_some() {
                        return Err(de::Error::duplicate_field("instance"));
                    }
                    instance = access.next_value::<Option<String>>()?;
                }
                _ => {
                    let value: Value = access.next_value()?;
                    extensions.insert(key, value);
                }
            }
        }

        Ok(Problem {
            type_url: type_url.unwrap_or_else(|| ABOUT_BLANK.to_owned()),
            title,
            status,
            detail,
            instance,
            extensions,
        })
    }
}

impl<'de> Deserialize<'de> for Problem {
    fn deserialize<D>(deserializer: D) -> Result<Problem, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ProblemVisitor)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::{Value, json};

    use crate::problem::{ABOUT_BLANK, Problem};
    use http::StatusCode;

    fn roundtrip(problem: &Problem) -> Problem {
        let json = serde_json::to_string(problem).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn about_blank_is_not_written() {
        for problem in [Problem::new(), Problem::of_type(ABOUT_BLANK)] {
            let value: Value = serde_json::to_value(&problem).unwrap();
            let object = value.as_object().unwrap();
            assert!(!object.contains_key("type"));
            assert!(!object.keys().any(|k| k.eq_ignore_ascii_case("type")));
        }
    }

    #[test]
    fn type_survives_roundtrip() {
        let problem = Problem::of_type("http://example.invalid/problems/invalid-order-id");
        assert_eq!(roundtrip(&problem), problem);
    }

    #[test]
    fn type_is_implicitly_about_blank_after_roundtrip() {
        assert_eq!(roundtrip(&Problem::new()).type_url(), ABOUT_BLANK);
    }

    #[test]
    fn full_problem_roundtrips() {
        let problem = Problem::of_type("http://example.invalid/problems/invalid-order-id")
            .with_title("Invalid Order ID")
            .with_status(StatusCode::BAD_REQUEST)
            .with_detail("An Order ID must be non-negative.")
            .with_extension("id", -42i64);
        assert_eq!(roundtrip(&problem), problem);
    }

    #[test]
    fn extensions_are_hoisted_to_the_top_level() {
        let problem = Problem::new().with_extension("id", -42i64);
        let value: Value = serde_json::to_value(&problem).unwrap();
        assert_eq!(value, json!({ "id": -42 }));
        assert_eq!(value["id"].as_i64(), Some(-42));
    }

    #[test]
    fn integer_extensions_keep_64_bit_precision() {
        let problem = Problem::new()
            .with_extension("min", i64::MIN)
            .with_extension("max", u64::MAX);
        let back = roundtrip(&problem);
        assert_eq!(back.extensions["min"].as_i64(), Some(i64::MIN));
        assert_eq!(back.extensions["max"].as_u64(), Some(u64::MAX));
    }

    #[test]
    fn empty_object_deserializes_to_the_default_problem() {
        let problem: Problem = serde_json::from_str("{}").unwrap();
        assert_eq!(problem.type_url(), ABOUT_BLANK);
        assert_eq!(problem.title, None);
        assert_eq!(problem.status, None);
        assert_eq!(problem.detail, None);
        assert_eq!(problem.instance, None);
        assert!(problem.extensions.is_empty());
        assert_eq!(problem, Problem::new());
    }

    #[test]
    fn named_members_and_extensions_deserialize() {
        let problem: Problem = serde_json::from_value(json!({
            "type": "http://x/y",
            "title": "T",
            "status": 400,
            "detail": "D",
            "instance": "http://x/z",
            "custom": 7
        }))
        .unwrap();

        assert_eq!(problem.type_url(), "http://x/y");
        assert_eq!(problem.title.as_deref(), Some("T"));
        assert_eq!(problem.status, Some(StatusCode::BAD_REQUEST));
        assert_eq!(problem.detail.as_deref(), Some("D"));
        assert_eq!(problem.instance.as_deref(), Some("http://x/z"));
        assert_eq!(problem.extensions.len(), 1);
        assert_eq!(problem.extensions["custom"], json!(7));
    }

    #[test]
    fn reserved_extension_keys_lose_the_collision() {
        let problem = Problem::of_type("http://x/y")
            .with_detail("D")
            .with_extension("type", "http://evil/")
            .with_extension("detail", "shadowed")
            .with_extension("status", 999);
        let value: Value = serde_json::to_value(&problem).unwrap();
        assert_eq!(value, json!({ "type": "http://x/y", "detail": "D" }));
    }

    #[test]
    fn case_variant_extension_keys_are_distinct() {
        let problem = Problem::of_type("http://x/y").with_extension("Type", "not reserved");
        let value: Value = serde_json::to_value(&problem).unwrap();
        assert_eq!(
            value,
            json!({ "type": "http://x/y", "Type": "not reserved" })
        );

        let back: Problem = serde_json::from_value(value).unwrap();
        assert_eq!(back, problem);
    }

    #[test]
    fn null_named_members_read_as_absent() {
        let problem: Problem =
            serde_json::from_value(json!({ "type": null, "title": null, "status": null }))
                .unwrap();
        assert_eq!(problem.type_url(), ABOUT_BLANK);
        assert_eq!(problem.title, None);
        assert_eq!(problem.status, None);
    }

    #[test]
    fn duplicate_named_members_are_rejected() {
        let err = serde_json::from_str::<Problem>(r#"{"title":"a","title":"b"}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate field"));
    }

    #[test]
    fn out_of_range_status_is_rejected() {
        assert!(serde_json::from_value::<Problem>(json!({ "status": 31 })).is_err());
        assert!(serde_json::from_value::<Problem>(json!({ "status": 70000 })).is_err());
    }

    #[test]
    fn malformed_json_surfaces_a_parse_error() {
        assert!(serde_json::from_str::<Problem>("{").is_err());
        assert!(serde_json::from_str::<Problem>("[]").is_err());
        assert!(serde_json::from_str::<Problem>("null").is_err());
    }

    #[test]
    fn nested_extension_values_roundtrip() {
        let problem = Problem::new().with_extension(
            "invalid_params",
            json!([{ "name": "age", "reason": "must be a positive integer" }]),
        );
        assert_eq!(roundtrip(&problem), problem);
    }
}
