// mongosan-core/tests/request_tests.rs
use std::sync::{Arc, Mutex};

use anyhow::Result;
use serde_json::{json, Value};
use test_log::test;

use mongosan_core::{
    JsonRequest, MongosanError, RequestField, RequestLike, RequestSanitizer, SanitizeOptions,
};

fn sample_request() -> JsonRequest {
    JsonRequest {
        body: Some(json!({ "username": { "$ne": null }, "password": "hunter2" })),
        query: Some(json!({ "sort": "name" })),
        params: Some(json!({ "id": "$where" })),
        headers: Some(json!({ "x-forwarded-for": "10.0.0.1" })),
        ..JsonRequest::default()
    }
}

/// Records the fields reported through `on_sanitize`.
fn recording_sanitizer(
    options: &SanitizeOptions,
) -> (RequestSanitizer, Arc<Mutex<Vec<RequestField>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sanitizer = RequestSanitizer::new(options).on_sanitize(move |field| {
        sink.lock().unwrap().push(field);
    });
    (sanitizer, seen)
}

#[test]
fn test_sanitizes_every_field_by_default() -> Result<()> {
    let mut request = sample_request();
    let (sanitizer, seen) = recording_sanitizer(&SanitizeOptions::default());

    let modified = sanitizer.sanitize_request(&mut request)?;

    assert_eq!(modified, vec![RequestField::Body, RequestField::Params, RequestField::Headers]);
    assert_eq!(*seen.lock().unwrap(), modified);
    assert_eq!(
        request.sanitized_body,
        json!({ "username": { "_ne": null }, "password": "hunter2" })
    );
    assert_eq!(request.sanitized_query, json!({ "sort": "name" }));
    assert_eq!(request.sanitized_params, json!({ "id": "_where" }));
    assert_eq!(request.sanitized_headers, json!({ "x-forwarded-for": "10_0_0_1" }));
    Ok(())
}

#[test]
fn test_original_fields_are_never_overwritten() -> Result<()> {
    let mut request = sample_request();
    let before = sample_request();

    RequestSanitizer::new(&SanitizeOptions::default()).sanitize_request(&mut request)?;

    assert_eq!(request.body, before.body);
    assert_eq!(request.query, before.query);
    assert_eq!(request.params, before.params);
    assert_eq!(request.headers, before.headers);
    Ok(())
}

#[test]
fn test_unselected_and_missing_fields_get_empty_objects() -> Result<()> {
    let mut request = JsonRequest {
        body: Some(json!({ "$gt": 1 })),
        query: Some(json!({ "$lt": 2 })),
        ..JsonRequest::default()
    };
    let options = SanitizeOptions {
        fields: vec![RequestField::Body],
        ..SanitizeOptions::default()
    };

    let modified = RequestSanitizer::new(&options).sanitize_request(&mut request)?;

    assert_eq!(modified, vec![RequestField::Body]);
    assert_eq!(request.sanitized_body, json!({ "_gt": 1 }));
    assert_eq!(request.sanitized_query, json!({}));
    assert_eq!(request.sanitized_params, json!({}));
    assert_eq!(request.sanitized_headers, json!({}));
    Ok(())
}

#[test]
fn test_empty_and_scalar_fields_are_not_processed() -> Result<()> {
    let mut request = JsonRequest {
        body: Some(json!("$raw.string")),
        query: Some(json!({})),
        params: Some(json!([])),
        ..JsonRequest::default()
    };
    let (sanitizer, seen) = recording_sanitizer(&SanitizeOptions::default());

    let modified = sanitizer.sanitize_request(&mut request)?;

    assert!(modified.is_empty());
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(request.sanitized_body, json!({}));
    assert_eq!(request.sanitized_params, json!({}));
    Ok(())
}

#[test]
fn test_dry_run_reports_without_rewriting() -> Result<()> {
    let mut request = sample_request();
    let options = SanitizeOptions {
        dry_run: true,
        ..SanitizeOptions::default()
    };
    let (sanitizer, seen) = recording_sanitizer(&options);

    sanitizer.sanitize_request(&mut request)?;

    assert_eq!(seen.lock().unwrap().len(), 3);
    assert_eq!(Some(&request.sanitized_body), request.body.as_ref());
    assert_eq!(Some(&request.sanitized_params), request.params.as_ref());
    Ok(())
}

#[test]
fn test_allow_dots_keeps_header_values() -> Result<()> {
    let mut request = sample_request();
    let options = SanitizeOptions {
        allow_dots: true,
        ..SanitizeOptions::default()
    };

    let modified = RequestSanitizer::new(&options).sanitize_request(&mut request)?;

    assert_eq!(modified, vec![RequestField::Body, RequestField::Params]);
    assert_eq!(request.sanitized_headers, json!({ "x-forwarded-for": "10.0.0.1" }));
    Ok(())
}

#[test]
fn test_depth_limit_rejects_deep_fields() {
    let mut request = JsonRequest {
        body: Some(json!({ "a": { "b": { "c": { "$d": 1 } } } })),
        ..JsonRequest::default()
    };
    let options = SanitizeOptions {
        max_depth: Some(3),
        ..SanitizeOptions::default()
    };

    let err = RequestSanitizer::new(&options)
        .sanitize_request(&mut request)
        .unwrap_err();

    assert!(matches!(err, MongosanError::DepthLimitExceeded { limit: 3 }));
    assert_eq!(request.sanitized_body, json!({}));
}

/// A request type owned by some other framework, wired in through the trait.
#[derive(Default)]
struct FormRequest {
    form: Option<Value>,
    clean_form: Option<Value>,
}

impl RequestLike for FormRequest {
    fn field(&self, field: RequestField) -> Option<&Value> {
        match field {
            RequestField::Body => self.form.as_ref(),
            _ => None,
        }
    }

    fn set_sanitized(&mut self, field: RequestField, value: Value) {
        if field == RequestField::Body {
            self.clean_form = Some(value);
        }
    }
}

#[test]
fn test_custom_request_types_use_the_trait() -> Result<()> {
    let mut request = FormRequest {
        form: Some(json!({ "email": { "$regex": ".*" }, "name": "plain" })),
        ..FormRequest::default()
    };

    let sanitizer = RequestSanitizer::new(&SanitizeOptions::default());
    let modified = sanitizer.sanitize_request(&mut request)?;

    assert_eq!(modified, vec![RequestField::Body]);
    // Only `.` is forbidden in ".*"; the `*` survives.
    assert_eq!(
        request.clean_form,
        Some(json!({ "email": { "_regex": "_*" }, "name": "plain" }))
    );
    assert_eq!(request.form, Some(json!({ "email": { "$regex": ".*" }, "name": "plain" })));
    Ok(())
}

#[test]
fn test_json_request_deserializes_with_missing_fields() -> Result<()> {
    let mut request: JsonRequest = serde_json::from_value(json!({ "query": { "q.x": 1 } }))?;
    assert!(request.body.is_none());

    RequestSanitizer::new(&SanitizeOptions::default()).sanitize_request(&mut request)?;

    let rendered = serde_json::to_value(&request)?;
    assert_eq!(rendered["sanitized_query"], json!({ "q_x": 1 }));
    assert_eq!(rendered["sanitized_body"], json!({}));
    assert!(rendered.get("body").is_none());
    Ok(())
}
