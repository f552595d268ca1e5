//! Request helpers against a live container.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::io::Write;

use common::{EchoedBody, EchoedPart, Greet, Greeting, TestFixture};
use pretty_assertions::assert_eq;
use rest_harness::{
    DomainError, Entity, Form, HarnessError, ParamValue, RequestParams, TestHarness,
};

fn harness() -> TestHarness {
    TestHarness::set_up(&TestFixture::new()).unwrap()
}

#[test]
fn test_get_with_keeps_parameter_order() {
    let harness = harness();
    let params = RequestParams::new().with("a", "1").with("b", "2");

    let response = harness.get_with("echo/query", &params).unwrap();

    assert_eq!(response.text(), "a=1&b=2");
}

#[test]
fn test_get_with_skips_null_values() {
    let harness = harness();
    let params = RequestParams::new()
        .with("a", "1")
        .with("skip", ParamValue::Null)
        .with("b", "two words");

    let response = harness.get_with("echo/query", &params).unwrap();

    assert_eq!(response.text(), "a=1&b=two+words");
}

#[test]
fn test_target_composes_path_query_and_headers() {
    let harness = harness();
    let target = harness
        .target("echo")
        .unwrap()
        .path("query")
        .query_param("page", 2)
        .header("x-trace", "abc");

    assert_eq!(
        target.url().as_str(),
        format!("{}echo/query?page=2", harness.base_uri())
    );
    assert_eq!(target.get().unwrap().text(), "page=2");
}

#[test]
fn test_method_by_name() {
    let harness = harness();

    let response = harness
        .target("echo/method")
        .unwrap()
        .method("put", Some(Entity::text("replacement")))
        .unwrap();

    assert_eq!(response.text(), "PUT");
}

#[test]
fn test_unknown_method_name_is_rejected() {
    let harness = harness();

    let result = harness.target("echo/method").unwrap().method("BREW", None);

    assert!(matches!(
        result,
        Err(HarnessError::Domain(DomainError::UnsupportedMethod(name))) if name == "BREW"
    ));
}

#[test]
fn test_post_form_map_sends_urlencoded_form() {
    let harness = harness();

    let response = harness.post_form_map("echo/body", [("k", "v")]).unwrap();

    let echoed: EchoedBody = response.json().unwrap();
    assert_eq!(
        echoed,
        EchoedBody {
            content_type: "application/x-www-form-urlencoded".to_string(),
            body: "k=v".to_string(),
        }
    );
}

#[test]
fn test_post_form_keeps_field_order() {
    let harness = harness();
    let form = Form::new().param("first", "1").param("second", "a&b");

    let echoed: EchoedBody = harness.post_form("echo/body", form).unwrap().json().unwrap();

    assert_eq!(echoed.body, "first=1&second=a%26b");
}

#[test]
fn test_post_entity_uses_its_media_type() {
    let harness = harness();

    let echoed: EchoedBody = harness
        .post("echo/body", Entity::text("plain words"))
        .unwrap()
        .json()
        .unwrap();

    assert!(echoed.content_type.starts_with("text/plain"));
    assert_eq!(echoed.body, "plain words");
}

#[test]
fn test_post_multipart_sends_files_and_fields() {
    let harness = harness();
    let mut upload = tempfile::Builder::new()
        .prefix("upload")
        .suffix(".txt")
        .tempfile()
        .unwrap();
    write!(upload, "hello").unwrap();
    let params = RequestParams::new()
        .with("file", upload.path())
        .with("name", "x")
        .with("skip", ParamValue::Null);

    let parts: Vec<EchoedPart> = harness
        .post_multipart("echo/multipart", &params)
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].name, "file");
    assert!(
        parts[0]
            .file_name
            .as_deref()
            .is_some_and(|name| name.ends_with(".txt"))
    );
    assert_eq!(parts[0].content, "hello");
    assert_eq!(
        parts[1],
        EchoedPart {
            name: "name".to_string(),
            file_name: None,
            content: "x".to_string(),
        }
    );
}

#[test]
fn test_post_multipart_with_missing_file_fails() {
    let harness = harness();
    let params = RequestParams::new().with("file", std::path::Path::new("/no/such/upload.bin"));

    let result = harness.post_multipart("echo/multipart", &params);

    assert!(result.is_err());
}

#[test]
fn test_post_json_as_decodes_ok_response() {
    let harness = harness();

    let greeting: Greeting = harness
        .post_json_as(
            "greet",
            &Greet {
                name: "ann".to_string(),
            },
        )
        .unwrap();

    assert_eq!(greeting.message, "hello, ann");
}

#[test]
fn test_post_json_returns_raw_response() {
    let harness = harness();

    let response = harness
        .post_json(
            "greet/broken",
            &Greet {
                name: "ann".to_string(),
            },
        )
        .unwrap();

    assert_eq!(response.status(), 500);
}

#[test]
#[should_panic(expected = "HTTP status")]
fn test_post_json_as_fails_on_non_ok_status() {
    let harness = harness();

    let _: Greeting = harness
        .post_json_as(
            "greet/broken",
            &Greet {
                name: "ann".to_string(),
            },
        )
        .unwrap();
}
