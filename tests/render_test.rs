#[path = "common/mod.rs"]
mod common;
use common::{SAMPLE_PAYLOAD, SubticketsTest};

// ============================================================================
// Render command tests
// ============================================================================

#[test]
fn test_render_basic() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", SAMPLE_PAYLOAD);

    let output = st.run_success(&["render", "--payload", &payload, "--path", "/trac/ticket/4"]);

    assert!(output.starts_with(r#"<div class="subtickets-section">"#));
    assert!(output.contains(r#"<table class="listing subtickets">"#));
    assert!(output.contains(r#"<a href="/trac/ticket/6">#6</a>"#));
    assert!(output.contains(r#"<input type="hidden" name="parents" value="4">"#));
    assert!(output.contains(r#"<input type="hidden" name="component" value="core">"#));
    assert!(output.contains(r#"<input type="hidden" name="milestone" value="1.0">"#));
}

#[test]
fn test_render_rows_follow_input_order() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", SAMPLE_PAYLOAD);

    let output = st.run_success(&["render", "--payload", &payload, "--path", "/ticket/4"]);

    let first = output.find("#5").unwrap();
    let second = output.find("#6").unwrap();
    let third = output.find("#7").unwrap();
    assert!(first < second && second < third);
    assert_eq!(output.matches(r#"class="indent-level""#).count(), 3);
}

#[test]
fn test_render_link_mode_override() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", SAMPLE_PAYLOAD);

    let output = st.run_success(&[
        "render",
        "--payload",
        &payload,
        "--path",
        "/trac/ticket/4",
        "--mode",
        "link",
    ]);

    assert!(output.contains(r#"href="/trac/newticket?parents=4""#));
    assert!(!output.contains("<form"));
    assert!(!output.contains("component"));
}

#[test]
fn test_render_columns_override() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", SAMPLE_PAYLOAD);

    let output = st.run_success(&[
        "render",
        "--payload",
        &payload,
        "--path",
        "/ticket/4",
        "--columns",
        "summary,type",
    ]);

    assert!(output.contains("<th>Summary</th><th>Type</th>"));
    assert!(!output.contains("<th>Ticket</th>"));
    assert!(output.contains("<td>defect</td>"));
}

#[test]
fn test_render_max_depth_override() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", SAMPLE_PAYLOAD);

    let output = st.run_success(&[
        "render",
        "--payload",
        &payload,
        "--path",
        "/ticket/4",
        "--max-depth",
        "1",
    ]);

    assert!(output.contains("#6"));
    assert!(!output.contains("#7"));
}

#[test]
fn test_render_from_stdin() {
    let st = SubticketsTest::new();

    let output = st.run_with_stdin(
        &["render", "--payload", "-", "--path", "/ticket/4"],
        SAMPLE_PAYLOAD,
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("subtickets-section"));
}

#[test]
fn test_render_empty_sequence_has_no_table() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", r#"{"tickets": []}"#);

    let output = st.run_success(&["render", "--payload", &payload, "--path", "/ticket/4"]);

    assert!(output.contains("<h3>Subtickets</h3>"));
    assert!(output.contains(r#"<input type="submit" value="New subticket">"#));
    assert!(!output.contains("<table"));
}

#[test]
fn test_render_not_a_ticket_page_is_silent() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", SAMPLE_PAYLOAD);

    let output = st.run_success(&["render", "--payload", &payload, "--path", "/wiki/Start"]);

    assert!(output.trim().is_empty());
}

#[test]
fn test_render_malformed_payload_is_silent() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", r#"{"tickets": "nope"}"#);

    let output = st.run_success(&["render", "--payload", &payload, "--path", "/ticket/4"]);

    assert!(output.trim().is_empty());
}

#[test]
fn test_render_unknown_mode_fails() {
    let st = SubticketsTest::new();
    let payload = st.write_file(
        "payload.json",
        r#"{"tickets": [], "affordance": {"mode": "bogus"}}"#,
    );

    let stderr = st.run_failure(&["render", "--payload", &payload, "--path", "/ticket/4"]);

    assert!(stderr.contains("unknown affordance mode 'bogus'"));
}

#[test]
fn test_render_unknown_mode_flag_rejected() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", SAMPLE_PAYLOAD);

    let stderr = st.run_failure(&[
        "render",
        "--payload",
        &payload,
        "--path",
        "/ticket/4",
        "--mode",
        "bogus",
    ]);

    assert!(stderr.contains("bogus"));
}

#[test]
fn test_render_json_output() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", SAMPLE_PAYLOAD);

    let output = st.run_success(&[
        "render",
        "--payload",
        &payload,
        "--path",
        "/ticket/4",
        "--json",
    ]);

    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["status"], "rendered");
    assert_eq!(json["rows"], 3);
    assert!(json["html"].as_str().unwrap().contains("subtickets-section"));
}

#[test]
fn test_render_json_skip_reason() {
    let st = SubticketsTest::new();
    let payload = st.write_file("payload.json", SAMPLE_PAYLOAD);

    let output = st.run_success(&[
        "render",
        "--payload",
        &payload,
        "--path",
        "/newticket",
        "--json",
    ]);

    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["status"], "skipped");
    assert_eq!(json["reason"], "missing-ticket-id");
}

#[test]
fn test_render_uses_config_defaults() {
    let st = SubticketsTest::new();
    st.write_config(
        r#"
add_style: link
types:
  defect:
    child_inherits: [component]
    table_columns: [owner]
"#,
    );
    let payload = st.write_file(
        "payload.json",
        r#"{
            "tickets": [{"id": 8, "summary": "s", "status": "new", "owner": "bob"}],
            "affordance": {"parent_type": "defect", "parent_fields": {"component": "ui"}}
        }"#,
    );

    let output = st.run_success(&["render", "--payload", &payload, "--path", "/ticket/4"]);

    assert!(output.contains("<th>Ticket</th><th>Summary</th><th>Owner</th>"));
    assert!(output.contains(r#"href="/newticket?parents=4""#));
    assert!(output.contains("<td>bob</td>"));
}

#[test]
fn test_render_missing_payload_file_fails() {
    let st = SubticketsTest::new();

    let stderr = st.run_failure(&["render", "--payload", "absent.json", "--path", "/ticket/4"]);

    assert!(stderr.contains("absent.json"));
}
