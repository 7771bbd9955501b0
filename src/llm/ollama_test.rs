use super::*;

#[test]
fn ndjson_response_field_is_text() {
    let line = r#"{"model":"llama3","created_at":"2024-01-01T00:00:00Z","response":"Hello","done":false}"#;
    assert_eq!(parse_ndjson_line(line), LineEvent::Text("Hello".into()));
}

#[test]
fn ndjson_final_line_ends_stream() {
    let line = r#"{"model":"llama3","response":"","done":true,"total_duration":123}"#;
    assert_eq!(parse_ndjson_line(line), LineEvent::Done);
}

#[test]
fn ndjson_empty_and_malformed_lines_are_skipped() {
    assert_eq!(parse_ndjson_line(""), LineEvent::Skip);
    assert_eq!(parse_ndjson_line("   "), LineEvent::Skip);
    assert_eq!(parse_ndjson_line("{oops"), LineEvent::Skip);
    assert_eq!(parse_ndjson_line(r#"{"response":"","done":false}"#), LineEvent::Skip);
}

#[test]
fn request_body_carries_sampling_options() {
    let sampling = SamplingOptions::default();
    let body = GenerateRequest {
        model: "llama3",
        prompt: "Answer briefly: rust",
        stream: true,
        options: GenerateOptions {
            num_predict: 200,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            repeat_penalty: sampling.repeat_penalty,
        },
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["model"], "llama3");
    assert_eq!(json["stream"], true);
    assert_eq!(json["options"]["num_predict"], 200);
    assert!(json["options"]["top_p"].is_number());
}
