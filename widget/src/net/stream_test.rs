use super::*;
use futures::executor::block_on;
use futures::stream;

fn run(chunks: Vec<Result<Vec<u8>, StreamError>>) -> (Result<String, StreamError>, Vec<String>) {
    let mut seen = Vec::new();
    let result = block_on(collect_chunks(stream::iter(chunks), &mut |chunk: &str| seen.push(chunk.to_owned())));
    (result, seen)
}

#[test]
fn chunks_delivered_in_order_and_accumulated() {
    let (result, seen) = run(vec![Ok(b"Hi".to_vec()), Ok(b" there".to_vec())]);
    assert_eq!(result.unwrap(), "Hi there");
    assert_eq!(seen, vec!["Hi", " there"]);
}

#[test]
fn empty_body_resolves_to_empty_string() {
    let (result, seen) = run(Vec::new());
    assert_eq!(result.unwrap(), "");
    assert!(seen.is_empty());
}

#[test]
fn split_character_is_reassembled_before_delivery() {
    let (result, seen) = run(vec![Ok(b"r\xC3".to_vec()), Ok(b"\xA9sum\xC3\xA9".to_vec())]);
    assert_eq!(result.unwrap(), "résumé");
    assert_eq!(seen, vec!["r", "ésumé"]);
}

#[test]
fn empty_reads_are_not_delivered() {
    let (_, seen) = run(vec![Ok(Vec::new()), Ok(b"x".to_vec()), Ok(Vec::new())]);
    assert_eq!(seen, vec!["x"]);
}

#[test]
fn read_error_stops_after_delivered_text() {
    let (result, seen) = run(vec![
        Ok(b"partial".to_vec()),
        Err(StreamError::Read("network reset".into())),
        Ok(b"dropped".to_vec()),
    ]);
    assert_eq!(result, Err(StreamError::Read("network reset".into())));
    assert_eq!(seen, vec!["partial"]);
}

#[test]
fn error_messages_name_the_failure() {
    assert_eq!(StreamError::Status(503).to_string(), "server responded with status 503");
    assert_eq!(StreamError::Network("offline".into()).to_string(), "request failed: offline");
}
