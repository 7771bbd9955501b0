use super::*;
use futures::executor::block_on;

fn collect<S: Stream + Unpin>(stream: S) -> Vec<S::Item> {
    block_on(stream.collect::<Vec<_>>())
}

// =============================================================================
// LineBuffer
// =============================================================================

#[test]
fn push_returns_only_complete_lines() {
    let mut buf = LineBuffer::default();
    assert!(buf.push(b"data: {\"a\"").is_empty());
    assert_eq!(buf.push(b":1}\ndata: x"), vec!["data: {\"a\":1}".to_owned()]);
    assert_eq!(buf.finish(), Some("data: x".to_owned()));
    assert_eq!(buf.finish(), None);
}

#[test]
fn push_strips_crlf() {
    let mut buf = LineBuffer::default();
    assert_eq!(buf.push(b"one\r\ntwo\r\n"), vec!["one".to_owned(), "two".to_owned()]);
}

#[test]
fn push_keeps_empty_lines() {
    let mut buf = LineBuffer::default();
    assert_eq!(buf.push(b"a\n\nb\n"), vec!["a".to_owned(), String::new(), "b".to_owned()]);
}

#[test]
fn push_reassembles_split_utf8() {
    let mut buf = LineBuffer::default();
    let text = "héllo\n".as_bytes();
    // Split inside the two-byte 'é'.
    assert!(buf.push(&text[..2]).is_empty());
    assert_eq!(buf.push(&text[2..]), vec!["héllo".to_owned()]);
}

// =============================================================================
// into_lines
// =============================================================================

#[test]
fn into_lines_reframes_chunks_and_flushes_tail() {
    let chunks: Vec<Result<&'static [u8], String>> = vec![Ok(b"{\"response\":\"Hi\"}\n{\"resp".as_slice()), Ok(b"onse\":\"!\"}".as_slice())];
    let lines = collect(Box::pin(into_lines(futures::stream::iter(chunks))));
    let lines: Vec<String> = lines.into_iter().map(Result::unwrap).collect();
    assert_eq!(lines, vec!["{\"response\":\"Hi\"}", "{\"response\":\"!\"}"]);
}

#[test]
fn into_lines_surfaces_transport_error_and_stops() {
    let chunks: Vec<Result<&'static [u8], String>> =
        vec![Ok(b"first\n".as_slice()), Err("connection reset".to_owned()), Ok(b"never\n".as_slice())];
    let items = collect(Box::pin(into_lines(futures::stream::iter(chunks))));
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_deref().unwrap(), "first");
    assert!(matches!(&items[1], Err(LlmError::ApiRequest(msg)) if msg == "connection reset"));
}

// =============================================================================
// deltas
// =============================================================================

fn parse_test_line(line: &str) -> LineEvent {
    match line {
        "END" => LineEvent::Done,
        "" => LineEvent::Skip,
        other => LineEvent::Text(other.to_owned()),
    }
}

#[test]
fn deltas_forwards_text_and_stops_at_done() {
    let lines = futures::stream::iter(
        ["Hi", "", " there", "END", "ignored"]
            .into_iter()
            .map(|l| Ok::<_, LlmError>(l.to_owned())),
    );
    let out: Vec<String> = collect(deltas(lines, parse_test_line))
        .into_iter()
        .map(Result::unwrap)
        .collect();
    assert_eq!(out, vec!["Hi".to_owned(), " there".to_owned()]);
}

#[test]
fn deltas_passes_errors_through() {
    let lines = futures::stream::iter(vec![Ok("a".to_owned()), Err(LlmError::ApiRequest("boom".into()))]);
    let out = collect(deltas(lines, parse_test_line));
    assert_eq!(out.len(), 2);
    assert!(out[1].is_err());
}
