use atelier_client::{decode_text_stream, ChatStream, ClientError};
use futures::{stream, StreamExt};

fn ok_chunk(bytes: &[u8]) -> Result<Vec<u8>, ClientError> {
    Ok(bytes.to_vec())
}

#[tokio::test]
async fn test_fragments_arrive_in_chunk_order() {
    let chunks = vec![ok_chunk(b"Hello"), ok_chunk(b", "), ok_chunk(b"world")];
    let mut stream = decode_text_stream(stream::iter(chunks));

    let mut collected = String::new();
    while let Some(fragment) = stream.next().await {
        collected.push_str(&fragment.unwrap());
    }
    assert_eq!(collected, "Hello, world");
}

#[tokio::test]
async fn test_multibyte_char_split_across_chunks() {
    // "é" is 0xC3 0xA9; split it over two chunks.
    let chunks = vec![ok_chunk(b"caf\xC3"), ok_chunk(b"\xA9 ouverte")];
    let mut stream = decode_text_stream(stream::iter(chunks));

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first, "caf");
    let second = stream.next().await.unwrap().unwrap();
    assert_eq!(second, "é ouverte");
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_truncated_stream_yields_error() {
    // Stream ends while a multi-byte sequence is still open.
    let chunks = vec![ok_chunk(b"ok \xC3")];
    let mut stream = decode_text_stream(stream::iter(chunks));

    assert_eq!(stream.next().await.unwrap().unwrap(), "ok ");
    let last = stream.next().await.unwrap();
    assert!(matches!(last, Err(ClientError::Stream(_))));
}

#[tokio::test]
async fn test_invalid_utf8_terminates_stream() {
    let chunks = vec![ok_chunk(b"\xFF\xFE"), ok_chunk(b"never read")];
    let mut stream = decode_text_stream(stream::iter(chunks));

    let first = stream.next().await.unwrap();
    assert!(matches!(first, Err(ClientError::Stream(_))));
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_transport_error_is_forwarded_and_ends_stream() {
    let chunks: Vec<Result<Vec<u8>, ClientError>> = vec![
        ok_chunk(b"partial"),
        Err(ClientError::Stream("connection reset".to_string())),
    ];
    let mut stream = decode_text_stream(stream::iter(chunks));

    assert_eq!(stream.next().await.unwrap().unwrap(), "partial");
    assert!(stream.next().await.unwrap().is_err());
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_cancel_ends_chat_stream() {
    // Pending stream that never produces: cancellation must end it anyway.
    let inner = stream::pending::<Result<String, ClientError>>();
    let mut chat = ChatStream::new(Box::pin(inner));
    let handle = chat.handle();

    handle.cancel();
    assert!(handle.is_cancelled());
    assert!(chat.next().await.is_none());
}

#[tokio::test]
async fn test_cancel_mid_stream_stops_fragments() {
    let chunks = vec![ok_chunk(b"first"), ok_chunk(b"second")];
    let mut chat = ChatStream::new(decode_text_stream(stream::iter(chunks)));
    let handle = chat.handle();

    assert_eq!(chat.next().await.unwrap().unwrap(), "first");
    handle.cancel();
    assert!(chat.next().await.is_none());
}
