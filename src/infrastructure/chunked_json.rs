// Chunked JSON streaming utilities
use crate::application::streaming_service::StreamMessage;
use crate::infrastructure::http_response::brotli_compress;
use axum::body::Body;
use axum::http::{Response, StatusCode, header};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::Stream;

/// Create a chunked JSON streaming response
pub async fn chunked_json_stream<S>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = StreamMessage> + Send + 'static,
{
    let byte_stream = stream.then(move |msg| async move { serialize_chunk(&msg, compress).await });

    let body = Body::from_stream(byte_stream);

    // Chunks are compressed individually, so no Content-Encoding on the response itself
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson-chunked")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Encode one message as a 4-byte big-endian length followed by the (optionally compressed) JSON payload
pub async fn serialize_chunk(msg: &StreamMessage, compress: bool) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(msg).map_err(std::io::Error::other)?;

    let payload = if compress { brotli_compress(json).await? } else { json };

    let length = payload.len() as u32;
    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(length);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Helper to create a streaming response from a receiver
pub async fn stream_from_receiver(
    mut rx: tokio::sync::mpsc::Receiver<StreamMessage>,
    compress: bool,
) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(msg) = rx.recv().await {
            yield msg;
        }
    };

    match chunked_json_stream(stream, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chunk_is_length_prefixed() {
        let msg = StreamMessage::Complete {
            total_widgets: 3,
            duration_ms: 12,
        };
        let chunk = serialize_chunk(&msg, false).await.unwrap();

        let length = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as usize;
        assert_eq!(length, chunk.len() - 4);

        let decoded: serde_json::Value = serde_json::from_slice(&chunk[4..]).unwrap();
        assert_eq!(decoded["type"], "complete");
        assert_eq!(decoded["totalWidgets"], 3);
    }
}
