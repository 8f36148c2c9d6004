use super::types::ChatStreamChunk;
use crate::completion::ChunkStream;
use crate::error::Error;
use eventsource_stream::Eventsource;
use futures::{future, Stream, StreamExt, TryStreamExt};

/// Terminal sentinel sent by OpenAI-compatible servers
pub const DONE_SENTINEL: &str = "[DONE]";

/// Text fragment carried by one `data:` payload, if any
///
/// Payloads that do not decode as a chunk are skipped.
pub(crate) fn parse_delta(data: &str) -> Option<String> {
    let chunk: ChatStreamChunk = serde_json::from_str(data).ok()?;
    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta)
        .and_then(|d| d.content)
        .filter(|text| !text.is_empty())
}

/// Decode an SSE byte stream into text fragments, ending at `[DONE]`
pub(crate) fn sse_chunks<S, B, E>(bytes: S) -> ChunkStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + Sync + 'static,
{
    bytes
        .eventsource()
        .map_err(|e| Error::Stream(e.to_string()))
        .try_take_while(|event| future::ready(Ok(event.data.trim() != DONE_SENTINEL)))
        .try_filter_map(|event| future::ready(Ok::<_, Error>(parse_delta(&event.data))))
        .boxed()
}

/// Convenience used by tests: collect a finished stream into one string
#[cfg(test)]
pub(crate) async fn collect_text(stream: ChunkStream) -> crate::error::Result<String> {
    let parts: Vec<String> = stream.try_collect().await?;
    Ok(parts.concat())
}
