//! Streaming turn processing
//!
//! `stream_turn` spawns the turn onto the runtime and hands back the
//! receiving end of a bounded channel. Chunks arrive as the provider emits
//! them; `StreamEvent::End` is sent only after the transcript is saved.

use super::config::TurnRequest;
use super::core::ChatOrchestrator;
use crate::error::Result;
use futures::StreamExt;
use samurai_llm::Message;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Inline chunk emitted when a streaming turn names an unknown tool
pub const UNKNOWN_TOOL_CHUNK: &str = "[tool-error] unknown tool";

/// Item of a streaming turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Text fragment
    Chunk(String),
    /// Turn finished and persisted
    End,
}

type EventSender = mpsc::Sender<Result<StreamEvent>>;

impl ChatOrchestrator {
    /// Start a streaming turn
    ///
    /// A fault after the stream started arrives as a single `Err` item and
    /// the channel closes without `End`; nothing is persisted in that case.
    /// Dropping the receiver before `End` cancels the turn the same way.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for a blank message, before anything
    /// is spawned.
    pub fn stream_turn(&self, request: TurnRequest) -> Result<mpsc::Receiver<Result<StreamEvent>>> {
        request.validated_message()?;

        let (tx, rx) = mpsc::channel(self.config.stream_buffer);
        let orchestrator = self.clone();

        tokio::spawn(async move {
            if let Err(e) = orchestrator.drive_stream(&request, &tx).await {
                warn!(
                    session_id = %request.session_key(),
                    error = %e,
                    "Streaming turn failed"
                );
                let _ = tx.send(Err(e)).await;
            }
        });

        Ok(rx)
    }

    async fn drive_stream(&self, request: &TurnRequest, tx: &EventSender) -> Result<()> {
        let message = request.validated_message()?;
        let session_id = request.session_key();
        let options = &request.options;

        let _turn = self.lock_session(session_id).await;

        let mut transcript = self.history.load(session_id).await?;
        transcript.push(Message::user(message));

        if let Some(tool_name) = options.tool_name() {
            match self.run_tool(tool_name, message, session_id).await? {
                Some(output) => transcript.push(output),
                None => {
                    if !send(tx, StreamEvent::Chunk(UNKNOWN_TOOL_CHUNK.to_string())).await {
                        return Ok(());
                    }
                }
            }
        }

        let mut chunks = self
            .llm
            .complete_stream(&transcript, options.model_hint())
            .await;
        let mut assistant_text = String::new();

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            assistant_text.push_str(&chunk);
            if !send(tx, StreamEvent::Chunk(chunk)).await {
                return Ok(());
            }
        }

        transcript.push(Message::assistant(assistant_text));
        self.history.save(session_id, &transcript).await?;
        info!(
            session_id = %session_id,
            messages = transcript.len(),
            "Streaming turn completed"
        );

        send(tx, StreamEvent::End).await;
        Ok(())
    }
}

/// Forward an event; `false` once the consumer has gone away
async fn send(tx: &EventSender, event: StreamEvent) -> bool {
    if tx.send(Ok(event)).await.is_err() {
        debug!("Stream consumer dropped, abandoning turn");
        return false;
    }
    true
}
