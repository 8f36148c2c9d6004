//! Synchronous turn processing
//!
//! Contains `run_turn` and the tool stage shared with streaming turns.

use super::config::{TurnRequest, TurnResponse, SCHEMA_MISMATCH_PREFIX};
use super::core::ChatOrchestrator;
use crate::error::Result;
use crate::structured::{schema_requested, validate_json_string};
use samurai_llm::Message;
use tracing::{info, instrument, warn};

impl ChatOrchestrator {
    /// Run one non-streaming turn
    ///
    /// Returns `TurnResponse::Error` only for an unknown tool, in which case
    /// nothing is persisted.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for a blank message; history and tool
    /// failures propagate.
    #[instrument(
        skip(self, request),
        fields(session_id = %request.session_key(), debate = request.options.debate)
    )]
    pub async fn run_turn(&self, request: TurnRequest) -> Result<TurnResponse> {
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
                    return Ok(TurnResponse::Error {
                        error: format!("unknown tool: {tool_name}"),
                    })
                }
            }
        }

        let mut reply = if options.debate {
            self.debate(&transcript, options.model_hint()).await
        } else {
            self.llm
                .complete(&transcript, options.model_hint())
                .await
                .content
        };

        if let Some(schema) = options.schema.as_ref().filter(|s| schema_requested(Some(*s))) {
            let outcome = validate_json_string(&reply, schema);
            if !outcome.ok {
                warn!(session_id = %session_id, "Reply did not match the requested schema");
                reply = format!("{SCHEMA_MISMATCH_PREFIX}{}", outcome.error_report);
            }
        }

        transcript.push(Message::assistant(reply.clone()));
        self.history.save(session_id, &transcript).await?;

        info!(
            session_id = %session_id,
            messages = transcript.len(),
            "Turn completed"
        );

        Ok(TurnResponse::Reply { reply })
    }

    /// Invoke a tool and wrap its output as a tool message
    ///
    /// `Ok(None)` means no tool with that name is registered.
    pub(crate) async fn run_tool(
        &self,
        tool_name: &str,
        message: &str,
        session_id: &str,
    ) -> Result<Option<Message>> {
        let Some(tool) = self.tools.get(tool_name) else {
            warn!(tool = %tool_name, "Unknown tool requested");
            return Ok(None);
        };

        let output = tool.invoke(message, session_id).await?;
        Ok(Some(Message::tool(tool_name, serde_json::to_string(&output)?)))
    }
}
