//! Debate protocol
//!
//! Two experts answer the same transcript concurrently, then a third call
//! synthesizes their replies. Only the synthesis leaves this module.

use super::core::ChatOrchestrator;
use samurai_llm::Message;
use tracing::{debug, instrument};

/// System prompt for the proposing expert
pub const EXPERT_A_PROMPT: &str = "You are Expert A. Propose a detailed solution with pros.";

/// System prompt for the critiquing expert
pub const EXPERT_B_PROMPT: &str = "You are Expert B. Critique and find risks and alternatives.";

/// System prompt for the synthesis call
pub const SYNTHESIS_PROMPT: &str =
    "Synthesize the best plan combining A and B, be concise and actionable.";

fn with_system(transcript: &[Message], prompt: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(transcript.len() + 3);
    messages.extend_from_slice(transcript);
    messages.push(Message::system(prompt));
    messages
}

impl ChatOrchestrator {
    /// Run the debate and return the synthesized reply
    #[instrument(skip(self, transcript), fields(messages = transcript.len()))]
    pub(crate) async fn debate(&self, transcript: &[Message], model_hint: Option<&str>) -> String {
        let expert_a = with_system(transcript, EXPERT_A_PROMPT);
        let expert_b = with_system(transcript, EXPERT_B_PROMPT);

        let (proposal, critique) = tokio::join!(
            self.llm.complete(&expert_a, model_hint),
            self.llm.complete(&expert_b, model_hint),
        );
        debug!(
            proposal_provider = %proposal.provider,
            critique_provider = %critique.provider,
            "Expert replies received"
        );

        let mut synthesis = with_system(transcript, SYNTHESIS_PROMPT);
        synthesis.push(Message::assistant(proposal.content));
        synthesis.push(Message::assistant(critique.content));

        self.llm.complete(&synthesis, model_hint).await.content
    }
}
