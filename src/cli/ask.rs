//! `samurai ask` - one-shot completion

use crate::server::{load_config, resolve_llm_router};
use anyhow::{bail, Result};
use samurai_llm::Message;
use tracing::debug;

/// Send `message` through the router and print the reply
pub async fn run(message: &str, model: Option<&str>) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        bail!("message is required");
    }

    let config = load_config()?;
    let router = resolve_llm_router(&config.llm, &config.app_name);

    let response = router.complete(&[Message::user(message)], model).await;
    debug!(provider = %response.provider, model = %response.model, "Answered");
    println!("{}", response.content);
    Ok(())
}
