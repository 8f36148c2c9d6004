/// Hugging Face inference router
pub mod huggingface;
/// Ollama local provider
pub mod ollama;
/// OpenAI provider
pub mod openai;
/// Shared OpenAI-compatible client
pub mod openai_compat;
/// OpenRouter proxy provider
pub mod openrouter;
