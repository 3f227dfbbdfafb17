//! Local LLM Adapter - 本地 OpenAI 兼容客户端与提示词

mod fake_generation_client;
mod local_llm_client;
mod prompts;

pub use fake_generation_client::{FakeGenerationClient, FakeGenerationClientConfig};
pub use local_llm_client::{LocalLlmClient, LocalLlmClientConfig, DEFAULT_LOCAL_LLM_URL};
pub use prompts::{
    chapter_prompt, outline_prompt, parse_outline, parse_premise, premise_prompt,
};
