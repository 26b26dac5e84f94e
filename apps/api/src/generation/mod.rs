// Email copy generation: form intake, the request pipeline, and prompts.
// All completion calls go through llm_client; no direct API calls here.

pub mod form;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod request_log;
