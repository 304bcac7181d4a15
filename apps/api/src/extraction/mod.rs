pub mod handlers;
pub mod models;
pub mod pdf;
pub mod processor;
pub mod prompts;
pub mod reply;
pub mod upload;
