//! Live adapters that call real pipeline backends.

pub mod huggingface;
pub mod sdwebui;
