//! Live adapters that talk to real endpoints.

pub mod http;
pub mod openai;
