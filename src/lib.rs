pub mod config;
pub mod error;
pub mod handler;
pub mod history;
pub mod lambda;
pub mod llm;
pub mod server;

pub use error::{Error, Result};
