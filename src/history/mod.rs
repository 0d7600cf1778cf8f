mod types;

pub use types::*;

use crate::{Error, Result};
use serde_json::Value;

/// Builds the history returned to the client.
///
/// An upstream-provided history is returned untouched; otherwise the assistant
/// reply is appended to the inbound turns. Appending needs the inbound history
/// to be a list.
pub fn compose(inbound: Value, upstream: Option<Value>, reply: &str) -> Result<Value> {
    if let Some(history) = upstream {
        return Ok(history);
    }

    match inbound {
        Value::Array(mut turns) => {
            turns.push(Turn::assistant(reply).to_value());
            Ok(Value::Array(turns))
        }
        other => Err(Error::validation(format!(
            "Cannot append reply to non-list 'conversationHistory': {}",
            other
        ))),
    }
}
