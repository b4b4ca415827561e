use crate::runner::event::EngineError;
use lazy_static::*;
use regex::Regex;
use serde_json::Value;
use std::fmt;

lazy_static! {
    // Node's assert module reports "AssertionError", newer versions append the code
    static ref ASSERTION_NAME: Regex = Regex::new(r"^AssertionError(?: \[[A-Z_]+\])?$")
        .expect("Regex compilation error");
}

pub fn is_assertion(err: &EngineError) -> bool {
    ASSERTION_NAME.is_match(&err.name)
}

/// Builds a self-describing message out of an assertion mismatch.
pub fn describe_mismatch(err: &EngineError) -> String {
    let prefix = match err.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{}: ", message),
        _ => String::new(),
    };
    format!(
        "{}Got value {} but expected a value {} {}",
        prefix,
        Rendered(err.actual.as_ref()),
        err.operator.as_deref().unwrap_or("undefined"),
        Rendered(err.expected.as_ref())
    )
}

/// Readable form of a value that may be missing altogether.
struct Rendered<'a>(Option<&'a Value>);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("undefined"),
            Some(Value::String(text)) => f.write_str(text),
            Some(value) => write!(f, "{}", value),
        }
    }
}
