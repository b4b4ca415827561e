use super::status::{ErrorDetail, Status};
use crate::reporter::assertion::{describe_mismatch, is_assertion};
use crate::runner::event::{EngineError, TestInfo};
use serde_derive::Serialize;
use serde_json::Number;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub title: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl TestResult {
    pub fn passed(test: &TestInfo) -> Self {
        Self {
            title: test.title.clone(),
            status: Status::Pass,
            duration: test.duration.clone(),
            error: None,
        }
    }

    pub fn pending(test: &TestInfo) -> Self {
        Self {
            title: test.title.clone(),
            status: Status::Pending,
            duration: None,
            error: None,
        }
    }

    /// Assertion mismatches become `fail` with a rewritten message, anything
    /// else is an `error` carrying the engine's message untouched.
    pub fn failed(test: &TestInfo, err: &EngineError) -> Self {
        let (status, message) = if is_assertion(err) {
            (Status::Fail, Some(describe_mismatch(err)))
        } else {
            (Status::Error, err.message.clone())
        };
        Self {
            title: test.title.clone(),
            status,
            duration: test.duration.clone(),
            error: Some(ErrorDetail {
                name: err.name.clone(),
                message,
                stack: err.stack.clone(),
            }),
        }
    }
}
