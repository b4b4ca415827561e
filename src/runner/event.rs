use serde_derive::Deserialize;
use serde_json::{Number, Value};

/// One line of the engine's event stream.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum Event {
    #[serde(rename = "suite")]
    Suite(SuiteInfo),
    #[serde(rename = "suite end")]
    SuiteEnd(SuiteInfo),
    #[serde(rename = "pass")]
    Pass(TestInfo),
    #[serde(rename = "fail")]
    Fail(Failure),
    #[serde(rename = "pending")]
    Pending(TestInfo),
    /// A test file finished loading, fired before its tests run
    #[serde(rename = "post-require")]
    PostRequire { file: String },
    #[serde(rename = "end")]
    End,
    /// Engine events nobody subscribes to (`start`, `test end`, `hook`, ...)
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct SuiteInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub root: bool,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct TestInfo {
    pub title: String,
    /// Milliseconds, integral or fractional as the engine measured them
    #[serde(default)]
    pub duration: Option<Number>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Failure {
    pub test: TestInfo,
    pub err: EngineError,
}

/// Error object the engine attaches to a failed test.
///
/// `actual` and `expected` are arbitrary values, only assertion errors carry them.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct EngineError {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub actual: Option<Value>,
    #[serde(default)]
    pub expected: Option<Value>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Suite(_) => "suite",
            Event::SuiteEnd(_) => "suite end",
            Event::Pass(_) => "pass",
            Event::Fail(_) => "fail",
            Event::Pending(_) => "pending",
            Event::PostRequire { .. } => "post-require",
            Event::End => "end",
            Event::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_suite_events() {
        let root: Event = serde_json::from_str(r#"{"event":"suite","title":"","root":true}"#).unwrap();
        let nested: Event =
            serde_json::from_str(r#"{"event":"suite","title":"Array","filename":"test/ArraySpec.js"}"#)
                .unwrap();
        let end: Event = serde_json::from_str(r#"{"event":"suite end","title":"Array"}"#).unwrap();

        assert_eq!(
            root,
            Event::Suite(SuiteInfo {
                title: Some(String::new()),
                root: true,
                filename: None,
            })
        );
        assert_eq!(
            nested,
            Event::Suite(SuiteInfo {
                title: Some("Array".to_owned()),
                root: false,
                filename: Some("test/ArraySpec.js".to_owned()),
            })
        );
        assert_eq!(end.kind(), "suite end");
    }

    #[test]
    fn test_parse_failure_with_structured_values() {
        let line = json!({
            "event": "fail",
            "test": { "title": "#push adds", "duration": 1 },
            "err": {
                "name": "AssertionError",
                "actual": [1, 2],
                "expected": { "length": 3 },
                "operator": "deepEqual",
                "stack": "AssertionError: at ArraySpec.js:15"
            }
        })
        .to_string();

        match serde_json::from_str::<Event>(&line).unwrap() {
            Event::Fail(failure) => {
                assert_eq!(failure.test.title, "#push adds");
                assert_eq!(failure.test.duration, Some(Number::from(1)));
                assert_eq!(failure.err.actual, Some(json!([1, 2])));
                assert_eq!(failure.err.expected, Some(json!({ "length": 3 })));
                assert_eq!(failure.err.message, None);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_parse_module_loaded_and_end() {
        let loaded: Event =
            serde_json::from_str(r#"{"event":"post-require","file":"test/FooSpec.js"}"#).unwrap();
        let end: Event = serde_json::from_str(r#"{"event":"end"}"#).unwrap();

        assert_eq!(
            loaded,
            Event::PostRequire {
                file: "test/FooSpec.js".to_owned()
            }
        );
        assert_eq!(end, Event::End);
    }

    #[test]
    fn test_unsubscribed_events_parse_as_other() {
        for line in &[
            r#"{"event":"start"}"#,
            r#"{"event":"hook","title":"\"before all\" hook"}"#,
            r#"{"event":"test end","title":"ok","duration":1}"#,
            r#"{"event":"waiting"}"#,
        ] {
            assert_eq!(serde_json::from_str::<Event>(line).unwrap(), Event::Other, "{}", line);
        }
    }

    #[test]
    fn test_fractional_duration() {
        let pass: Event =
            serde_json::from_str(r#"{"event":"pass","title":"fast","duration":1.5}"#).unwrap();

        assert_eq!(
            pass,
            Event::Pass(TestInfo {
                title: "fast".to_owned(),
                duration: Number::from_f64(1.5),
            })
        );
    }

    #[test]
    fn test_reject_event_without_tag() {
        assert!(serde_json::from_str::<Event>(r#"{"title":"orphan"}"#).is_err());
    }
}
