use super::test_result::TestResult;
use serde_derive::Serialize;
use std::mem;

/// A finished suite as it appears in the emitted document.
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuiteNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub suites: Vec<SuiteNode>,
    pub tests: Vec<TestResult>,
}

#[derive(Debug, Default)]
struct SuiteFrame {
    title: Option<String>,
    filename: Option<String>,
    suites: Vec<usize>,
    tests: Vec<TestResult>,
}

/// Arena of suites under construction, addressed by index.
///
/// Index `0` is the root once it exists. Children only hold forward indices,
/// finding the way back up is left to the caller's navigation stack.
#[derive(Debug, Default)]
pub struct SuiteTree {
    frames: Vec<SuiteFrame>,
}

pub const ROOT: usize = 0;

impl SuiteTree {
    pub fn has_root(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn open_root(&mut self, title: Option<String>) -> usize {
        debug_assert!(self.frames.is_empty());
        self.frames.push(SuiteFrame {
            title,
            ..SuiteFrame::default()
        });
        ROOT
    }

    pub fn open_child(
        &mut self,
        parent: usize,
        title: Option<String>,
        filename: Option<String>,
    ) -> usize {
        let index = self.frames.len();
        self.frames.push(SuiteFrame {
            title,
            filename,
            ..SuiteFrame::default()
        });
        self.frames[parent].suites.push(index);
        index
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.frames.get(index).and_then(|frame| frame.title.as_deref())
    }

    pub fn push_test(&mut self, index: usize, test: TestResult) {
        self.frames[index].tests.push(test);
    }

    /// Gives `file` to every first level suite that has no filename yet.
    pub fn backfill_filename(&mut self, file: &str) -> usize {
        let children = match self.frames.first() {
            Some(root) => root.suites.clone(),
            None => return 0,
        };
        let mut assigned = 0;
        for child in children {
            let frame = &mut self.frames[child];
            if frame.filename.is_none() {
                frame.filename = Some(file.to_owned());
                assigned += 1;
            }
        }
        assigned
    }

    /// Consumes the arena into the owned document, an empty one if no root was opened.
    pub fn into_document(mut self) -> SuiteNode {
        if self.frames.is_empty() {
            return SuiteNode::default();
        }
        self.assemble(ROOT)
    }

    fn assemble(&mut self, index: usize) -> SuiteNode {
        let frame = mem::take(&mut self.frames[index]);
        SuiteNode {
            title: frame.title,
            filename: frame.filename,
            suites: frame
                .suites
                .into_iter()
                .map(|child| self.assemble(child))
                .collect(),
            tests: frame.tests,
        }
    }
}
