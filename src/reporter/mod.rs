pub mod assertion;
pub mod model;
pub mod serialize;

use crate::error::Result;
use crate::reporter::model::suite::SuiteTree;
use crate::reporter::model::test_result::TestResult;
use crate::reporter::serialize::write_sentinel_line;
use crate::runner::event::{EngineError, SuiteInfo, TestInfo};
use crate::runner::hooks::RunListener;
use derivative::*;
use std::io::Write;
use std::mem;

/// Builds the result tree of one run and writes it once the run ends.
///
/// `stack` holds arena indices of the suites currently open, its top is where
/// new suites and tests go. The root stays at the bottom until the run ends.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Reporter<W: Write> {
    tree: SuiteTree,
    stack: Vec<usize>,
    finished: bool,
    #[derivative(Debug = "ignore")]
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            tree: SuiteTree::default(),
            stack: Vec::new(),
            finished: false,
            out,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn current(&self) -> Option<usize> {
        self.stack.last().copied()
    }

    fn push_test(&mut self, test: TestResult) {
        match self.current() {
            Some(index) => self.tree.push_test(index, test),
            None => warn!("Test '{}' finished outside of any suite, ignoring", test.title),
        }
    }
}

impl<W: Write> RunListener for Reporter<W> {
    fn on_suite(&mut self, suite: &SuiteInfo) {
        if suite.root {
            if self.tree.has_root() {
                warn!("Root suite entered twice, ignoring");
                return;
            }
            self.stack.push(self.tree.open_root(suite.title.clone()));
            return;
        }
        let parent = match self.current() {
            Some(parent) => parent,
            None => {
                warn!(
                    "Suite '{}' entered before the root suite, ignoring",
                    suite.title.as_deref().unwrap_or_default()
                );
                return;
            }
        };
        let index = self
            .tree
            .open_child(parent, suite.title.clone(), suite.filename.clone());
        trace!("Entered suite #{} under #{}", index, parent);
        self.stack.push(index);
    }

    fn on_suite_end(&mut self, suite: &SuiteInfo) {
        if suite.root {
            return;
        }
        // The root is never popped by a suite end
        if self.stack.len() < 2 {
            warn!(
                "Suite '{}' exited without being entered, ignoring",
                suite.title.as_deref().unwrap_or_default()
            );
            return;
        }
        if let Some(index) = self.stack.pop() {
            let open = self.tree.title(index).unwrap_or_default();
            let exited = suite.title.as_deref().unwrap_or_default();
            if open != exited {
                warn!("Suite '{}' exited while '{}' was open", exited, open);
            }
        }
    }

    fn on_pass(&mut self, test: &TestInfo) {
        self.push_test(TestResult::passed(test));
    }

    fn on_fail(&mut self, test: &TestInfo, err: &EngineError) {
        self.push_test(TestResult::failed(test, err));
    }

    fn on_pending(&mut self, test: &TestInfo) {
        self.push_test(TestResult::pending(test));
    }

    fn on_post_require(&mut self, file: &str) {
        let assigned = self.tree.backfill_filename(file);
        if assigned > 0 {
            debug!("Assigned {} to {} suite(s)", file, assigned);
        }
    }

    fn on_end(&mut self) -> Result<()> {
        if self.finished {
            warn!("Run ended twice, result already written");
            return Ok(());
        }
        self.finished = true;
        self.stack.clear();
        let document = mem::take(&mut self.tree).into_document();
        write_sentinel_line(&mut self.out, &document)
    }
}
