use crate::error::Result;
use crate::runner::event::{EngineError, SuiteInfo, TestInfo};

/// Subscriber to the run events a [`Runner`](crate::runner::Runner) dispatches.
///
/// Callbacks are invoked synchronously and in arrival order.
pub trait RunListener {
    fn on_suite(&mut self, _suite: &SuiteInfo) {}
    fn on_suite_end(&mut self, _suite: &SuiteInfo) {}
    fn on_pass(&mut self, _test: &TestInfo) {}
    fn on_fail(&mut self, _test: &TestInfo, _err: &EngineError) {}
    fn on_pending(&mut self, _test: &TestInfo) {}
    fn on_post_require(&mut self, _file: &str) {}
    fn on_end(&mut self) -> Result<()> {
        Ok(())
    }
}
