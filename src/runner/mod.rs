pub(crate) mod event;
pub(crate) mod hooks;

use crate::configuration::constants::exit_code;
use crate::configuration::manifest::Manifest;
use crate::error::{Error, Result};
use crate::runner::event::Event;
use crate::runner::hooks::RunListener;
use std::io::BufRead;

/// Counters the runner keeps while replaying, used for the process exit status.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RunStats {
    pub suites: usize,
    pub passes: usize,
    pub failures: usize,
    pub pending: usize,
}

impl RunStats {
    pub fn exit_code(&self) -> i32 {
        if self.failures == 0 {
            exit_code::SUCCESS
        } else {
            self.failures.min(exit_code::MAX_FAILURES) as i32
        }
    }
}

/// Replays an engine event stream into subscribed listeners.
pub struct Runner<'a> {
    manifest: Manifest,
    listeners: Vec<&'a mut dyn RunListener>,
    stats: RunStats,
    bailed: bool,
    // suites entered after bailing whose exits must be swallowed too
    skipped_depth: usize,
}

impl<'a> Runner<'a> {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            listeners: Vec::new(),
            stats: RunStats::default(),
            bailed: false,
            skipped_depth: 0,
        }
    }

    pub fn subscribe(&mut self, listener: &'a mut dyn RunListener) {
        self.listeners.push(listener);
    }

    pub fn run<R: BufRead>(mut self, input: R) -> Result<RunStats> {
        self.log_options();
        // Raw bytes so a line with broken UTF-8 is reported with its number
        for (index, line) in input.split(b'\n').enumerate() {
            let line = line?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let event: Event = serde_json::from_slice(&line).map_err(|source| Error::Event {
                line: index + 1,
                source,
            })?;
            self.dispatch(&event)?;
            if event == Event::End {
                return Ok(self.stats);
            }
        }
        warn!("Event stream closed without an end event, finishing the run");
        self.dispatch(&Event::End)?;
        Ok(self.stats)
    }

    fn log_options(&self) {
        info!(
            "Replaying run of {} file(s), bail: {}, check leaks: {}",
            self.manifest.files.len(),
            self.manifest.bail,
            self.manifest.check_leaks
        );
        debug!("Engine requires {:?}", self.manifest.requires);
        debug!("Engine globals {:?}", self.manifest.globals);
    }

    fn suppressed(&mut self, event: &Event) -> bool {
        if !self.bailed {
            return false;
        }
        match event {
            Event::Suite(_) => {
                self.skipped_depth += 1;
                true
            }
            Event::SuiteEnd(_) if self.skipped_depth > 0 => {
                self.skipped_depth -= 1;
                true
            }
            Event::SuiteEnd(_) | Event::End | Event::Other => false,
            Event::Pass(_) | Event::Fail(_) | Event::Pending(_) | Event::PostRequire { .. } => true,
        }
    }

    fn dispatch(&mut self, event: &Event) -> Result<()> {
        if self.suppressed(event) {
            trace!("Skipping '{}' event after bail", event.kind());
            return Ok(());
        }
        trace!("Dispatching '{}' event", event.kind());
        match event {
            Event::Other => trace!("No listener for this event, skipping"),
            Event::Suite(suite) => {
                if !suite.root {
                    self.stats.suites += 1;
                }
                self.listeners.iter_mut().for_each(|l| l.on_suite(suite));
            }
            Event::SuiteEnd(suite) => {
                self.listeners.iter_mut().for_each(|l| l.on_suite_end(suite));
            }
            Event::Pass(test) => {
                self.stats.passes += 1;
                self.listeners.iter_mut().for_each(|l| l.on_pass(test));
            }
            Event::Fail(failure) => {
                self.stats.failures += 1;
                self.listeners
                    .iter_mut()
                    .for_each(|l| l.on_fail(&failure.test, &failure.err));
                if self.manifest.bail {
                    info!("Test '{}' failed, bailing out", failure.test.title);
                    self.bailed = true;
                }
            }
            Event::Pending(test) => {
                self.stats.pending += 1;
                self.listeners.iter_mut().for_each(|l| l.on_pending(test));
            }
            Event::PostRequire { file } => {
                debug!("Loaded {}", file);
                self.listeners.iter_mut().for_each(|l| l.on_post_require(file));
            }
            Event::End => {
                info!(
                    "Run finished: {} suites, {} passing, {} failing, {} pending",
                    self.stats.suites, self.stats.passes, self.stats.failures, self.stats.pending
                );
                for listener in self.listeners.iter_mut() {
                    listener.on_end()?;
                }
            }
        }
        Ok(())
    }
}
