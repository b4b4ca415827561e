use crate::error::{Error, Result};
use config::{Config, File};
use serde_derive::Deserialize;
use std::path::PathBuf;

/// Options forwarded to the engine that produces the event stream.
///
/// None of them change how the result tree is built. `bail` is the only one
/// the replaying runner acts on; the rest are logged so the build tool can
/// see what the run was configured with.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Extra modules the engine loads before running
    #[serde(default)]
    pub requires: Vec<String>,
    /// Names the engine accepts as globals during the run
    #[serde(default)]
    pub globals: Vec<String>,
    /// Stop after the first failing test
    #[serde(default)]
    pub bail: bool,
    /// Fail tests that leak globals
    #[serde(default, alias = "checkleaks", alias = "check_leaks")]
    pub check_leaks: bool,
    /// Test files handed to the engine
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl Manifest {
    pub fn from(file: PathBuf) -> Result<Self> {
        let mut config = Config::new();
        config.merge(File::from(file))?;

        config.try_into().map_err(Error::from)
    }

    pub fn from_json(options: &str) -> Result<Self> {
        serde_json::from_str(options).map_err(Error::Options)
    }
}
