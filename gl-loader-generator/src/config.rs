use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, anyhow};

use crate::sanity::Thresholds;

pub const REGISTRY_FILE_NAME: &str = "gl.xml";
pub const OUTPUT_DIR_NAME: &str = "generated";
pub const LOG_ENV_VAR: &str = "GL_LOADER_GENERATOR_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Types,
    Constants,
    Commands,
    Loaders,
}

impl Artifact {
    pub const ALL: [Artifact; 4] = [
        Artifact::Types,
        Artifact::Constants,
        Artifact::Commands,
        Artifact::Loaders,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Types => "types.rs",
            Self::Constants => "constants.rs",
            Self::Commands => "commands.rs",
            Self::Loaders => "loaders.rs",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub registry_path: PathBuf,
    pub output_dir: PathBuf,
    pub thresholds: Thresholds,
}

impl Config {
    /// `<root>/gl.xml` in, `<root>/generated/*.rs` out.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            registry_path: root.join(REGISTRY_FILE_NAME),
            output_dir: root.join(OUTPUT_DIR_NAME),
            thresholds: Thresholds::default(),
        }
    }

    pub fn artifact_path(&self, artifact: Artifact) -> PathBuf {
        self.output_dir.join(artifact.file_name())
    }
}

/// Reads the max log level from [`LOG_ENV_VAR`], `Info` if unset.
pub fn log_level_from_env() -> anyhow::Result<log::LevelFilter> {
    match env::var(LOG_ENV_VAR) {
        Ok(level) => level
            .parse::<log::LevelFilter>()
            .map_err(|err| anyhow!("{err}"))
            .with_context(|| format!("invalid {LOG_ENV_VAR}: {level:?}")),
        Err(env::VarError::NotPresent) => Ok(log::LevelFilter::Info),
        Err(err) => Err(err).with_context(|| format!("invalid {LOG_ENV_VAR}")),
    }
}

#[test]
fn test_from_root() {
    let config = Config::from_root("/tmp/gl");
    assert_eq!(config.registry_path, PathBuf::from("/tmp/gl/gl.xml"));
    assert_eq!(config.output_dir, PathBuf::from("/tmp/gl/generated"));
    assert_eq!(
        config.artifact_path(Artifact::Loaders),
        PathBuf::from("/tmp/gl/generated/loaders.rs")
    );
    assert_eq!(config.thresholds, Thresholds::default());
}
