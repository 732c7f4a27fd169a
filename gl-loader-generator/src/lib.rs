//! Turns the GL registry (gl.xml) into Rust sources that bind every command lazily: each call
//! goes through a cell that initially points at a resolver, which looks the real entry point up
//! once and rebinds the cell.
//!
//! parse -> normalize -> sanity check -> emit {types, constants, commands, loaders}

mod config;
mod emit;
#[cfg(test)]
mod fixture;
mod normalize;
mod parse;
mod registry;
mod sanity;
mod typemap;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use anyhow::Context as _;

pub use config::{Artifact, Config, LOG_ENV_VAR, log_level_from_env};
pub use emit::{emit_commands, emit_constants, emit_loaders, emit_types};
pub use normalize::normalize;
pub use parse::parse_registry;
pub use registry::*;
pub use sanity::{Thresholds, check_registry};
pub use typemap::{Mutability, Pointee, Signature, TargetType, map_param, map_return, signature};

fn write_artifact<F>(path: &Path, emit: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> anyhow::Result<()>,
{
    let file =
        File::create(path).with_context(|| format!("could not create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    emit(&mut w).with_context(|| format!("could not write {}", path.display()))?;
    w.flush()?;
    log::info!("wrote {}", path.display());
    Ok(())
}

pub fn load_registry(path: &Path) -> anyhow::Result<Registry> {
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    let registry = parse_registry(BufReader::new(file))
        .with_context(|| format!("could not parse {}", path.display()))?;
    log::debug!(
        "parsed {} groups, {} enums, {} bitfields, {} commands",
        registry.groups.len(),
        registry.enums.len(),
        registry.bitfields.len(),
        registry.commands.len(),
    );

    Ok(normalize(registry))
}

pub fn generate(config: &Config) -> anyhow::Result<()> {
    let registry = load_registry(&config.registry_path)?;
    check_registry(&registry, &config.thresholds)?;

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("could not create {}", config.output_dir.display()))?;
    for artifact in Artifact::ALL {
        let path = config.artifact_path(artifact);
        match artifact {
            Artifact::Types => write_artifact(&path, |w| emit_types(w))?,
            Artifact::Constants => write_artifact(&path, |w| emit_constants(w, &registry))?,
            Artifact::Commands => write_artifact(&path, |w| emit_commands(w, &registry))?,
            Artifact::Loaders => write_artifact(&path, |w| emit_loaders(w, &registry))?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::{env, process};

    use super::*;

    fn scratch_root(name: &str) -> PathBuf {
        let root = env::temp_dir().join(format!(
            "gl-loader-generator-{name}-{}",
            process::id()
        ));
        _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        root
    }

    #[test]
    fn test_generate() {
        let root = scratch_root("generate");
        fs::write(root.join("gl.xml"), fixture::REGISTRY).unwrap();

        let config = Config {
            thresholds: Thresholds::NONE,
            ..Config::from_root(&root)
        };
        generate(&config).unwrap();

        for artifact in Artifact::ALL {
            let contents = fs::read_to_string(config.artifact_path(artifact)).unwrap();
            assert!(!contents.is_empty(), "{artifact:?}");
        }
        let loaders = fs::read_to_string(config.artifact_path(Artifact::Loaders)).unwrap();
        assert!(loaders.contains("fn glBindTexture("));

        // same input, same bytes
        let first = fs::read(config.artifact_path(Artifact::Commands)).unwrap();
        generate(&config).unwrap();
        let second = fs::read(config.artifact_path(Artifact::Commands)).unwrap();
        assert_eq!(first, second);

        _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_sanity_failure_writes_nothing() {
        let root = scratch_root("sanity");
        fs::write(root.join("gl.xml"), fixture::REGISTRY).unwrap();

        let config = Config::from_root(&root);
        let err = generate(&config).unwrap_err();
        assert!(err.to_string().contains("registry looks truncated"));
        assert!(!config.output_dir.exists());

        _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_missing_registry() {
        let root = scratch_root("missing");
        let err = generate(&Config::from_root(&root)).unwrap_err();
        assert!(err.to_string().contains("could not open"));
        _ = fs::remove_dir_all(&root);
    }
}
