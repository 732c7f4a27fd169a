use std::env;
use std::process::ExitCode;

use anyhow::anyhow;
use gl_loader_generator::{Config, generate, log_level_from_env};

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "{level:<5} {file}:{line} > {text}",
            level = record.level(),
            file = record.file().unwrap_or_else(|| record.target()),
            line = record
                .line()
                .map_or_else(|| "??".to_string(), |line| line.to_string()),
            text = record.args(),
        );
    }

    fn flush(&self) {}
}

impl Logger {
    fn init(level: log::LevelFilter) -> anyhow::Result<()> {
        log::set_logger(&Logger).map_err(|err| anyhow!("could not set logger: {err}"))?;
        log::set_max_level(level);
        Ok(())
    }
}

fn run(root: &str) -> anyhow::Result<()> {
    Logger::init(log_level_from_env()?)?;
    generate(&Config::from_root(root))
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        let bin = args.first().map_or("gl-loader-generator", String::as_str);
        eprintln!("usage: {bin} <root>");
        eprintln!("reads <root>/gl.xml and writes <root>/generated/*.rs");
        return ExitCode::from(2);
    }

    match run(&args[1]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
