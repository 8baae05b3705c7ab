//! Lifecycle Runner
//!
//! Runs the scenario catalogue headlessly against the lifecycle emulator
//! and prints, checks or records the golden running logs.
//!
//! ```text
//! lifecycle-runner [--config FILE] [--mode print|check|record]
//!                  [--max-polls N] [--fixtures DIR] [SCENARIO...]
//! ```

mod config;

use std::process::ExitCode;

use lifecycle_script::{Fixture, RunReport, ScenarioHost, ScriptResult};

use crate::config::{Mode, RunnerConfig};

const USAGE: &str = "\
usage: lifecycle-runner [--config FILE] [--mode print|check|record]
                        [--max-polls N] [--fixtures DIR] [SCENARIO...]

scenarios: OnMount PropsOnly StateOnly StateAndPropsAsync
           StateThenCallbackProps PropsAndStateInWillReceive";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if std::env::args().skip(1).any(|arg| arg == "-h" || arg == "--help") {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let config = match RunnerConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };
    if let Some(path) = &config.config_path {
        log::debug!("Using config file {}", path.display());
    }
    log::debug!("{:?}", config);

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Run the configured scenarios. Returns false if any fixture check failed.
fn run(config: &RunnerConfig) -> ScriptResult<bool> {
    let host = ScenarioHost::new(config.max_polls);
    log::debug!("Poll ceiling {} per scenario", host.max_polls());
    let reports = host.run(&config.scenarios())?;

    let mut passed = true;
    for report in &reports {
        match config.mode {
            Mode::Print => print_report(report)?,
            Mode::Check => {
                let checked = Fixture::load(&config.fixture_dir, report.scenario)
                    .and_then(|fixture| fixture.check(&report.log));
                match checked {
                    Ok(()) => log::info!("{}: matches fixture", report.scenario),
                    Err(err) => {
                        log::error!("{}", err);
                        passed = false;
                    }
                }
            }
            Mode::Record => {
                Fixture::new(report.scenario, report.log.clone()).write(&config.fixture_dir)?;
            }
        }
    }

    if config.mode == Mode::Check {
        log::info!(
            "{} scenario(s) checked, {}",
            reports.len(),
            if passed { "all passed" } else { "failures above" }
        );
    }
    Ok(passed)
}

fn print_report(report: &RunReport) -> ScriptResult<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
