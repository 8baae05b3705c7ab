//! Integration tests for lifecycle_script

use std::path::{Path, PathBuf};
use std::rc::Rc;

use lifecycle_script::prelude::*;
use lifecycle_script::{drive_runner, ChangingValues as Values};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn names(log: &[LogEntry]) -> Vec<Hook> {
    log.iter().map(|entry| entry.event_name).collect()
}

fn values(external: u32, internal: u32) -> PropsState {
    PropsState::new(RecordedProps::new(external), RecordedState::new(internal))
}

#[test]
fn test_every_scenario_matches_its_fixture() {
    for scenario in Scenario::ALL {
        let report = drive(scenario, DEFAULT_MAX_POLLS).unwrap();
        let fixture = Fixture::load(&fixture_dir(), scenario).unwrap();

        if let Err(err) = fixture.check(&report.log) {
            panic!("{}", err);
        }
        assert_eq!(report.completions, 1, "{}", scenario);
    }
}

#[test]
fn test_on_mount_records_mount_hooks() {
    let report = drive(Scenario::OnMount, DEFAULT_MAX_POLLS).unwrap();

    assert_eq!(report.polls, 0);
    assert_eq!(
        report.log,
        vec![
            LogEntry::new(Hook::WillMount, Values::current(values(0, 0))),
            LogEntry::new(Hook::DidMount, Values::current(values(0, 0))),
        ]
    );
}

#[test]
fn test_props_only() {
    let report = drive(Scenario::PropsOnly, DEFAULT_MAX_POLLS).unwrap();

    assert_eq!(report.polls, 1);
    assert_eq!(report.external, RecordedProps::new(1));
    assert_eq!(report.internal, RecordedState::new(0));
    assert_eq!(
        report.trace,
        vec![
            Hook::WillMount,
            Hook::DidMount,
            Hook::WillReceiveProps,
            Hook::ShouldUpdate,
            Hook::WillUpdate,
            Hook::DidUpdate,
        ]
    );
    assert_eq!(
        report.log,
        vec![
            LogEntry::new(Hook::WillReceiveProps, Values::next(values(1, 0))),
            LogEntry::new(Hook::ShouldUpdate, Values::next(values(1, 0))),
            LogEntry::new(Hook::WillUpdate, Values::next(values(1, 0))),
            LogEntry::new(Hook::DidUpdate, Values::prev(values(0, 0))),
        ]
    );
}

#[test]
fn test_state_only_skips_will_receive_props() {
    let report = drive(Scenario::StateOnly, DEFAULT_MAX_POLLS).unwrap();

    assert_eq!(
        names(&report.log),
        vec![Hook::ShouldUpdate, Hook::WillUpdate, Hook::DidUpdate]
    );
    assert_eq!(report.internal, RecordedState::new(1));
    assert_eq!(report.external, RecordedProps::new(0));
}

#[test]
fn test_racing_changes_commit_together() {
    let report = drive(Scenario::StateAndPropsAsync, DEFAULT_MAX_POLLS).unwrap();

    assert_eq!(report.polls, 1);
    assert_eq!(report.completions, 1);
    assert_eq!(
        report.log[1],
        LogEntry::new(Hook::ShouldUpdate, Values::next(values(1, 1)))
    );
}

#[test]
fn test_state_then_callback_props_takes_two_polls() {
    let report = drive(Scenario::StateThenCallbackProps, DEFAULT_MAX_POLLS).unwrap();

    assert_eq!(report.polls, 2);
    assert_eq!(
        names(&report.log),
        vec![
            Hook::ShouldUpdate,
            Hook::WillUpdate,
            Hook::DidUpdate,
            Hook::WillReceiveProps,
            Hook::ShouldUpdate,
            Hook::WillUpdate,
            Hook::DidUpdate,
        ]
    );
    assert_eq!(
        report.log[6],
        LogEntry::new(Hook::DidUpdate, Values::prev(values(0, 1)))
    );
}

#[test]
fn test_state_enqueued_in_will_receive_props_joins_commit() {
    let report = drive(Scenario::PropsAndStateInWillReceive, DEFAULT_MAX_POLLS).unwrap();

    assert_eq!(report.polls, 1);
    assert_eq!(
        report.log,
        vec![
            LogEntry::new(Hook::WillReceiveProps, Values::next(values(1, 0))),
            LogEntry::new(Hook::ShouldUpdate, Values::next(values(1, 1))),
            LogEntry::new(Hook::WillUpdate, Values::next(values(1, 1))),
            LogEntry::new(Hook::DidUpdate, Values::prev(values(0, 0))),
        ]
    );
}

#[test]
fn test_poll_ceiling() {
    let err = drive(Scenario::PropsOnly, 0).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::PollLimit { scenario: Scenario::PropsOnly, polls: 0 }
    ));

    // Completes during mount, so no poll is needed
    assert!(drive(Scenario::OnMount, 0).is_ok());
}

#[test]
fn test_runner_ignores_hooks_after_completion() {
    let collector = Rc::new(LogCollector::new());
    let mut runner = ScriptRunner::new(Scenario::StateOnly, collector.clone());
    drive_runner(&mut runner, DEFAULT_MAX_POLLS).unwrap();
    let recorded = collector.len();

    runner.poll().unwrap();
    runner.poll().unwrap();

    assert_eq!(collector.len(), recorded);
    assert_eq!(collector.completions(), 1);
    assert!(!runner.is_started());
}

#[test]
fn test_host_runs_catalogue_in_order() {
    let reports = ScenarioHost::default().run_all().unwrap();

    let order: Vec<_> = reports.iter().map(|r| r.scenario).collect();
    assert_eq!(order, Scenario::ALL);
    assert!(reports.iter().all(|r| r.completions == 1));
}

#[test]
fn test_host_applies_its_poll_ceiling() {
    assert_eq!(ScenarioHost::default().max_polls(), DEFAULT_MAX_POLLS);

    let host = ScenarioHost::new(0);
    assert_eq!(host.max_polls(), 0);
    assert!(host.run(&[Scenario::OnMount]).is_ok());
    assert!(matches!(
        host.run(&[Scenario::OnMount, Scenario::StateOnly]),
        Err(ScriptError::PollLimit { scenario: Scenario::StateOnly, polls: 0 })
    ));
}

#[test]
fn test_fixture_detects_divergence() {
    let mut report = drive(Scenario::PropsOnly, DEFAULT_MAX_POLLS).unwrap();
    report.log.swap(1, 2);

    let fixture = Fixture::load(&fixture_dir(), Scenario::PropsOnly).unwrap();
    match fixture.check(&report.log) {
        Err(ScriptError::FixtureMismatch { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected mismatch, got {:?}", other),
    }
}

#[test]
fn test_unknown_scenario_name() {
    assert!(matches!(
        "Everything".parse::<Scenario>(),
        Err(ScriptError::UnknownScenario(_))
    ));
}
