use std::time::Duration;

use crate::{
    cases::{close_hook_case, close_hook_case_in, CHURN_CELLS, SUMMARY},
    domain::ExecutionError,
    errors::ClosehookError,
    harness::{Outcome, TestDriver},
    host::Host,
    runtime::Runtime,
};

use super::macros::*;

#[test]
fn close_hook_regression_reports_no_crash() {
    let (driver, outcome) = conformance_run!(close_hook_case);

    assert_no_crash!(outcome);
    assert_eq!(outcome.summary(), SUMMARY);
    assert!(driver.driver_ended());
}

#[test]
fn close_hook_regression_is_idempotent() {
    let (_, first) = conformance_run!(close_hook_case);
    let (_, second) = conformance_run!(close_hook_case);

    assert_eq!(first, second);
}

#[test]
fn reclamation_chain_advances_under_pressure() {
    let runtime = Runtime::with_gc_threshold(512);
    let mut driver = TestDriver::new(Host::Batch);
    driver.install_alert_hook(|_| {});

    let outcome = driver
        .run(|d| close_hook_case_in(&runtime, d))
        .expect("Conformance driver failed");
    assert_no_crash!(outcome);

    // The churn loop alone crosses the threshold scores of times; each sweep reclaims the
    // previous generation's abandoned generator and its hook spawns the next.
    let stats = runtime.stats();
    assert!(stats.sweeps >= CHURN_CELLS / 512 / 2);
    assert!(stats.hooks_run >= 2);

    // Every hook run is a fresh call into the spawning scenario, which rings the bell once, on
    // top of the ring from the initial call.
    assert_eq!(driver.ialert() as usize, stats.hooks_run + 1);
}

#[test]
fn execution_errors_surface_through_the_driver() {
    let mut driver = TestDriver::new(Host::Batch);

    let err = driver
        .run(|_| {
            let runtime = Runtime::new();
            let gen = runtime.spawn(vec![]);
            let value = gen.resume()?;
            Ok(Outcome::new("No Crash", &value.to_string(), "unreachable"))
        })
        .unwrap_err();

    assert_eq!(
        err,
        ClosehookError::Execution(ExecutionError::StopIteration)
    );
}

#[test]
fn interactive_host_defers_and_still_passes() {
    let mut driver = TestDriver::new(Host::Interactive).with_delay(Duration::from_millis(2));
    driver.install_alert_hook(|_| {});

    let outcome = driver.run(close_hook_case).expect("Conformance driver failed");

    assert_no_crash!(outcome);
    assert!(driver.driver_ended());
    assert!(!driver.delaying_driver_end());
    assert!(driver.ialert() >= 1);
}
