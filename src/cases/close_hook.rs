use crate::{
    domain::Value,
    errors::ClosehookResult,
    harness::{print_bug_number, print_status, AlertHandle, Outcome, TestDriver},
    runtime::{GeneratorIterator, Runtime},
};

/// Upstream tracking number for the crash this case guards against.
pub const BUG_NUMBER: u32 = 341821;

pub const SUMMARY: &str = "Close hook crash";

/// Throwaway cells allocated after the scenario, enough to force a run of sweeps well past the
/// default pressure threshold.
pub const CHURN_CELLS: usize = 50_000;

/// The close-hook regression. Abandon a partially driven generator whose close hook spawns and
/// abandons another such generator, then churn the heap so sweeps keep finding a fresh
/// generation to reclaim. Passing means nothing more than coming out the other side.
pub fn close_hook_case(driver: &mut TestDriver) -> ClosehookResult<Outcome> {
    close_hook_case_in(&Runtime::new(), driver)
}

/// Run the scenario against a caller-supplied runtime so the heap can be inspected afterward.
pub fn close_hook_case_in(runtime: &Runtime, driver: &mut TestDriver) -> ClosehookResult<Outcome> {
    driver.enter_func("close_hook_case");
    print_bug_number(BUG_NUMBER);
    print_status(SUMMARY);

    let alert = driver.alert_handle();
    make_iterator(runtime, &alert);

    // Trigger reclamation through allocation pressure.
    for _ in 0..CHURN_CELLS {
        let _x = runtime.alloc(Value::None);
    }

    println!("done");
    driver.exit_func("close_hook_case")?;
    Ok(Outcome::no_crash(SUMMARY))
}

/// Spawn a generator staged to yield one empty list, whose close hook does this all over again.
/// Drive it a single step, abandon it with the hook still armed, and ring the host's dialog
/// bell if it has one.
fn make_iterator(runtime: &Runtime, alert: &AlertHandle) {
    let bell = alert.clone();
    let gen = runtime.spawn_with_close(vec![Value::empty_list()], move |rt: &Runtime| {
        make_iterator(rt, &bell);
    });

    let mut steps = GeneratorIterator::new(gen);
    let _first = steps.next();
    drop(steps);

    alert.ring();
}
