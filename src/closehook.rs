use crate::{
    cases::close_hook_case,
    errors::ClosehookResult,
    harness::{Outcome, TestDriver},
    host::Host,
};

/// The entrypoint to the closehook executable: drive the regression case under whichever host
/// the environment selected and hand back the reported outcome.
pub struct Closehook;

impl Closehook {
    pub fn run_case(host: Host) -> ClosehookResult<Outcome> {
        let mut driver = TestDriver::new(host);
        driver.run(close_hook_case)
    }
}
