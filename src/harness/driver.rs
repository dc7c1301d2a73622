use std::{thread, time::Duration};

use crate::{
    core::{log, Container, LogLevel, Storable},
    errors::{ClosehookResult, HarnessError},
    harness::{report_compare, Outcome},
    host::Host,
};

pub type AlertHook = Box<dyn FnMut(u32)>;

/// The environment's dialog primitive, if it has one. The counter only moves when a hook is
/// installed; hosts without the primitive leave it untouched forever. Handles are cheap clones
/// over shared state so a close hook can ring the bell long after the case body returned.
#[derive(Clone)]
pub struct AlertHandle {
    count: Container<u32>,
    hook: Container<Option<AlertHook>>,
}

impl AlertHandle {
    fn new() -> Self {
        Self {
            count: 0u32.store(),
            hook: Container::new(None),
        }
    }

    pub fn install<F: FnMut(u32) + 'static>(&self, hook: F) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn ring(&self) {
        if self.hook.borrow().is_none() {
            return;
        }

        let rung = {
            let mut count = self.count.borrow_mut();
            *count += 1;
            *count
        };

        if let Some(hook) = self.hook.borrow_mut().as_mut() {
            hook(rung);
        }
    }

    pub fn count(&self) -> u32 {
        *self.count.borrow()
    }
}

/// Runs a case and reports its outcome, either immediately or deferred behind a timer when the
/// host is interactive. Also keeps the balanced enter/exit call tracking the reporting
/// convention expects.
pub struct TestDriver {
    host: Host,
    delay: Duration,
    delay_driver_end: bool,
    driver_ended: bool,
    alert: AlertHandle,
    calls: Vec<String>,
}

impl TestDriver {
    /// How long an interactive host waits before running, so dialog plumbing can settle.
    const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    pub fn new(host: Host) -> Self {
        Self {
            host,
            delay: Self::DEFAULT_DELAY,
            delay_driver_end: false,
            driver_ended: false,
            alert: AlertHandle::new(),
            calls: vec![],
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn alert_handle(&self) -> AlertHandle {
        self.alert.clone()
    }

    pub fn install_alert_hook<F: FnMut(u32) + 'static>(&self, hook: F) {
        self.alert.install(hook);
    }

    pub fn ialert(&self) -> u32 {
        self.alert.count()
    }

    pub fn enter_func(&mut self, name: &str) {
        self.calls.push(name.to_string());
    }

    pub fn exit_func(&mut self, name: &str) -> ClosehookResult<()> {
        match self.calls.pop() {
            Some(top) if top == name => Ok(()),
            Some(top) => Err(HarnessError::UnbalancedExit {
                expected: top,
                found: name.to_string(),
            }
            .into()),
            None => Err(HarnessError::ExitWithoutEnter(name.to_string()).into()),
        }
    }

    pub fn delaying_driver_end(&self) -> bool {
        self.delay_driver_end
    }

    pub fn driver_ended(&self) -> bool {
        self.driver_ended
    }

    /// Run a case to completion and report its outcome. An interactive host defers the whole run
    /// behind the configured delay and holds the end-of-run signal until reporting is done; a
    /// batch host runs and reports immediately.
    pub fn run<F>(&mut self, case: F) -> ClosehookResult<Outcome>
    where
        F: FnOnce(&mut TestDriver) -> ClosehookResult<Outcome>,
    {
        if self.host == Host::Interactive {
            self.delay_driver_end = true;
            log(LogLevel::Info, || {
                format!("deferring case for {:?}", self.delay)
            });
            thread::sleep(self.delay);
        }

        let outcome = case(self)?;
        report_compare(&outcome);

        if let Some(name) = self.calls.pop() {
            return Err(HarnessError::DanglingEnter(name).into());
        }

        self.delay_driver_end = false;
        self.driver_end();
        Ok(outcome)
    }

    fn driver_end(&mut self) {
        self.driver_ended = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClosehookError;

    fn trivial_case(driver: &mut TestDriver) -> ClosehookResult<Outcome> {
        driver.enter_func("trivial_case");
        driver.exit_func("trivial_case")?;
        Ok(Outcome::no_crash("trivial"))
    }

    #[test]
    fn batch_run_reports_and_ends_the_driver() {
        let mut driver = TestDriver::new(Host::Batch);
        let outcome = driver.run(trivial_case).expect("Driver failed");

        assert!(outcome.passed());
        assert!(driver.driver_ended());
        assert!(!driver.delaying_driver_end());
    }

    #[test]
    fn interactive_run_defers_then_ends_the_driver() {
        let mut driver = TestDriver::new(Host::Interactive).with_delay(Duration::from_millis(1));

        let outcome = driver
            .run(|d| {
                assert!(d.delaying_driver_end());
                trivial_case(d)
            })
            .expect("Driver failed");

        assert!(outcome.passed());
        assert!(!driver.delaying_driver_end());
        assert!(driver.driver_ended());
    }

    #[test]
    fn unbalanced_exit_is_a_harness_error() {
        let mut driver = TestDriver::new(Host::Batch);
        driver.enter_func("outer");

        let err = driver.exit_func("inner").unwrap_err();
        assert_eq!(
            err,
            ClosehookError::Harness(HarnessError::UnbalancedExit {
                expected: "outer".into(),
                found: "inner".into(),
            })
        );

        let err = driver.exit_func("outer").unwrap_err();
        assert_eq!(
            err,
            ClosehookError::Harness(HarnessError::ExitWithoutEnter("outer".into()))
        );
    }

    #[test]
    fn dangling_enter_fails_the_run() {
        let mut driver = TestDriver::new(Host::Batch);
        let err = driver
            .run(|d| {
                d.enter_func("forgotten");
                Ok(Outcome::no_crash("dangling"))
            })
            .unwrap_err();

        assert_eq!(
            err,
            ClosehookError::Harness(HarnessError::DanglingEnter("forgotten".into()))
        );
    }

    #[test]
    fn alert_counter_moves_only_with_a_hook_installed() {
        let driver = TestDriver::new(Host::Batch);
        let alert = driver.alert_handle();

        alert.ring();
        assert_eq!(driver.ialert(), 0);

        let seen = 0u32.store();
        let tally = seen.clone();
        driver.install_alert_hook(move |n| *tally.borrow_mut() = n);

        alert.ring();
        alert.ring();
        assert_eq!(driver.ialert(), 2);
        assert_eq!(*seen.borrow(), 2);
    }
}
