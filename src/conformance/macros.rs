macro_rules! conformance_run {
    ($case:expr) => {{
        let mut driver = $crate::harness::TestDriver::new($crate::host::Host::Batch);
        let outcome = driver.run($case).expect("Conformance driver failed");
        (driver, outcome)
    }};
}

macro_rules! assert_no_crash {
    ($outcome:expr) => {{
        assert!(
            $outcome.passed(),
            "Case reported '{}' instead of completing cleanly",
            $outcome.actual()
        );
        assert_eq!($outcome.actual(), "No Crash");
    }};
}

pub(crate) use assert_no_crash;
pub(crate) use conformance_run;
