use std::env;

/// How the surrounding environment hosts a run. An interactive host may pop dialogs, so
/// execution is deferred to give their plumbing time to register; a batch host runs and reports
/// immediately.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Host {
    Batch,
    Interactive,
}

impl Host {
    const DEFAULT_HOST: Host = Host::Batch;

    pub fn from_env() -> Self {
        if let Ok(mode) = env::var("CLOSEHOOK_HOST") {
            match mode.to_lowercase().as_str() {
                "batch" => Host::Batch,
                "interactive" | "windowed" => Host::Interactive,
                _ => panic!("Unsupported host: {}", mode),
            }
        } else {
            Self::detect()
        }
    }

    #[cfg(feature = "interactive")]
    fn detect() -> Self {
        use crossterm::tty::IsTty;

        if std::io::stdout().is_tty() {
            Host::Interactive
        } else {
            Self::DEFAULT_HOST
        }
    }

    #[cfg(not(feature = "interactive"))]
    fn detect() -> Self {
        Self::DEFAULT_HOST
    }
}
