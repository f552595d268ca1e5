//! Harness-scoped logging.
//!
//! A [`LoggingConfig`] produces a `tracing` [`Dispatch`] that the harness
//! installs on its own threads only: the calling test thread while the
//! harness lives, and every worker of the harness runtime. Nothing is
//! installed globally.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tokio::runtime::Runtime;
use tracing::Dispatch;
use tracing::dispatcher::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when nothing else is configured.
pub const DEFAULT_DIRECTIVES: &str = "info,tower_http=debug";

thread_local! {
    static WORKER_DISPATCH: RefCell<Option<DefaultGuard>> = const { RefCell::new(None) };
}

/// Logging settings for one harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    directives: String,
    directives_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTIVES)
    }
}

impl LoggingConfig {
    /// Creates a config from inline `EnvFilter` directives.
    #[must_use]
    pub fn new(directives: impl Into<String>) -> Self {
        Self {
            directives: directives.into(),
            directives_file: None,
        }
    }

    /// Reads directives from a file, one per line, `#` starting a comment.
    ///
    /// The inline directives remain the fallback if the file is unusable.
    #[must_use]
    pub fn with_directives_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.directives_file = Some(path.into());
        self
    }

    /// Returns the inline directives.
    #[must_use]
    pub fn directives(&self) -> &str {
        &self.directives
    }

    /// Returns the directives file, if any.
    #[must_use]
    pub fn directives_file(&self) -> Option<&Path> {
        self.directives_file.as_deref()
    }

    /// Resolves the directives to use.
    ///
    /// A file that cannot be read is reported on stderr and ignored.
    #[must_use]
    pub fn resolve_directives(&self) -> String {
        let Some(path) = &self.directives_file else {
            return self.directives.clone();
        };
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let joined = join_directives(&contents);
                if joined.is_empty() {
                    self.directives.clone()
                } else {
                    joined
                }
            }
            Err(error) => {
                eprintln!(
                    "rest-harness: ignoring logging directives file {}: {error}",
                    path.display()
                );
                self.directives.clone()
            }
        }
    }

    /// Builds the filter.
    ///
    /// Invalid directives are reported on stderr and skipped: file
    /// directives fall back to the inline ones, and invalid inline
    /// directives to [`DEFAULT_DIRECTIVES`].
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        let resolved = self.resolve_directives();
        [resolved.as_str(), self.directives.as_str()]
            .into_iter()
            .find_map(|directives| match EnvFilter::try_new(directives) {
                Ok(filter) => Some(filter),
                Err(error) => {
                    eprintln!(
                        "rest-harness: ignoring invalid logging directives `{directives}`: {error}"
                    );
                    None
                }
            })
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
    }

    /// Builds the dispatch the harness installs on its threads.
    #[must_use]
    pub fn dispatch(&self) -> Dispatch {
        let subscriber = tracing_subscriber::registry()
            .with(self.env_filter())
            .with(fmt::layer().with_test_writer());
        Dispatch::new(subscriber)
    }
}

fn join_directives(contents: &str) -> String {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join(",")
}

/// Builds a multi-thread runtime whose threads log through `dispatch`.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
pub fn build_runtime(dispatch: &Dispatch, worker_threads: usize) -> std::io::Result<Runtime> {
    let worker_dispatch = dispatch.clone();
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .thread_name("rest-harness")
        .enable_all()
        .on_thread_start(move || {
            let guard = tracing::dispatcher::set_default(&worker_dispatch);
            WORKER_DISPATCH.with(|slot| *slot.borrow_mut() = Some(guard));
        })
        .on_thread_stop(|| {
            WORKER_DISPATCH.with(|slot| drop(slot.borrow_mut().take()));
        })
        .build()
}
