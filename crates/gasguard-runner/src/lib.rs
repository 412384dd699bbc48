//! Concurrent process runner with graceful shutdown.
//!
//! The service is a handful of long-running processes (HTTP surface,
//! future workers) that must come down together: the first failure or a
//! SIGTERM/SIGINT cancels every process, then closers run under a
//! timeout regardless of how the processes ended.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

type BoxedFuture = Pin<Box<dyn Future<Output = Result<(), anyhow::Error>> + Send>>;

/// A named long-running process: takes a cancellation token, runs until
/// cancelled or failed.
pub type Process = Box<dyn FnOnce(CancellationToken) -> BoxedFuture + Send>;

/// Cleanup function executed after every process has stopped.
pub type Closer = Box<dyn FnOnce() -> BoxedFuture + Send>;

pub struct Runner {
    processes: Vec<(String, Process)>,
    closers: Vec<Closer>,
    closer_timeout: Duration,
    cancellation_token: CancellationToken,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            closers: Vec::new(),
            closer_timeout: Duration::from_secs(10),
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Add a named process. All processes run concurrently; the name
    /// only appears in logs.
    pub fn with_named_process<N, F, Fut>(mut self, name: N, process: F) -> Self
    where
        N: Into<String>,
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), anyhow::Error>> + Send + 'static,
    {
        self.processes
            .push((name.into(), Box::new(|token| Box::pin(process(token)))));
        self
    }

    /// Add a closer. Closers run after all processes have stopped,
    /// whatever the outcome; all of them are attempted even if some
    /// fail.
    pub fn with_closer<F, Fut>(mut self, closer: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), anyhow::Error>> + Send + 'static,
    {
        self.closers.push(Box::new(|| Box::pin(closer())));
        self
    }

    pub fn with_closer_timeout(mut self, timeout: Duration) -> Self {
        self.closer_timeout = timeout;
        self
    }

    /// Use an externally controlled cancellation token.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    /// Run until every process has stopped, then exit the process with
    /// the resulting code.
    pub async fn run(self) -> ! {
        let code = self.run_to_completion().await;
        std::process::exit(code);
    }

    /// Run without exiting; returns the would-be exit code. Split from
    /// `run` so shutdown behavior is testable.
    pub async fn run_to_completion(self) -> i32 {
        let token = self.cancellation_token;
        let mut join_set = JoinSet::new();

        for (name, process) in self.processes {
            let process_token = token.clone();
            join_set.spawn(async move {
                let result = process(process_token).await;
                (name, result)
            });
        }

        spawn_signal_handlers(token.clone());

        let mut failed = false;
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((name, Ok(()))) => {
                    tracing::debug!(process = %name, "process stopped cleanly");
                }
                Ok((name, Err(err))) => {
                    // Errors after shutdown was requested are part of
                    // coming down, not a failure of the service.
                    if token.is_cancelled() {
                        tracing::warn!(process = %name, error = %format!("{err:#}"), "process errored during shutdown");
                    } else {
                        tracing::error!(process = %name, error = %format!("{err:#}"), "process failed");
                        failed = true;
                        token.cancel();
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "process panicked");
                    failed = true;
                    token.cancel();
                }
            }
        }

        if !self.closers.is_empty() {
            tracing::info!(timeout = ?self.closer_timeout, "running closers");
            let outcome =
                tokio::time::timeout(self.closer_timeout, run_closers(self.closers)).await;
            if outcome.is_err() {
                tracing::error!(timeout = ?self.closer_timeout, "closers timed out");
            }
        }

        if failed {
            1
        } else {
            0
        }
    }
}

fn spawn_signal_handlers(token: CancellationToken) {
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("received shutdown signal");
                ctrl_c_token.cancel();
            }
            Err(err) => {
                tracing::error!(error = %err, "could not install ctrl-c handler");
            }
        }
    });

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                    tracing::info!("received SIGTERM");
                    token.cancel();
                }
                Err(err) => {
                    tracing::error!(error = %err, "could not install SIGTERM handler");
                }
            }
        });
    }
}

async fn run_closers(closers: Vec<Closer>) {
    let mut closer_set = JoinSet::new();
    for closer in closers {
        closer_set.spawn(closer());
    }

    while let Some(result) = closer_set.join_next().await {
        match result {
            Ok(Ok(())) => tracing::debug!("closer completed"),
            Ok(Err(err)) => tracing::error!(error = %format!("{err:#}"), "closer failed"),
            Err(err) => tracing::error!(error = %err, "closer panicked"),
        }
    }
}
