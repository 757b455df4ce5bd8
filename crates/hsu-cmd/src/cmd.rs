//! The command handle: one launch of an external executable.
//!
//! **Lifecycle:**
//! ```text
//! Cmd::new() ── start() ──> Running ── child exits ──> Terminated
//!     │                        │
//!     └─ start() fails         └─ stop()/kill() only request the exit
//!        (stays Created)
//! ```
//!
//! `start()` hands the `Child` to a background wait task. That task is the
//! only writer of the exit status and the running flag; it stores the status
//! first, clears the flag second, then fires a one-shot completion signal
//! that `wait()` and `run()` await.

use crate::capture::{spawn_reader, OutputBuffer, StreamType};
use crate::config::CmdConfig;
use crate::params::Params;
use crate::state::CmdState;
use hsu_common::{ProcessError, ProcessResult};
use hsu_process::Termination;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use tokio::process::Child;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Result of a completed [`Cmd::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdOutput {
    pub exit_status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Termination data written once by the wait task.
#[derive(Debug, Default)]
struct Completion {
    exit_status: AtomicI32,
    running: AtomicBool,
    termination: Mutex<Option<Termination>>,
}

impl Completion {
    fn finish(&self, termination: Termination) {
        *self.termination.lock() = Some(termination);
        self.exit_status
            .store(termination.exit_status(), Ordering::Release);
        // Must stay last: observers that see `running == false` rely on the
        // status above being final.
        self.running.store(false, Ordering::Release);
    }
}

/// Handle for running one external executable.
///
/// Configure it with [`set_bin_path`](Cmd::set_bin_path) and
/// [`set_param`](Cmd::set_param), then call [`start`](Cmd::start) or
/// [`run`](Cmd::run). A handle launches at most once.
///
/// Output is collected until both pipes reach EOF, so a child that leaves
/// descendants holding its stdout or stderr stays "running" until they exit
/// too.
///
/// # Examples
///
/// ```rust,no_run
/// use hsu_cmd::Cmd;
///
/// # async fn example() -> hsu_common::ProcessResult<()> {
/// let mut cmd = Cmd::new();
/// cmd.set_bin_path("ls");
/// cmd.set_param("-C", "/tmp");
///
/// let output = cmd.run().await?;
/// println!("exit {}: {}", output.exit_status, output.stdout);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Cmd {
    bin_path: String,
    params: Params,
    stdout: OutputBuffer,
    stderr: OutputBuffer,
    completion: Arc<Completion>,
    /// PID of the live child; cleared by the wait task once the child is reaped
    pid: Arc<Mutex<Option<u32>>>,
    started: bool,
    done_rx: Option<watch::Receiver<bool>>,
}

impl Cmd {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an unstarted handle from a loaded configuration.
    pub fn from_config(config: &CmdConfig) -> Self {
        let mut cmd = Self::new();
        cmd.set_bin_path(config.binary_path.clone());
        cmd.params = config.params.clone();
        cmd
    }

    /// Set the path of the executable to run.
    pub fn set_bin_path(&mut self, path: impl Into<String>) {
        self.bin_path = path.into();
    }

    /// Set one parameter, passed as the two arguments `key value`.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.set(key, value);
    }

    /// Set several parameters at once.
    pub fn set_params<I, K, V>(&mut self, params: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params.extend(params);
    }

    pub fn bin_path(&self) -> &str {
        &self.bin_path
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The argument list the executable is launched with.
    pub fn args(&self) -> Vec<String> {
        self.params.to_args()
    }

    /// Launch the executable and return without waiting for it.
    ///
    /// On a launch error nothing is spawned and the handle stays unstarted.
    /// Nothing is awaited; the method is `async` so it can only be called
    /// from within a Tokio runtime, where the wait and reader tasks are
    /// spawned, and to match [`run`](Cmd::run) and [`wait`](Cmd::wait).
    pub async fn start(&mut self) -> ProcessResult<()> {
        if self.started {
            return Err(ProcessError::operation_not_allowed(
                self.bin_path.clone(),
                "start",
                self.state().to_string(),
            ));
        }

        let args = self.args();
        info!("Starting process: {} {:?}", self.bin_path, args);

        let mut child = match hsu_process::spawn_piped(&self.bin_path, &args) {
            Ok(child) => child,
            Err(e) => {
                error!("Failed to start {}: {}", self.bin_path, e);
                return Err(e);
            }
        };

        let pid = child.id();
        let readers: Vec<JoinHandle<()>> = [
            spawn_reader(
                child.stdout.take(),
                self.stdout.clone(),
                StreamType::Stdout,
                self.bin_path.clone(),
            ),
            spawn_reader(
                child.stderr.take(),
                self.stderr.clone(),
                StreamType::Stderr,
                self.bin_path.clone(),
            ),
        ]
        .into_iter()
        .flatten()
        .collect();

        *self.pid.lock() = pid;
        self.completion.running.store(true, Ordering::Release);
        self.started = true;

        let (done_tx, done_rx) = watch::channel(false);
        self.done_rx = Some(done_rx);

        tokio::spawn(wait_for_exit(
            child,
            readers,
            Arc::clone(&self.completion),
            Arc::clone(&self.pid),
            done_tx,
            self.bin_path.clone(),
        ));

        info!(
            "Process started: {} (PID: {})",
            self.bin_path,
            pid.map_or_else(|| "unknown".to_string(), |p| p.to_string())
        );
        Ok(())
    }

    /// Start the process and wait until it terminates.
    ///
    /// A launch error is returned as-is; the handle then still reports exit
    /// status 0 and empty output.
    pub async fn run(&mut self) -> ProcessResult<CmdOutput> {
        self.start().await?;
        let exit_status = self.wait().await?;

        Ok(CmdOutput {
            exit_status,
            stdout: self.stdout(),
            stderr: self.stderr(),
        })
    }

    /// Wait for the started process to terminate and return its exit status.
    ///
    /// Returns the current status immediately if the handle was never started.
    pub async fn wait(&self) -> ProcessResult<i32> {
        let Some(done_rx) = &self.done_rx else {
            return Ok(self.exit_status());
        };

        let mut done_rx = done_rx.clone();
        done_rx
            .wait_for(|done| *done)
            .await
            .map_err(|_| ProcessError::completion_channel_closed(self.bin_path.clone()))?;

        Ok(self.exit_status())
    }

    /// Request a graceful stop (SIGINT). Does not wait for the exit.
    ///
    /// Returns `AlreadyFinished` once the child has been reaped, even while
    /// [`is_running`](Cmd::is_running) is still true because its output
    /// pipes have not reached EOF.
    pub fn stop(&self) -> ProcessResult<()> {
        self.send_signal("interrupt", hsu_process::interrupt)
    }

    /// Forcefully terminate the process (SIGKILL). Does not wait for the exit.
    ///
    /// Same `AlreadyFinished` rule as [`stop`](Cmd::stop).
    pub fn kill(&self) -> ProcessResult<()> {
        self.send_signal("kill", hsu_process::force_kill)
    }

    fn send_signal(
        &self,
        signal: &str,
        send: fn(u32) -> ProcessResult<()>,
    ) -> ProcessResult<()> {
        if !self.started {
            debug!("Ignoring {} for {}: never started", signal, self.bin_path);
            return Ok(());
        }

        // Held while signalling so the wait task cannot clear the PID mid-send
        let guard = self.pid.lock();
        match *guard {
            Some(pid) => {
                info!("Sending {} to {} (PID: {})", signal, self.bin_path, pid);
                send(pid).map_err(|e| {
                    warn!("Failed to send {} to {} (PID: {}): {}", signal, self.bin_path, pid, e);
                    e
                })
            }
            None => Err(ProcessError::already_finished(self.bin_path.clone())),
        }
    }

    /// Captured stdout so far, as text.
    pub fn stdout(&self) -> String {
        self.stdout.to_string_lossy()
    }

    /// Captured stderr so far, as text.
    pub fn stderr(&self) -> String {
        self.stderr.to_string_lossy()
    }

    /// Captured stdout so far, byte for byte.
    pub fn stdout_bytes(&self) -> Vec<u8> {
        self.stdout.snapshot()
    }

    /// Captured stderr so far, byte for byte.
    pub fn stderr_bytes(&self) -> Vec<u8> {
        self.stderr.snapshot()
    }

    /// Last stored exit status; 0 until termination is observed.
    pub fn exit_status(&self) -> i32 {
        self.completion.exit_status.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.completion.running.load(Ordering::Acquire)
    }

    /// How the process ended, once termination has been observed.
    pub fn termination(&self) -> Option<Termination> {
        *self.completion.termination.lock()
    }

    /// PID of the child while it has not been reaped.
    pub fn pid(&self) -> Option<u32> {
        *self.pid.lock()
    }

    pub fn state(&self) -> CmdState {
        if !self.started {
            CmdState::Created
        } else if self.is_running() {
            CmdState::Running
        } else {
            CmdState::Terminated
        }
    }
}

/// Background wait task: reap the child, drain its output, record the result.
async fn wait_for_exit(
    mut child: Child,
    readers: Vec<JoinHandle<()>>,
    completion: Arc<Completion>,
    pid_slot: Arc<Mutex<Option<u32>>>,
    done_tx: watch::Sender<bool>,
    bin_path: String,
) {
    let pid = child.id().unwrap_or(0);
    debug!("Exit monitor started for {} (PID: {})", bin_path, pid);

    let result = child.wait().await;
    pid_slot.lock().take();

    if let Err(e) = &result {
        error!("Failed to wait for {} (PID: {}): {}", bin_path, pid, e);
    }

    for reader in readers {
        if let Err(e) = reader.await {
            warn!("Output reader for {} did not finish cleanly: {}", bin_path, e);
        }
    }

    let termination = Termination::from_wait_result(&result);
    if termination.success() {
        info!("Process {} (PID: {}) {}", bin_path, pid, termination);
    } else {
        warn!("Process {} (PID: {}) {}", bin_path, pid, termination);
    }

    completion.finish(termination);
    let _ = done_tx.send(true);
}
