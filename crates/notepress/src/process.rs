//! Runs external programs with a deadline.
//!
//! Every process the tool starts (`osascript`, `git`) goes through
//! [`run_with_timeout`]. The child is polled until it exits or the deadline
//! passes, in which case it is killed and [`NotepressError::Timeout`] is
//! returned. stdout and stderr are drained on helper threads so a chatty child
//! cannot stall on a full pipe.
//!
//! The deadline also bounds reading the output. A grandchild that inherited
//! the pipes (an ssh control master started by `git push`, say) can keep them
//! open after the child exits; whatever arrived by the deadline is returned
//! and the drain threads are left to finish on their own.

use crate::error::{NotepressError, Result};
use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(25);
/// Minimum time given to the pipes after the child exits.
const DRAIN_GRACE: Duration = Duration::from_millis(100);
const CHUNK_SIZE: usize = 8192;

#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

pub fn run_with_timeout(command: &mut Command, timeout: Duration) -> Result<ProcessOutput> {
    let program = command.get_program().to_string_lossy().into_owned();
    debug!(program = %program, timeout_ms = timeout.as_millis() as u64, "spawning process");

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| NotepressError::Process {
            program: program.clone(),
            reason: e.to_string(),
        })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(NotepressError::Timeout {
                    program,
                    seconds: timeout.as_secs(),
                });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                let _ = child.kill();
                return Err(NotepressError::Process {
                    program,
                    reason: e.to_string(),
                });
            }
        }
    };

    let drain_deadline = deadline.max(Instant::now() + DRAIN_GRACE);
    Ok(ProcessOutput {
        status,
        stdout: collect(stdout, drain_deadline),
        stderr: collect(stderr, drain_deadline),
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<Receiver<Vec<u8>>> {
    pipe.map(|mut pipe| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut chunk = [0u8; CHUNK_SIZE];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if tx.send(chunk[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        rx
    })
}

/// Gathers chunks until the pipe closes or `deadline` passes.
fn collect(rx: Option<Receiver<Vec<u8>>>, deadline: Instant) -> String {
    let Some(rx) = rx else {
        return String::new();
    };

    let mut bytes = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(chunk) => bytes.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                debug!("output pipe still open at the deadline, keeping what arrived");
                break;
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
