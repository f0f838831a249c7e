//! Child-process execution with a wall-clock timeout.
//!
//! stdout/stderr are drained on background threads while the process runs.
//! Without this, a child writing more than the pipe buffer (~64KB) would
//! block on write and we'd deadlock waiting for it to exit.

use std::io::Read;
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use runcell_core::error::RunnerError;
use runcell_core::protocol::ProcessStatus;

/// Poll interval for `try_wait` in milliseconds.
const WAIT_POLL_INTERVAL_MS: u64 = 50;

/// Captured output of one child process.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ProcessStatus,
}

fn drain(reader: Option<impl Read + Send + 'static>) -> Option<thread::JoinHandle<String>> {
    reader.map(|mut r| {
        thread::spawn(move || {
            let mut s = String::new();
            let _ = r.read_to_string(&mut s);
            s
        })
    })
}

/// Kill the child and everything it spawned. The child is started in its own
/// process group on unix, so a negative-pid kill reaches grandchildren
/// (`npx` → `ts-node`, `npm` → `node`) that would otherwise keep the output
/// pipes open past the timeout and stall the drain threads.
fn kill_tree(child: &mut Child) {
    #[cfg(unix)]
    // The group id is the child's own pid: see process_group(0) at spawn.
    #[allow(unsafe_code)]
    unsafe {
        libc::kill(-(child.id() as i32), libc::SIGKILL);
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// Spawn `cmd` with piped stdio and wait for it, killing it (and on unix its
/// whole process group) once `timeout_secs` of wall-clock time elapse.
/// Output captured before a timeout kill is preserved so the caller can
/// still salvage it.
pub fn run_with_timeout(mut cmd: Command, timeout_secs: u64) -> Result<CommandOutput, RunnerError> {
    let program = cmd.get_program().to_string_lossy().to_string();
    #[cfg(unix)]
    cmd.process_group(0);
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunnerError::Spawn {
            program: program.clone(),
            source,
        })?;

    let stdout_handle = drain(child.stdout.take());
    let stderr_handle = drain(child.stderr.take());
    let join = move |handle: Option<thread::JoinHandle<String>>| {
        handle
            .map(|h| h.join().unwrap_or_default())
            .unwrap_or_default()
    };

    let start = Instant::now();
    let timeout = Duration::from_secs(timeout_secs);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return Ok(CommandOutput {
                    stdout: join(stdout_handle),
                    stderr: join(stderr_handle),
                    status: ProcessStatus::Exited(status.code().unwrap_or(-1)),
                });
            }
            Ok(None) => {}
            Err(source) => {
                kill_tree(&mut child);
                return Err(RunnerError::Spawn { program, source });
            }
        }

        if start.elapsed() > timeout {
            kill_tree(&mut child);
            tracing::warn!(timeout_secs, "Process killed: wall-clock timeout exceeded");
            return Ok(CommandOutput {
                stdout: join(stdout_handle),
                stderr: join(stderr_handle),
                status: ProcessStatus::TimedOut,
            });
        }

        thread::sleep(Duration::from_millis(WAIT_POLL_INTERVAL_MS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout_stderr_and_exit_code() {
        let out = run_with_timeout(sh("echo out; echo err >&2; exit 3"), 10).unwrap();
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
        assert_eq!(out.status, ProcessStatus::Exited(3));
    }

    #[cfg(unix)]
    #[test]
    fn large_output_does_not_deadlock() {
        // Well past the ~64KB pipe buffer.
        let out = run_with_timeout(sh("head -c 200000 /dev/zero | tr '\\0' 'x'"), 30).unwrap();
        assert_eq!(out.stdout.len(), 200_000);
        assert!(out.status.success());
    }

    #[cfg(unix)]
    #[test]
    fn kills_on_timeout_and_keeps_partial_output() {
        let out = run_with_timeout(sh("echo early; exec sleep 30"), 1).unwrap();
        assert_eq!(out.status, ProcessStatus::TimedOut);
        assert_eq!(out.stdout, "early\n");
    }

    #[cfg(unix)]
    #[test]
    fn timeout_kill_reaches_grandchildren() {
        // The backgrounded sleep inherits the stdout pipe. If only the
        // direct child died, the drain thread would block on that open pipe
        // until the grandchild exited, reporting the timeout ~30s late.
        let start = Instant::now();
        let out = run_with_timeout(sh("sleep 30 & exec sleep 30"), 1).unwrap();
        assert_eq!(out.status, ProcessStatus::TimedOut);
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let err = run_with_timeout(Command::new("runcell-no-such-binary"), 1).unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { .. }));
    }
}
