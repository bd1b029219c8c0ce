//! External decompressor run as a child process.
//!
//! Contract of the program under test: `program [args..] <input> <output>`,
//! where `<input>` is a container file. It must exit 0 and leave the expanded
//! bytes in `<output>`; anything else is a failure.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver};

use super::{Decompressor, DecompressorOutput};
use crate::config::{PROCESS_DRAIN_GRACE, PROCESS_POLL_INTERVAL, PROCESS_TIMEOUT_DEFAULT};
use crate::displaylevel;
use crate::error::MamError;

/// Runs an external program as the decompressor under test.
#[derive(Clone, Debug)]
pub struct ProcessDecompressor {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl ProcessDecompressor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        ProcessDecompressor {
            program: program.into(),
            args: Vec::new(),
            timeout: PROCESS_TIMEOUT_DEFAULT,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

enum Wait {
    Exited(ExitStatus),
    TimedOut,
}

/// Polls `child` until it exits or `timeout` passes; a late child is killed.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> std::io::Result<Wait> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Wait::Exited(status));
        }
        if Instant::now() >= deadline {
            kill_group(child);
            let _ = child.wait();
            return Ok(Wait::TimedOut);
        }
        thread::sleep(PROCESS_POLL_INTERVAL);
    }
}

/// Kills `child` and everything it spawned. The child leads its own process
/// group on Unix, so wrappers such as `sh -c` take their children down too.
fn kill_group(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Ok(pgid) = i32::try_from(child.id()) {
            let _ = killpg(Pid::from_raw(pgid), Signal::SIGKILL);
        }
    }
    let _ = child.kill();
}

/// Drains a child pipe on its own thread so a chatty child cannot block on a
/// full pipe while we wait for it.
///
/// The text comes back over a channel. A descendant that outlives the child
/// keeps the pipe open, so the reader is never joined.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut p) = pipe {
            let _ = p.read_to_end(&mut buf);
        }
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Output collected so far, or nothing if the pipe is still held open after
/// the grace period.
fn collect(rx: &Receiver<String>) -> String {
    rx.recv_timeout(PROCESS_DRAIN_GRACE).unwrap_or_default()
}

impl Decompressor for ProcessDecompressor {
    fn name(&self) -> String {
        self.program.display().to_string()
    }

    fn decompress(&self, container: &[u8]) -> DecompressorOutput {
        let failed = |msg: String| DecompressorOutput {
            result: Err(msg),
            stdout: String::new(),
            stderr: String::new(),
        };

        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => return failed(MamError::Io(e).to_string()),
        };
        let input = dir.path().join("sample.mam");
        let output = dir.path().join("sample.mam.decompressed");
        if let Err(e) = fs::write(&input, container) {
            return failed(MamError::Io(e).to_string());
        }

        displaylevel!(
            3,
            "running {} {} {} {}\n",
            self.program.display(),
            self.args.join(" "),
            input.display(),
            output.display()
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(&input)
            .arg(&output)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = match command.spawn() {
            Ok(c) => c,
            Err(e) => {
                return failed(
                    MamError::EngineUnavailable(format!("{}: {e}", self.program.display()))
                        .to_string(),
                )
            }
        };

        let out_reader = drain(child.stdout.take());
        let err_reader = drain(child.stderr.take());
        let waited = wait_with_deadline(&mut child, self.timeout);
        let stdout = collect(&out_reader);
        let stderr = collect(&err_reader);

        let result = match waited {
            Err(e) => Err(MamError::Io(e).to_string()),
            Ok(Wait::TimedOut) => Err(MamError::EngineUnavailable(format!(
                "{} did not finish within {:?}",
                self.program.display(),
                self.timeout
            ))
            .to_string()),
            Ok(Wait::Exited(status)) if !status.success() => Err(format!(
                "{} failed with {status}",
                self.program.display()
            )),
            Ok(Wait::Exited(_)) => fs::read(&output).map_err(|e| {
                format!(
                    "{} exited 0 but produced no output file: {e}",
                    self.program.display()
                )
            }),
        };

        DecompressorOutput {
            result,
            stdout,
            stderr,
        }
    }
}
