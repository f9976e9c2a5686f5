//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use std::{
    fmt::Display,
    io::Read,
    process::{Child, ChildStderr, Command, ExitStatus, Stdio},
    thread::{sleep, spawn, JoinHandle},
    time::{Duration, Instant},
};

use log::{info, warn};

use crate::error::GmetricError;

use super::GmetricCommand;

const TIMEOUT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How a gmetric process ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandExit {
    Code(i32),
    /// Terminated by a signal, no exit code available.
    Signaled,
    /// Still running when the timeout expired; the process was killed.
    TimedOut,
}

impl CommandExit {
    pub fn success(&self) -> bool {
        matches!(self, CommandExit::Code(0))
    }
}

impl Display for CommandExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandExit::Code(code) => write!(f, "{}", code),
            CommandExit::Signaled => write!(f, "killed by signal"),
            CommandExit::TimedOut => write!(f, "timed out"),
        }
    }
}

impl From<ExitStatus> for CommandExit {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => CommandExit::Code(code),
            None => CommandExit::Signaled,
        }
    }
}

/// Runs one gmetric invocation to completion.
///
/// An `Err` means the program could not be run at all. A program that ran and failed is an
/// `Ok` with a non-successful [`CommandExit`].
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    fn run(&self, command: &GmetricCommand) -> Result<CommandExit, GmetricError>;
}

/// Spawns gmetric as a child process and blocks until it exits.
#[derive(Clone, Debug, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Waits for as long as the child runs.
    pub fn new() -> Self {
        Self { timeout: None }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    fn wait(&self, child: &mut Child) -> std::io::Result<CommandExit> {
        let timeout = match self.timeout {
            None => return child.wait().map(CommandExit::from),
            Some(timeout) => timeout,
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status.into());
            }
            if Instant::now() >= deadline {
                child.kill()?;
                child.wait()?;
                return Ok(CommandExit::TimedOut);
            }
            sleep(TIMEOUT_POLL_INTERVAL);
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &GmetricCommand) -> Result<CommandExit, GmetricError> {
        let launch_error = |source| GmetricError::Launch {
            program: command.program().to_string(),
            source,
        };

        let mut child = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(launch_error)?;

        // Drained while the child runs so it never blocks on a full pipe.
        let stderr = child.stderr.take().map(drain);
        let exit = self.wait(&mut child).map_err(launch_error)?;

        // Only a failing gmetric is worth reporting. Otherwise the reader is left to finish on
        // its own, since after a timeout the pipe may still be held open by the child's own
        // children.
        if matches!(exit, CommandExit::Code(code) if code != 0) {
            let stderr = stderr
                .and_then(|reader| reader.join().ok())
                .unwrap_or_default();
            if !stderr.trim().is_empty() {
                warn!("{}: {}", command.program(), stderr.trim());
            }
        }

        Ok(exit)
    }
}

fn drain(mut pipe: ChildStderr) -> JoinHandle<String> {
    spawn(move || {
        let mut output = Vec::new();
        // Best effort, this only feeds a log line.
        let _ = pipe.read_to_end(&mut output);
        String::from_utf8_lossy(&output).into_owned()
    })
}

/// Logs commands instead of running them.
#[derive(Clone, Copy, Debug, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&self, command: &GmetricCommand) -> Result<CommandExit, GmetricError> {
        info!("Dry run: {}", command);
        Ok(CommandExit::Code(0))
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use rstest::rstest;
    use tempfile::tempdir;

    use super::*;
    use crate::{config::GmetricConfig, gmetric::WireType};

    // The commands below run `/bin/sh -c <gmondConfig> -n <name> ...`, so the gmond config
    // slot holds the script and the remaining arguments show up as $0, $1, ...
    fn shell_command(script: &str) -> GmetricCommand {
        GmetricCommand::build(
            &GmetricConfig::test_fixture_with_shell_script(script),
            "heap.used",
            "1024",
            WireType::Int32,
        )
    }

    #[rstest]
    #[case("exit 0", CommandExit::Code(0))]
    #[case("exit 1", CommandExit::Code(1))]
    #[case("exit 42", CommandExit::Code(42))]
    #[case("kill -9 $$", CommandExit::Signaled)]
    fn reports_how_the_process_ended(#[case] script: &str, #[case] expected: CommandExit) {
        let exit = ProcessRunner::new().run(&shell_command(script)).unwrap();
        assert_eq!(exit, expected);
    }

    #[test]
    fn passes_every_argument() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("args");
        let script = format!("printf '%s\\n' \"$0\" \"$@\" > '{}'", out.display());

        let exit = ProcessRunner::new().run(&shell_command(&script)).unwrap();

        assert!(exit.success());
        let args: Vec<String> = fs::read_to_string(&out)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        assert_eq!(
            args,
            vec![
                "-n",
                "heap.used",
                "-v",
                "1024",
                "-t",
                "int32",
                "-u",
                "",
                "-s",
                "BOTH",
                "-x",
                "60",
                "-d",
                "0",
                "-g",
                "jvm",
            ]
        );
    }

    #[test]
    fn failing_process_is_not_an_error() {
        let exit = ProcessRunner::new()
            .run(&shell_command("echo 'no channels' >&2; exit 1"))
            .unwrap();
        assert!(!exit.success());
    }

    #[rstest]
    #[case(ProcessRunner::new())]
    #[case(ProcessRunner::with_timeout(Duration::from_secs(10)))]
    fn noisy_failure_does_not_fill_the_pipe(#[case] runner: ProcessRunner) {
        let exit = runner
            .run(&shell_command("head -c 200000 /dev/zero >&2; exit 1"))
            .unwrap();
        assert_eq!(exit, CommandExit::Code(1));
    }

    #[test]
    fn kills_processes_past_the_timeout() {
        let started = Instant::now();
        let exit = ProcessRunner::with_timeout(Duration::from_millis(100))
            .run(&shell_command("sleep 10"))
            .unwrap();

        assert_eq!(exit, CommandExit::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn fast_process_beats_the_timeout() {
        let exit = ProcessRunner::with_timeout(Duration::from_secs(10))
            .run(&shell_command("exit 0"))
            .unwrap();
        assert_eq!(exit, CommandExit::Code(0));
    }

    #[test]
    fn missing_executable_is_a_launch_error() {
        let dir = tempdir().unwrap();
        let gmetric_path = dir.path().join("gmetric");
        let command = GmetricCommand::build(
            &GmetricConfig::test_fixture_with_gmetric_path(&gmetric_path.to_string_lossy()),
            "load",
            "3.5",
            WireType::Double,
        );

        match ProcessRunner::new().run(&command) {
            Err(GmetricError::Launch { program, .. }) => {
                assert_eq!(program, gmetric_path.to_string_lossy())
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn non_executable_file_is_a_launch_error() {
        let dir = tempdir().unwrap();
        let gmetric_path = dir.path().join("gmetric");
        fs::write(&gmetric_path, "not a program").unwrap();
        let command = GmetricCommand::build(
            &GmetricConfig::test_fixture_with_gmetric_path(&gmetric_path.to_string_lossy()),
            "load",
            "3.5",
            WireType::Double,
        );

        assert!(matches!(
            ProcessRunner::new().run(&command),
            Err(GmetricError::Launch { .. })
        ));
    }

    #[test]
    fn dry_run_never_fails() {
        let command = GmetricCommand::build(
            &GmetricConfig::test_fixture_with_gmetric_path("/does/not/exist"),
            "load",
            "3.5",
            WireType::Double,
        );
        assert_eq!(DryRunRunner.run(&command).unwrap(), CommandExit::Code(0));
    }
}
