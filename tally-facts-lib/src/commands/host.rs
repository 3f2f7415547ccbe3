use chrono::{DateTime, Utc};
use std::io::Write;

/// The process environment a command runs in.
///
/// Commands never touch stdout, stderr, the process exit code, or the wall clock directly,
/// so a whole command run can be replayed in memory at a fixed instant.
pub trait Host: Send + Sync {
    /// Sink for the command's results
    fn output(&mut self) -> impl Write;

    /// Sink for diagnostics addressed to the user
    fn error(&mut self) -> impl Write;

    /// Report a failing exit code. A real process terminates here.
    fn exit(&mut self, code: i32);

    /// The instant host sync timestamps are judged against
    fn now(&self) -> DateTime<Utc>;
}

/// Records everything a command writes, and the exit code it asks for, at a pinned clock.
#[cfg(test)]
#[derive(Debug)]
pub struct TestHost {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<i32>,
    pub clock: DateTime<Utc>,
}

#[cfg(test)]
impl TestHost {
    /// A host pinned to 2024-05-10T12:00:00Z
    pub fn new() -> Self {
        Self::at("2024-05-10T12:00:00Z")
    }

    pub fn at(rfc3339: &str) -> Self {
        Self {
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
            clock: DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc),
        }
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.stdout
    }

    fn error(&mut self) -> impl Write {
        &mut self.stderr
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock
    }
}
