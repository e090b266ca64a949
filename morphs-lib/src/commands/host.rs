use std::io::Write;

/// The process environment a command runs in.
///
/// Commands never touch the standard streams directly, so the same code drives the
/// binary and the in-memory host used by tests.
pub trait Host: Send + Sync {
    /// Where rendered comparisons and command results go.
    fn output(&mut self) -> impl Write;

    /// Where diagnostics go.
    fn error(&mut self) -> impl Write;

    /// Whether `output` is an interactive terminal, which decides `--color auto`.
    fn output_is_terminal(&self) -> bool;

    /// Terminate with `code`. Test hosts record the code and return.
    fn exit(&mut self, code: i32);
}

/// In-memory host that records everything a command writes.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
    pub terminal: bool,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose output claims to be a terminal.
    pub fn terminal() -> Self {
        Self {
            terminal: true,
            ..Self::default()
        }
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_text(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn output_is_terminal(&self) -> bool {
        self.terminal
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
