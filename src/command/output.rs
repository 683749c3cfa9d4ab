use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Where a command writes its text.
///
/// `Buffer` is shared: clones write into, and read from, the same storage.
#[derive(Debug, Clone, Default)]
pub enum Output {
    Stdout,
    #[default]
    Stderr,
    Buffer(Rc<RefCell<Vec<u8>>>),
}

impl Output {
    /// A fresh in-memory sink.
    pub fn buffer() -> Self {
        Output::Buffer(Rc::new(RefCell::new(Vec::new())))
    }

    /// Everything written so far. Always empty for the process streams.
    pub fn contents(&self) -> String {
        match self {
            Output::Buffer(buf) => String::from_utf8_lossy(&buf.borrow()).into_owned(),
            Output::Stdout | Output::Stderr => String::new(),
        }
    }

    /// Write `text` as-is. Write errors are logged and otherwise dropped.
    pub fn print(&self, text: &str) {
        if let Err(err) = self.write_all(text.as_bytes()) {
            tracing::debug!(output = ?self, error = %err, "failed to write command output");
        }
    }

    fn write_all(&self, bytes: &[u8]) -> std::io::Result<()> {
        match self {
            Output::Stdout => std::io::stdout().lock().write_all(bytes),
            Output::Stderr => std::io::stderr().lock().write_all(bytes),
            Output::Buffer(buf) => buf.borrow_mut().write_all(bytes),
        }
    }

    pub fn println(&self, text: &str) {
        self.print(text);
        self.print("\n");
    }
}
