use std::fmt;

use miette::{Diagnostic, Severity};
use thiserror::Error;

/// Failure of a command execution.
///
/// This is the only error kind the executor deals with. It is never
/// interpreted here beyond its message; handlers and exit-code extractors
/// decide what it means.
#[derive(Debug, Error)]
pub enum Error {
    /// A flag could not be parsed. The message may have been rewritten by
    /// the command's flag-error hook.
    #[error("{message}")]
    Flag { message: String },

    /// A plain failure. An empty message means "fail without printing".
    #[error("{0}")]
    Message(String),

    /// Any error raised by a run function.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),

    /// Another error tagged with the exit code the process should report.
    /// Message, source and diagnostic are those of the tagged error.
    #[error(transparent)]
    Exit(ExitTagged),
}

// Written out by hand rather than derived: the derive's transparent
// forwarding calls `field.code()`, which resolves to the inherent
// `ExitTagged::code` (the exit code) instead of `Diagnostic::code`.
impl Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Error::Flag { .. } => Some(Box::new("cli_executor::flag")),
            Error::Message(_) => Some(Box::new("cli_executor::message")),
            Error::Other(_) => Some(Box::new("cli_executor::other")),
            Error::Exit(tagged) => Diagnostic::code(tagged),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Error::Exit(tagged) => Diagnostic::severity(tagged),
            _ => None,
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Error::Exit(tagged) => Diagnostic::help(tagged),
            _ => None,
        }
    }

    fn url<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Error::Exit(tagged) => Diagnostic::url(tagged),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Error::Exit(tagged) => Diagnostic::source_code(tagged),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        match self {
            Error::Exit(tagged) => Diagnostic::labels(tagged),
            _ => None,
        }
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        match self {
            Error::Exit(tagged) => Diagnostic::related(tagged),
            _ => None,
        }
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        match self {
            Error::Exit(tagged) => Diagnostic::diagnostic_source(tagged),
            _ => None,
        }
    }
}

/// An error together with the exit code it should produce.
#[derive(Debug)]
pub struct ExitTagged {
    code: i32,
    inner: Box<Error>,
}

impl ExitTagged {
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn inner(&self) -> &Error {
        &self.inner
    }
}

impl fmt::Display for ExitTagged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl std::error::Error for ExitTagged {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&*self.inner)
    }
}

impl Diagnostic for ExitTagged {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner.code()
    }

    fn severity(&self) -> Option<Severity> {
        self.inner.severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner.help()
    }

    fn url<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner.url()
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        self.inner.diagnostic_source()
    }
}

impl Error {
    pub fn flag(message: impl Into<String>) -> Self {
        Error::Flag {
            message: message.into(),
        }
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }

    /// A failure with an empty message. The standard error printer stays quiet for it.
    pub fn silent() -> Self {
        Error::Message(String::new())
    }

    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Other(Box::new(err))
    }

    /// Attach an exit code. Re-tagging an already tagged error replaces the code.
    pub fn with_exit_code(self, code: i32) -> Self {
        let inner = match self {
            Error::Exit(tagged) => tagged.inner,
            other => Box::new(other),
        };
        Error::Exit(ExitTagged { code, inner })
    }

    /// The exit code attached with [`Error::with_exit_code`], if any.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::Exit(tagged) => Some(tagged.code),
            _ => None,
        }
    }
}
