use std::fmt;

use crate::{Command, Error};

/// Mutates a command in place before it runs.
pub type ConfigureFn = Box<dyn FnOnce(&mut Command)>;
/// Reports a failed execution.
pub type ErrorHandlerFn = Box<dyn FnOnce(&Command, &Error)>;
/// Maps a failed execution to an exit code.
pub type ExitCodeExtractorFn = Box<dyn FnOnce(&Error) -> i32>;

/// State of one [`execute`](crate::execute) call, built from its params.
#[derive(Default)]
pub(crate) struct Executor {
    pub(crate) configure_cmds: Vec<ConfigureFn>,
    pub(crate) error_handler: Option<ErrorHandlerFn>,
    pub(crate) exit_code_extractor: Option<ExitCodeExtractorFn>,
}

/// An option for [`execute`](crate::execute).
///
/// Each variant sets exactly one part of the executor. Configurers accumulate
/// in the order given; a later handler or extractor replaces an earlier one.
pub enum Param {
    ConfigureCmd(ConfigureFn),
    ErrorHandler(ErrorHandlerFn),
    ExitCodeExtractor(ExitCodeExtractorFn),
}

impl Param {
    /// Mutate the root command before it runs.
    pub fn configure_cmd<F>(f: F) -> Self
    where
        F: FnOnce(&mut Command) + 'static,
    {
        Param::ConfigureCmd(Box::new(f))
    }

    /// Called with the root command and the error when execution fails.
    pub fn error_handler<F>(f: F) -> Self
    where
        F: FnOnce(&Command, &Error) + 'static,
    {
        Param::ErrorHandler(Box::new(f))
    }

    /// Maps an execution error to the exit code. Its result is used as-is.
    pub fn exit_code_extractor<F>(f: F) -> Self
    where
        F: FnOnce(&Error) -> i32 + 'static,
    {
        Param::ExitCodeExtractor(Box::new(f))
    }

    pub(crate) fn apply(self, executor: &mut Executor) {
        match self {
            Param::ConfigureCmd(f) => executor.configure_cmds.push(f),
            Param::ErrorHandler(f) => executor.error_handler = Some(f),
            Param::ExitCodeExtractor(f) => executor.exit_code_extractor = Some(f),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Param::ConfigureCmd(_) => "configure_cmd",
            Param::ErrorHandler(_) => "error_handler",
            Param::ExitCodeExtractor(_) => "exit_code_extractor",
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Param").field(&self.kind()).finish()
    }
}

impl Executor {
    /// Apply params in order, skipping `None`.
    pub(crate) fn from_params<I>(params: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Param>>,
    {
        let mut executor = Executor::default();
        for param in params.into_iter().filter_map(Into::<Option<Param>>::into) {
            tracing::debug!(param = param.kind(), "applying param");
            param.apply(&mut executor);
        }
        executor
    }
}
