use crate::param::Executor;
use crate::{Command, Param};

/// Exit code for a successful run.
pub const SUCCESS_EXIT_CODE: i32 = 0;

/// Exit code for a failed run when no extractor is registered.
pub const DEFAULT_EXIT_CODE: i32 = 1;

/// Run `root` with the given params and return the process exit code.
///
/// Params are applied in order (`None` entries are ignored), then every
/// configurer runs against `root` in registration order, then `root` is
/// executed once. On failure the error handler, if any, is called first and
/// the exit-code extractor, if any, decides the code; otherwise the code is
/// [`DEFAULT_EXIT_CODE`]. Nothing is called on success.
///
/// # Examples
///
/// ```
/// use cli_executor::{execute, Command, Error, Param};
///
/// let mut root = Command::new(clap::Command::new("app"), |_, _| Err(Error::msg("boom")));
/// root.set_args(["app"]);
/// root.set_output(cli_executor::Output::buffer());
///
/// let code = execute(&mut root, [Param::exit_code_extractor(|_| 42)]);
/// assert_eq!(code, 42);
/// ```
pub fn execute<I>(root: &mut Command, params: I) -> i32
where
    I: IntoIterator,
    I::Item: Into<Option<Param>>,
{
    let executor = Executor::from_params(params);

    tracing::debug!(
        command = root.name(),
        configurers = executor.configure_cmds.len(),
        "configuring root command"
    );
    for configure_cmd in executor.configure_cmds {
        configure_cmd(root);
    }

    let err = match root.execute() {
        Ok(()) => {
            tracing::debug!(command = root.name(), "command succeeded");
            return SUCCESS_EXIT_CODE;
        }
        Err(err) => err,
    };

    if let Some(handler) = executor.error_handler {
        handler(root, &err);
    }

    let code = match executor.exit_code_extractor {
        Some(extractor) => extractor(&err),
        None => DEFAULT_EXIT_CODE,
    };
    tracing::debug!(command = root.name(), code, error = %err, "command failed");
    code
}
