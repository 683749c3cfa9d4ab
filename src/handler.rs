//! Ready-made error handlers, debug transforms and exit-code extractors.

use miette::{GraphicalReportHandler, GraphicalTheme};

use crate::executor::DEFAULT_EXIT_CODE;
use crate::{Command, Error};

/// Print `Error: <message>` through the command, or nothing if the message
/// is empty.
pub fn error_printer() -> impl Fn(&Command, &Error) + 'static {
    |command: &Command, err: &Error| print_error(command, err.to_string())
}

/// Like [`error_printer`], but when the boolean argument `debug_arg` is set
/// in the failed run's matches, the message comes from `transform` instead.
///
/// The argument is looked up on the root matches and on every matched
/// subcommand, so a `global` flag works wherever it is given. If parsing
/// itself failed there are no matches and the plain message is used.
pub fn error_printer_with_debug<F>(
    debug_arg: impl Into<String>,
    transform: F,
) -> impl Fn(&Command, &Error) + 'static
where
    F: Fn(&Error) -> String + 'static,
{
    let debug_arg = debug_arg.into();
    move |command: &Command, err: &Error| {
        let message = err.to_string();
        if message.is_empty() {
            return;
        }
        if flag_set(command, &debug_arg) {
            print_error(command, transform(err));
        } else {
            print_error(command, message);
        }
    }
}

/// Render the error as a miette report: diagnostic code, message and cause chain.
pub fn debug_report(err: &Error) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    match handler.render_report(&mut out, err) {
        Ok(()) => out.trim_end().to_string(),
        Err(_) => err.to_string(),
    }
}

/// Exit code attached with [`Error::with_exit_code`], else [`DEFAULT_EXIT_CODE`].
pub fn exit_code_from_error(err: &Error) -> i32 {
    err.exit_code().unwrap_or(DEFAULT_EXIT_CODE)
}

fn print_error(command: &Command, message: String) {
    if message.is_empty() {
        return;
    }
    command.println(&format!("Error: {message}"));
}

fn flag_set(command: &Command, id: &str) -> bool {
    let mut current = command.matches();
    while let Some(matches) = current {
        if matches!(matches.try_get_one::<bool>(id), Ok(Some(&true))) {
            return true;
        }
        current = matches.subcommand().map(|(_, sub)| sub);
    }
    false
}
