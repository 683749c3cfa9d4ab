mod output;

use std::ffi::OsString;
use std::fmt;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::ArgMatches;

use crate::Error;

pub use output::Output;

/// Name the help subcommand is registered under.
pub const HELP_COMMAND_NAME: &str = "help";

/// Body of a command, called with the matches clap produced.
pub type RunFn = Box<dyn Fn(&Command, &ArgMatches) -> Result<(), Error>>;

/// Rewrites an argument-parsing error before it is reported or returned.
pub type FlagErrorFn = Box<dyn Fn(&Command, Error) -> Error>;

/// A runnable command: a `clap::Command` for parsing plus the function that
/// does the work.
///
/// clap owns argument definitions, subcommands and help text. This type adds
/// what clap leaves out: running, a help-subcommand slot, error/usage
/// printing and a hook for parse errors.
pub struct Command {
    clap: clap::Command,
    run: RunFn,
    help_command: Option<Box<Command>>,
    flag_error_func: Option<FlagErrorFn>,
    args: Option<Vec<OsString>>,
    out: Output,
    err: Output,
    matches: Option<ArgMatches>,
    /// Do not print `Error: <message>` when execution fails.
    pub silence_errors: bool,
    /// Do not print the usage string when execution fails.
    pub silence_usage: bool,
}

impl Command {
    pub fn new<F>(clap: clap::Command, run: F) -> Self
    where
        F: Fn(&Command, &ArgMatches) -> Result<(), Error> + 'static,
    {
        Command {
            clap,
            run: Box::new(run),
            help_command: None,
            flag_error_func: None,
            args: None,
            out: Output::Stdout,
            err: Output::Stderr,
            matches: None,
            silence_errors: false,
            silence_usage: false,
        }
    }

    pub fn name(&self) -> &str {
        self.clap.get_name()
    }

    pub fn is_hidden(&self) -> bool {
        self.clap.is_hide_set()
    }

    pub fn clap(&self) -> &clap::Command {
        &self.clap
    }

    /// Rebuild the underlying clap definition in place.
    pub fn update_clap<F>(&mut self, f: F)
    where
        F: FnOnce(clap::Command) -> clap::Command,
    {
        let current = std::mem::replace(&mut self.clap, clap::Command::new(""));
        self.clap = f(current);
    }

    /// Add an argument to the command.
    pub fn arg(&mut self, arg: impl Into<clap::Arg>) {
        let arg = arg.into();
        self.update_clap(|clap| clap.arg(arg));
    }

    /// Arguments to parse, program name first. Without this the process
    /// arguments are used.
    pub fn set_args<I, T>(&mut self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
    }

    /// Send both help text and error text to `output`.
    pub fn set_output(&mut self, output: Output) {
        self.out = output.clone();
        self.err = output;
    }

    pub fn set_out(&mut self, output: Output) {
        self.out = output;
    }

    pub fn set_err(&mut self, output: Output) {
        self.err = output;
    }

    pub fn out(&self) -> &Output {
        &self.out
    }

    pub fn err(&self) -> &Output {
        &self.err
    }

    /// Fill the help-subcommand slot.
    ///
    /// While the slot is empty clap's own `help` subcommand is registered
    /// whenever the command has subcommands. A filled slot disables it and
    /// registers `help` under the name [`HELP_COMMAND_NAME`].
    pub fn set_help_command(&mut self, help: Command) {
        self.help_command = Some(Box::new(help));
    }

    pub fn help_command(&self) -> Option<&Command> {
        self.help_command.as_deref()
    }

    pub fn set_flag_error_func<F>(&mut self, f: F)
    where
        F: Fn(&Command, Error) -> Error + 'static,
    {
        self.flag_error_func = Some(Box::new(f));
    }

    /// Pass a flag error on this command through the flag-error hook, if one
    /// is set. Errors on a subcommand are passed with that subcommand.
    pub fn flag_error(&self, err: Error) -> Error {
        self.apply_flag_error_func(self, err)
    }

    /// The usage line, newline-terminated.
    pub fn usage_string(&self) -> String {
        let mut clap = self.build_clap();
        format!("{}\n", clap.render_usage())
    }

    /// Print a line to the error output.
    pub fn println(&self, text: &str) {
        self.err.println(text);
    }

    /// Matches from the last execution that got past parsing.
    pub fn matches(&self) -> Option<&ArgMatches> {
        self.matches.as_ref()
    }

    /// Parse the arguments and run the command.
    ///
    /// Help and version requests print to the standard output and succeed.
    /// Any failure is printed (unless silenced) and returned.
    pub fn execute(&mut self) -> Result<(), Error> {
        let args = match &self.args {
            Some(args) => args.clone(),
            None => std::env::args_os().collect(),
        };
        self.matches = None;

        let result = match self.build_clap().try_get_matches_from(&args) {
            Ok(matches) => {
                let result = self.dispatch(&matches);
                self.matches = Some(matches);
                result
            }
            Err(err) if err.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                // The rendered help already carries the usage.
                self.err.print(&err.render().to_string());
                return Err(Error::silent());
            }
            Err(err) => self.parse_failure(&args, &err),
        };

        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    fn build_clap(&self) -> clap::Command {
        let clap = self.clap.clone();
        match &self.help_command {
            Some(help) if clap.has_subcommands() => clap
                .disable_help_subcommand(true)
                .subcommand(help.clap.clone().name(HELP_COMMAND_NAME)),
            _ => clap,
        }
    }

    fn dispatch(&self, matches: &ArgMatches) -> Result<(), Error> {
        if let (Some(help), Some((HELP_COMMAND_NAME, sub))) =
            (self.help_command.as_deref(), matches.subcommand())
        {
            return (help.run)(help, sub);
        }
        (self.run)(self, matches)
    }

    fn parse_failure(&self, args: &[OsString], err: &clap::Error) -> Result<(), Error> {
        let message = clap_message(err);
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                self.out.print(&err.render().to_string());
                Ok(())
            }
            kind if is_flag_error(kind) => {
                let flag_err = Error::flag(message);
                match self.failing_subcommand(args, offending_token(err)) {
                    Some(sub) => Err(self.apply_flag_error_func(&sub, flag_err)),
                    None => Err(self.flag_error(flag_err)),
                }
            }
            _ => Err(Error::msg(message)),
        }
    }

    fn apply_flag_error_func(&self, target: &Command, err: Error) -> Error {
        match &self.flag_error_func {
            Some(f) => f(target, err),
            None => err,
        }
    }

    /// The deepest subcommand named in `args` before `stop`, as a command
    /// sharing this command's outputs. `None` when the failure is on this
    /// command itself.
    fn failing_subcommand(&self, args: &[OsString], stop: Option<&str>) -> Option<Command> {
        let mut root = self.build_clap();
        root.build();

        let mut current: Option<clap::Command> = None;
        for arg in args.iter().skip(1) {
            let token = arg.to_string_lossy();
            let rejected =
                stop.is_some_and(|s| token == s || token.starts_with(&format!("{s}=")));
            if token == "--" || rejected {
                break;
            }
            if token.starts_with('-') {
                continue;
            }
            let parent = current.as_ref().unwrap_or(&root);
            if let Some(sub) = parent.find_subcommand(arg) {
                current = Some(sub.clone());
            }
        }

        current.map(|clap| {
            let mut sub = Command::new(clap, |_, _| Ok(()));
            sub.out = self.out.clone();
            sub.err = self.err.clone();
            sub.silence_errors = self.silence_errors;
            sub.silence_usage = self.silence_usage;
            sub
        })
    }

    fn report(&self, err: &Error) {
        let message = err.to_string();
        if !self.silence_errors && !message.is_empty() {
            self.println(&format!("Error: {message}"));
        }
        if !self.silence_usage {
            self.err.print(&self.usage_string());
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("help_command", &self.help_command)
            .field("silence_errors", &self.silence_errors)
            .field("silence_usage", &self.silence_usage)
            .finish_non_exhaustive()
    }
}

/// Parse failures about a flag or argument value. Other parse failures,
/// such as an unknown subcommand, bypass the flag-error hook.
fn is_flag_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UnknownArgument
            | ErrorKind::InvalidValue
            | ErrorKind::NoEquals
            | ErrorKind::ValueValidation
            | ErrorKind::TooManyValues
            | ErrorKind::TooFewValues
            | ErrorKind::WrongNumberOfValues
            | ErrorKind::ArgumentConflict
    )
}

/// The argv token clap rejected, when it reports one.
fn offending_token(err: &clap::Error) -> Option<&str> {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(token)) => Some(token.as_str()),
        _ => None,
    }
}

/// First line of clap's rendering, without the `error: ` prefix.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
