//! Ready-made configurers for [`Param::configure_cmd`](crate::Param::configure_cmd).

use clap::{Arg, ArgAction};

use crate::command::HELP_COMMAND_NAME;
use crate::{Command, Error};

/// Remove the `help` subcommand.
///
/// The slot is filled with a hidden command that does nothing instead of
/// being left empty: an empty slot lets clap register its own `help`
/// subcommand again. `-h`/`--help` are unaffected.
pub fn remove_help_command(command: &mut Command) {
    let placeholder = clap::Command::new(HELP_COMMAND_NAME)
        .hide(true)
        .disable_help_flag(true)
        .arg(
            Arg::new("topics")
                .num_args(0..)
                .action(ArgAction::Append)
                .allow_hyphen_values(true)
                .trailing_var_arg(true)
                .hide(true),
        );
    command.set_help_command(Command::new(placeholder, |_, _| Ok(())));
}

/// Turn off printing of errors and usage on failure, leaving reporting to the
/// error handler.
pub fn silence_errors(command: &mut Command) {
    command.silence_errors = true;
    command.silence_usage = true;
}

/// Make argument-parsing errors carry the command's usage.
///
/// The error becomes `<message>\n<usage>`, with one trailing newline removed
/// from the usage string. The usage is that of the subcommand the bad flag
/// was given to.
pub fn flag_errors_usage_error(command: &mut Command) {
    command.set_flag_error_func(|c, err| {
        let usage = c.usage_string();
        let usage = usage.strip_suffix('\n').unwrap_or(&usage);
        Error::flag(format!("{err}\n{usage}"))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Output;

    fn with_subcommands() -> Command {
        let clap = clap::Command::new("app")
            .override_usage("app [flags]")
            .subcommand(clap::Command::new("sync"));
        Command::new(clap, |_, _| Err(Error::msg("root should not run")))
    }

    fn run(mut cmd: Command, args: &[&str]) -> (Result<(), Error>, Output) {
        let output = Output::buffer();
        cmd.set_output(output.clone());
        cmd.set_args(args.iter().copied());
        (cmd.execute(), output)
    }

    // ---- remove_help_command ----

    #[test]
    fn removed_help_is_a_silent_no_op() {
        let mut cmd = with_subcommands();
        remove_help_command(&mut cmd);
        let (result, output) = run(cmd, &["app", "help"]);
        assert!(result.is_ok());
        assert_eq!(output.contents(), "");
    }

    #[test]
    fn removed_help_ignores_topics() {
        let mut cmd = with_subcommands();
        remove_help_command(&mut cmd);
        let (result, output) = run(cmd, &["app", "help", "sync", "--all"]);
        assert!(result.is_ok());
        assert_eq!(output.contents(), "");
    }

    #[test]
    fn removed_help_placeholder_is_hidden() {
        let mut cmd = with_subcommands();
        remove_help_command(&mut cmd);
        assert!(cmd.help_command().is_some_and(Command::is_hidden));
    }

    #[test]
    fn removed_help_is_not_listed_in_help_output() {
        let mut cmd = with_subcommands();
        remove_help_command(&mut cmd);
        let (result, output) = run(cmd, &["app", "--help"]);
        assert!(result.is_ok());
        let help = output.contents();
        assert!(help.contains("sync"));
        assert!(!help.contains("Print this message"), "got: {help}");
    }

    #[test]
    fn builtin_help_prints_without_configurer() {
        let (result, output) = run(with_subcommands(), &["app", "help"]);
        assert!(result.is_ok());
        assert!(!output.contents().is_empty());
    }

    // ---- silence_errors ----

    #[test]
    fn silence_sets_both_flags() {
        let mut cmd = with_subcommands();
        silence_errors(&mut cmd);
        assert!(cmd.silence_errors);
        assert!(cmd.silence_usage);
    }

    #[test]
    fn silenced_failure_prints_nothing() {
        let mut cmd = with_subcommands();
        silence_errors(&mut cmd);
        let (result, output) = run(cmd, &["app"]);
        assert!(result.is_err());
        assert_eq!(output.contents(), "");
    }

    // ---- flag_errors_usage_error ----

    #[test]
    fn flag_error_gets_usage_appended_without_blank_line() {
        let mut cmd = with_subcommands();
        flag_errors_usage_error(&mut cmd);
        let err = cmd.flag_error(Error::flag("unknown flag: --foo"));
        assert_eq!(err.to_string(), "unknown flag: --foo\nUsage: app [flags]");
    }

    #[test]
    fn subcommand_flag_error_carries_subcommand_usage() {
        let mut cmd = with_subcommands();
        silence_errors(&mut cmd);
        flag_errors_usage_error(&mut cmd);
        let (result, _) = run(cmd, &["app", "sync", "--foo"]);
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("unexpected argument '--foo'"), "got: {message}");
        assert!(message.contains("\nUsage: app sync"), "got: {message}");
        assert!(!message.contains("app [flags]"), "got: {message}");
        assert!(!message.ends_with('\n'), "got: {message}");
    }

    #[test]
    fn parse_failure_returns_message_with_usage() {
        let mut cmd = with_subcommands();
        silence_errors(&mut cmd);
        flag_errors_usage_error(&mut cmd);
        let (result, _) = run(cmd, &["app", "--foo"]);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("--foo"), "got: {message}");
        assert!(message.ends_with("\nUsage: app [flags]"), "got: {message}");
    }
}
