use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cli_executor::{configure, handler, Command, Error, Param};

/// Demo CLI wired through cli-executor.
#[derive(Debug, Parser)]
#[command(name = "exec-demo", version, about)]
struct Cli {
    /// Print errors as full diagnostic reports
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Succeed and print "ok"
    Ok,
    /// Fail with the given message and exit code
    Fail {
        /// Error message ("" fails without printing)
        #[arg(long, default_value = "failed")]
        message: String,
        /// Exit code to report
        #[arg(long)]
        code: Option<i32>,
    },
}

fn run(cmd: &Command, matches: &clap::ArgMatches) -> Result<(), Error> {
    let cli = Cli::from_arg_matches(matches).map_err(|e| Error::msg(e.to_string()))?;
    match cli.command {
        Commands::Ok => {
            cmd.out().println("ok");
            Ok(())
        }
        Commands::Fail { message, code } => {
            let err = Error::msg(message);
            Err(match code {
                Some(code) => err.with_exit_code(code),
                None => err,
            })
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_env("EXEC_DEMO_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut root = Command::new(Cli::command(), run);
    let code = cli_executor::execute(
        &mut root,
        [
            Param::configure_cmd(configure::remove_help_command),
            Param::configure_cmd(configure::silence_errors),
            Param::configure_cmd(configure::flag_errors_usage_error),
            Param::error_handler(handler::error_printer_with_debug(
                "debug",
                handler::debug_report,
            )),
            Param::exit_code_extractor(handler::exit_code_from_error),
        ],
    );
    std::process::exit(code);
}
