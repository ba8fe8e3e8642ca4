use std::env;
use std::io::ErrorKind;

use temper_cli::CliError;
use temper_cli::CliResult;

fn main() -> CliResult {
    env_logger::init();

    match temper_cli::run_in_shell_env(env::args()) {
        // Occurs when piping into a process that has already terminated, e.g. `temper dump | head`.
        Err(CliError::IoError(err)) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
