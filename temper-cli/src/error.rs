use std::fmt::Debug;

use crate::CliError;

/// Turns failed lookups and library errors into a [`CliError::CommandError`] with context.
pub trait ResultExt<T> {
    fn handle_error(self, context: &str) -> Result<T, CliError>;
}

impl<T, E: Debug> ResultExt<T> for Result<T, E> {
    fn handle_error(self, context: &str) -> Result<T, CliError> {
        self.map_err(|err| CliError::CommandError(format!("{context} ({err:?})")))
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn handle_error(self, context: &str) -> Result<T, CliError> {
        self.ok_or_else(|| CliError::CommandError(context.to_owned()))
    }
}
