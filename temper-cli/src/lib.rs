mod dto;
mod error;
mod scale;
mod temperaments;

use std::fmt::{self, Debug, Display};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use scale::{DumpOptions, FindOptions, NotesOptions};
use temper::interchange::TemperamentImportError;
use temper::scale::ScaleBuildError;
use temperaments::{CheckOptions, ExportOptions, ListOptions};

#[derive(Parser)]
#[command(name = "temper", version, about)]
struct MainOptions {
    /// Write output to a file instead of stdout
    #[arg(long = "of")]
    output_file: Option<PathBuf>,

    #[command(subcommand)]
    command: MainCommand,
}

#[derive(Subcommand)]
enum MainCommand {
    /// List predefined and custom temperaments
    #[command(name = "list")]
    List(ListOptions),

    /// Print the built-in note names for a number of notes per octave
    #[command(name = "notes")]
    Notes(NotesOptions),

    /// Display all notes and frequencies of a scale
    #[command(name = "dump")]
    Dump(DumpOptions),

    /// Find the note closest to a frequency
    #[command(name = "find")]
    Find(FindOptions),

    /// Write temperaments in the interchange format
    #[command(name = "export")]
    Export(ExportOptions),

    /// Validate a temperament file
    #[command(name = "check")]
    Check(CheckOptions),
}

impl MainOptions {
    fn run(self) -> CliResult {
        let stdin = io::stdin();
        let input = Box::new(stdin.lock());

        let stdout = io::stdout();
        let output: Box<dyn Write> = match self.output_file {
            Some(output_file) => Box::new(File::create(output_file)?),
            None => Box::new(stdout.lock()),
        };

        let mut app = App { input, output };

        self.command.run(&mut app)
    }
}

impl MainCommand {
    fn run(self, app: &mut App) -> CliResult {
        match self {
            MainCommand::List(options) => options.run(app)?,
            MainCommand::Notes(options) => options.run(app)?,
            MainCommand::Dump(options) => options.run(app)?,
            MainCommand::Find(options) => options.run(app)?,
            MainCommand::Export(options) => options.run(app)?,
            MainCommand::Check(options) => options.run(app)?,
        }
        Ok(())
    }
}

pub fn run_in_shell_env(args: impl IntoIterator<Item = String>) -> CliResult {
    let options = match MainOptions::try_parse_from(args) {
        Err(err) => {
            return if err.use_stderr() {
                Err(CliError::CommandError(err.to_string()))
            } else {
                print!("{err}");
                Ok(())
            };
        }
        Ok(options) => options,
    };

    options.run()
}

struct App<'a> {
    input: Box<dyn 'a + Read>,
    output: Box<dyn 'a + Write>,
}

impl App<'_> {
    pub fn write(&mut self, message: impl Display) -> io::Result<()> {
        write!(&mut self.output, "{message}")
    }

    pub fn writeln(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(&mut self.output, "{message}")
    }

    pub fn read(&mut self) -> &mut dyn Read {
        &mut self.input
    }
}

pub type CliResult<T = ()> = Result<T, CliError>;

pub enum CliError {
    IoError(io::Error),
    CommandError(String),
}

impl Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::IoError(err) => write!(f, "IO error / {err}"),
            CliError::CommandError(err) => write!(f, "The command failed / {err}"),
        }
    }
}

impl From<String> for CliError {
    fn from(v: String) -> Self {
        CliError::CommandError(v)
    }
}

impl From<ScaleBuildError> for CliError {
    fn from(v: ScaleBuildError) -> Self {
        CliError::CommandError(format!("Could not create scale ({v:?})"))
    }
}

impl From<TemperamentImportError> for CliError {
    fn from(v: TemperamentImportError) -> Self {
        match v {
            TemperamentImportError::IoError(err) => CliError::IoError(err),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(v: io::Error) -> Self {
        CliError::IoError(v)
    }
}
