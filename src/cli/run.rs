use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, file::file, init::init, project::project},
    exit_status::ExitStatus,
};

/// Dispatch to the handler of the parsed command.
///
/// # Returns
/// - `Ok(ExitStatus)` once the command ran, even if some files failed
/// - `Err` if the command could not run (unreadable source file, bad position)
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::File(cmd)) => file(cmd),
        Some(Command::Project(cmd)) => project(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
