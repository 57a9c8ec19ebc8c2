//! Command dispatch: bridges CLI args -> `ObjectFunction` calls -> output.

pub mod config_cmd;
pub mod notify;
pub mod objects;
pub mod util;

use ucode_core::ObjectFunction;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command that needs a configured function.
pub async fn dispatch(
    cmd: Command,
    function: &ObjectFunction,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Objects(args) => objects::handle(function, args, global).await,
        Command::Notify(args) => notify::handle(function, args, global).await,
        // Config and Util are handled before dispatch
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Util(args) => util::handle(args, global),
    }
}
