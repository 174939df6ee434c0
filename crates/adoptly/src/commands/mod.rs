//! Command dispatch: bridges CLI args -> controllers -> output formatting.

pub mod config_cmd;
pub mod pets;

use adoptly_api::PetClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a network-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: PetClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Pets(args) => pets::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
