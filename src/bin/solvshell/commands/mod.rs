mod extract;
mod info;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Extract(args) => extract::run_extract(*args, ctx),
        Command::Info(args) => info::run_info(args, ctx),
    }
}
