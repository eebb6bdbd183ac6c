//! `emreg completions <shell>`: print a completion script to stdout
//!
//! Covers every shell clap_complete knows. Zsh users typically write it to a
//! file on `$fpath`:
//!
//! ```bash
//! emreg completions zsh > ~/.zfunc/_emreg
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;
use std::io;

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "emreg", &mut io::stdout());
    Ok(())
}
