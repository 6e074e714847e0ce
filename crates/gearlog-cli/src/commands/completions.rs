use std::io;

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, CompletionShell};

pub fn run_completions(shell: CompletionShell) {
    let mut command = Cli::command();
    let mut stdout = io::stdout();
    match shell {
        CompletionShell::Bash => generate(shells::Bash, &mut command, "gear", &mut stdout),
        CompletionShell::Zsh => generate(shells::Zsh, &mut command, "gear", &mut stdout),
        CompletionShell::Fish => generate(shells::Fish, &mut command, "gear", &mut stdout),
        CompletionShell::Powershell => {
            generate(shells::PowerShell, &mut command, "gear", &mut stdout);
        }
        CompletionShell::Elvish => generate(shells::Elvish, &mut command, "gear", &mut stdout),
    }
}
