//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.completion {
        return completion(shell);
    }

    let settings = load_settings(cli)?;
    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    match (&cli.tree_file, cli.line) {
        (Some(tree_file), Some(line)) => draw(settings, tree_file, line, cli.print_tree),
        _ => Err(CliError::Usage(
            "a tree file and a line index are required".to_string(),
        )),
    }
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

/// Settings from config files and env, with `--output` on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let cwd = std::env::current_dir()
        .map_err(|e| InfraError::io("resolve working directory", e))?;
    let mut settings = Settings::load(Some(&cwd))?;
    if let Some(output) = &cli.output {
        settings.output = output.clone();
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(settings))]
fn draw(settings: Settings, tree_file: &Path, line: usize, print_tree: bool) -> CliResult<()> {
    let container = ServiceContainer::new(settings);
    let report = container.emitter_service().emit(tree_file, line)?;

    if print_tree {
        output::info(&report.tree.to_termtree());
    }
    output::success(&format!(
        "{} (line {}, height {}, {} leaves, {} tokens)",
        report.output.display(),
        line,
        report.height,
        report.leaf_count,
        report.token_count
    ));
    Ok(())
}
