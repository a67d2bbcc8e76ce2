//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Render one bracketed parse tree from a tree-bank file as a TikZ diagram
#[derive(Parser, Debug)]
#[command(name = "treedraw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Tree-bank file: one `tree ||||| tokens` record per line
    #[arg(value_hint = ValueHint::FilePath, required_unless_present_any = ["completion", "show_config"])]
    pub tree_file: Option<PathBuf>,

    /// Zero-based line index of the record to draw
    #[arg(required_unless_present_any = ["completion", "show_config"])]
    pub line: Option<usize>,

    /// Output document (default from config: tree.tex)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Print the parsed tree to stdout
    #[arg(long)]
    pub print_tree: bool,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Verbosity: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completion: Option<clap_complete::Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_positionals() {
        let cli = Cli::try_parse_from(["treedraw", "bank.txt", "3", "-vv"]).unwrap();
        assert_eq!(cli.tree_file, Some(PathBuf::from("bank.txt")));
        assert_eq!(cli.line, Some(3));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.print_tree);
    }

    #[test]
    fn test_line_must_be_numeric() {
        assert!(Cli::try_parse_from(["treedraw", "bank.txt", "three"]).is_err());
        assert!(Cli::try_parse_from(["treedraw", "bank.txt", "-1"]).is_err());
    }

    #[test]
    fn test_positionals_required() {
        assert!(Cli::try_parse_from(["treedraw", "bank.txt"]).is_err());
        assert!(Cli::try_parse_from(["treedraw", "--completion", "bash"]).is_ok());
        assert!(Cli::try_parse_from(["treedraw", "--show-config"]).is_ok());
    }
}
