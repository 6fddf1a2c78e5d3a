//! Command-line interface definitions for the weapon validator binary.

use std::path::PathBuf;

use clap::Parser;



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "weapon-mechanics",
    author,
    about = "Loads and validates weapon configuration files.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `./data/configuration.toml`.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        help = "Path to the configuration file to use. Defaults to ./data/configuration.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    /// Weapon files or directories to validate. Can be repeated.
    #[arg(
        short = 'i',
        long = "input-file-path",
        help = "Weapon file or directory to load (can be repeated). \
                If unspecified, the configured weapon directory is loaded."
    )]
    pub input_file_paths: Vec<PathBuf>,

    #[arg(
        long = "fail-on-error",
        help = "If this flag is present, the program exits with an error \
                when any weapon fails to load."
    )]
    pub fail_on_error: bool,
}
