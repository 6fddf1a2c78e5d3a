use clap::Parser;
use miette::{miette, Context, Report, Result};
use tracing::{info, warn};
use weapon_mechanics::{
    configuration::Configuration,
    logging::initialize_tracing,
    weapon::LoadReport,
};

use crate::cli::CLIArgs;

mod cli;


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    // Load configuration.
    let configuration = match cli_args.configuration_file_path.as_ref() {
        Some(path) => {
            println!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            println!("Loading configuration at default path.");
            Configuration::load_from_default_path()
        }
    }
    .wrap_err("Failed to load configuration file.")?;

    println!(
        "Configuration loaded: {}.",
        configuration.file_path.display()
    );

    configuration
        .weapons
        .create_weapon_directory_if_not_exists()?;


    let logging_raii_guard = initialize_tracing(
        configuration.logging.console_output_level_filter()?,
        configuration.logging.log_file_output_level_filter()?,
        &configuration.logging.log_file_output_directory,
        &configuration.logging.log_file_name,
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");


    let mut weapon_loader = configuration
        .weapons
        .weapon_loader()
        .wrap_err("Failed to prepare the weapon loader.")?;

    let input_paths = if cli_args.input_file_paths.is_empty() {
        vec![configuration.weapons.weapon_directory_path.clone()]
    } else {
        cli_args.input_file_paths.clone()
    };

    let mut report = LoadReport::default();
    for input_path in &input_paths {
        let input_report = if input_path.is_dir() {
            weapon_loader.load_directory(input_path)
        } else {
            weapon_loader.load_file(input_path)
        };

        match input_report {
            Ok(input_report) => report.merge(input_report),
            Err(error) => report.file_failures.push(error.wrap_err(format!(
                "Failed to load weapons from {}.",
                input_path.display()
            ))),
        }
    }


    for file_failure in &report.file_failures {
        eprintln!("{:?}", file_failure);
    }

    for failure in &report.failures {
        eprintln!("{:?}", Report::new(failure.clone()));
    }

    println!(
        "Loaded {} weapon(s) from {} file(s), {} weapon(s) and {} file(s) failed.",
        report.weapons.len(),
        report.files_loaded,
        report.failures.len(),
        report.file_failures.len()
    );

    if report.has_failures() {
        warn!(
            "{} weapon(s) and {} file(s) failed to load.",
            report.failures.len(),
            report.file_failures.len()
        );

        if cli_args.fail_on_error {
            drop(logging_raii_guard);
            return Err(miette!(
                "{} weapon file problem(s) found.",
                report.failure_count()
            ));
        }
    }


    drop(logging_raii_guard);
    Ok(())
}
