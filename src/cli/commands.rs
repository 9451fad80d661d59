//! Command dispatch

use std::io::Read;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::ConvertOptions;
use crate::cli::args::{Cli, Commands, ConfigCommands, ConvertArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::util::path::is_stdio;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Convert(args) => cmd_convert(cli, args),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cmd_config_show(cli),
            ConfigCommands::Template => {
                output::info(Settings::template().trim_end());
                Ok(())
            }
            ConfigCommands::Path => cmd_config_path(),
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
    Ok(Settings::load(Some(&cwd), cli.config.as_deref())?)
}

#[instrument(skip(cli))]
fn cmd_convert(cli: &Cli, args: &ConvertArgs) -> CliResult<()> {
    if args.max_depth == Some(0) {
        return Err(CliError::InvalidArgs(
            "--max-depth must be at least 1".to_string(),
        ));
    }

    let container = ServiceContainer::new(load_settings(cli)?);
    let service = container.document_service();
    let options = ConvertOptions {
        format: args.format,
        mapping_file: args.mapping.clone(),
        tags: args.tags.clone(),
        title_level: args.title_level,
        max_depth: args.max_depth,
    };

    let markup = match args.input.as_deref() {
        Some(path) if !is_stdio(path) => service.convert_file(path, &options)?,
        _ => {
            debug!("convert: reading stdin");
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| InfraError::io("read stdin", e))?;
            service.convert_str(&content, &options)?
        }
    };

    if markup.is_empty() {
        output::warning("conversion produced no output");
    }

    match args.output.as_deref() {
        Some(path) if !is_stdio(path) => {
            service.write_output(path, &markup)?;
            output::success(&format!("Wrote {}", path.display()));
        }
        _ => output::document(&markup).map_err(|e| InfraError::io("write stdout", e))?,
    }
    Ok(())
}

fn cmd_config_show(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    output::info(settings.to_toml()?.trim_end());
    Ok(())
}

fn cmd_config_path() -> CliResult<()> {
    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
    let status = |exists: bool| if exists { "exists" } else { "not found" };

    output::header("Config paths");
    match global_config_path() {
        Some(path) => output::detail(&format!(
            "global: {} ({})",
            path.display(),
            status(path.exists())
        )),
        None => output::detail("global: unavailable (no home directory)"),
    }
    let local = local_config_path(&cwd);
    output::detail(&format!(
        "local:  {} ({})",
        local.display(),
        status(local.exists())
    ));
    Ok(())
}
