//! Command dispatch: maps parsed arguments onto services

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{Feedback, GeneratedReport};
use crate::application::{LookupStatus, ReportRequest};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{format_path, parse_path, CategoryPath, SessionEvent};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };

    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    // Commands that must work without (valid) settings
    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            return Ok(());
        }
        Commands::Config { command } => return config_command(command, &project_dir),
        _ => {}
    }

    let settings = Settings::load(Some(&project_dir))?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Top { json } => top(&container, *json),
        Commands::Children { name, json } => children(&container, name, *json),
        Commands::Navigate { stdout } => navigate(&container, *stdout),
        Commands::Report {
            paths,
            json,
            stdout,
        } => report(&container, paths, json.as_deref(), *stdout),
        Commands::Tree => tree(&container),
        Commands::Leaves => leaves(&container),
        Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| InfraError::json("serialize output", e).into())
}

#[instrument(skip(container))]
fn top(container: &ServiceContainer, json: bool) -> CliResult<()> {
    let names = container.api().list_top_level()?;
    if json {
        output::info(&to_json(&names)?);
    } else {
        for name in names {
            output::info(&name);
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn children(container: &ServiceContainer, name: &str, json: bool) -> CliResult<()> {
    let response = container.api().list_children(name)?;
    if json {
        output::info(&to_json(&response)?);
        return Ok(());
    }

    match (response.status, response.subcategories.as_deref()) {
        (LookupStatus::NotFound, _) | (_, None) => {
            output::warning(&format!("category not found: {}", name.trim()));
        }
        (LookupStatus::Found, Some([])) => {
            output::info(&format!("'{}' has no subcategories", name.trim()));
        }
        (LookupStatus::Found, Some(subcategories)) => {
            for sub in subcategories {
                output::info(sub);
            }
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn navigate(container: &ServiceContainer, stdout: bool) -> CliResult<()> {
    let api = container.api();
    let mut session = api.start_session()?;
    if session.options().is_empty() {
        output::warning("category tree is empty, nothing to navigate");
        return Ok(());
    }

    container.navigation().run(&mut session, |feedback| match feedback {
        Feedback::Event(SessionEvent::Chose(name)) => output::note(&format!("> {name}")),
        Feedback::Event(event @ SessionEvent::PathCompleted(_)) => output::success(event),
        Feedback::Event(event) => output::note(event),
        Feedback::Rejected(err) => output::warning(err),
    })?;

    let completed = session.completed_paths();
    if !completed.is_empty() {
        output::header("Selected paths");
        for (i, path) in completed.iter().enumerate() {
            output::detail(&format!("{}. {}", i + 1, format_path(path)));
        }
    }
    emit_report(container, completed, stdout)
}

#[instrument(skip(container))]
fn report(
    container: &ServiceContainer,
    paths: &[String],
    json: Option<&Path>,
    stdout: bool,
) -> CliResult<()> {
    let paths: Vec<CategoryPath> = match json {
        Some(file) => read_report_request(file)?.paths,
        None => paths.iter().map(|p| parse_path(p)).collect(),
    };
    if paths.iter().any(|p| p.is_empty()) {
        return Err(CliError::InvalidArgs(
            "a path needs at least one category".to_string(),
        ));
    }
    emit_report(container, &paths, stdout)
}

fn read_report_request(file: &Path) -> CliResult<ReportRequest> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| InfraError::io(format!("read {}", file.display()), e))?;
    serde_json::from_str(&content)
        .map_err(|e| InfraError::json(format!("parse {}", file.display()), e).into())
}

fn emit_report(container: &ServiceContainer, paths: &[CategoryPath], stdout: bool) -> CliResult<()> {
    if stdout {
        let request = ReportRequest {
            paths: paths.to_vec(),
        };
        print!("{}", container.api().generate_report(&request).content);
        return Ok(());
    }
    let GeneratedReport { identifier, .. } = container.api().save_report(paths)?;
    output::action("Report saved", &identifier);
    Ok(())
}

#[instrument(skip(container))]
fn tree(container: &ServiceContainer) -> CliResult<()> {
    let tree = container.tree_store.load()?;
    for root in tree.to_tree_strings() {
        output::info(&root);
    }
    Ok(())
}

#[instrument(skip(container))]
fn leaves(container: &ServiceContainer) -> CliResult<()> {
    let tree = container.tree_store.load()?;
    for path in tree.leaf_paths() {
        output::info(&format_path(&path));
    }
    Ok(())
}

fn config_command(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Init { global } => {
            let target: PathBuf = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(project_dir)
            };
            if target.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    target.display()
                )));
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&target, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", target.display()), e))?;
            output::action("Created", &target.display());
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(p) => output::info(&format!("global: {}", p.display())),
                None => output::info("global: <unavailable>"),
            }
            output::info(&format!("local:  {}", local_config_path(project_dir).display()));
        }
    }
    Ok(())
}
