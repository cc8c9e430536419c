//! Command dispatch

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use tracing::{debug, instrument};

use crate::application::services::TreeService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_dir, global_config_path, local_config_path, Settings};
use crate::domain::BrickId;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    match command {
        Commands::Completion { shell } => cmd_completion(*shell),
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Index => cmd_index(&container(cli)?),
        Commands::Tree {
            id,
            flat,
            max_rlevel,
        } => cmd_tree(&container(cli)?, *id, *flat, *max_rlevel),
        Commands::Show { id } => cmd_show(&container(cli)?, *id),
        Commands::New {
            type_code,
            parent,
            title,
            content,
        } => cmd_new(
            &container(cli)?,
            type_code,
            *parent,
            title,
            content.as_deref().unwrap_or_default(),
        ),
        Commands::Edit { id, title, content } => {
            cmd_edit(&container(cli)?, *id, title.as_deref(), content.as_deref())
        }
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e))?),
    }
}

/// Settings with the `--data` flag applied on top of all config layers.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let project = project_dir(cli)?;
    let mut settings = Settings::load(Some(&project))?;
    if let Some(data) = &cli.data {
        settings.data_file = Some(data.clone());
    }
    debug!("load_settings: {:?}", settings);
    Ok(settings)
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?))
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_index(container: &ServiceContainer) -> CliResult<()> {
    let service = container.tree_service()?;
    let theses = service.list_theses();
    if theses.is_empty() {
        output::warning("no theses found");
        return Ok(());
    }
    output::header(&format!("{} theses", theses.len()));
    for thesis in &theses {
        output::info(&format!(
            "{:<10} {}",
            thesis.title_tag.cyan(),
            thesis.brick.title
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(
    container: &ServiceContainer,
    id: BrickId,
    flat: bool,
    max_rlevel: Option<usize>,
) -> CliResult<()> {
    let service = container.tree_service()?;
    let tree = service.render_from_root(id)?;
    let max_rlevel = max_rlevel.unwrap_or(container.settings.max_rlevel);
    debug!(
        "cmd_tree: {} bricks, showing {} levels",
        tree.bricks.len(),
        max_rlevel
    );

    if flat {
        for processed in tree
            .bricks
            .iter()
            .filter(|p| p.relative_level <= max_rlevel)
        {
            output::info(&format!(
                "{}{}",
                "  ".repeat(processed.indentation),
                output::brick_line(processed)
            ));
        }
    } else {
        print!("{}", tree.to_tree_string(max_rlevel));
    }

    let language = container.settings.language.as_str();
    let counts: Vec<String> = tree
        .child_type_counts()
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(t, n)| format!("{}: {}", t.long_name(language), n))
        .collect();
    if !counts.is_empty() {
        println!();
        output::detail(&counts.join(", "));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, id: BrickId) -> CliResult<()> {
    let service = container.tree_service()?;
    show_brick(&service, id, &container.settings.language)
}

fn show_brick(service: &TreeService, id: BrickId, language: &str) -> CliResult<()> {
    let processed = service.prepare_single_node(id)?;
    let brick = &processed.brick;

    output::header(&output::brick_line(&processed));
    output::field("type", brick.brick_type.long_name(language));
    output::field("parent", &brick.parent.map_or("-".to_string(), |p| p.to_string()));
    output::field("level", &processed.absolute_level);
    output::field("typed index", &processed.typed_idx);
    output::field("indent", &processed.indentation_class());
    output::field("template", processed.template);
    output::field("vote", &format!("{:.2}", brick.cached_avg_vote));
    output::field("created", &brick.creation_datetime.to_rfc3339());
    output::field("updated", &brick.update_datetime.to_rfc3339());
    for (brick_type, n) in processed.child_type_counter.per_type() {
        output::field(brick_type.name(), &n);
    }
    if !brick.content.is_empty() {
        println!();
        output::info(&brick.content);
    }
    Ok(())
}

#[instrument(skip(container, title, content))]
fn cmd_new(
    container: &ServiceContainer,
    type_code: &str,
    parent: Option<BrickId>,
    title: &str,
    content: &str,
) -> CliResult<()> {
    if title.trim().is_empty() {
        return Err(CliError::InvalidArgs("title must not be empty".to_string()));
    }
    let mut arena = container.load_arena()?;
    let id = arena.add_brick(parent, type_code, title, content, Utc::now())?;
    container.save_arena(&arena)?;

    let service = TreeService::new(Arc::new(arena), container.settings.max_level);
    let processed = service.prepare_single_node(id)?;
    output::success(&format!("created {}", output::brick_line(&processed)));
    Ok(())
}

#[instrument(skip(container, title, content))]
fn cmd_edit(
    container: &ServiceContainer,
    id: BrickId,
    title: Option<&str>,
    content: Option<&str>,
) -> CliResult<()> {
    if title.is_none() && content.is_none() {
        return Err(CliError::Usage(
            "nothing to change: pass --title and/or --content".to_string(),
        ));
    }
    let mut arena = container.load_arena()?;
    let brick = arena.edit_brick(id, title, content, Utc::now())?.clone();
    container.save_arena(&arena)?;
    output::success(&format!("updated {brick}"));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let project = project_dir(cli)?;
            let global = global_config_path()
                .map_or("(unavailable)".to_string(), |p| p.display().to_string());
            output::info(&format!("global: {global}"));
            output::info(&format!("local:  {}", local_config_path(&project).display()));
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                let dir = global_config_dir().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?;
                std::fs::create_dir_all(&dir)
                    .map_err(|e| InfraError::io(format!("create {}", dir.display()), e))?;
                dir.join("sober.toml")
            } else {
                local_config_path(&project_dir(cli)?)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}
