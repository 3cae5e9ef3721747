// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - list: headless listing with filters and sorting (grid, cards, or JSON)
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults
// - config --update: Rewrite config with the current structure, keeping values

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;

use crate::config::{Config, VERSION};
use crate::filter::{Selection, Selections};
use crate::pages::{Entity, Page, Pages};
use crate::report;
use crate::table::SortOrder;
use crate::theme::Theme;

/// Courtside - badminton coaching roster in the terminal
#[derive(Parser, Debug)]
#[command(name = "courtside")]
#[command(version = VERSION)]
#[command(about = "Badminton coaching sessions and students", long_about = None)]
pub struct Cli {
    /// Route to open at startup (e.g. /students, /sessions/edit/2)
    #[arg(long, global = true)]
    pub route: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a list without starting the TUI
    List(ListArgs),

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Update config with new defaults (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Sessions,
    Students,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Which collection to list
    #[arg(value_enum)]
    pub kind: ListKind,

    /// KEY=V1,V2, KEY being a field name or `time` (repeatable; values OR within a filter, filters AND)
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<FilterArg>,

    /// FIELD or FIELD:desc, applied as header activations in order
    #[arg(long = "sort", value_parser = parse_sort)]
    pub sorts: Vec<SortArg>,

    /// Output width; defaults to the terminal width
    #[arg(long)]
    pub width: Option<u16>,

    /// Print the listed records as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub field: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortArg {
    pub field: String,
    pub order: SortOrder,
}

fn parse_filter(raw: &str) -> Result<FilterArg, String> {
    let (field, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE[,VALUE], got '{}'", raw))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok(FilterArg {
        field: field.to_string(),
        values: values
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect(),
    })
}

fn parse_sort(raw: &str) -> Result<SortArg, String> {
    let (field, order) = match raw.rsplit_once(':') {
        Some((field, "desc")) => (field, SortOrder::Descending),
        Some((field, "asc")) => (field, SortOrder::Ascending),
        Some((_, other)) => return Err(format!("unknown sort order '{}' (asc or desc)", other)),
        None => (raw, SortOrder::Ascending),
    };
    if field.trim().is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok(SortArg {
        field: field.trim().to_string(),
        order,
    })
}

/// What main should do after CLI handling
#[derive(Debug, PartialEq, Eq)]
pub enum CliOutcome {
    /// A subcommand ran; exit
    Handled,
    /// No subcommand: start the TUI
    RunTui { route: Option<String> },
}

/// Handle CLI commands.
pub fn handle_cli(cli: Cli, config: &Config) -> anyhow::Result<CliOutcome> {
    match cli.command {
        Some(Commands::List(args)) => {
            let output = run_list(Pages::seeded(), &args, config.layout.compact_below)?;
            print!("{}", output);
            Ok(CliOutcome::Handled)
        }
        Some(Commands::Config {
            show,
            reset,
            update,
            path,
        }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show(config);
            } else if reset {
                handle_config_reset()?;
            } else if update {
                handle_config_update(config)?;
            } else {
                println!("Usage: courtside config [--show|--reset|--update|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --update  Update config with new defaults (preserves user values)");
                println!("  --path    Show config file path");
            }
            Ok(CliOutcome::Handled)
        }
        None => Ok(CliOutcome::RunTui { route: cli.route }),
    }
}

/// Build the requested page listing as text.
pub fn run_list(mut pages: Pages, args: &ListArgs, compact_below: u16) -> anyhow::Result<String> {
    let width = args.width.unwrap_or_else(terminal_width);
    match args.kind {
        ListKind::Sessions => list_page(&mut pages.sessions, args, width, compact_below),
        ListKind::Students => list_page(&mut pages.students, args, width, compact_below),
    }
}

fn terminal_width() -> u16 {
    crossterm::terminal::size().map(|(w, _)| w).unwrap_or(120)
}

fn list_page<T: Entity>(
    page: &mut Page<T>,
    args: &ListArgs,
    width: u16,
    compact_below: u16,
) -> anyhow::Result<String> {
    let mut selections = Selections::new();
    for filter in &args.filters {
        let text_input = page
            .filter()
            .config(&filter.field)
            .map(|c| c.is_text_input())
            .unwrap_or(false);
        let selection = if text_input {
            Selection::Text(filter.values.join(","))
        } else {
            Selection::Many(filter.values.clone())
        };
        selections.insert(filter.field.clone(), selection);
    }
    page.filter_mut().apply(selections);

    for sort in &args.sorts {
        activate_until(page, sort)?;
    }

    if args.json {
        return Ok(report::render_json(&page.rows())? + "\n");
    }
    Ok(report::render(
        &page.snapshot(),
        &page.badges(),
        width,
        compact_below,
    ))
}

/// Click the header until the sort state shows the requested order.
fn activate_until<T: Entity>(page: &mut Page<T>, sort: &SortArg) -> anyhow::Result<()> {
    // The cycle has three states, so three activations always reach the target
    for _ in 0..3 {
        let state = page.table().sort();
        if state.field() == Some(sort.field.as_str()) && state.order() == sort.order {
            return Ok(());
        }
        if !page.table_mut().activate_field(&sort.field) {
            bail!("{} has no column '{}'", T::KIND, sort.field);
        }
    }
    Ok(())
}

fn handle_config_path() -> anyhow::Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show(config: &Config) {
    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    println!("# Available themes: {}", Theme::list_available().join(", "));
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> anyhow::Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::write_default(&path)?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_update(config: &Config) -> anyhow::Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if !path.exists() {
        Config::write_default(&path)?;
        println!("Created new config file: {}", path.display());
        return Ok(());
    }

    let backup_path = path.with_extension("toml.bak");
    match std::fs::copy(&path, &backup_path) {
        Ok(_) => println!("Backup created: {}", backup_path.display()),
        Err(e) => eprintln!("Warning: Could not create backup: {}", e),
    }

    std::fs::write(&path, config.to_toml())
        .with_context(|| format!("writing {}", path.display()))?;

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(argv: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(argv)?;
        match cli.command {
            Some(Commands::List(args)) => run_list(Pages::seeded(), &args, 100),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn filter_argument_parses() {
        assert_eq!(
            parse_filter("coach=李教练, 王教练").unwrap(),
            FilterArg {
                field: "coach".into(),
                values: vec!["李教练".into(), "王教练".into()],
            }
        );
        assert!(parse_filter("coach").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn sort_argument_parses() {
        assert_eq!(parse_sort("feePerStudent:desc").unwrap().order, SortOrder::Descending);
        assert_eq!(parse_sort("title").unwrap().order, SortOrder::Ascending);
        assert!(parse_sort("title:sideways").is_err());
    }

    #[test]
    fn no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["courtside", "--route", "/students"]).unwrap();
        let outcome = handle_cli(cli, &Config::default()).unwrap();
        assert_eq!(
            outcome,
            CliOutcome::RunTui {
                route: Some("/students".into())
            }
        );
    }

    #[test]
    fn list_filters_by_coach() {
        let out = list(&["courtside", "list", "sessions", "--filter", "coach=李教练", "--width", "140"])
            .unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("羽毛球基础入门"));
        assert!(!out.contains("高级杀球技巧"));
    }

    #[test]
    fn list_sort_descending_by_fee() {
        let out = list(&[
            "courtside",
            "list",
            "sessions",
            "--sort",
            "feePerStudent:desc",
            "--json",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let fees: Vec<f64> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["feePerStudent"].as_f64().unwrap())
            .collect();
        assert_eq!(fees, [120.0, 100.0, 80.0]);
    }

    #[test]
    fn list_date_filter_uses_text_selection() {
        let out = list(&[
            "courtside",
            "list",
            "sessions",
            "--filter",
            "dateTime=2025-05-29",
            "--json",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["id"], "2");
    }

    #[test]
    fn list_time_filter_matches_clock_time() {
        let out = list(&[
            "courtside",
            "list",
            "sessions",
            "--filter",
            "time=18:00",
            "--json",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["id"], "3");
    }

    #[test]
    fn narrow_width_prints_cards() {
        let out = list(&["courtside", "list", "students", "--width", "50"]).unwrap();
        assert!(out.starts_with("┌ #1\n"));
    }

    #[test]
    fn unknown_sort_field_is_an_error() {
        let err = list(&["courtside", "list", "students", "--sort", "height"]).unwrap_err();
        assert!(err.to_string().contains("height"));
    }
}
