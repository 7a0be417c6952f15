use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, info};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::store_io::{JsonFile, Persistence};
use crate::model::{AddPosition, Config, Item};
use crate::ops::filter::{self, Filter};
use crate::ops::since::parse_local_date;
use crate::ops::store::{ItemError, ItemStore, check_new_item, validate_name};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Read the config file named on the command line, or the default one
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path
        .map(config_io::expand_tilde)
        .unwrap_or_else(config_io::default_config_path);
    debug!(path = %path.display(), "reading config");
    config_io::read_config(&path)
}

/// Data file for this invocation: `--file`, then `[data] path`, then the default
pub fn data_file(cli: &Cli, config: &Config) -> JsonFile {
    JsonFile::new(config_io::resolve_data_path(cli.file.as_deref(), config))
}

/// TUI log file: `--log-file`, then the default under the state directory
pub fn log_file(cli: &Cli) -> PathBuf {
    cli.log_file
        .as_deref()
        .map(config_io::expand_tilde)
        .unwrap_or_else(config_io::default_log_path)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: Config) -> CmdResult {
    let file = data_file(&cli, &config);
    let json = cli.json;
    debug!(path = %file.path().display(), "using data file");

    match cli.command {
        None => crate::tui::run(file, config),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&file, &config, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&file, &config, args, json),
            Commands::Rm(args) => cmd_rm(&file, &config, args),
            Commands::Restart(args) => cmd_restart(&file, &config, args),
            Commands::Reset => cmd_reset(&file),
        },
    }
}

/// Compile a command-line pattern. Unlike the interactive search, a pattern
/// that does not compile is an error here.
fn compile_pattern(pattern: &str, config: &Config) -> Result<Filter, Box<dyn std::error::Error>> {
    let filter = filter::compile(pattern, config.search.ignore_case);
    match filter.error() {
        Some(err) => Err(err.clone().into()),
        None => Ok(filter),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(file: &JsonFile, config: &Config, args: ListArgs, json: bool) -> CmdResult {
    let store = ItemStore::from_items(file.load()?);
    if store.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("no items");
        }
        return Ok(());
    }

    let pattern = args.pattern.unwrap_or_default();
    let filter = compile_pattern(&pattern, config)?;
    let now = Utc::now();
    let rows: Vec<(usize, &Item)> = store
        .iter()
        .enumerate()
        .filter(|(_, (_, item))| filter.is_match(&item.name))
        .map(|(i, (_, item))| (i + 1, item))
        .collect();
    if rows.is_empty() {
        return Err(ItemError::NoMatches(pattern).into());
    }

    if json {
        let out: Vec<ItemJson> = rows
            .iter()
            .map(|(index, item)| ItemJson::new(*index, item, now))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", format_table(&rows, now));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(file: &JsonFile, config: &Config, args: AddArgs, json: bool) -> CmdResult {
    let since = match args.date.as_deref() {
        Some(text) => parse_local_date(text)?,
        None => Utc::now(),
    };
    let position = if args.top {
        AddPosition::Top
    } else if args.bottom {
        AddPosition::Bottom
    } else {
        config.behavior.add_position
    };

    let (index, item) = file.update(|items| -> Result<_, Box<dyn std::error::Error>> {
        let mut store = ItemStore::from_items(std::mem::take(items));
        check_new_item(&store, &args.name)?;
        let item = Item::new(validate_name(&args.name)?, since);
        let id = store.insert(item.clone(), position);
        let index = store.position(id).unwrap_or(0) + 1;
        *items = store.to_items();
        Ok((index, item))
    })?;
    info!(name = %item.name, "added item");

    if json {
        let out = ItemJson::new(index, &item, Utc::now());
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("added \"{}\"", item.name);
    }
    Ok(())
}

fn cmd_rm(file: &JsonFile, config: &Config, args: RmArgs) -> CmdResult {
    let filter = compile_pattern(&args.pattern, config)?;
    let removed = file.update(|items| -> Result<_, Box<dyn std::error::Error>> {
        let before = items.len();
        items.retain(|item| !filter.is_match(&item.name));
        match before - items.len() {
            0 => Err(ItemError::NoMatches(args.pattern.clone()).into()),
            n => Ok(n),
        }
    })?;
    info!(count = removed, "removed items");
    println!("removed {} item{}", removed, plural(removed));
    Ok(())
}

fn cmd_restart(file: &JsonFile, config: &Config, args: RestartArgs) -> CmdResult {
    let filter = compile_pattern(&args.pattern, config)?;
    let now = Utc::now();
    let restarted = file.update(|items| -> Result<_, Box<dyn std::error::Error>> {
        let mut count = 0;
        for item in items.iter_mut().filter(|item| filter.is_match(&item.name)) {
            item.since = now;
            count += 1;
        }
        if count == 0 {
            return Err(ItemError::NoMatches(args.pattern.clone()).into());
        }
        Ok(count)
    })?;
    info!(count = restarted, "restarted items");
    println!("restarted {} item{}", restarted, plural(restarted));
    Ok(())
}

fn cmd_reset(file: &JsonFile) -> CmdResult {
    file.save(&[])?;
    info!("reset");
    println!("reset completed");
    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
