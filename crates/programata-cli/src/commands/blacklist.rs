use crate::commands::DataPaths;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use programata_config::{Config, PathManager};
use programata_core::{Blacklist, LocalStorage};
use programata_models::{ExclusionEntry, ExclusionScope};
use serde_json::json;

pub struct AddArgs {
    pub title: String,
    pub scope: String,
    pub channel: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
}

pub fn run_list(paths: &PathManager, output: &Output) -> Result<()> {
    let config = Config::load_or_default(&paths.config_file()).map_err(|e| eyre!("{}", e))?;
    let data = DataPaths::resolve(paths, &config);
    let storage = LocalStorage;
    let blacklist = Blacklist::load(&storage, &data.blacklist_file);

    if blacklist.is_empty() {
        output.println("No exclusion entries");
        return Ok(());
    }

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Scope").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Channel").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Date").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Time").add_attribute(comfy_table::Attribute::Bold),
            ]);
            for entry in blacklist.entries() {
                table.add_row(vec![
                    Cell::new(&entry.title),
                    Cell::new(scope_name(entry.scope)),
                    Cell::new(entry.channel_id.as_deref().unwrap_or("-")),
                    Cell::new(entry.date.as_deref().unwrap_or("-")),
                    Cell::new(entry.time.as_deref().unwrap_or("-")),
                ]);
            }
            output.println(table.to_string());
        }
        _ => output.json(&json!({
            "type": "blacklist",
            "count": blacklist.len(),
            "excluded": blacklist.entries(),
        })),
    }

    Ok(())
}

pub fn run_add(paths: &PathManager, args: AddArgs, output: &Output) -> Result<()> {
    let scope = parse_scope(&args.scope)?;
    match scope {
        ExclusionScope::All => {}
        ExclusionScope::Channel => {
            if args.channel.is_none() {
                return Err(eyre!("Scope 'channel' requires --channel"));
            }
        }
        ExclusionScope::Broadcast => {
            if args.channel.is_none() || args.date.is_none() || args.time.is_none() {
                return Err(eyre!(
                    "Scope 'broadcast' requires --channel, --date and --time"
                ));
            }
        }
    }

    let config = Config::load_or_default(&paths.config_file()).map_err(|e| eyre!("{}", e))?;
    let data = DataPaths::resolve(paths, &config);
    let storage = LocalStorage;
    let mut blacklist = Blacklist::load(&storage, &data.blacklist_file);

    let added = blacklist.add(ExclusionEntry {
        title: args.title.clone(),
        scope,
        channel_id: args.channel,
        date: args.date,
        time: args.time,
        description: args.description,
    });
    if !added {
        output.warn(format!("'{}' is already excluded with that scope", args.title));
        return Ok(());
    }

    blacklist
        .save(&storage, &data.blacklist_file)
        .map_err(|e| eyre!("Failed to save blacklist: {}", e))?;
    output.success(format!(
        "Excluded '{}' ({} entries total)",
        args.title,
        blacklist.len()
    ));
    Ok(())
}

fn parse_scope(scope: &str) -> Result<ExclusionScope> {
    match scope.to_lowercase().as_str() {
        "all" => Ok(ExclusionScope::All),
        "channel" => Ok(ExclusionScope::Channel),
        "broadcast" => Ok(ExclusionScope::Broadcast),
        other => Err(eyre!(
            "Unknown scope '{}'. Use 'all', 'channel' or 'broadcast'",
            other
        )),
    }
}

fn scope_name(scope: ExclusionScope) -> &'static str {
    match scope {
        ExclusionScope::All => "all",
        ExclusionScope::Channel => "channel",
        ExclusionScope::Broadcast => "broadcast",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scope() {
        assert_eq!(parse_scope("all").unwrap(), ExclusionScope::All);
        assert_eq!(parse_scope("Broadcast").unwrap(), ExclusionScope::Broadcast);
        assert!(parse_scope("everywhere").is_err());
    }
}
