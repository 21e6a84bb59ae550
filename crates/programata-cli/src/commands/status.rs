use crate::commands::DataPaths;
use crate::output::{Output, OutputFormat};
use chrono::Local;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use programata_config::{Config, PathManager};
use programata_core::{last_seven_days, program_file, Blacklist, LocalStorage, Storage, StorageExt};
use programata_models::{ChannelList, MovieCatalog};
use serde_json::json;
use std::path::Path;

pub fn run_status(paths: &PathManager, output: &Output) -> Result<()> {
    let config = Config::load_or_default(&paths.config_file()).map_err(|e| eyre!("{}", e))?;
    let data = DataPaths::resolve(paths, &config);
    let storage = LocalStorage;

    let channel_count = storage
        .read_json::<ChannelList>(&data.channels_file)
        .map(|list| list.active().len());
    let movie_count = storage
        .read_json::<MovieCatalog>(&data.movies_file)
        .map(|catalog| catalog.len());
    let oscars_present = storage.exists(&data.oscars_file);
    let blacklist_count = Blacklist::load(&storage, &data.blacklist_file).len();

    let today = Local::now().date_naive();
    let saved_days: Vec<String> = last_seven_days(today)
        .into_iter()
        .filter(|day| storage.exists(&program_file(&data.programs_dir, *day)))
        .map(|day| day.to_string())
        .collect();

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Data").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Status").add_attribute(comfy_table::Attribute::Bold),
            ]);
            table.add_row(vec![
                Cell::new("Config file"),
                Cell::new(file_status(&paths.config_file())),
            ]);
            table.add_row(vec![
                Cell::new("Active channels"),
                Cell::new(count_status(channel_count)),
            ]);
            table.add_row(vec![
                Cell::new("Movie catalog"),
                Cell::new(count_status(movie_count)),
            ]);
            table.add_row(vec![
                Cell::new("Awards data"),
                Cell::new(if oscars_present { "✓" } else { "missing" }),
            ]);
            table.add_row(vec![
                Cell::new("Blacklist entries"),
                Cell::new(blacklist_count.to_string()),
            ]);
            table.add_row(vec![
                Cell::new("Saved days (last 7)"),
                Cell::new(format!("{}/7", saved_days.len())),
            ]);
            output.println(table.to_string());
            if !saved_days.is_empty() {
                output.println(format!("Saved: {}", saved_days.join(", ")));
            }
        }
        _ => output.json(&json!({
            "type": "status",
            "config_file": paths.config_file(),
            "active_channels": channel_count,
            "movie_catalog_size": movie_count,
            "awards_data_present": oscars_present,
            "blacklist_entries": blacklist_count,
            "saved_days": saved_days,
        })),
    }

    Ok(())
}

fn file_status(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("missing ({})", path.display())
    }
}

fn count_status(count: Option<usize>) -> String {
    match count {
        Some(count) => count.to_string(),
        None => "missing".to_string(),
    }
}
