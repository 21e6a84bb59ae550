use crate::commands::DataPaths;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use programata_config::{Config, PathManager};
use programata_core::{LocalStorage, StorageExt};
use programata_models::ChannelList;
use serde_json::json;

pub fn run_list(paths: &PathManager, all: bool, output: &Output) -> Result<()> {
    let (list, _) = load_channels(paths, output)?;
    let Some(list) = list else {
        return Ok(());
    };

    let channels: Vec<_> = if all {
        list.channels
    } else {
        list.active()
    };

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Name").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Active").add_attribute(comfy_table::Attribute::Bold),
            ]);
            for channel in &channels {
                table.add_row(vec![
                    Cell::new(&channel.id),
                    Cell::new(&channel.name),
                    Cell::new(if channel.active { "✓" } else { "✗" }),
                ]);
            }
            output.println(table.to_string());
            output.println(format!("{} channel(s)", channels.len()));
        }
        _ => output.json(&json!({
            "type": "channels",
            "count": channels.len(),
            "channels": channels,
        })),
    }

    Ok(())
}

pub fn run_toggle(paths: &PathManager, id: &str, output: &Output) -> Result<()> {
    let (list, channels_file) = load_channels(paths, output)?;
    let Some(mut list) = list else {
        return Ok(());
    };

    let channel = list
        .channels
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| eyre!("No channel with id '{}'", id))?;
    channel.active = !channel.active;
    let now_active = channel.active;
    let name = channel.name.clone();

    let storage = LocalStorage;
    storage
        .write_json(&channels_file, &list)
        .map_err(|e| eyre!("Failed to save channels file: {}", e))?;
    output.success(format!(
        "{} ({}) is now {}",
        name,
        id,
        if now_active { "active" } else { "inactive" }
    ));
    Ok(())
}

fn load_channels(
    paths: &PathManager,
    output: &Output,
) -> Result<(Option<ChannelList>, std::path::PathBuf)> {
    let config = Config::load_or_default(&paths.config_file()).map_err(|e| eyre!("{}", e))?;
    let data = DataPaths::resolve(paths, &config);
    let storage = LocalStorage;

    let list: Option<ChannelList> = storage.read_json(&data.channels_file);
    if list.is_none() {
        output.warn(format!(
            "Channels file unavailable at {}",
            data.channels_file.display()
        ));
    }
    Ok((list, data.channels_file))
}
