use crate::commands::DataPaths;
use crate::output::{Output, OutputFormat};
use chrono::{Local, NaiveDate};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use programata_config::{Config, PathManager};
use programata_core::{program_file, LocalStorage, StorageExt};
use programata_models::ActivePrograms;
use serde_json::json;

pub fn run_show(
    paths: &PathManager,
    date: Option<String>,
    channel: Option<String>,
    awarded_only: bool,
    output: &Output,
) -> Result<()> {
    let config = Config::load_or_default(&paths.config_file()).map_err(|e| eyre!("{}", e))?;
    let data = DataPaths::resolve(paths, &config);
    let storage = LocalStorage;

    let day = match date {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| eyre!("Invalid date '{}'. Use YYYY-MM-DD", date))?,
        None => Local::now().date_naive(),
    };

    let day_file = program_file(&data.programs_dir, day);
    let doc: ActivePrograms = match storage.read_json(&day_file) {
        Some(doc) => doc,
        None => {
            output.warn(format!("No saved programs for {} ({})", day, day_file.display()));
            return Ok(());
        }
    };

    let mut selected = doc.programs;
    if let Some(wanted) = &channel {
        selected.retain(|id, _| id == wanted);
        if selected.is_empty() {
            output.warn(format!("No programs for channel '{}' on {}", wanted, day));
            return Ok(());
        }
    }

    match output.format() {
        OutputFormat::Human => {
            for entry in selected.values() {
                let programs: Vec<_> = entry
                    .programs
                    .iter()
                    .filter(|p| !awarded_only || p.oscar.is_some())
                    .collect();
                if programs.is_empty() {
                    continue;
                }
                output.println(format!("\n{} ({})", entry.channel.name, day));
                for program in programs {
                    let mark = match &program.oscar {
                        Some(oscar) if oscar.winner > 0 => " ★",
                        Some(_) => " ☆",
                        None => "",
                    };
                    output.println(format!("  {}  {}{}", program.time, program.title, mark));
                    if let Some(oscar) = &program.oscar {
                        if !oscar.winner_categories.is_empty() {
                            output.println(format!(
                                "         Oscar winner: {}",
                                oscar.winner_categories.join(", ")
                            ));
                        } else {
                            output.println(format!(
                                "         Oscar nominee: {}",
                                oscar.nominee_categories.join(", ")
                            ));
                        }
                    }
                }
            }
        }
        _ => {
            if awarded_only {
                for entry in selected.values_mut() {
                    entry.programs.retain(|p| p.oscar.is_some());
                    entry.count = entry.programs.len();
                }
                selected.retain(|_, entry| entry.count > 0);
            }
            output.json(&json!({
                "type": "programs",
                "date": day.to_string(),
                "metadata": doc.metadata,
                "programs": selected,
            }));
        }
    }

    Ok(())
}
