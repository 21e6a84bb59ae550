use crate::commands::DataPaths;
use crate::output::{Output, OutputFormat};
use chrono::Local;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use programata_config::{Config, PathManager};
use programata_core::{
    cleanup_old_programs, load_active_channels, program_file, resolve_target_date, Annotator,
    Blacklist, LocalStorage, OscarIndex, ProgramFetcher, StorageExt, DATE_PATH_TOMORROW,
    DATE_PATH_YESTERDAY,
};
use programata_sources::{ScheduleClient, WatchProviderClient, BASE_URL, DATE_PATH_TODAY};
use serde_json::json;
use std::path::PathBuf;

pub async fn run_fetch(
    paths: &PathManager,
    date_path: String,
    out_file: Option<PathBuf>,
    no_annotate: bool,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Fetch command started");

    if ![DATE_PATH_TODAY, DATE_PATH_YESTERDAY, DATE_PATH_TOMORROW].contains(&date_path.as_str()) {
        return Err(eyre!(
            "Unknown day '{}'. Use '{}', '{}' or '{}'",
            date_path,
            DATE_PATH_YESTERDAY,
            DATE_PATH_TODAY,
            DATE_PATH_TOMORROW
        ));
    }

    let config = Config::load_or_default(&paths.config_file()).map_err(|e| eyre!("{}", e))?;
    let data = DataPaths::resolve(paths, &config);
    let storage = LocalStorage;

    let channels = load_active_channels(&storage, &data.channels_file);
    if channels.is_empty() {
        output.warn(format!(
            "No active channels found in {}",
            data.channels_file.display()
        ));
        return Ok(());
    }

    let annotator = if no_annotate {
        Annotator::disabled()
    } else {
        match OscarIndex::load(&storage, &data.movies_file, &data.oscars_file) {
            Some(index) => {
                let watch = match config.tmdb.resolved_api_key() {
                    Some(key) => Some(
                        WatchProviderClient::new(key, config.tmdb.resolved_watch_region())
                            .map_err(|e| eyre!("{}", e))?,
                    ),
                    None => None,
                };
                Annotator::new(index, watch)
            }
            None => Annotator::disabled(),
        }
    };

    let blacklist = Blacklist::load(&storage, &data.blacklist_file);
    let base_url = config.fetch.base_url.as_deref().unwrap_or(BASE_URL);
    let client = ScheduleClient::new(base_url, config.fetch.timeout_secs)
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;
    let fetcher = ProgramFetcher::new(Box::new(client), annotator, blacklist);

    let bar = if output.format() == OutputFormat::Human {
        let bar = ProgressBar::new(channels.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let today = Local::now().date_naive();
    let result = fetcher
        .fetch_all(&channels, &date_path, today, |idx, channel| {
            bar.set_position(idx as u64);
            bar.set_message(channel.name.clone());
        })
        .await;
    bar.finish_and_clear();

    let target_date = resolve_target_date(&date_path, today);
    let day_file = out_file.unwrap_or_else(|| program_file(&data.programs_dir, target_date));
    storage
        .write_json(&day_file, &result)
        .map_err(|e| eyre!("Failed to save programs to {}: {}", day_file.display(), e))?;
    let removed = cleanup_old_programs(&storage, &data.programs_dir, today);

    match output.format() {
        OutputFormat::Human => {
            output.success(format!(
                "{}: {}/{} channels with programs, saved to {}",
                target_date,
                result.metadata.channels_with_programs,
                result.metadata.total_channels,
                day_file.display()
            ));
            if removed > 0 {
                output.println(format!("Removed {} old program file(s)", removed));
            }
        }
        _ => output.json(&json!({
            "type": "fetch_result",
            "metadata": result.metadata,
            "saved_to": day_file,
            "removed_old_files": removed,
        })),
    }

    Ok(())
}
