use clap::{ArgAction, Parser, Subcommand};
use commands::{blacklist, channels, fetch, show, status};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "programata")]
#[command(about = "Programata - Bulgarian TV schedules with Oscar annotations")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Base directory for config and data (defaults to the user config dir,
    /// or PROGRAMATA_BASE_PATH when set)
    #[arg(long, global = true, value_name = "DIR")]
    base_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch schedules for all active channels and save the day file
    #[command(
        long_about = "Fetch the schedule pages for all active channels, parse them into program entries, annotate Oscar-relevant movies, and save the result as one JSON document per day. Day files older than a week are removed."
    )]
    Fetch {
        /// Relative day to fetch: Вчера, Днес or Утре
        #[arg(long, default_value = "Днес", value_name = "DAY")]
        date_path: String,

        /// Save the day file here instead of the programs directory
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Skip award annotation even when the catalog files are present
        #[arg(long, action = ArgAction::SetTrue)]
        no_annotate: bool,
    },
    /// Manage configured channels
    Channels {
        #[command(subcommand)]
        cmd: ChannelCommands,
    },
    /// Show data file availability and saved days
    Status,
    /// Print a saved day of programs
    Show {
        /// Day to print (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Only this channel id
        #[arg(long)]
        channel: Option<String>,

        /// Only programs with an Oscar annotation
        #[arg(long, action = ArgAction::SetTrue)]
        awarded: bool,
    },
    /// Manage the annotation blacklist
    Blacklist {
        #[command(subcommand)]
        cmd: BlacklistCommands,
    },
}

#[derive(Subcommand)]
enum ChannelCommands {
    /// List channels
    List {
        /// Include inactive channels
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,
    },
    /// Flip a channel's active flag
    Toggle {
        /// Channel id
        id: String,
    },
}

#[derive(Subcommand)]
enum BlacklistCommands {
    /// List exclusion entries
    List,
    /// Exclude a title from annotation
    #[command(
        long_about = "Add an exclusion entry. Scope 'all' suppresses the title everywhere, 'channel' only on one channel (--channel), 'broadcast' only for one airing (--channel, --date, --time)."
    )]
    Add {
        /// Program title to exclude (matched after normalization)
        title: String,

        /// Exclusion scope: all, channel or broadcast
        #[arg(long, default_value = "all")]
        scope: String,

        /// Channel id (for channel and broadcast scopes)
        #[arg(long)]
        channel: Option<String>,

        /// Airing date YYYY-MM-DD (for broadcast scope)
        #[arg(long)]
        date: Option<String>,

        /// Airing time HH:MM (for broadcast scope)
        #[arg(long)]
        time: Option<String>,

        /// Optional note about why the title is excluded
        #[arg(long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let paths = commands::path_manager(cli.base_path.clone())?;

    // In a container logs go to a rotating file so stdout stays clean
    let log_file =
        std::env::var_os("PROGRAMATA_BASE_PATH").map(|_| paths.log_file());
    logging::init(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Fetch {
            date_path,
            out,
            no_annotate,
        } => fetch::run_fetch(&paths, date_path, out, no_annotate, &output).await,
        Commands::Channels { cmd } => match cmd {
            ChannelCommands::List { all } => channels::run_list(&paths, all, &output),
            ChannelCommands::Toggle { id } => channels::run_toggle(&paths, &id, &output),
        },
        Commands::Status => status::run_status(&paths, &output),
        Commands::Show {
            date,
            channel,
            awarded,
        } => show::run_show(&paths, date, channel, awarded, &output),
        Commands::Blacklist { cmd } => match cmd {
            BlacklistCommands::List => blacklist::run_list(&paths, &output),
            BlacklistCommands::Add {
                title,
                scope,
                channel,
                date,
                time,
                description,
            } => blacklist::run_add(
                &paths,
                blacklist::AddArgs {
                    title,
                    scope,
                    channel,
                    date,
                    time,
                    description,
                },
                &output,
            ),
        },
    }
}
