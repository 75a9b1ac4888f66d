use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use soundcheck::{cli, config::Config, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze the user's playlists
    Playlists(PlaylistsOptions),

    /// Analyze the user's saved songs
    Saved(SavedOptions),

    /// Generate the saved/top/playlist intersection reports
    Intersections(IntersectionsOptions),

    /// Score favorite songs from the latest snapshots
    Favorites,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Analyze the user's playlists")]
pub struct PlaylistsOptions {
    #[command(subcommand)]
    pub command: PlaylistsSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsSubcommand {
    /// Recency and frequency statistics over every playlist
    Stats,

    /// Count shared songs between playlist pairs (reads the snapshot)
    Overlaps(OverlapsOpts),

    /// Start and crossfade timestamps for one playlist
    Timeline(TimelineOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct OverlapsOpts {
    /// Keep pairs sharing at least this many songs
    #[clap(long, default_value_t = 4)]
    pub min_shared: u32,

    /// List only the N highest-count pairs instead
    #[clap(long)]
    pub top: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct TimelineOpts {
    /// Playlist to lay out
    #[clap(long)]
    pub playlist_id: String,

    /// Seconds of crossfade between songs
    #[clap(long, default_value_t = 6)]
    pub crossfade: u64,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Analyze the user's saved songs")]
pub struct SavedOptions {
    #[command(subcommand)]
    pub command: SavedSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SavedSubcommand {
    /// Frequency, ordering, and duplicate reports over the library
    Stats,

    /// List saved songs that appear in no playlist
    Orphans(OrphansOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct OrphansOpts {
    /// Also write the subset absent from the top-tracks snapshot
    #[clap(long)]
    pub exclude_top: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct IntersectionsOptions {
    /// Top-tracks time range: short, medium, or long
    #[clap(long, default_value = "long", value_parser = utils::parse_time_range)]
    pub time_range: utils::TimeRange,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Playlists(opt) => match opt.command {
            PlaylistsSubcommand::Stats => cli::playlist_stats(&config).await,
            PlaylistsSubcommand::Overlaps(o) => {
                cli::playlist_overlaps(&config, o.min_shared, o.top).await
            }
            PlaylistsSubcommand::Timeline(t) => {
                cli::playlist_timeline(&config, &t.playlist_id, t.crossfade).await
            }
        },

        Command::Saved(opt) => match opt.command {
            SavedSubcommand::Stats => cli::saved_stats(&config).await,
            SavedSubcommand::Orphans(o) => cli::saved_orphans(&config, o.exclude_top).await,
        },

        Command::Intersections(opt) => cli::intersections(&config, opt.time_range).await,
        Command::Favorites => cli::favorites(&config).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
