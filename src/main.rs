use chrono::{Local, Timelike};
use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodplay::{
    cli, config, error,
    selector::{self, Selection},
    spotify::recommendations::MOOD_SONGS_LIMIT,
    types::{MoodId, Tempo},
};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List available moods
    Moods,

    /// Show the color palette of a mood
    Palette(PaletteOptions),

    /// List catalog songs matching a selection
    Songs(SelectionOptions),

    /// Fetch Spotify recommendations for a mood
    Recommend(RecommendOptions),

    /// Play a selection interactively
    Play(PlayOptions),

    /// Sign in with Spotify
    Login,

    /// Forget the stored Spotify session
    Logout,

    /// Show the current Spotify session
    Status,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PaletteOptions {
    mood: String,
}

#[derive(Args, Debug, Clone)]
pub struct SelectionOptions {
    /// Songs tagged with a mood
    #[clap(long)]
    mood: Option<MoodId>,

    /// Songs within 20 points of an energy level (0-100)
    #[clap(long)]
    energy: Option<i32>,

    /// Songs with a tempo (slow, medium, fast)
    #[clap(long)]
    tempo: Option<Tempo>,

    /// Songs suited to a time of day (Morning, Afternoon, Evening, Night, ...)
    #[clap(long)]
    time: Option<String>,

    /// Songs suited to an activity, combined with --time or the current time of day
    #[clap(long)]
    activity: Option<String>,
}

impl SelectionOptions {
    /// Falls back to recommendations for the current local time when no
    /// filter is given.
    fn into_selection(self) -> Selection {
        if let Some(mood) = self.mood {
            return Selection::Mood(mood.to_string());
        }
        if let Some(energy) = self.energy {
            return Selection::Energy(energy);
        }
        if let Some(tempo) = self.tempo {
            return Selection::Tempo(tempo);
        }
        let time_of_day = self
            .time
            .unwrap_or_else(|| selector::time_of_day(Local::now().hour()).to_string());
        Selection::Recommended {
            time_of_day,
            activity: self.activity,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    #[clap(long)]
    mood: String,

    #[clap(long, default_value_t = MOOD_SONGS_LIMIT)]
    limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    #[clap(flatten)]
    selection: SelectionOptions,

    /// Play Spotify recommendations for --mood instead of catalog songs
    #[clap(long, requires = "mood")]
    remote: bool,

    #[clap(long, default_value_t = MOOD_SONGS_LIMIT)]
    limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Moods => cli::list_moods(),
        Command::Palette(opt) => cli::palette(opt.mood),
        Command::Songs(opt) => cli::list_songs(opt.into_selection()),
        Command::Recommend(opt) => cli::recommend(opt.mood, opt.limit).await,
        Command::Play(opt) => {
            let remote_mood = if opt.remote {
                opt.selection.mood.map(|m| m.to_string())
            } else {
                None
            };
            cli::play(opt.selection.into_selection(), remote_mood, opt.limit).await
        }
        Command::Login => cli::login().await,
        Command::Logout => cli::logout().await,
        Command::Status => cli::status().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
