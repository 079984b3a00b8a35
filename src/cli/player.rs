use std::str::FromStr;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use crate::{
    auth::AuthSession,
    catalog::Catalog,
    info,
    playback::{ClockMedia, FetchTicket, PlaybackSession, PlaybackState},
    selector::Selection,
    spotify::SpotifyClient,
    storage::FileStore,
    types::{Song, SongSource},
    warning,
};

const HELP: &str = "commands: p play/pause | n next | b previous | s <secs> seek | v <0-1> volume | m mute | mood <id> switch mood | q quit";

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Toggle,
    Next,
    Previous,
    Seek(f64),
    Volume(f32),
    Mute,
    Mood(String),
    Help,
    Quit,
}

impl FromStr for PlayerCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let command = parts.next().unwrap_or("p").to_lowercase();
        let arg = parts.next();

        match (command.as_str(), arg) {
            ("p" | "play" | "pause", _) => Ok(PlayerCommand::Toggle),
            ("n" | "next", _) => Ok(PlayerCommand::Next),
            ("b" | "prev" | "previous", _) => Ok(PlayerCommand::Previous),
            ("m" | "mute", _) => Ok(PlayerCommand::Mute),
            ("q" | "quit" | "exit", _) => Ok(PlayerCommand::Quit),
            ("h" | "help" | "?", _) => Ok(PlayerCommand::Help),
            ("s" | "seek", Some(secs)) => secs
                .parse::<f64>()
                .map(PlayerCommand::Seek)
                .map_err(|_| format!("Invalid position '{}'", secs)),
            ("v" | "volume", Some(volume)) => volume
                .parse::<f32>()
                .map(PlayerCommand::Volume)
                .map_err(|_| format!("Invalid volume '{}'", volume)),
            ("mood", Some(mood)) => Ok(PlayerCommand::Mood(mood.to_lowercase())),
            ("s" | "seek" | "v" | "volume" | "mood", None) => {
                Err(format!("'{}' needs a value", command))
            }
            _ => Err(format!("Unknown command '{}'", command)),
        }
    }
}

/// Signed-in Spotify access used to mirror remote tracks onto the user's
/// active device.
struct RemoteDevice {
    client: SpotifyClient,
    credential: String,
}

/// Interactive player. Plays the catalog songs for `selection`, or, with
/// `remote_mood`, recommendations fetched from Spotify.
pub async fn play(selection: Selection, remote_mood: Option<String>, limit: u32) {
    let (event_tx, mut events) = mpsc::unbounded_channel();
    let (fetch_tx, mut fetched) = mpsc::unbounded_channel::<(FetchTicket, Vec<Song>)>();
    let mut session = PlaybackSession::new(ClockMedia::new()).with_events(event_tx);

    let device = remote_device().await;

    match remote_mood {
        Some(mood) => match SpotifyClient::from_env() {
            Ok(client) => {
                let ticket = session.begin_fetch();
                let credential = device.as_ref().map(|d| d.credential.clone());
                info!("Fetching recommendations for '{}'...", mood);
                tokio::spawn(async move {
                    let songs = match credential {
                        Some(credential) => client.recommend(&mood, &credential, limit).await,
                        None => client.mood_songs(&mood, limit).await,
                    };
                    let _ = fetch_tx.send((ticket, songs));
                });
            }
            Err(e) => warning!("Cannot reach Spotify: {}", e),
        },
        None => {
            session.replace_queue(selection.resolve(Catalog::builtin()));
            if session.state() == PlaybackState::Empty {
                warning!("No songs for {}.", selection.describe());
            }
            session.play();
        }
    }

    let pb = progress_bar();
    info!("{}", HELP);
    announce(&session, &pb, device.as_ref());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let epoch = session.epoch();
        tokio::select! {
            Some(event) = events.recv() => {
                session.handle_event(event);
            }
            Some((ticket, songs)) = fetched.recv() => {
                if songs.is_empty() {
                    warning!("No remote songs found.");
                }
                if session.complete_fetch(ticket, songs) {
                    session.play();
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    _ => break,
                };
                match line.parse::<PlayerCommand>() {
                    Ok(PlayerCommand::Quit) => break,
                    Ok(command) => apply(&mut session, command, &pb),
                    Err(e) => pb.println(format!("{} ({})", e, HELP)),
                }
            }
        }

        if session.epoch() != epoch {
            announce(&session, &pb, device.as_ref());
        }
        render(&session, &pb);
    }

    pb.finish_and_clear();
}

fn apply(session: &mut PlaybackSession<ClockMedia>, command: PlayerCommand, pb: &ProgressBar) {
    match command {
        PlayerCommand::Toggle => {
            session.toggle();
        }
        PlayerCommand::Next => {
            session.next();
        }
        PlayerCommand::Previous => {
            session.previous();
        }
        PlayerCommand::Seek(position) => {
            session.seek(position);
        }
        PlayerCommand::Volume(volume) => session.set_volume(volume),
        PlayerCommand::Mute => {
            session.toggle_mute();
        }
        PlayerCommand::Mood(mood) => {
            let selection = Selection::Mood(mood);
            session.replace_queue(selection.resolve(Catalog::builtin()));
            if session.state() == PlaybackState::Empty {
                pb.println(format!("No songs for {}.", selection.describe()));
            }
        }
        PlayerCommand::Help => pb.println(HELP),
        PlayerCommand::Quit => {}
    }
}

async fn remote_device() -> Option<RemoteDevice> {
    let client = SpotifyClient::from_env().ok()?;
    let mut auth = AuthSession::new(FileStore::default_location());
    auth.restore().await;
    let credential = auth.credential()?.to_string();
    Some(RemoteDevice { client, credential })
}

/// Prints the new current track and, for Spotify tracks, starts it on the
/// user's device.
fn announce(
    session: &PlaybackSession<ClockMedia>,
    pb: &ProgressBar,
    device: Option<&RemoteDevice>,
) {
    let Some(song) = session.current() else {
        return;
    };
    pb.set_length(session.duration().max(1.0) as u64);
    pb.println(format!(
        "♪ {} - {} ({}) [{}/{}]",
        song.title,
        song.artist,
        song.duration,
        session.index().map(|i| i + 1).unwrap_or(0),
        session.queue().len()
    ));

    if let (Some(device), Some(uri), SongSource::Remote) = (device, &song.uri, song.source) {
        if session.is_playing() {
            let client = device.client.clone();
            let credential = device.credential.clone();
            let uri = uri.clone();
            tokio::spawn(async move { client.play_track(&uri, &credential).await });
        }
    }
}

fn render(session: &PlaybackSession<ClockMedia>, pb: &ProgressBar) {
    let state = match session.state() {
        PlaybackState::Empty => "empty",
        PlaybackState::Ready => "ready",
        PlaybackState::Playing => "playing",
        PlaybackState::Paused => "paused",
    };
    let volume = if session.is_muted() {
        "muted".to_string()
    } else {
        format!("vol {:.0}%", session.effective_volume() * 100.0)
    };
    pb.set_position(session.position() as u64);
    pb.set_message(format!("{} | {}", state, volume));
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(1);
    if let Ok(style) = ProgressStyle::with_template(
        "{msg:<20} [{bar:40.blue/white}] {pos}s/{len}s",
    ) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
