//! Pure song selection over a [`Catalog`].
//!
//! Every function here is a stable filter: results keep catalog insertion
//! order and are copies of the matching records. An empty result is a valid
//! answer, never an error.

use crate::{catalog::Catalog, types::Song, types::Tempo};

/// Half-width of the energy window derived from the UI dial.
pub const ENERGY_WINDOW: i32 = 20;

/// Songs whose mood tags contain `mood_id`.
pub fn by_mood(catalog: &Catalog, mood_id: &str) -> Vec<Song> {
    catalog
        .songs()
        .iter()
        .filter(|song| song.has_mood(mood_id))
        .cloned()
        .collect()
}

/// Songs with a defined energy score inside `min..=max`.
///
/// Bounds are compared as given; a window that reaches past `0..=100` is not
/// clamped.
pub fn by_energy_range(catalog: &Catalog, min: i32, max: i32) -> Vec<Song> {
    catalog
        .songs()
        .iter()
        .filter(|song| {
            song.energy
                .map(i32::from)
                .is_some_and(|energy| min <= energy && energy <= max)
        })
        .cloned()
        .collect()
}

pub fn by_tempo(catalog: &Catalog, tempo: Tempo) -> Vec<Song> {
    catalog
        .songs()
        .iter()
        .filter(|song| song.tempo == Some(tempo))
        .cloned()
        .collect()
}

/// Songs tagged with any mood suited to `time_of_day` or to `activity`.
///
/// A mood qualifies when its recommended times include `time_of_day`, or when
/// an activity is given and the mood lists it. Matching ignores ASCII case.
pub fn recommended(catalog: &Catalog, time_of_day: &str, activity: Option<&str>) -> Vec<Song> {
    let mood_ids: Vec<&str> = catalog
        .moods()
        .iter()
        .filter(|mood| {
            let time_match = mood
                .recommended_times
                .iter()
                .any(|t| t.eq_ignore_ascii_case(time_of_day));
            let activity_match = activity.is_some_and(|activity| {
                mood.activities
                    .iter()
                    .any(|a| a.eq_ignore_ascii_case(activity))
            });
            time_match || activity_match
        })
        .map(|mood| mood.id.as_str())
        .collect();

    catalog
        .songs()
        .iter()
        .filter(|song| song.moods.iter().any(|m| mood_ids.contains(&m.as_str())))
        .cloned()
        .collect()
}

/// The mood's display palette, empty for an unknown mood.
pub fn color_palette(catalog: &Catalog, mood_id: &str) -> Vec<String> {
    catalog
        .mood(mood_id)
        .map(|mood| mood.color_palette.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default()
}

/// Query window for an energy dial value.
pub fn energy_window(dial: i32) -> (i32, i32) {
    (dial - ENERGY_WINDOW, dial + ENERGY_WINDOW)
}

/// Maps an hour of the day (0-23) to the time labels moods are tagged with.
pub fn time_of_day(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Morning",
        12..=16 => "Afternoon",
        17..=20 => "Evening",
        _ => "Night",
    }
}

/// A user's current pick, resolved against the catalog into a song queue.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Mood(String),
    Energy(i32),
    Tempo(Tempo),
    Recommended {
        time_of_day: String,
        activity: Option<String>,
    },
    Clear,
}

impl Selection {
    pub fn resolve(&self, catalog: &Catalog) -> Vec<Song> {
        match self {
            Selection::Mood(mood_id) => by_mood(catalog, mood_id),
            Selection::Energy(dial) => {
                let (min, max) = energy_window(*dial);
                by_energy_range(catalog, min, max)
            }
            Selection::Tempo(tempo) => by_tempo(catalog, *tempo),
            Selection::Recommended {
                time_of_day,
                activity,
            } => recommended(catalog, time_of_day, activity.as_deref()),
            Selection::Clear => Vec::new(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Selection::Mood(mood_id) => format!("mood '{}'", mood_id),
            Selection::Energy(dial) => {
                let (min, max) = energy_window(*dial);
                format!("energy level between {}% and {}%", min, max)
            }
            Selection::Tempo(tempo) => format!("{} tempo", tempo),
            Selection::Recommended {
                time_of_day,
                activity: Some(activity),
            } => format!("{} or {}", time_of_day, activity),
            Selection::Recommended {
                time_of_day,
                activity: None,
            } => time_of_day.clone(),
            Selection::Clear => "no filter".to_string(),
        }
    }
}
