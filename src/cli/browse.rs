use tabled::Table;

use crate::{
    catalog::Catalog,
    info, selector,
    selector::Selection,
    types::{MoodTableRow, SongTableRow},
    warning,
};

pub fn list_moods() {
    let rows: Vec<MoodTableRow> = Catalog::builtin()
        .moods()
        .iter()
        .map(MoodTableRow::from)
        .collect();
    println!("{}", Table::new(rows));
}

pub fn palette(mood: String) {
    let colors = selector::color_palette(Catalog::builtin(), &mood);
    if colors.is_empty() {
        warning!("No palette for mood '{}'.", mood);
        return;
    }
    for color in colors {
        println!("{}", color);
    }
}

pub fn list_songs(selection: Selection) {
    let songs = selection.resolve(Catalog::builtin());
    if songs.is_empty() {
        warning!("No songs for {}.", selection.describe());
        return;
    }

    info!("Showing {} songs for {}", songs.len(), selection.describe());
    let rows: Vec<SongTableRow> = songs.iter().map(SongTableRow::from).collect();
    println!("{}", Table::new(rows));
}
