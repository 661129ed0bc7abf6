use std::path::{Path, PathBuf};

use super::*;

fn t(id: u32, title: &str) -> Track {
    Track {
        id: TrackId(id),
        title: title.into(),
        artist: "Artist".into(),
        album: "Album".into(),
        duration_label: "0:00".into(),
        cover_url: String::new(),
        source: PathBuf::from(format!("{title}.mp3")),
    }
}

#[test]
fn builtin_catalog_has_five_unique_tracks() {
    let catalog = builtin(None);
    assert_eq!(catalog.len(), 5);

    let mut ids: Vec<u32> = catalog.tracks().iter().map(|t| t.id.0).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn builtin_catalog_keeps_playlist_order() {
    let catalog = builtin(None);
    assert_eq!(catalog.first_id(), TrackId(1));
    assert_eq!(catalog.last_id(), TrackId(5));
    assert_eq!(catalog.tracks()[0].title, "Bohemian Rhapsody");
    assert_eq!(catalog.tracks()[4].artist, "Guns N' Roses");
}

#[test]
fn next_after_wraps_last_to_first() {
    let catalog = Catalog::new(vec![t(1, "a"), t(2, "b"), t(3, "c")]);
    assert_eq!(catalog.next_after(TrackId(1)), TrackId(2));
    assert_eq!(catalog.next_after(TrackId(3)), TrackId(1));
}

#[test]
fn previous_before_wraps_first_to_last() {
    let catalog = Catalog::new(vec![t(1, "a"), t(2, "b"), t(3, "c")]);
    assert_eq!(catalog.previous_before(TrackId(3)), TrackId(2));
    assert_eq!(catalog.previous_before(TrackId(1)), TrackId(3));
}

#[test]
fn lookup_of_unknown_id_is_none() {
    let catalog = Catalog::new(vec![t(1, "a")]);
    assert!(catalog.get(TrackId(99)).is_none());
    assert!(!catalog.contains(TrackId(99)));
    assert_eq!(catalog.position(TrackId(99)), None);
}

#[test]
fn resolved_against_joins_relative_sources_only() {
    let mut tracks = vec![t(1, "a"), t(2, "b")];
    tracks[1].source = PathBuf::from("/abs/b.mp3");

    let catalog = Catalog::new(tracks).resolved_against(Some(Path::new("/music")));
    assert_eq!(catalog.tracks()[0].source, PathBuf::from("/music/a.mp3"));
    assert_eq!(catalog.tracks()[1].source, PathBuf::from("/abs/b.mp3"));
}

#[test]
fn resolved_against_without_base_is_identity() {
    let catalog = Catalog::new(vec![t(1, "a")]).resolved_against(None);
    assert_eq!(catalog.tracks()[0].source, PathBuf::from("a.mp3"));
}
