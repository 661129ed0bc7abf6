use std::path::Path;

use serde::Deserialize;

use super::model::{Catalog, Track};

#[derive(Deserialize)]
struct BuiltinCatalog {
    track: Vec<Track>,
}

/// The built-in playlist, with relative sources resolved against `music_dir`.
///
/// The document is embedded in the binary; a parse failure is a build defect,
/// not a runtime condition.
pub fn builtin(music_dir: Option<&Path>) -> Catalog {
    let parsed: BuiltinCatalog =
        toml::from_str(include_str!("builtin.toml")).expect("built-in catalog is well-formed");
    Catalog::new(parsed.track).resolved_against(music_dir)
}
