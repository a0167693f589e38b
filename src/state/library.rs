use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Value};
use tracing::{info, warn};

use super::data::{Favorites, Note, SavedNotes};
use crate::config::{FAVORITES_FILE, NOTES_FILE};
use crate::error::PersistError;

/// The Library owns the on-disk user data: favorite keys and notes.
///
/// - `favorites.txt` holds one catalog key per line
/// - `notes.json` maps each key to `{"note": ..., "date": ...}`
///
/// Both files are read once at startup and rewritten in full at shutdown.
pub struct Library {
    data_dir: PathBuf,
}

impl Library {
    /// Create a Library rooted at `data_dir`, creating the directory if needed.
    ///
    /// This is the only persistence failure the app treats as fatal.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| PersistError::io(&data_dir, e))?;

        info!("📁 Data directory: {}", data_dir.display());

        Ok(Library { data_dir })
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir.join(FAVORITES_FILE)
    }

    pub fn notes_path(&self) -> PathBuf {
        self.data_dir.join(NOTES_FILE)
    }

    /// Load favorites, starting empty if the file cannot be read
    pub fn load_favorites(&self) -> Favorites {
        let path = self.favorites_path();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let favorites = parse_favorites(&contents);
                info!("⭐ Loaded {} favorites", favorites.len());
                favorites
            }
            Err(e) => {
                warn!("Unable to open {}: {}. Starting with no favorites.", path.display(), e);
                Favorites::default()
            }
        }
    }

    /// Load notes, starting empty if the file is missing or malformed
    pub fn load_notes(&self) -> SavedNotes {
        let path = self.notes_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Unable to open {}: {}. Starting with no saved notes.", path.display(), e);
                return SavedNotes::new();
            }
        };

        match parse_notes(&path, &contents) {
            Ok(notes) => {
                info!("📝 Loaded {} notes", notes.len());
                notes
            }
            Err(e) => {
                warn!("Error loading notes: {}", e);
                SavedNotes::new()
            }
        }
    }

    /// Overwrite favorites.txt with one key per line
    pub fn save_favorites(&self, favorites: &Favorites) -> Result<(), PersistError> {
        let path = self.favorites_path();
        let mut contents = String::new();
        for key in favorites.keys() {
            contents.push_str(key);
            contents.push('\n');
        }
        fs::write(&path, contents).map_err(|e| PersistError::io(&path, e))
    }

    /// Overwrite notes.json as a pretty-printed object (4-space indent)
    pub fn save_notes(&self, notes: &SavedNotes) -> Result<(), PersistError> {
        let path = self.notes_path();
        let json = render_notes(notes).map_err(|source| PersistError::Json { path: path.clone(), source })?;
        fs::write(&path, json).map_err(|e| PersistError::io(&path, e))
    }
}

fn parse_favorites(contents: &str) -> Favorites {
    Favorites::from_keys(contents.lines().map(|line| line.trim_end_matches('\r')))
}

/// Each member becomes a note; non-string or missing fields read as ""
fn parse_notes(path: &Path, contents: &str) -> Result<SavedNotes, PersistError> {
    let root: Map<String, Value> = serde_json::from_str(contents)
        .map_err(|source| PersistError::Json { path: path.to_path_buf(), source })?;

    let field = |value: &Value, name: &str| -> String {
        value.get(name).and_then(Value::as_str).unwrap_or_default().to_string()
    };

    Ok(root
        .into_iter()
        .map(|(key, value)| {
            let note = Note { note: field(&value, "note"), date: field(&value, "date") };
            (key, note)
        })
        .collect())
}

fn render_notes(notes: &SavedNotes) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    notes.serialize(&mut serializer)?;
    Ok(out)
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn library() -> (TempDir, Library) {
        let dir = TempDir::new().unwrap();
        let library = Library::open(dir.path().join("data")).unwrap();
        (dir, library)
    }

    #[test]
    fn test_open_creates_directory() {
        let (dir, _library) = library();
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn test_missing_files_load_empty() {
        let (_dir, library) = library();
        assert!(library.load_favorites().is_empty());
        assert!(library.load_notes().is_empty());
    }

    #[test]
    fn test_favorites_round_trip_keeps_order() {
        let (_dir, library) = library();
        let favorites = Favorites::from_keys(["/works/OL3W", "/works/OL1W", "/works/OL2W"]);
        library.save_favorites(&favorites).unwrap();

        assert_eq!(
            fs::read_to_string(library.favorites_path()).unwrap(),
            "/works/OL3W\n/works/OL1W\n/works/OL2W\n"
        );
        assert_eq!(library.load_favorites(), favorites);
    }

    #[test]
    fn test_save_favorites_truncates() {
        let (_dir, library) = library();
        library.save_favorites(&Favorites::from_keys(["a", "b", "c"])).unwrap();
        library.save_favorites(&Favorites::from_keys(["z"])).unwrap();
        assert_eq!(fs::read_to_string(library.favorites_path()).unwrap(), "z\n");
    }

    #[test]
    fn test_notes_round_trip() {
        let (_dir, library) = library();
        let mut notes = SavedNotes::new();
        notes.insert("/works/OL1W".into(), Note { note: "great book".into(), date: "2024-01-01".into() });
        notes.insert("/works/OL2W".into(), Note { note: "line one\nline two".into(), date: String::new() });

        library.save_notes(&notes).unwrap();
        assert_eq!(library.load_notes(), notes);
    }

    #[test]
    fn test_notes_written_with_four_space_indent() {
        let (_dir, library) = library();
        let mut notes = SavedNotes::new();
        notes.insert("/works/OL1W".into(), Note { note: "great book".into(), date: "2024-01-01".into() });
        library.save_notes(&notes).unwrap();

        let written = fs::read_to_string(library.notes_path()).unwrap();
        let expected = "{\n    \"/works/OL1W\": {\n        \"note\": \"great book\",\n        \"date\": \"2024-01-01\"\n    }\n}";
        assert_eq!(written, expected);
    }

    #[test]
    fn test_notes_missing_fields_default_to_empty() {
        let (_dir, library) = library();
        fs::write(library.notes_path(), r#"{"/works/OL1W": {"note": "only text"}, "/works/OL2W": {"date": 7}}"#).unwrap();

        let notes = library.load_notes();
        assert_eq!(notes["/works/OL1W"], Note { note: "only text".into(), date: String::new() });
        assert_eq!(notes["/works/OL2W"], Note::default());
    }

    #[test]
    fn test_malformed_notes_load_empty() {
        let (_dir, library) = library();
        fs::write(library.notes_path(), "not json at all").unwrap();
        assert!(library.load_notes().is_empty());
    }

    #[test]
    fn test_favorites_ignore_blank_lines() {
        let (_dir, library) = library();
        fs::write(library.favorites_path(), "/works/OL1W\r\n\n/works/OL2W\n").unwrap();
        assert_eq!(library.load_favorites().keys(), ["/works/OL1W", "/works/OL2W"]);
    }
}
