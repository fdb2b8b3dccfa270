//! Album entity model and DTOs.

use recordshelf_core::album::validate_album;
use recordshelf_core::types::{DbId, Timestamp};
use recordshelf_core::validator::Validator;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `albums` table.
///
/// `id`, `created_at` and `version` are owned by the store; callers only
/// ever change `title`, `artist` and `genres`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Album {
    pub id: DbId,
    pub created_at: Timestamp,
    pub title: String,
    pub artist: String,
    pub genres: Vec<String>,
    pub version: i32,
}

impl Album {
    /// Apply the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: UpdateAlbum) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(artist) = patch.artist {
            self.artist = artist;
        }
        if let Some(genres) = patch.genres {
            self.genres = genres;
        }
    }

    pub fn validate(&self, v: &mut Validator) {
        validate_album(v, &self.title, &self.artist, Some(&self.genres));
    }
}

/// DTO for creating a new album.
///
/// Missing `title`/`artist` decode as empty strings so they surface as
/// validation errors rather than decode errors. `genres` stays `None` when
/// omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAlbum {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub genres: Option<Vec<String>>,
}

impl CreateAlbum {
    pub fn validate(&self, v: &mut Validator) {
        validate_album(v, &self.title, &self.artist, self.genres.as_deref());
    }
}

/// DTO for patching an album. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAlbum {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genres: Option<Vec<String>>,
}

/// Search predicates for album listings. Empty values match everything.
#[derive(Debug, Clone, Default)]
pub struct AlbumSearch {
    /// Token match against the title.
    pub title: String,
    /// Token match against the artist.
    pub artist: String,
    /// Albums must carry every one of these genres.
    pub genres: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album() -> Album {
        Album {
            id: 7,
            created_at: chrono::Utc::now(),
            title: "Kind of Blue".into(),
            artist: "Miles Davis".into(),
            genres: vec!["jazz".into()],
            version: 3,
        }
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut a = album();
        a.apply(UpdateAlbum {
            title: Some("Sketches of Spain".into()),
            ..Default::default()
        });
        assert_eq!(a.title, "Sketches of Spain");
        assert_eq!(a.artist, "Miles Davis");
        assert_eq!(a.genres, vec!["jazz".to_string()]);
        assert_eq!(a.version, 3);
    }

    #[test]
    fn apply_can_clear_genres_explicitly() {
        let mut a = album();
        a.apply(UpdateAlbum {
            genres: Some(vec![]),
            ..Default::default()
        });
        assert!(a.genres.is_empty());
    }

    #[test]
    fn patched_album_is_revalidated() {
        let mut a = album();
        a.apply(UpdateAlbum {
            artist: Some(String::new()),
            ..Default::default()
        });
        let mut v = Validator::new();
        a.validate(&mut v);
        assert_eq!(v.errors()["artist"], "must be provided");
    }

    #[test]
    fn create_dto_without_genres_fails_validation() {
        let input: CreateAlbum =
            serde_json::from_str(r#"{"title": "Blue Train", "artist": "John Coltrane"}"#).unwrap();
        let mut v = Validator::new();
        input.validate(&mut v);
        assert_eq!(v.errors()["genres"], "must be provided");
    }

    #[test]
    fn create_dto_missing_title_decodes_as_empty() {
        let input: CreateAlbum =
            serde_json::from_str(r#"{"artist": "John Coltrane", "genres": []}"#).unwrap();
        let mut v = Validator::new();
        input.validate(&mut v);
        assert_eq!(v.errors()["title"], "must be provided");
        assert_eq!(v.errors().len(), 1);
    }
}
