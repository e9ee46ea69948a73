use crate::ids::MovieID;
use crate::image::{BackdropSize, PosterSize, image_url};

/// Catalog entry as listed by the now-playing, trending and popular feeds.
///
/// Values are immutable once fetched; whichever controller fetched the list
/// owns it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieSummary {
    pub id: MovieID,
    pub title: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "de::null_as_empty")
    )]
    pub overview: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub backdrop_path: Option<String>,
    /// ISO date (`YYYY-MM-DD`) or empty when unreleased/unknown
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "de::null_as_empty")
    )]
    pub release_date: String,
    /// Average vote in `[0, 10]`; out of range values are dropped on decode
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "de::vote_average")
    )]
    pub vote_average: Option<f32>,
}

impl MovieSummary {
    /// Minimal summary with only id and title, mainly for fixtures.
    pub fn new(id: impl Into<MovieID>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: String::new(),
            vote_average: None,
        }
    }

    /// Year part of the release date, `None` when the date is empty.
    pub fn release_year(&self) -> Option<&str> {
        let date = self.release_date.trim();
        if date.is_empty() {
            return None;
        }
        date.split('-').next().filter(|year| !year.is_empty())
    }

    #[cfg(feature = "chrono")]
    pub fn release_date_parsed(&self) -> Option<chrono::NaiveDate> {
        let trimmed = self.release_date.trim();
        if trimmed.is_empty() {
            return None;
        }
        chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
    }

    /// Rating formatted with one decimal (`7.3`).
    pub fn rating_label(&self) -> Option<String> {
        self.vote_average.map(|vote| format!("{vote:.1}"))
    }

    pub fn poster_url(&self, base: &str, size: PosterSize) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| image_url(base, size.as_str(), path))
    }

    pub fn backdrop_url(
        &self,
        base: &str,
        size: BackdropSize,
    ) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| image_url(base, size.as_str(), path))
    }
}

#[cfg(feature = "serde")]
mod de {
    use serde::{Deserialize, Deserializer};

    pub(super) fn null_as_empty<'de, D>(
        deserializer: D,
    ) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.unwrap_or_default())
    }

    pub(super) fn vote_average<'de, D>(
        deserializer: D,
    ) -> Result<Option<f32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<f64> = Option::deserialize(deserializer)?;
        Ok(raw
            .filter(|vote| vote.is_finite() && (0.0..=10.0).contains(vote))
            .map(|vote| vote as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_year_takes_leading_segment() {
        let mut movie = MovieSummary::new(1, "Dune");
        assert_eq!(movie.release_year(), None);

        movie.release_date = "2024-02-27".into();
        assert_eq!(movie.release_year(), Some("2024"));
    }

    #[test]
    fn rating_label_uses_one_decimal() {
        let mut movie = MovieSummary::new(1, "Dune");
        assert_eq!(movie.rating_label(), None);
        movie.vote_average = Some(8.149);
        assert_eq!(movie.rating_label().as_deref(), Some("8.1"));
    }

    #[test]
    fn image_urls_require_a_path() {
        let mut movie = MovieSummary::new(1, "Dune");
        assert!(movie.poster_url("https://img", PosterSize::W342).is_none());

        movie.poster_path = Some("/p.jpg".into());
        movie.backdrop_path = Some("/b.jpg".into());
        assert_eq!(
            movie.poster_url("https://img", PosterSize::W342).as_deref(),
            Some("https://img/w342/p.jpg")
        );
        assert_eq!(
            movie
                .backdrop_url("https://img", BackdropSize::W1280)
                .as_deref(),
            Some("https://img/w1280/b.jpg")
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decodes_tmdb_shape_with_nulls() {
        let movie: MovieSummary = serde_json::from_str(
            r#"{
                "id": 693134,
                "title": "Dune: Part Two",
                "overview": null,
                "poster_path": null,
                "backdrop_path": "/xOMo8BRK7PfcJv9JCnx7s5hj0PX.jpg",
                "release_date": "2024-02-27",
                "vote_average": 8.2,
                "popularity": 1023.4,
                "adult": false
            }"#,
        )
        .expect("decode");

        assert_eq!(movie.id, MovieID(693134));
        assert_eq!(movie.overview, "");
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.vote_average, Some(8.2));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn out_of_range_votes_are_dropped() {
        let movie: MovieSummary = serde_json::from_str(
            r#"{"id": 1, "title": "x", "vote_average": 42.0}"#,
        )
        .expect("decode");
        assert_eq!(movie.vote_average, None);
        assert_eq!(movie.release_date, "");
    }
}
