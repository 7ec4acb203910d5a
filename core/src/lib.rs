use std::{
    fmt::{
        self,
        Display,
    },
    str::FromStr,
};

use anyhow::{
    ensure,
    Result,
};
use serde::Serialize;
use time::{
    format_description::FormatItem,
    macros::format_description,
    Date,
};

const DATE_FMT: &[FormatItem] = format_description!("[year]-[month]-[day]");


/// A chart week, always a real calendar date written as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartDate(Date);

impl ChartDate {
    #[inline]
    pub fn year(&self) -> i32 { self.0.year() }
}

impl FromStr for ChartDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        // `[year]` alone would also take a leading sign
        ensure!(s.len() == 10 && s.starts_with(|c: char| c.is_ascii_digit()), "expected YYYY-MM-DD");
        let date = Date::parse(s, DATE_FMT)?;
        ensure!(date.year() >= 1, "year must be 0001 or later");
        Ok(Self(date))
    }
}

impl Display for ChartDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.format(DATE_FMT).map_err(|_| fmt::Error)?)
    }
}


/// A catalog track resolved from a chart title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMatch {
    pub uri: String,
    pub name: String,
    pub artist: String,
}

/// Name, description and visibility of a playlist about to be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistDetails {
    pub name: String,
    pub public: bool,
    pub description: String,
}

impl PlaylistDetails {
    pub fn for_chart(date: &ChartDate) -> Self {
        Self {
            name: format!("Billboard Hot 100 - {date}"),
            public: false,
            description: format!("Billboard Hot 100 songs from {date}, created automatically."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub id: String,
    pub url: String,
}


/// Something that can list the titles of a chart, in rank order
pub trait ChartSource {
    fn chart_titles(&self, date: &ChartDate) -> Result<Vec<String>>;
}

/// An authenticated handle to a track catalog that can own playlists
pub trait Catalog {
    /// Best single track for `query`, if the catalog has any
    fn search_track(&self, query: &str) -> Result<Option<TrackMatch>>;

    fn create_playlist(&self, user: &str, details: &PlaylistDetails) -> Result<CreatedPlaylist>;

    fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;
}

impl<T: ChartSource + ?Sized> ChartSource for &T {
    fn chart_titles(&self, date: &ChartDate) -> Result<Vec<String>> { (**self).chart_titles(date) }
}

impl<T: Catalog + ?Sized> Catalog for &T {
    fn search_track(&self, query: &str) -> Result<Option<TrackMatch>> { (**self).search_track(query) }

    fn create_playlist(&self, user: &str, details: &PlaylistDetails) -> Result<CreatedPlaylist> {
        (**self).create_playlist(user, details)
    }

    fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> { (**self).add_tracks(playlist_id, uris) }
}


#[cfg(test)]
mod tests;
