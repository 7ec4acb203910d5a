use std::{
    cell::RefCell,
    collections::HashMap,
};

use anyhow::{
    anyhow,
    Result,
};
use hot100_core::{
    Catalog,
    CreatedPlaylist,
    PlaylistDetails,
    TrackMatch,
};


pub fn track(uri: &str, name: &str) -> TrackMatch {
    TrackMatch {
        uri: uri.to_owned(),
        name: name.to_owned(),
        artist: "Test Artist".to_owned(),
    }
}

/// In-memory catalog answering searches by exact query string
#[derive(Default)]
pub struct FakeCatalog {
    pub results: HashMap<String, TrackMatch>,
    pub failing: Vec<String>,
    pub fail_create: bool,
    pub fail_add: bool,
    pub queries: RefCell<Vec<String>>,
    pub created: RefCell<Vec<(String, PlaylistDetails)>>,
    pub added: RefCell<Vec<(String, Vec<String>)>>,
}

impl FakeCatalog {
    pub fn with_result(mut self, query: &str, track: TrackMatch) -> Self {
        self.results.insert(query.to_owned(), track);
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.failing.push(query.to_owned());
        self
    }
}

impl Catalog for FakeCatalog {
    fn search_track(&self, query: &str) -> Result<Option<TrackMatch>> {
        self.queries.borrow_mut().push(query.to_owned());
        if self.failing.iter().any(|q| q == query) {
            return Err(anyhow!("HTTP 500"));
        }
        Ok(self.results.get(query).cloned())
    }

    fn create_playlist(&self, user: &str, details: &PlaylistDetails) -> Result<CreatedPlaylist> {
        if self.fail_create {
            return Err(anyhow!("HTTP 403"));
        }
        self.created.borrow_mut().push((user.to_owned(), details.clone()));
        Ok(CreatedPlaylist {
            id: "pl1".to_owned(),
            url: "https://open.spotify.com/playlist/pl1".to_owned(),
        })
    }

    fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        if self.fail_add {
            return Err(anyhow!("HTTP 502"));
        }
        self.added.borrow_mut().push((playlist_id.to_owned(), uris.to_vec()));
        Ok(())
    }
}
