use anyhow::Result;
use hot100_core::{
    Catalog,
    ChartDate,
    TrackMatch,
};
use log::{
    error,
    info,
    warn,
};


/// Resolves each chart title to a catalog track, keeping chart order
///
/// Each title is searched within the chart's year first, then without the year
/// filter. Titles that still have no match, or whose search fails, are left out.
pub fn find_tracks<C>(catalog: &C, titles: &[String], date: &ChartDate) -> Vec<TrackMatch>
where
    C: Catalog + ?Sized,
{
    let year = format!("{:04}", date.year());
    let total = titles.len();
    info!("Searching the catalog for {total} songs...");

    let tracks = titles
        .iter()
        .enumerate()
        .filter_map(|(i, title)| {
            let rank = i + 1;
            match match_title(catalog, title, &year) {
                Ok(Some(track)) => {
                    info!("Found ({rank}/{total}): {} by {}", track.name, track.artist);
                    Some(track)
                },
                Ok(None) => {
                    warn!("Could not find song ({rank}/{total}): {title}");
                    None
                },
                Err(e) => {
                    error!("Search failed for song '{title}': {e:#}");
                    None
                },
            }
        })
        .collect::<Vec<_>>();

    info!("Found {}/{total} songs in the catalog", tracks.len());
    tracks
}

fn match_title<C>(catalog: &C, title: &str, year: &str) -> Result<Option<TrackMatch>>
where
    C: Catalog + ?Sized,
{
    if let Some(track) = catalog.search_track(&format!("track:{title} year:{year}"))? {
        return Ok(Some(track));
    }
    catalog.search_track(&format!("track:{title}"))
}
