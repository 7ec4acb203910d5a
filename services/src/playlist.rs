use anyhow::{
    bail,
    Context,
    Result,
};
use hot100_core::{
    Catalog,
    ChartDate,
    PlaylistDetails,
};
use log::info;


/// Creates a private playlist for `date` owned by `user` and fills it with `uris`
///
/// Returns the shareable playlist url.
///
/// # Errors
///
/// Fails if `uris` is empty, or if creating or filling the playlist fails. A
/// playlist that was created but could not be filled is left in place.
pub fn create_playlist<C>(catalog: &C, user: &str, uris: &[String], date: &ChartDate) -> Result<String>
where
    C: Catalog + ?Sized,
{
    if uris.is_empty() {
        bail!("No tracks to add to the playlist");
    }

    let details = PlaylistDetails::for_chart(date);
    info!("Creating playlist '{}'...", details.name);

    let playlist = catalog
        .create_playlist(user, &details)
        .with_context(|| format!("Failed to create playlist '{}'", details.name))?;
    catalog
        .add_tracks(&playlist.id, uris)
        .with_context(|| format!("Playlist {} was created but its tracks could not be added", playlist.url))?;

    info!("Created playlist '{}' with {} songs", details.name, uris.len());
    Ok(playlist.url)
}
