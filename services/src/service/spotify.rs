use std::fmt;

use anyhow::{
    anyhow,
    bail,
    Context,
    Result,
};
use base64::{
    engine::general_purpose,
    Engine as _,
};
use hot100_core::{
    Catalog,
    CreatedPlaylist,
    PlaylistDetails,
    TrackMatch,
};
use log::{
    debug,
    info,
    warn,
};
use serde::Deserialize;
use serde_with::{
    serde_as,
    VecSkipError,
};
use uuid::Uuid;

const ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const API_URL: &str = "https://api.spotify.com/v1";
const SCOPE: &str = "playlist-modify-private";

pub const ENV_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_REDIRECT_URI";
pub const ENV_USERNAME: &str = "SPOTIFY_USERNAME";


/// Application credentials and the account that will own the playlist
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub username: String,
}

impl Credentials {
    /// Reads all credentials from the process environment
    ///
    /// # Errors
    ///
    /// Fails listing every variable that is unset or empty.
    pub fn from_env() -> Result<Self> { Self::from_lookup(|name| std::env::var(name).ok()) }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| {
            let val = lookup(name).filter(|v| !v.trim().is_empty());
            if val.is_none() {
                missing.push(name);
            }
            val.unwrap_or_default()
        };

        let creds = Self {
            client_id: require(ENV_CLIENT_ID),
            client_secret: require(ENV_CLIENT_SECRET),
            redirect_uri: require(ENV_REDIRECT_URI),
            username: require(ENV_USERNAME),
        };

        if missing.is_empty() {
            Ok(creds)
        } else {
            Err(anyhow!("Missing required environment variables: {}", missing.join(", ")))
        }
    }

    /// The consent page the user must visit to grant playlist access
    pub fn authorize_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("scope", SCOPE),
            ("state", state),
        ];
        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{ACCOUNTS_URL}/authorize?{query}")
    }

    fn basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", general_purpose::STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("username", &self.username)
            .finish()
    }
}


/// Pulls the authorization code out of the url the browser was redirected to
///
/// A bare code (no query string) is accepted as-is.
///
/// # Errors
///
/// Fails if consent was refused, the `state` does not match, or no code is present.
pub fn parse_redirect(redirected: &str, expected_state: &str) -> Result<String> {
    let redirected = redirected.trim();
    let Some((_, query)) = redirected.split_once('?') else {
        if redirected.is_empty() || redirected.contains(['/', '=', '&']) {
            bail!("No authorization code in redirect url");
        }
        debug!("Treating input as a bare authorization code");
        return Ok(redirected.to_owned());
    };
    let query = query.split_once('#').map_or(query, |(q, _)| q);

    let mut code = None;
    let mut state = None;
    for (key, value) in query.split('&').filter_map(|pair| pair.split_once('=')) {
        let value = urlencoding::decode(value).with_context(|| format!("Malformed `{key}` parameter"))?;
        match key {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => bail!("Authorization was not granted: {value}"),
            _ => {},
        }
    }

    if state.as_deref() != Some(expected_state) {
        bail!("Authorization state mismatch; the redirect url does not belong to this session");
    }
    code.filter(|c| !c.is_empty()).ok_or(anyhow!("No authorization code in redirect url"))
}


#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    scope: String,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    id: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde_as(as = "VecSkipError<_>")]
    #[serde(default)]
    items: Vec<TrackObject>,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    uri: String,
    name: String,
    #[serde(default)]
    artists: Vec<ArtistObject>,
}

#[derive(Debug, Deserialize)]
struct ArtistObject {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistObject {
    id: String,
    external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Api { error: ApiError },
    Auth { error: String, error_description: Option<String> },
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl From<TrackObject> for TrackMatch {
    fn from(track: TrackObject) -> Self {
        Self {
            uri: track.uri,
            name: track.name,
            artist: track
                .artists
                .into_iter()
                .next()
                .map_or_else(|| "Unknown Artist".to_owned(), |a| a.name),
        }
    }
}

/// Turns a failed request into an error carrying Spotify's own message when it sent one
fn request_error(err: ureq::Error) -> anyhow::Error {
    match err {
        ureq::Error::Status(code, resp) => {
            let detail = match resp.into_json::<ErrorBody>() {
                Ok(ErrorBody::Api { error }) => error.message,
                Ok(ErrorBody::Auth { error, error_description }) => error_description.unwrap_or(error),
                Err(_) => "no details".to_owned(),
            };
            anyhow!("Spotify returned HTTP {code}: {detail}")
        },
        transport => anyhow::Error::new(transport).context("Spotify request failed"),
    }
}


/// An authenticated Spotify Web API session
pub struct SpotifyClient {
    agent: ureq::Agent,
    bearer: String,
}

impl SpotifyClient {
    /// Runs the authorization code flow and checks the session with an identity probe
    ///
    /// `authorize` is handed the consent url and must return the url the browser
    /// was redirected to after the user granted access.
    ///
    /// # Errors
    ///
    /// Any failure during consent, token exchange or the probe.
    pub fn connect<F>(creds: &Credentials, authorize: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        let agent = ureq::AgentBuilder::new().build();
        let state = Uuid::new_v4().simple().to_string();
        let url = creds.authorize_url(&state);

        info!("Opening browser for Spotify authorization...");
        if let Err(e) = webbrowser::open(&url) {
            warn!("Could not open a browser ({e}); visit the authorization url manually");
        }

        let redirected = authorize(&url)?;
        let code = parse_redirect(&redirected, &state)?;
        let token = Self::exchange_code(&agent, creds, &code)?;
        debug!("Granted scopes: {}", token.scope);

        let client = Self {
            agent,
            bearer: format!("Bearer {}", token.access_token),
        };
        let me = client.current_user().context("Identity check failed")?;
        info!("Connected to Spotify as {}", me.display_name.as_deref().unwrap_or(&me.id));
        Ok(client)
    }

    fn exchange_code(agent: &ureq::Agent, creds: &Credentials, code: &str) -> Result<TokenResponse> {
        agent
            .post(&format!("{ACCOUNTS_URL}/api/token"))
            .set("Authorization", &creds.basic_auth())
            .send_form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", creds.redirect_uri.as_str()),
            ])
            .map_err(request_error)?
            .into_json()
            .context("Malformed token response")
    }

    fn current_user(&self) -> Result<UserProfile> {
        self.agent
            .get(&format!("{API_URL}/me"))
            .set("Authorization", &self.bearer)
            .call()
            .map_err(request_error)?
            .into_json()
            .context("Malformed user profile")
    }
}

impl Catalog for SpotifyClient {
    fn search_track(&self, query: &str) -> Result<Option<TrackMatch>> {
        debug!("Searching tracks: {query}");
        let resp: SearchResponse = self
            .agent
            .get(&format!("{API_URL}/search"))
            .set("Authorization", &self.bearer)
            .query("q", query)
            .query("type", "track")
            .query("limit", "1")
            .call()
            .map_err(request_error)?
            .into_json()
            .context("Malformed search response")?;

        Ok(resp.tracks.items.into_iter().next().map(TrackMatch::from))
    }

    fn create_playlist(&self, user: &str, details: &PlaylistDetails) -> Result<CreatedPlaylist> {
        let url = format!("{API_URL}/users/{}/playlists", urlencoding::encode(user));
        let playlist: PlaylistObject = self
            .agent
            .post(&url)
            .set("Authorization", &self.bearer)
            .send_json(details)
            .map_err(request_error)?
            .into_json()
            .context("Malformed playlist response")?;

        Ok(CreatedPlaylist {
            id: playlist.id,
            url: playlist.external_urls.spotify,
        })
    }

    fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let url = format!("{API_URL}/playlists/{}/tracks", urlencoding::encode(playlist_id));
        self.agent
            .post(&url)
            .set("Authorization", &self.bearer)
            .send_json(serde_json::json!({ "uris": uris }))
            .map_err(request_error)?;
        Ok(())
    }
}
