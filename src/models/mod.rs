//! Typed response records for the built-in queries.
//!
//! These structs are the data-binding layer the transport hands its `data`
//! payload to: plain serde records mirroring the slices of the Pipe schema
//! the query documents in [`crate::queries`] select. The schema uses
//! camelCase field names and Relay-style connections (`edges` / `node` /
//! `pageInfo`), so the records do too.
//!
//! Only the selected fields are modeled; the schema is far larger. Anything
//! a query does not select simply never appears in the payload.

use serde::Deserialize;

/// Relay-style connection: a page of edges plus optional pagination info.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// The edges in this page.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    /// Pagination info, when the query selects it.
    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

/// One edge of a connection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Edge<T> {
    /// The node this edge points at.
    pub node: T,
}

/// Relay-style pagination info.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page follows this one.
    pub has_next_page: bool,
    /// Cursor of the last edge, for requesting the next page.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// The authenticated user, as selected by the `GetMe` query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Deezer user id.
    pub id: String,
    /// Display name, when public.
    #[serde(default)]
    pub name: Option<String>,
}

/// A picture attached to an album, artist, or playlist.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    /// Picture id.
    #[serde(default)]
    pub id: Option<String>,
    /// Rendered URLs at the sizes the query requested.
    #[serde(default)]
    pub urls: Vec<String>,
}

/// A contributor credit (an artist in a given role).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    /// Artist id.
    pub id: String,
    /// Artist name.
    pub name: String,
}

/// The media access token attached to a track.
///
/// The payload is an opaque string handed to the media delivery service;
/// this client only transports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaToken {
    /// Opaque token payload.
    pub payload: String,
}

/// Track media information.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// The media access token.
    pub token: MediaToken,
}

/// A short album reference as nested under tracks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRef {
    /// Album id.
    pub id: String,
    /// Album display title.
    #[serde(default)]
    pub display_title: Option<String>,
}

/// A track, as selected by the `GetTrack` query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Track id.
    pub id: String,
    /// Track title.
    pub title: String,
    /// Duration in seconds.
    pub duration: u32,
    /// The album this track belongs to.
    #[serde(default)]
    pub album: Option<AlbumRef>,
    /// Contributor credits.
    #[serde(default)]
    pub contributors: Option<Connection<Contributor>>,
    /// Media access information.
    #[serde(default)]
    pub media: Option<Media>,
}

/// A short track reference as nested under albums, artists, and playlists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRef {
    /// Track id.
    pub id: String,
    /// Track title.
    pub title: String,
    /// Duration in seconds, when selected.
    #[serde(default)]
    pub duration: Option<u32>,
}

/// An album, as selected by the `GetAlbum` query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Album id.
    pub id: String,
    /// Album display title.
    pub display_title: String,
    /// Number of tracks on the album.
    pub tracks_count: u32,
    /// Cover picture.
    #[serde(default)]
    pub cover: Option<Picture>,
    /// The album's tracks (paginated).
    #[serde(default)]
    pub tracks: Option<Connection<TrackRef>>,
    /// Contributor credits.
    #[serde(default)]
    pub contributors: Option<Connection<Contributor>>,
}

/// A short album reference with its cover, as listed under artists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    /// Album id.
    pub id: String,
    /// Album display title.
    pub display_title: String,
    /// Cover picture, when selected.
    #[serde(default)]
    pub cover: Option<Picture>,
}

/// An artist, as selected by the `GetArtist` query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Artist id.
    pub id: String,
    /// Artist name.
    pub name: String,
    /// Number of fans.
    pub fans_count: u64,
    /// Artist picture.
    #[serde(default)]
    pub picture: Option<Picture>,
    /// The artist's most popular tracks.
    #[serde(default)]
    pub top_tracks: Option<Connection<TrackRef>>,
    /// The artist's albums (paginated).
    #[serde(default)]
    pub albums: Option<Connection<AlbumSummary>>,
}

/// An artist reference in search results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRef {
    /// Artist id.
    pub id: String,
    /// Artist name.
    pub name: String,
}

/// A playlist, as selected by the `GetPlaylist` query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Playlist id.
    pub id: String,
    /// Playlist title.
    pub title: String,
    /// The playlist's owner.
    #[serde(default)]
    pub owner: Option<User>,
    /// The playlist's tracks (paginated).
    #[serde(default)]
    pub tracks: Option<Connection<TrackRef>>,
}

/// A playlist reference in search results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRef {
    /// Playlist id.
    pub id: String,
    /// Playlist title.
    pub title: String,
}

/// The per-type result lists of a search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Matching tracks.
    pub tracks: Connection<TrackRef>,
    /// Matching albums.
    pub albums: Connection<AlbumSummary>,
    /// Matching artists.
    pub artists: Connection<ArtistRef>,
    /// Matching playlists.
    pub playlists: Connection<PlaylistRef>,
}

/// A search, as selected by the `Search` query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    /// The result lists.
    pub results: SearchResults,
}
