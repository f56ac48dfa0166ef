//! Built-in query documents and their typed accessors.
//!
//! Each public constant is a complete GraphQL document, and each accessor on
//! [`PipeClient`] executes one of them and binds the `data` payload to the
//! matching record in [`crate::models`]. The accessors add nothing to the
//! transport; they are thin wrappers over
//! [`execute`](PipeClient::execute) + [`get_data`](PipeClient::get_data)
//! followed by serde deserialization.
//!
//! Lookups return `Ok(None)` when the server resolves the root field to
//! `null` without reporting an error, which is how the API signals an
//! unknown id.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::clients::{GraphqlError, InvalidResponseError, PipeClient};
use crate::models::{Album, Artist, Playlist, Search, Track, User};

/// Document for [`PipeClient::get_me`].
pub const GET_ME_QUERY: &str = "\
query GetMe {
  me {
    id
    name
  }
}";

/// Document for [`PipeClient::get_track`].
pub const GET_TRACK_QUERY: &str = "\
query GetTrack($trackId: String!) {
  track(trackId: $trackId) {
    id
    title
    duration
    album {
      id
      displayTitle
    }
    contributors(first: 10) {
      edges {
        node {
          id
          name
        }
      }
    }
    media {
      token {
        payload
      }
    }
  }
}";

/// Document for [`PipeClient::get_album`].
pub const GET_ALBUM_QUERY: &str = "\
query GetAlbum($albumId: String!) {
  album(albumId: $albumId) {
    id
    displayTitle
    tracksCount
    cover {
      id
      urls
    }
    tracks(first: 50) {
      edges {
        node {
          id
          title
          duration
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
    contributors(first: 10) {
      edges {
        node {
          id
          name
        }
      }
    }
  }
}";

/// Document for [`PipeClient::get_artist`].
pub const GET_ARTIST_QUERY: &str = "\
query GetArtist($artistId: String!) {
  artist(artistId: $artistId) {
    id
    name
    fansCount
    picture {
      id
      urls
    }
    topTracks(first: 10) {
      edges {
        node {
          id
          title
          duration
        }
      }
    }
    albums(first: 25) {
      edges {
        node {
          id
          displayTitle
          cover {
            id
            urls
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}";

/// Document for [`PipeClient::get_playlist`].
pub const GET_PLAYLIST_QUERY: &str = "\
query GetPlaylist($playlistId: String!) {
  playlist(playlistId: $playlistId) {
    id
    title
    owner {
      id
      name
    }
    tracks(first: 50) {
      edges {
        node {
          id
          title
          duration
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}";

/// Document for [`PipeClient::search`].
pub const SEARCH_QUERY: &str = "\
query Search($query: String!) {
  search(query: $query) {
    results {
      tracks(first: 10) {
        edges {
          node {
            id
            title
            duration
          }
        }
        pageInfo {
          hasNextPage
        }
      }
      albums(first: 10) {
        edges {
          node {
            id
            displayTitle
          }
        }
        pageInfo {
          hasNextPage
        }
      }
      artists(first: 10) {
        edges {
          node {
            id
            name
          }
        }
        pageInfo {
          hasNextPage
        }
      }
      playlists(first: 10) {
        edges {
          node {
            id
            title
          }
        }
        pageInfo {
          hasNextPage
        }
      }
    }
  }
}";

/// Pulls the named root field out of a `data` payload and binds it.
///
/// `Ok(None)` when the field is present but `null`; a missing field or a
/// field that does not match the record shape is an invalid response.
fn bind_field<T: DeserializeOwned>(
    mut data: Value,
    field: &str,
) -> Result<Option<T>, GraphqlError> {
    let Some(value) = data.get_mut(field).map(Value::take) else {
        return Err(
            InvalidResponseError::new(format!("'data' is missing the '{field}' field")).into(),
        );
    };
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|err| InvalidResponseError::new(format!("'{field}' has an unexpected shape: {err}")).into())
}

impl PipeClient {
    /// Fetches the authenticated user.
    ///
    /// # Errors
    ///
    /// Any transport or GraphQL error from
    /// [`run`](Self::run), plus [`GraphqlError::InvalidResponse`] when
    /// the payload does not match [`User`].
    pub async fn get_me(&self) -> Result<User, GraphqlError> {
        let data = self.typed(GET_ME_QUERY, None, "GetMe").await?;
        bind_field(data, "me")?
            .ok_or_else(|| InvalidResponseError::new("'me' resolved to null").into())
    }

    /// Fetches a track by id.
    ///
    /// Returns `Ok(None)` for unknown ids.
    ///
    /// # Errors
    ///
    /// Any transport or GraphQL error from [`run`](Self::run), plus
    /// [`GraphqlError::InvalidResponse`] when the payload does not match
    /// [`Track`].
    pub async fn get_track(&self, track_id: &str) -> Result<Option<Track>, GraphqlError> {
        let data = self
            .typed(GET_TRACK_QUERY, Some(json!({ "trackId": track_id })), "GetTrack")
            .await?;
        bind_field(data, "track")
    }

    /// Fetches an album by id.
    ///
    /// Returns `Ok(None)` for unknown ids.
    ///
    /// # Errors
    ///
    /// Any transport or GraphQL error from [`run`](Self::run), plus
    /// [`GraphqlError::InvalidResponse`] when the payload does not match
    /// [`Album`].
    pub async fn get_album(&self, album_id: &str) -> Result<Option<Album>, GraphqlError> {
        let data = self
            .typed(GET_ALBUM_QUERY, Some(json!({ "albumId": album_id })), "GetAlbum")
            .await?;
        bind_field(data, "album")
    }

    /// Fetches an artist by id.
    ///
    /// Returns `Ok(None)` for unknown ids.
    ///
    /// # Errors
    ///
    /// Any transport or GraphQL error from [`run`](Self::run), plus
    /// [`GraphqlError::InvalidResponse`] when the payload does not match
    /// [`Artist`].
    pub async fn get_artist(&self, artist_id: &str) -> Result<Option<Artist>, GraphqlError> {
        let data = self
            .typed(GET_ARTIST_QUERY, Some(json!({ "artistId": artist_id })), "GetArtist")
            .await?;
        bind_field(data, "artist")
    }

    /// Fetches a playlist by id.
    ///
    /// Returns `Ok(None)` for unknown ids.
    ///
    /// # Errors
    ///
    /// Any transport or GraphQL error from [`run`](Self::run), plus
    /// [`GraphqlError::InvalidResponse`] when the payload does not match
    /// [`Playlist`].
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Option<Playlist>, GraphqlError> {
        let data = self
            .typed(
                GET_PLAYLIST_QUERY,
                Some(json!({ "playlistId": playlist_id })),
                "GetPlaylist",
            )
            .await?;
        bind_field(data, "playlist")
    }

    /// Searches tracks, albums, artists, and playlists in one request.
    ///
    /// # Errors
    ///
    /// Any transport or GraphQL error from [`run`](Self::run), plus
    /// [`GraphqlError::InvalidResponse`] when the payload does not match
    /// [`Search`].
    pub async fn search(&self, query: &str) -> Result<Search, GraphqlError> {
        let data = self
            .typed(SEARCH_QUERY, Some(json!({ "query": query })), "Search")
            .await?;
        bind_field(data, "search")?
            .ok_or_else(|| InvalidResponseError::new("'search' resolved to null").into())
    }

    /// Shared execute-and-interpret step for the typed accessors.
    async fn typed(
        &self,
        document: &str,
        variables: Option<Value>,
        operation_name: &str,
    ) -> Result<Value, GraphqlError> {
        let response = self
            .execute(document, variables, Some(operation_name))
            .await?;
        Self::get_data(&response)
    }
}
