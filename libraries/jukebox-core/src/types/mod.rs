mod credential;
mod ids;
mod playlist;
mod track;

pub use credential::{Credential, Grant};
pub use ids::{PlaylistId, SenderId, TrackId};
pub use playlist::{PlaylistPage, PlaylistRef};
pub use track::{Album, Artist, Image, SearchResult, Track};
