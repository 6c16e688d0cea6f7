//! Clients for the external services the browser talks to: OMDb for
//! movie/show metadata and TMDB for trailer videos.

pub mod omdb;
pub mod tmdb;
pub mod traits;

pub use traits::{
    FailureKind, MediaKind, MetadataProvider, ProviderFailure, ProviderRecord, SearchPage,
    TrailerLookup, TrailerQuery,
};
