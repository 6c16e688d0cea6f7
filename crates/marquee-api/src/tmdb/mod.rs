pub mod client;
pub mod error;
pub mod types;

pub use client::{NoTrailers, TmdbTrailerClient};
pub use error::TmdbError;
