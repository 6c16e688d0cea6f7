mod detail;
mod media;

pub use detail::{DetailState, EnrichmentStatus, TrailerStatus};
pub use media::{MediaExtras, MediaId, MediaSummary};
pub use marquee_api::MediaKind;
