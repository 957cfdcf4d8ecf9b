pub mod conflict;
pub mod feedback;
pub mod user;

pub use conflict::{match_key, ConflictRecord, NewConflictRecord, PageParams, RegionCandidate};
pub use feedback::Feedback;
pub use user::{User, UserProfile};
