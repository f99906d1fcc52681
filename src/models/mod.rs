pub mod card;
pub mod clock;
pub mod quality;
pub mod review_session;
pub mod scheduler;
pub mod selection;

pub use card::Card;
pub use clock::ReviewClock;
pub use quality::ReviewQuality;
pub use review_session::ReviewSession;
pub use scheduler::compute_next_review;
