pub mod projection;
pub mod terms;

pub use projection::ProjectionTracker;
pub use terms::{RentInput, RentTerms};
