#[cfg(feature = "database")]
mod column;

pub mod dates;
pub mod edition_request;
pub mod session_period;
pub mod sex;

pub use edition_request::{EditionPayload, EditionRequest, StructuralError};
pub use session_period::SessionPeriod;
pub use sex::Sex;
