pub mod edition;
pub mod lookup;
pub mod query_edition;
pub mod roster;
pub mod validation;

pub use edition::EditionService;
pub use lookup::{CourseLookup, EmployeeLookup, EmployeeSummary};
pub use query_edition::EditionDetails;
