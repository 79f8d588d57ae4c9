pub mod course;
pub mod edition;
pub mod employee;
pub mod employee_edition;

pub use course as courses;
pub use edition as editions;
pub use employee as employees;
pub use employee_edition as employee_editions;
