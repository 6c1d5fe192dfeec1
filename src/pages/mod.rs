//! Page components. Thin by design: each page drives the session and
//! gateway flows and leaves styling to the stylesheet.

pub mod dashboard;
pub mod login;
pub mod register;
