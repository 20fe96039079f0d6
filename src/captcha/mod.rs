//! CAPTCHA solving module
//!
//! Booknlife gates its login and cash-charge pages behind reCAPTCHA v2.
//! This module solves those challenges through the 2Captcha service and
//! hands back tokens for the `vrtInfo` request field.

mod solver;
mod types;

pub use solver::CaptchaSolver;
pub use types::*;
