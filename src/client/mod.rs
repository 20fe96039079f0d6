//! Booknlife session module
//!
//! Provides:
//! - Login with encrypted credentials, ready token, and CAPTCHA solving
//! - Session liveness probe
//! - Balance lookup (ciphertext balance, decrypted on receipt)
//! - Pin-code cash charge submission

mod endpoints;
mod session;
mod types;

pub use session::BooknlifeClient;
pub use types::*;
