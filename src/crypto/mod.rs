//! Field encryption module
//!
//! Provides the AES-256-CBC field encryption the Booknlife web client
//! applies before transmission:
//! - Login credential fields (auth keyset)
//! - Pin number / pin password fields and the returned balance (pay keyset)

mod cipher;
mod keys;

pub use cipher::{decrypt_pay_field, encrypt_login_field, encrypt_pay_field, CryptoError};
