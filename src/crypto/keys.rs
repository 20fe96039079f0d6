//! Fixed key material used by the Booknlife web client.
//!
//! The platform hard-codes two AES-256 key/IV pairs in its front-end bundle:
//! one for login credentials, one for pin data and the ciphertext balance.
//! Both are hex-encoded (32-byte key, 16-byte IV).

/// A fixed AES-256-CBC key/IV pair, hex-encoded.
pub(crate) struct KeySet {
    pub key_hex: &'static str,
    pub iv_hex: &'static str,
}

/// Keyset for login credential fields (id, password).
pub(crate) const AUTH_KEYS: KeySet = KeySet {
    key_hex: "976554ecaf8fecbe09963c6cbdba415665db0cede2e2ae5de12f741d2b2eea39",
    iv_hex: "1a80736bae05bd8df59e97de59645429",
};

/// Keyset for pin fields and the balance returned by the member-info endpoint.
pub(crate) const PAY_KEYS: KeySet = KeySet {
    key_hex: "f79d07a0c655d9f53b7bf3dcde140a0c594768e0c5238d8963f47e0028225371",
    iv_hex: "9e886b2a9ab9f29550035738b3ef1b69",
};
