//! Booknlife session wrapper
//!
//! One client wraps one HTTP session: a persistent cookie jar plus the
//! bearer token from the last successful login. Operations are plain
//! request/response sequences; any non-success vendor code aborts the call.
//! The client performs no automatic re-login - when `charge`/`balance`
//! report an expired session, the caller runs `login()` again.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{cookie::Jar, Client};
use tracing::{debug, info, warn};

use super::endpoints::*;
use super::types::*;
use crate::captcha::{CaptchaRequest, CaptchaSolver};
use crate::crypto::{decrypt_pay_field, encrypt_login_field, CryptoError};
use crate::ClientConfig;

/// Automation client for the Booknlife platform
pub struct BooknlifeClient {
    client: Client,
    solver: CaptchaSolver,
    user_id: String,
    password: String,
    /// One-time ready token, consumed by the next login attempt
    ready_info: Option<String>,
    access_token: Option<String>,
}

impl BooknlifeClient {
    /// Create a client with default timings
    pub fn new(user_id: &str, password: &str, captcha_api_key: &str) -> Result<Self, ClientError> {
        Self::with_config(
            user_id,
            password,
            &ClientConfig {
                captcha_api_key: captcha_api_key.to_string(),
                ..ClientConfig::default()
            },
        )
    }

    /// Create a client from a [`ClientConfig`]
    pub fn with_config(
        user_id: &str,
        password: &str,
        config: &ClientConfig,
    ) -> Result<Self, ClientError> {
        let solver = CaptchaSolver::new(&config.captcha_api_key)?
            .with_poll_interval(Duration::from_secs(config.captcha_poll_secs))
            .with_max_solve_time(Duration::from_secs(config.captcha_max_solve_secs));

        let cookie_jar = Arc::new(Jar::default());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .cookie_provider(cookie_jar)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            solver,
            user_id: user_id.to_string(),
            password: password.to_string(),
            ready_info: None,
            access_token: None,
        })
    }

    /// Whether a login has succeeded on this session
    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Log in with the credentials given at construction.
    ///
    /// Sequence: encrypt id/password, solve the login-page CAPTCHA, fetch a
    /// one-time ready token, then submit everything in one POST. The bearer
    /// token is stored only when the vendor reports `"0000"`.
    pub async fn login(&mut self) -> Result<(), ClientError> {
        info!("Logging in: {}", self.user_id);

        let id = encrypt_login_field(&self.user_id)?;
        let passwd = encrypt_login_field(&self.password)?;

        let captcha = self.solver.solve(&CaptchaRequest::booknlife_login()).await?;

        self.fetch_ready_token().await?;
        let vrf_info = self
            .ready_info
            .take()
            .ok_or_else(|| ClientError::InvalidResponse("ready token missing".into()))?;

        let body = LoginRequestBody {
            access_type: "H",
            login_type: "ID",
            id,
            passwd,
            vrf_info,
            vrt_info: captcha.token,
        };

        let response = self
            .client
            .post(format!("{}{}", AUTH_API, LOGIN_PATH))
            .header("X-Api-Key", AUTH_API_KEY)
            .header("Authorization", "Bearer")
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        let envelope: VendorEnvelope<LoginData> = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        self.store_login_result(envelope)
    }

    /// Probe whether the stored token is still accepted.
    ///
    /// Strictly true/false: non-success vendor codes and transport failures
    /// both come back as `false`.
    pub async fn is_logged_in(&self) -> bool {
        match self.fetch_member_info().await {
            Ok(envelope) => envelope.is_success(),
            Err(e) => {
                warn!("Liveness probe failed: {}", e);
                false
            }
        }
    }

    /// Fetch the account balance, decrypting the ciphertext field.
    pub async fn balance(&self) -> Result<String, ClientError> {
        self.require_live_session().await?;

        let envelope = self.fetch_member_info().await?;
        let info = envelope
            .into_result("Member/GetMembInfoV2")?
            .ok_or_else(|| ClientError::InvalidResponse("member info missing".into()))?;

        let cash_bal = info
            .cash_bal
            .ok_or_else(|| ClientError::InvalidResponse("cashBal missing".into()))?;

        let balance = decrypt_pay_field(&cash_bal)?;
        debug!("Balance fetched: {}", balance);
        Ok(balance)
    }

    /// Charge a batch of prepaid pins in a single request.
    ///
    /// Each pin number and pin password is encrypted independently; list
    /// order is preserved. The batch succeeds or fails as one vendor call.
    pub async fn charge(&self, entries: &[PinEntry]) -> Result<serde_json::Value, ClientError> {
        self.require_live_session().await?;

        info!("Charging {} pin(s)", entries.len());

        let pin_list = encrypt_pin_list(entries)?;
        let captcha = self
            .solver
            .solve(&CaptchaRequest::booknlife_charge())
            .await?;

        let body = ChargeRequestBody {
            charge_type: "NORMAL",
            pin_list,
            vrt_info: captcha.token,
        };

        let response = self
            .client
            .post(format!("{}{}", WEB_API, PIN_CHARGE_PATH))
            .header("X-Api-Key", WEB_API_KEY)
            .header("Authorization", self.bearer_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        let envelope: VendorEnvelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        let data = envelope.into_result("Pay/PinCashCharge")?;
        info!("Charge accepted for {} pin(s)", entries.len());
        Ok(data.unwrap_or(serde_json::Value::Null))
    }

    /// Fetch a one-time ready token from the auth host
    async fn fetch_ready_token(&mut self) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}{}", AUTH_API, READY_PATH))
            .header("X-Api-Key", AUTH_API_KEY)
            .header("Authorization", "Bearer")
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        let envelope: VendorEnvelope<ReadyData> = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        let ready_info = envelope
            .into_result("Common/Ready")?
            .and_then(|d| d.ready_info)
            .ok_or_else(|| ClientError::InvalidResponse("readyInfo missing".into()))?;

        debug!("Ready token obtained");
        self.ready_info = Some(ready_info);
        Ok(())
    }

    /// POST the member-info endpoint with the stored bearer token
    async fn fetch_member_info(&self) -> Result<VendorEnvelope<MemberInfo>, ClientError> {
        let response = self
            .client
            .post(format!("{}{}", WEB_API, MEMBER_INFO_PATH))
            .header("X-Api-Key", WEB_API_KEY)
            .header("Authorization", self.bearer_header())
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Token precondition plus liveness probe shared by `charge`/`balance`
    async fn require_live_session(&self) -> Result<(), ClientError> {
        if self.access_token.is_none() {
            return Err(ClientError::LoginRequired);
        }
        if !self.is_logged_in().await {
            return Err(ClientError::SessionExpired);
        }
        Ok(())
    }

    fn bearer_header(&self) -> String {
        format!("Bearer {}", self.access_token.as_deref().unwrap_or_default())
    }

    /// Store the bearer token iff the login envelope reports success
    fn store_login_result(&mut self, envelope: VendorEnvelope<LoginData>) -> Result<(), ClientError> {
        let data = envelope
            .into_result("Auth/Login")?
            .ok_or_else(|| ClientError::InvalidResponse("accessToken missing".into()))?;

        info!("Login successful: {}", self.user_id);
        self.access_token = Some(data.access_token);
        Ok(())
    }
}

/// Encrypt a batch of pins, preserving list order
fn encrypt_pin_list(entries: &[PinEntry]) -> Result<Vec<EncryptedPin>, CryptoError> {
    entries.iter().map(PinEntry::encrypt).collect()
}
