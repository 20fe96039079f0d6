//! Booknlife request/response models
//!
//! Every vendor endpoint wraps its payload in the same envelope:
//! `{ "ResultCd": "...", "ResultMsg": "...", "ResultData": ... }` where
//! `"0000"` is the only success code.

use serde::{Deserialize, Serialize};

use super::endpoints::SUCCESS_CODE;
use crate::captcha::CaptchaError;
use crate::crypto::{encrypt_pay_field, CryptoError};

/// Vendor response envelope
#[derive(Debug, Deserialize)]
pub struct VendorEnvelope<T> {
    #[serde(rename = "ResultCd")]
    pub result_cd: String,
    #[serde(rename = "ResultMsg", default)]
    pub result_msg: Option<String>,
    #[serde(rename = "ResultData", default)]
    pub result_data: Option<T>,
}

impl<T> VendorEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.result_cd == SUCCESS_CODE
    }

    /// Convert to a `Result`, keeping the vendor code and message on failure
    pub fn into_result(self, operation: &'static str) -> Result<Option<T>, ClientError> {
        if self.is_success() {
            Ok(self.result_data)
        } else {
            Err(ClientError::VendorError {
                operation,
                code: self.result_cd,
                message: self.result_msg.unwrap_or_default(),
            })
        }
    }
}

/// `ResultData` of `Common/Ready`
#[derive(Debug, Deserialize)]
pub struct ReadyData {
    #[serde(rename = "readyInfo", default)]
    pub ready_info: Option<String>,
}

/// `ResultData` of `Auth/Login`
#[derive(Debug, Deserialize)]
pub struct LoginData {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// `ResultData` of `Member/GetMembInfoV2` (only the fields we read)
#[derive(Debug, Deserialize)]
pub struct MemberInfo {
    #[serde(rename = "cashBal", default)]
    pub cash_bal: Option<String>,
}

/// A prepaid pin to charge: the printed pin number and its password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinEntry {
    pub pin: String,
    pub code: String,
}

impl PinEntry {
    pub fn new(pin: &str, code: &str) -> Self {
        Self {
            pin: pin.to_string(),
            code: code.to_string(),
        }
    }

    /// Encrypt both fields independently with the pay keyset
    pub fn encrypt(&self) -> Result<EncryptedPin, CryptoError> {
        Ok(EncryptedPin {
            pin_no: encrypt_pay_field(&self.pin)?,
            pin_pw: encrypt_pay_field(&self.code)?,
        })
    }
}

/// A pin entry as it appears on the wire
#[derive(Debug, Serialize)]
pub struct EncryptedPin {
    #[serde(rename = "pinNo")]
    pub pin_no: String,
    #[serde(rename = "pinPw")]
    pub pin_pw: String,
}

/// `Auth/Login` request body
#[derive(Debug, Serialize)]
pub struct LoginRequestBody {
    #[serde(rename = "accessType")]
    pub access_type: &'static str,
    #[serde(rename = "loginType")]
    pub login_type: &'static str,
    pub id: String,
    pub passwd: String,
    #[serde(rename = "vrfInfo")]
    pub vrf_info: String,
    #[serde(rename = "vrtInfo")]
    pub vrt_info: String,
}

/// `Pay/PinCashCharge` request body
#[derive(Debug, Serialize)]
pub struct ChargeRequestBody {
    #[serde(rename = "pinCashChargeType")]
    pub charge_type: &'static str,
    #[serde(rename = "pinList")]
    pub pin_list: Vec<EncryptedPin>,
    #[serde(rename = "vrtInfo")]
    pub vrt_info: String,
}

/// Session error types
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Login required - call login() first")]
    LoginRequired,

    #[error("Access token expired - log in again before retrying")]
    SessionExpired,

    #[error("{operation} failed with vendor code {code}: {message}")]
    VendorError {
        operation: &'static str,
        code: String,
        message: String,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Captcha(#[from] CaptchaError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::decrypt_pay_field;

    #[test]
    fn envelope_success_yields_data() {
        let json = r#"{ "ResultCd": "0000", "ResultData": { "accessToken": "tok-123" } }"#;
        let env: VendorEnvelope<LoginData> = serde_json::from_str(json).unwrap();
        assert!(env.is_success());
        let data = env.into_result("Auth/Login").unwrap().unwrap();
        assert_eq!(data.access_token, "tok-123");
    }

    #[test]
    fn envelope_failure_carries_vendor_code() {
        let json = r#"{ "ResultCd": "4012", "ResultMsg": "invalid password" }"#;
        let env: VendorEnvelope<LoginData> = serde_json::from_str(json).unwrap();
        assert!(!env.is_success());
        match env.into_result("Auth/Login").unwrap_err() {
            ClientError::VendorError { code, message, .. } => {
                assert_eq!(code, "4012");
                assert_eq!(message, "invalid password");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn envelope_tolerates_missing_data() {
        let json = r#"{ "ResultCd": "0000" }"#;
        let env: VendorEnvelope<ReadyData> = serde_json::from_str(json).unwrap();
        assert!(env.into_result("Common/Ready").unwrap().is_none());
    }

    #[test]
    fn pin_entry_encrypts_both_fields() {
        let entry = PinEntry::new("1234567890123456", "0000");
        let enc = entry.encrypt().unwrap();
        assert_eq!(decrypt_pay_field(&enc.pin_no).unwrap(), "1234567890123456");
        assert_eq!(decrypt_pay_field(&enc.pin_pw).unwrap(), "0000");
    }

    #[test]
    fn charge_body_uses_vendor_field_names() {
        let body = ChargeRequestBody {
            charge_type: "NORMAL",
            pin_list: vec![PinEntry::new("1111222233334444", "1234").encrypt().unwrap()],
            vrt_info: "captcha-token".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["pinCashChargeType"], "NORMAL");
        assert!(json["pinList"][0]["pinNo"].is_string());
        assert!(json["pinList"][0]["pinPw"].is_string());
        assert_eq!(json["vrtInfo"], "captcha-token");
    }

    #[test]
    fn login_body_uses_vendor_field_names() {
        let body = LoginRequestBody {
            access_type: "H",
            login_type: "ID",
            id: "enc-id".into(),
            passwd: "enc-pw".into(),
            vrf_info: "ready".into(),
            vrt_info: "captcha".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["accessType"], "H");
        assert_eq!(json["loginType"], "ID");
        assert_eq!(json["vrfInfo"], "ready");
        assert_eq!(json["vrtInfo"], "captcha");
    }
}
