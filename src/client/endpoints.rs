//! Booknlife hosts, endpoint paths, and fixed request headers.
//!
//! Two hosts are involved: the auth API issues ready tokens and handles
//! login; the web API serves member info and pin charges. Each host expects
//! its own `X-Api-Key` value, shipped hard-coded in the platform front end.

/// Authentication host (ready token, login)
pub(crate) const AUTH_API: &str = "https://authapi.booknlife.com";

/// Web API host (member info, pin charge)
pub(crate) const WEB_API: &str = "https://webapi.booknlife.com";

pub(crate) const READY_PATH: &str = "/api/Common/Ready";
pub(crate) const LOGIN_PATH: &str = "/api/Auth/Login";
pub(crate) const MEMBER_INFO_PATH: &str = "/api/Member/GetMembInfoV2";
pub(crate) const PIN_CHARGE_PATH: &str = "/api/Pay/PinCashCharge";

/// `X-Api-Key` for the auth host
pub(crate) const AUTH_API_KEY: &str = "R2pPdGd4bUxHVnhTcUJNOUxkWUY3QT09";

/// `X-Api-Key` for the web API host
pub(crate) const WEB_API_KEY: &str = "U3l2ZkgzY1pKcEt2TnRXMkVROExnUT09";

/// The only vendor result code that means success
pub(crate) const SUCCESS_CODE: &str = "0000";

/// Browser User-Agent the platform front end presents
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";
