//! CAPTCHA types and 2Captcha API models

use serde::{Deserialize, Serialize};

/// reCAPTCHA v2 site key embedded in the Booknlife login and charge pages.
pub const BOOKNLIFE_SITE_KEY: &str = "6LcPz9MZAAAAAIaVfbYpyldorXmBEivPpTRByNBw";

/// CAPTCHA solve request (reCAPTCHA v2, proxyless)
#[derive(Debug, Clone)]
pub struct CaptchaRequest {
    pub sitekey: String,
    pub page_url: String,
}

impl CaptchaRequest {
    /// Create a request for an arbitrary page/site key pair
    pub fn recaptcha_v2(sitekey: &str, page_url: &str) -> Self {
        Self {
            sitekey: sitekey.to_string(),
            page_url: page_url.to_string(),
        }
    }

    /// Challenge bound to the Booknlife login page
    pub fn booknlife_login() -> Self {
        Self::recaptcha_v2(BOOKNLIFE_SITE_KEY, "https://www.booknlife.com/auth/login/")
    }

    /// Challenge bound to the Booknlife cash-charge page
    pub fn booknlife_charge() -> Self {
        Self::recaptcha_v2(BOOKNLIFE_SITE_KEY, "https://www.booknlife.com/cashcharge/")
    }
}

/// CAPTCHA solve result
#[derive(Debug, Clone)]
pub struct CaptchaResult {
    pub token: String,
    pub solve_time_ms: u64,
}

// ========== 2Captcha API Models ==========

/// 2Captcha create task request
#[derive(Debug, Serialize)]
pub struct CreateTaskRequest {
    #[serde(rename = "clientKey")]
    pub client_key: String,
    pub task: RecaptchaV2Task,
}

/// Proxyless reCAPTCHA v2 task payload
#[derive(Debug, Serialize)]
pub struct RecaptchaV2Task {
    #[serde(rename = "type")]
    pub task_type: &'static str,
    #[serde(rename = "websiteURL")]
    pub website_url: String,
    #[serde(rename = "websiteKey")]
    pub website_key: String,
}

impl RecaptchaV2Task {
    pub fn from_request(request: &CaptchaRequest) -> Self {
        Self {
            task_type: "RecaptchaV2TaskProxyless",
            website_url: request.page_url.clone(),
            website_key: request.sitekey.clone(),
        }
    }
}

/// 2Captcha create task response
#[derive(Debug, Deserialize)]
pub struct CreateTaskResponse {
    #[serde(rename = "errorId")]
    pub error_id: i32,
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "errorDescription")]
    pub error_description: Option<String>,
    #[serde(rename = "taskId")]
    pub task_id: Option<i64>,
}

/// 2Captcha get result request
#[derive(Debug, Serialize)]
pub struct GetResultRequest {
    #[serde(rename = "clientKey")]
    pub client_key: String,
    #[serde(rename = "taskId")]
    pub task_id: i64,
}

/// 2Captcha get result response
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GetResultResponse {
    #[serde(rename = "errorId")]
    pub error_id: i32,
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "errorDescription")]
    pub error_description: Option<String>,
    pub status: Option<String>,
    pub solution: Option<TaskSolution>,
}

impl GetResultResponse {
    pub fn is_processing(&self) -> bool {
        self.status.as_deref() == Some("processing")
    }

    pub fn is_ready(&self) -> bool {
        self.status.as_deref() == Some("ready")
    }

    pub fn token(&self) -> Option<&str> {
        self.solution
            .as_ref()
            .and_then(|s| s.g_recaptcha_response.as_deref().or(s.token.as_deref()))
    }
}

/// Solution payload inside a ready result
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TaskSolution {
    #[serde(rename = "gRecaptchaResponse")]
    pub g_recaptcha_response: Option<String>,
    pub token: Option<String>,
}

/// CAPTCHA error types
#[derive(Debug, thiserror::Error)]
pub enum CaptchaError {
    #[error("API key not configured")]
    ApiKeyMissing,

    #[error("2Captcha API error: {0}")]
    ApiError(String),

    #[error("Task creation failed: {0}")]
    TaskCreationFailed(String),

    #[error("Solve timeout after {0}s")]
    Timeout(u64),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_binds_login_page() {
        let req = CaptchaRequest::booknlife_login();
        assert_eq!(req.sitekey, BOOKNLIFE_SITE_KEY);
        assert_eq!(req.page_url, "https://www.booknlife.com/auth/login/");
    }

    #[test]
    fn charge_request_binds_charge_page() {
        let req = CaptchaRequest::booknlife_charge();
        assert_eq!(req.page_url, "https://www.booknlife.com/cashcharge/");
    }

    #[test]
    fn task_serializes_2captcha_field_names() {
        let task = RecaptchaV2Task::from_request(&CaptchaRequest::booknlife_login());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "RecaptchaV2TaskProxyless");
        assert_eq!(json["websiteKey"], BOOKNLIFE_SITE_KEY);
        assert!(json["websiteURL"].is_string());
    }

    #[test]
    fn ready_result_exposes_token() {
        let json = r#"{
            "errorId": 0,
            "status": "ready",
            "solution": { "gRecaptchaResponse": "03AGdBq-token" }
        }"#;
        let result: GetResultResponse = serde_json::from_str(json).unwrap();
        assert!(result.is_ready());
        assert_eq!(result.token(), Some("03AGdBq-token"));
    }

    #[test]
    fn processing_result_has_no_token() {
        let json = r#"{ "errorId": 0, "status": "processing" }"#;
        let result: GetResultResponse = serde_json::from_str(json).unwrap();
        assert!(result.is_processing());
        assert_eq!(result.token(), None);
    }
}
