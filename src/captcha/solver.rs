//! 2Captcha solver implementation
//!
//! createTask / getTaskResult polling against the 2Captcha v2 API.
//! Only the proxyless reCAPTCHA v2 task type is needed for Booknlife.

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, info};

use super::types::*;

/// 2Captcha API base URL
const TWOCAPTCHA_API: &str = "https://api.2captcha.com";

/// CAPTCHA solver using the 2Captcha service
pub struct CaptchaSolver {
    api_key: String,
    client: Client,
    poll_interval: Duration,
    max_solve_time: Duration,
}

impl CaptchaSolver {
    /// Create a new CAPTCHA solver
    pub fn new(api_key: &str) -> Result<Self, CaptchaError> {
        if api_key.is_empty() {
            return Err(CaptchaError::ApiKeyMissing);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CaptchaError::NetworkError(e.to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            client,
            poll_interval: Duration::from_secs(5),
            max_solve_time: Duration::from_secs(120),
        })
    }

    /// Set poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set maximum solve time
    pub fn with_max_solve_time(mut self, timeout: Duration) -> Self {
        self.max_solve_time = timeout;
        self
    }

    /// Solve a CAPTCHA: create a task, then poll until ready or timeout
    pub async fn solve(&self, request: &CaptchaRequest) -> Result<CaptchaResult, CaptchaError> {
        let start = Instant::now();

        info!("Solving reCAPTCHA v2 for {}", request.page_url);

        let task_id = self.create_task(request).await?;
        debug!("Created task ID: {}", task_id);

        let deadline = Instant::now() + self.max_solve_time;

        loop {
            if Instant::now() > deadline {
                return Err(CaptchaError::Timeout(self.max_solve_time.as_secs()));
            }

            tokio::time::sleep(self.poll_interval).await;

            match self.get_result(task_id).await? {
                Some(token) => {
                    let solve_time_ms = start.elapsed().as_millis() as u64;
                    info!("CAPTCHA solved in {}ms", solve_time_ms);
                    return Ok(CaptchaResult {
                        token,
                        solve_time_ms,
                    });
                }
                None => {
                    debug!("Task {} still processing...", task_id);
                }
            }
        }
    }

    /// Get account balance from 2Captcha
    pub async fn get_balance(&self) -> Result<f64, CaptchaError> {
        let url = format!(
            "https://2captcha.com/res.php?key={}&action=getbalance&json=1",
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CaptchaError::NetworkError(e.to_string()))?;

        let text = response
            .text()
            .await
            .map_err(|e| CaptchaError::NetworkError(e.to_string()))?;

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&text) {
            if let Some(balance) = json.get("request").and_then(|v| v.as_str()) {
                return balance
                    .parse()
                    .map_err(|_| CaptchaError::InvalidResponse(text));
            }
            if let Some(balance) = json.get("balance").and_then(|v| v.as_f64()) {
                return Ok(balance);
            }
        }

        text.trim()
            .parse()
            .map_err(|_| CaptchaError::InvalidResponse(text))
    }

    /// Create a task with 2Captcha
    async fn create_task(&self, request: &CaptchaRequest) -> Result<i64, CaptchaError> {
        let url = format!("{}/createTask", TWOCAPTCHA_API);

        let create_request = CreateTaskRequest {
            client_key: self.api_key.clone(),
            task: RecaptchaV2Task::from_request(request),
        };

        let response = self
            .client
            .post(&url)
            .json(&create_request)
            .send()
            .await
            .map_err(|e| CaptchaError::NetworkError(e.to_string()))?;

        let response_text = response
            .text()
            .await
            .map_err(|e| CaptchaError::NetworkError(e.to_string()))?;

        debug!(
            "2Captcha createTask response: {}",
            &response_text[..response_text.len().min(500)]
        );

        let result: CreateTaskResponse = serde_json::from_str(&response_text).map_err(|e| {
            CaptchaError::InvalidResponse(format!(
                "Parse error: {} - Response: {}",
                e,
                &response_text[..response_text.len().min(200)]
            ))
        })?;

        if result.error_id != 0 {
            let error_msg = format!(
                "errorId={}, code={}, desc={}",
                result.error_id,
                result.error_code.as_deref().unwrap_or("none"),
                result.error_description.as_deref().unwrap_or("none")
            );
            info!("2Captcha task creation failed: {}", error_msg);
            return Err(CaptchaError::TaskCreationFailed(error_msg));
        }

        result
            .task_id
            .ok_or_else(|| CaptchaError::InvalidResponse("No task ID in response".into()))
    }

    /// Get task result from 2Captcha
    async fn get_result(&self, task_id: i64) -> Result<Option<String>, CaptchaError> {
        let url = format!("{}/getTaskResult", TWOCAPTCHA_API);

        let request = GetResultRequest {
            client_key: self.api_key.clone(),
            task_id,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CaptchaError::NetworkError(e.to_string()))?;

        let result: GetResultResponse = response
            .json()
            .await
            .map_err(|e| CaptchaError::InvalidResponse(e.to_string()))?;

        if result.error_id != 0 {
            let error_msg = result
                .error_description
                .or(result.error_code)
                .unwrap_or_else(|| format!("Error ID: {}", result.error_id));
            return Err(CaptchaError::ApiError(error_msg));
        }

        if result.is_ready() {
            if let Some(token) = result.token() {
                return Ok(Some(token.to_string()));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        let err = CaptchaSolver::new("").unwrap_err();
        assert!(matches!(err, CaptchaError::ApiKeyMissing));
    }

    #[test]
    fn builder_overrides_timings() {
        let solver = CaptchaSolver::new("key")
            .unwrap()
            .with_poll_interval(Duration::from_secs(2))
            .with_max_solve_time(Duration::from_secs(60));
        assert_eq!(solver.poll_interval, Duration::from_secs(2));
        assert_eq!(solver.max_solve_time, Duration::from_secs(60));
    }
}
