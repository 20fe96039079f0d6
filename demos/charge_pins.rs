//! Login, check the balance, and charge a pin
//!
//! Run with: cargo run --example charge_pins
//!
//! Environment variables:
//! - `BOOKNLIFE_ID` / `BOOKNLIFE_PASSWORD` - account credentials
//! - `CAPTCHA_API_KEY` - 2Captcha API key
//! - `PIN` / `PIN_CODE` - optional pin to charge

use booknlife_client::{BooknlifeClient, PinEntry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = booknlife_client::init_logging();

    let user_id = std::env::var("BOOKNLIFE_ID")?;
    let password = std::env::var("BOOKNLIFE_PASSWORD")?;
    let captcha_api_key = std::env::var("CAPTCHA_API_KEY")?;

    println!("=== Booknlife Client Demo ===\n");

    // Step 1: Check 2Captcha balance
    println!("Step 1: Checking 2Captcha balance...");
    let solver = booknlife_client::captcha::CaptchaSolver::new(&captcha_api_key)?;
    match solver.get_balance().await {
        Ok(balance) => println!("  Balance: ${:.2}\n", balance),
        Err(e) => println!("  Warning: Could not get balance: {}\n", e),
    }

    // Step 2: Log in
    println!("Step 2: Logging in as {}...", user_id);
    let mut client = BooknlifeClient::new(&user_id, &password, &captcha_api_key)?;
    client.login().await?;
    println!("  Logged in\n");

    // Step 3: Fetch the account balance
    println!("Step 3: Fetching account balance...");
    let balance = client.balance().await?;
    println!("  Cash balance: {}\n", balance);

    // Step 4: Charge a pin if one was provided
    if let (Ok(pin), Ok(code)) = (std::env::var("PIN"), std::env::var("PIN_CODE")) {
        println!("Step 4: Charging pin...");
        let result = client.charge(&[PinEntry::new(&pin, &code)]).await?;
        println!("  Charge accepted: {}", result);

        let balance = client.balance().await?;
        println!("  New balance: {}", balance);
    } else {
        println!("Step 4: Skipped (set PIN and PIN_CODE to charge)");
    }

    Ok(())
}
