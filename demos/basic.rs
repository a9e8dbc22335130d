//! Basic example demonstrating the HIBP API client.
//!
//! Run with:
//! ```
//! HIBP_API_KEY=your-key cargo run --example basic -- test@example.com
//! ```

use pwnedapi::{PwnedApi, PwnedClient};

#[tokio::main]
async fn main() -> pwnedapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let account = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "test@example.com".to_string());

    // Create client from environment variables
    println!("Creating HIBP client...");
    let client = PwnedClient::from_env()?;
    println!("Connected to: {}", client.factory().base_uri());

    // Latest breach, public endpoint
    println!("\n--- Latest Breach ---");
    let latest = client.latest_breach().await?;
    println!(
        "{} ({} accounts, added {:?})",
        latest.name().unwrap_or("unknown"),
        latest.pwn_count().unwrap_or_default(),
        latest.added_date()
    );

    // Breaches for an account, needs an API key
    println!("\n--- Breaches for {account} ---");
    let breaches = client.breached_account(&account).await?;
    if breaches.is_empty() {
        println!("Good news: no breaches found");
    }

    for summary in &breaches {
        let Some(name) = summary.name() else { continue };
        let breach = client.breach(name).await?;
        println!(
            "  - {} ({}): {}",
            name,
            breach.breach_date().map(|d| d.to_string()).unwrap_or_default(),
            breach.data_classes().unwrap_or_default().join(", ")
        );
    }

    println!("\nDone!");
    Ok(())
}
