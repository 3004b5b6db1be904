//! Run one SOQL query against an org configured through the environment.
//!
//! ```sh
//! export SF_IS_PROD=true
//! export SF_CLIENT_ID=... SF_CLIENT_SECRET=... SF_USERNAME=... SF_PASSWORD=...
//! cargo run --bin sflite-query -- "SELECT Id, Name FROM Account LIMIT 5"
//! ```
//!
//! `SF_ACCEPT_INVALID_CERTS=true` disables certificate verification.
//! `RUST_LOG=debug` shows the request flow.

use sflite::{ClientConfig, Credentials, SalesforceRestClient};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let soql = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if soql.trim().is_empty() {
        eprintln!("Usage: sflite-query <SOQL>");
        std::process::exit(2);
    }

    let creds = Credentials::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!();
        eprintln!("  Set exactly one of SF_INSTANCE_NAME, SF_IS_PROD or SF_LOGIN_HOST,");
        eprintln!("  and SF_CLIENT_ID, SF_CLIENT_SECRET, SF_USERNAME, SF_PASSWORD.");
        std::process::exit(1);
    });

    let accept_invalid_certs = std::env::var("SF_ACCEPT_INVALID_CERTS")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false);
    let config = ClientConfig::builder()
        .accept_invalid_certs(accept_invalid_certs)
        .build();

    let mut client = SalesforceRestClient::with_config(creds, config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    tracing::debug!(host = %client.resolved_host(), api_version = %client.api_version(), "Running query");

    match client.query(&soql).await {
        Ok(body) => {
            println!("Status: {}", client.last_status());
            match serde_json::from_str::<serde_json::Value>(&body)
                .and_then(|v| serde_json::to_string_pretty(&v))
            {
                Ok(pretty) => println!("{pretty}"),
                Err(_) => println!("{body}"),
            }
            if !(200..300).contains(&client.last_status()) {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Last status: {}", client.last_status());
            std::process::exit(1);
        }
    }
}
