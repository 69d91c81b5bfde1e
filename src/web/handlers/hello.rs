// GET / — greeting, plus a structured log entry with custom fields so log
// ingestion can be checked end to end.

use tracing::info;

pub async fn hello() -> &'static str {
    info!(
        log_field = "custom-entry",
        arbitrary_field = "custom-entry",
        "Hello request"
    );
    info!("Logged from the hello handler");

    "Hello, World!"
}
