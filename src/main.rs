use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    jobpilot_cli::cli::run().await
}
