//! zk - query and edit DNS zones from the terminal.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    zonekeeper_cli::run().await
}
