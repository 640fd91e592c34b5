/*
 * Responsibility
 * - tokio runtime entrypoint
 * - call app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    todo_authorizer::app::run().await
}
