#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_practice_backend::run().await
}
