#[tokio::main]
async fn main() -> anyhow::Result<()> {
    towdesk_lib::run().await
}
