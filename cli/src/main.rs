mod args;
mod cmd;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cmd::run().await
}
