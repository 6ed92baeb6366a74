mod app;
mod cli;

#[tokio::main]
async fn main() -> hx_toast::Result<()> {
    let cli = cli::Cli::parse_args();
    app::run(cli).await
}
