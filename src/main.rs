#[tokio::main]
async fn main() {
    if let Err(e) = wardbook_lib::run().await {
        tracing::error!("{e}");
        eprintln!("wardbook: {e}");
        std::process::exit(1);
    }
}
