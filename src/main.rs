#[tokio::main]
async fn main() {
    if let Err(e) = whale_flow_signals::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
