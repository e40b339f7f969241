//! laserum-api entry point
//!
//! Minimal entrypoint: configuration loading, store setup, and serving all
//! live in the library. Failures print to stderr and exit non-zero.

#[tokio::main]
async fn main() {
    if let Err(e) = laserum_api::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
