//! Entry point for the Stayfinder command-line interface.
#![forbid(unsafe_code)]

use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    if let Err(error) = stayfinder_cli::run().await {
        eprintln!("stayfinder: {error}");
        process::exit(1);
    }
}
