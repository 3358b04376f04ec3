use genai_diag::{lister, logging, Client};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_tracing();
    let mut stdout = std::io::stdout();
    if let Err(err) = lister::run(&mut stdout, Client::from_env()).await {
        tracing::error!(error = %err, "failed to write output");
    }
}
