use genai_diag::config::ProbeSettings;
use genai_diag::{logging, probe};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_tracing();
    let mut stdout = std::io::stdout();
    if let Err(err) = probe::run(&mut stdout, ProbeSettings::from_env()).await {
        tracing::error!(error = %err, "failed to write output");
    }
}
