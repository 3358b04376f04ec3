use std::process::ExitCode;

use genai_diag::{checker, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init_tracing();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    match checker::run_from_env(&mut stdout, &mut stderr).await {
        Ok(status) => status.into(),
        Err(err) => {
            tracing::error!(error = %err, "failed to write output");
            ExitCode::FAILURE
        }
    }
}
