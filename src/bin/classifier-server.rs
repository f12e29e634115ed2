//! Sagefin Classifier Server
//!
//! HTTP service that labels transaction batches with spending categories.
//! The tree model is loaded once at start-up; the process exits if it is
//! missing or invalid.

use dotenvy::dotenv;
use sagefin::classifier::TransactionClassifier;
use sagefin::config::ClassifierConfig;
use sagefin::core::http::serve_until_shutdown;
use sagefin::logging;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    logging::init_logging();

    let config = ClassifierConfig::from_env();
    let env = sagefin::config::get_environment();
    info!("Starting Sagefin Classifier Server");
    info!(environment = %env, "Environment");

    let classifier = match TransactionClassifier::from_config(&config) {
        Ok(classifier) => Arc::new(classifier),
        Err(e) => {
            error!(error = %e, path = %config.model_path.display(), "Failed to load model");
            return Err(e.into());
        }
    };

    let port = config.port;
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c");
        }
    };
    if let Err(e) = serve_until_shutdown(port, classifier, shutdown).await {
        error!(error = %e, "HTTP server error");
        return Err(e);
    }

    Ok(())
}
