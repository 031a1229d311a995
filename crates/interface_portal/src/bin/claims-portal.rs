//! Claims Portal - Operator Binary
//!
//! Signs a user in, submits any documents given on the command line, runs
//! the adjudication engine over pending claims when the user is an admin,
//! and prints the claims the user can see as JSON.
//!
//! # Usage
//!
//! ```bash
//! claims-portal patient@example.com password scans/sharma.pdf
//! claims-portal admin@example.com password
//! ```
//!
//! # Environment Variables
//!
//! * `PORTAL_CONFIG` - Optional configuration file (TOML, YAML or JSON)
//! * `PORTAL_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `PORTAL_DATA_DIR` - Directory for the JSON snapshots (default: in-memory)
//! * `PORTAL_OCR_LATENCY_MS` / `PORTAL_FRAUD_LATENCY_MS` / `PORTAL_POLICY_LATENCY_MS`
//! * `PORTAL_DEMO_PASSWORD` - Password of every demo account (default: password)
//! * `PORTAL_SEED_DEMO_DATA` - Load demo users and claims into empty stores (default: true)

use anyhow::{bail, Context};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::{AdjudicationOutcome, Claim, ClaimSubmission, ClaimSummary, DocumentUpload};
use interface_portal::{Portal, PortalConfig, TracingNotifier};

/// What the binary prints on success
#[derive(Debug, Serialize)]
struct Report {
    user: String,
    role: String,
    processed: Vec<AdjudicationOutcome>,
    summary: ClaimSummary,
    claims: Vec<Claim>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = PortalConfig::from_env().context("loading portal configuration")?;
    init_tracing(&config.log_level);

    let mut args = std::env::args().skip(1);
    let (Some(email), Some(password)) = (args.next(), args.next()) else {
        bail!("usage: claims-portal <email> <password> [document ...]");
    };
    let documents: Vec<String> = args.collect();

    tracing::info!(
        data_dir = ?config.data_dir,
        documents = documents.len(),
        "Starting claims portal"
    );

    let portal = Portal::from_config(&config, Arc::new(TracingNotifier)).await?;
    for health in portal.health().await {
        tracing::debug!(adapter = %health.adapter_id, status = ?health.status, "Store health");
    }

    let user = portal.directory.authenticate(&email, &password).await?;

    for document in &documents {
        let upload = upload_for(document).await;
        match portal.claims.submit_claim(&user, ClaimSubmission::with_document(upload)).await {
            Ok(claim) => tracing::info!(claim_id = %claim.id, status = %claim.status, "Submitted {}", document),
            Err(e) => tracing::warn!(error = %e, "Could not submit {}", document),
        }
    }

    let processed = if user.is_admin() {
        portal.claims.auto_process_pending(&user).await?
    } else {
        Vec::new()
    };

    let claims = portal.claims.claims_for(&user).await?;
    let report = Report {
        user: user.name.clone(),
        role: user.role.to_string(),
        processed,
        summary: ClaimSummary::from_claims(&claims),
        claims,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Describes a document named on the command line
///
/// The file does not have to exist; intake only looks at its name.
async fn upload_for(document: &str) -> DocumentUpload {
    let path = Path::new(document);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| document.to_string());
    let size_bytes = tokio::fs::metadata(path).await.map(|m| m.len()).unwrap_or(0);
    DocumentUpload::new(file_name, size_bytes)
}

/// Initializes the tracing subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
