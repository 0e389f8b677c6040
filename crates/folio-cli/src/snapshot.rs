//! Snapshot commands for the CLI.
//!
//! `snapshot` pulls the live aggregate through the same fetch path the
//! server uses, so an operator can inspect exactly what the portfolio route
//! would serve. `fallback` prints the canned snapshot served when the
//! content source is unreachable.

use folio_cms::{CmsClient, ContentAggregator};
use folio_core::PortfolioSnapshot;

/// Fetch the live snapshot and print it as JSON.
///
/// Degraded resources are logged and defaulted by the aggregator, so this
/// always prints a structurally complete snapshot.
///
/// # Errors
///
/// Returns an error if the content-source URL is invalid or the snapshot
/// cannot be serialized.
pub(crate) async fn run_snapshot(
    cms_url: &str,
    timeout_secs: u64,
    pretty: bool,
) -> anyhow::Result<()> {
    let client = CmsClient::new(cms_url, timeout_secs)?;
    let aggregator = ContentAggregator::new(client);
    let snapshot = aggregator.fetch_snapshot().await;
    println!("{}", render(&snapshot, pretty)?);
    Ok(())
}

/// Print the canned fallback snapshot as JSON.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be serialized.
pub(crate) fn run_fallback(pretty: bool) -> anyhow::Result<()> {
    println!("{}", render(&PortfolioSnapshot::fallback(), pretty)?);
    Ok(())
}

fn render(snapshot: &PortfolioSnapshot, pretty: bool) -> anyhow::Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    Ok(rendered)
}
