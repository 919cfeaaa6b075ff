use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use portfolio_export_market_data::MarketDataProvider;

use super::info_fields::merge_info;
use crate::errors::{EnrichmentError, Error, Result};
use crate::holdings::{HoldingRecord, Holdings};

/// What to do when market data for one symbol cannot be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the run on the first failing symbol.
    #[default]
    Abort,
    /// Leave the failing holding untouched, report it, and carry on.
    Skip,
}

/// A holding the enricher had to leave at its current values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: String,
}

/// Outcome of one enrichment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentSummary {
    pub enriched: Vec<String>,
    pub skipped: Vec<SkippedSymbol>,
}

/// Merges provider data into each holding, one symbol after another.
pub struct MarketEnricher {
    provider: Arc<dyn MarketDataProvider>,
    policy: FailurePolicy,
}

impl MarketEnricher {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn enrich(&self, holdings: &mut Holdings) -> Result<EnrichmentSummary> {
        self.enrich_with_progress(holdings, |_| {}).await
    }

    /// Enrich every holding in collection order, calling `on_progress` after
    /// each holding that was processed successfully.
    ///
    /// The cash pseudo-holding is priced at 1 without asking the provider.
    /// A failing symbol either aborts the pass or is skipped, depending on
    /// the [`FailurePolicy`]; a skipped holding keeps its previous values.
    pub async fn enrich_with_progress<F>(
        &self,
        holdings: &mut Holdings,
        mut on_progress: F,
    ) -> Result<EnrichmentSummary>
    where
        F: FnMut(&HoldingRecord),
    {
        info!(
            "Enriching {} holdings from {}",
            holdings.len(),
            self.provider.id()
        );
        let mut summary = EnrichmentSummary::default();

        for record in holdings.iter_mut() {
            if record.is_cash() {
                record.mark_as_cash();
            } else {
                match self.enrich_record(record).await {
                    Ok(enriched) => *record = enriched,
                    Err(source) if self.policy == FailurePolicy::Skip => {
                        warn!("Skipping enrichment for {}: {}", record.symbol, source);
                        summary.skipped.push(SkippedSymbol {
                            symbol: record.symbol.clone(),
                            reason: source.to_string(),
                        });
                        continue;
                    }
                    Err(source) => return Err(Error::enrichment(record.symbol.as_str(), source)),
                }
            }

            info!("{} {}", record.symbol, record.quote);
            summary.enriched.push(record.symbol.clone());
            on_progress(&*record);
        }

        Ok(summary)
    }

    /// Build the enriched copy of one record. Nothing is written back unless
    /// both calls and the merge succeed.
    async fn enrich_record(
        &self,
        record: &HoldingRecord,
    ) -> std::result::Result<HoldingRecord, EnrichmentError> {
        let mut enriched = record.clone();

        let quote = self.provider.get_latest_close(&record.symbol).await?;
        enriched.quote = quote.close;

        let bundle = self.provider.get_info(&record.symbol).await?;
        let merged = merge_info(&mut enriched, &bundle)?;
        debug!(
            "Merged {} of {} info fields for {}",
            merged,
            bundle.len(),
            record.symbol
        );

        Ok(enriched)
    }
}
