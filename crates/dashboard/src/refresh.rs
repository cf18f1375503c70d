//! The periodic fetch-and-normalize cycle.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;

use walletstats_common::error::AppError;
use walletstats_common::logos::ProtocolLogos;
use walletstats_common::types::DashboardView;

use crate::client::StatsProvider;
use crate::normalize::{self, NormalizeContext};
use crate::render;

/// Drives the dashboard: runs a fetch cycle on startup and then on a fixed
/// interval, replacing the shared view state slice by slice.
///
/// The ticker gates on cycle completion (missed ticks are skipped), so two
/// cycles can never overlap and every state write belongs to the most
/// recent cycle.
pub struct DashboardRefresher {
    provider: Arc<dyn StatsProvider>,
    logos: ProtocolLogos,
    tracked_chain: String,
    interval: Duration,
    state: Arc<RwLock<DashboardView>>,
}

impl DashboardRefresher {
    pub fn new(
        provider: Arc<dyn StatsProvider>,
        logos: ProtocolLogos,
        tracked_chain: String,
        interval_secs: u64,
    ) -> Self {
        Self {
            provider,
            logos,
            tracked_chain,
            interval: Duration::from_secs(interval_secs),
            state: Arc::new(RwLock::new(DashboardView::default())),
        }
    }

    /// Handle to the shared view state.
    pub fn state(&self) -> Arc<RwLock<DashboardView>> {
        Arc::clone(&self.state)
    }

    /// Run the refresh loop until the task is cancelled. The first cycle
    /// fires immediately; the rendered dashboard is printed after every
    /// cycle, failed ones included.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            chain = %self.tracked_chain,
            "Dashboard refresh loop started"
        );

        loop {
            ticker.tick().await;

            match self.run_cycle().await {
                Ok(()) => tracing::info!("Refresh cycle complete"),
                Err(e) => {
                    tracing::warn!(error = %e, "Refresh cycle failed");
                    self.state.write().await.error = Some(e.to_string());
                }
            }

            let view = self.state.read().await;
            println!("{}", render::render(&view, Utc::now()));
        }
    }

    /// One fetch cycle. Steps run sequentially; the first failure aborts
    /// the remainder and leaves every previously written slice in place.
    pub async fn run_cycle(&self) -> Result<(), AppError> {
        tracing::debug!("Refresh cycle starting");

        // 1. Total balance. A failure here aborts before anything at all
        //    is written, so prior data survives untouched.
        let balance_payload = self.provider.total_balance().await?;
        let balance = normalize::normalize_balance(&balance_payload);
        {
            let mut view = self.state.write().await;
            view.balance = balance;
            view.error = None;
            view.updated_at = Some(Utc::now());
        }

        // 2. Transaction history, with the batch dictionaries resolved.
        let history_payload = self.provider.history_list().await?;
        let ctx = NormalizeContext {
            tracked_chain: &self.tracked_chain,
            logos: &self.logos,
        };
        let transactions = normalize::normalize_history(&history_payload, &ctx)?;
        self.state.write().await.transactions = transactions;

        // 3. Token holdings.
        let tokens_payload = self.provider.token_list().await?;
        self.state.write().await.tokens = normalize::normalize_tokens(&tokens_payload);

        // 4. Protocol positions.
        let protocols_payload = self.provider.complex_protocol_list().await?;
        let protocols = normalize::normalize_protocols(&protocols_payload)?;
        self.state.write().await.protocols = protocols;

        Ok(())
    }
}
