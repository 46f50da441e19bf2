// src/engine/samples.rs
// ============================================================================
// Synthetic opportunity table. Rows are illustrative only: they are produced
// from a seeded sine hash and are NOT run through the estimator. A background
// task publishes a fresh immutable batch on a fixed interval.
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

pub const SAMPLE_DEXES: [&str; 5] = ["Uniswap v3", "SushiSwap", "Curve", "Balancer", "PancakeSwap"];
pub const SAMPLE_PAIRS: [&str; 5] = ["ETH/USDC", "ETH/USDT", "BTC/USDC", "SOL/USDC", "ARB/ETH"];

pub const DISCLAIMER: &str = "Values are illustrative, not live market data. \
Always validate on-chain quotes directly on each exchange before trading.";

const CANDIDATES: u32 = 6;
const MAX_ROWS: usize = 5;
const ROUGH_FEE_FRACTION: f64 = 0.003 * 2.0; // 30 bps each side
const ROUGH_SLIP_FRACTION: f64 = 0.002 * 2.0;

/// Deterministic value in [0, 1) for a seed.
pub fn random_seeded(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    x - x.floor()
}

fn pick<'a>(items: &[&'a str], seed: f64) -> &'a str {
    let idx = (random_seeded(seed) * items.len() as f64).floor() as usize;
    items[idx.min(items.len() - 1)]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    pub id: String,
    pub dex_a: String,
    pub dex_b: String,
    pub pair: String,
    pub price_a: f64,
    pub price_b: f64,
    pub spread_pct: f64,
    pub net_pct: f64, // rough: fixed fee + slippage haircut, no gas
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleBatch {
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<SampleRow>,
}

impl SampleBatch {
    pub fn generate(seed: u64, generated_at: DateTime<Utc>) -> Self {
        let s = seed as f64;
        let mut rows = Vec::with_capacity(CANDIDATES as usize);

        for i in 0..CANDIDATES {
            let fi = f64::from(i);
            let dex_a = pick(&SAMPLE_DEXES, s + fi);
            let dex_b = pick(&SAMPLE_DEXES, s + fi + 1.0);
            let pair = pick(&SAMPLE_PAIRS, s + fi + 2.0);
            if dex_a == dex_b {
                continue;
            }

            let base = 1000.0 + (seed % 1000) as f64 * 0.001 + fi * 3.0;
            let spread = random_seeded(s + fi + 3.0) * 0.7 + 0.05; // 0.05% - 0.75%
            let net = spread / 100.0 - ROUGH_FEE_FRACTION - ROUGH_SLIP_FRACTION;

            rows.push(SampleRow {
                id: format!("{}-{}", i, seed),
                dex_a: dex_a.to_string(),
                dex_b: dex_b.to_string(),
                pair: pair.to_string(),
                price_a: base,
                price_b: base * (1.0 + spread / 100.0),
                spread_pct: spread,
                net_pct: net * 100.0,
            });
        }

        Self { seed, generated_at, rows }
    }

    /// Rows to show for the selected pair: matching rows plus a seeded
    /// selection of the rest, best net first, at most five.
    pub fn for_pair(&self, selected_pair: &str) -> Vec<SampleRow> {
        let s = self.seed as f64;
        let mut rows: Vec<SampleRow> = self
            .rows
            .iter()
            .filter(|r| r.pair == selected_pair || random_seeded(s + r.id.len() as f64) > 0.5)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.net_pct.total_cmp(&a.net_pct));
        rows.truncate(MAX_ROWS);
        rows
    }
}

/// Latest published batch, shared with request handlers.
#[derive(Clone)]
pub struct SampleBoard {
    current: Arc<RwLock<Arc<SampleBatch>>>,
}

impl SampleBoard {
    pub fn new(initial: SampleBatch) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    pub async fn current(&self) -> Arc<SampleBatch> {
        self.current.read().await.clone()
    }

    pub async fn publish(&self, batch: SampleBatch) {
        *self.current.write().await = Arc::new(batch);
    }

    /// Replace the batch every `every`, seeded from the wall clock.
    /// Runs until the runtime shuts down.
    pub async fn run_refresher(self, every: Duration) {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        log::info!("Sample refresher started ({}s interval)", every.as_secs());

        loop {
            ticker.tick().await;
            let batch = SampleBatch::generate(clock_seed(), Utc::now());
            log::debug!("Publishing sample batch seed={} rows={}", batch.seed, batch.rows.len());
            self.publish(batch).await;
        }
    }
}

/// Milliseconds since the UNIX epoch.
pub fn clock_seed() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
