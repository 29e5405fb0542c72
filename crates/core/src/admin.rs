//! Admin dashboard aggregates: wallet pool, master wallet, queue stats.

use serde::{Deserialize, Serialize};

/// Everything the admin overview page renders, in one payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    #[serde(default)]
    pub master_wallet: Option<MasterWalletStatus>,
    #[serde(default)]
    pub wallet_pool: Option<WalletPoolStats>,
    #[serde(default)]
    pub withdrawals: Option<WithdrawalStats>,
    #[serde(default)]
    pub withdrawal_queue: Option<QueueStats>,
    #[serde(default)]
    pub deposit_scanner: Option<ScannerStats>,
    #[serde(default)]
    pub system_health: Option<SystemHealth>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Master (hot) wallet balances and low-balance flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterWalletStatus {
    pub address: String,
    #[serde(default)]
    pub trx_balance: Option<String>,
    #[serde(default)]
    pub usdt_balance: Option<String>,
    #[serde(default)]
    pub is_low_trx_balance: bool,
    #[serde(default)]
    pub is_low_usdt_balance: bool,
}

/// Child deposit-wallet pool utilization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletPoolStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub free: u64,
    #[serde(default)]
    pub assigned: u64,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub utilization_rate: f64,
}

/// Withdrawal processing totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalStats {
    #[serde(default)]
    pub total_processed: u64,
    #[serde(default)]
    pub pending_count: u64,
    #[serde(default)]
    pub failed_count: u64,
    #[serde(default)]
    pub avg_processing_time: f64,
    #[serde(default)]
    pub total_volume: Option<String>,
}

/// Withdrawal queue depth and throughput.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    #[serde(default)]
    pub queue_size: u64,
    #[serde(default)]
    pub processing_rate: f64,
    #[serde(default)]
    pub average_wait_time: f64,
}

/// Deposit scanner progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerStats {
    #[serde(default)]
    pub last_scanned_block: u64,
    #[serde(default)]
    pub total_deposits_detected: u64,
    #[serde(default)]
    pub scanning_rate: f64,
    #[serde(default)]
    pub is_scanning: bool,
}

/// Overall backend health as reported by the monitoring endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub alerts: Vec<HealthAlert>,
}

/// A single health alert line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAlert {
    #[serde(default)]
    pub level: Option<String>,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}
