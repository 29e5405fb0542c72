//! Wallet, deposit, withdrawal, and transaction types.
//!
//! The backend is loose about response shapes: the same value can come back
//! under different names depending on the endpoint (`pointsBalance` vs
//! `points`, `content` vs `items` for paged lists). Serde aliases absorb the
//! variants here so calling code sees one field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wallet summary for the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    #[serde(default, alias = "walletAddress")]
    pub address: Option<String>,
    /// USDT balance as a decimal string, exactly as the backend renders it.
    #[serde(default, alias = "usdt", alias = "balance")]
    pub usdt_balance: Option<String>,
    #[serde(default, alias = "trx")]
    pub trx_balance: Option<String>,
    #[serde(default, alias = "points")]
    pub points_balance: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Deposit address descriptor shown to the user (address + QR payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositInfo {
    pub address: String,
    #[serde(default, alias = "qr")]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub token_contract: Option<String>,
}

/// On-chain transaction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Sweep,
    Transfer,
}

/// Settlement status of a transaction or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Confirmed,
    Completed,
    Failed,
    Cancelled,
}

/// A ledger transaction as listed in history tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub from_address: Option<String>,
    #[serde(default)]
    pub to_address: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default, alias = "type")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default, alias = "time", alias = "date")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub block_number: Option<u64>,
}

/// Spring-style page envelope. Different endpoints name the list field
/// differently; all variants land in `items`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(
        default = "Vec::new",
        alias = "content",
        alias = "records",
        alias = "transactions",
        alias = "withdrawals",
        alias = "deposits"
    )]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default, alias = "number")]
    pub current_page: Option<u32>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_elements: None,
            total_pages: None,
            current_page: None,
        }
    }
}

/// A withdrawal request as tracked by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub to_address: Option<String>,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Per-user withdrawal limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalLimits {
    #[serde(default)]
    pub min_amount: Option<String>,
    #[serde(default)]
    pub max_amount: Option<String>,
    #[serde(default)]
    pub daily_limit: Option<String>,
    #[serde(default)]
    pub daily_used: Option<String>,
}

/// Current points balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBalance {
    #[serde(alias = "points", alias = "pointsBalance")]
    pub balance: f64,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// A points ledger entry (peer transfer, bonus, deduction).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsTransaction {
    pub id: String,
    #[serde(default)]
    pub from_user: Option<String>,
    #[serde(default)]
    pub to_user: Option<String>,
    pub amount: f64,
    #[serde(default, alias = "type")]
    pub transaction_type: Option<String>,
    #[serde(default, alias = "description")]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate transaction volume over a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub total_volume: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wallet_info_absorbs_alternate_points_field() {
        let a: WalletInfo =
            serde_json::from_str(r#"{"address": "T123", "pointsBalance": 120.0}"#).unwrap();
        let b: WalletInfo = serde_json::from_str(r#"{"address": "T123", "points": 120.0}"#).unwrap();
        assert_eq!(a.points_balance, Some(120.0));
        assert_eq!(b.points_balance, Some(120.0));
    }

    #[test]
    fn test_page_absorbs_alternate_list_fields() {
        let content: Page<Withdrawal> = serde_json::from_str(
            r#"{"content": [{"id": "w-1"}], "totalElements": 1, "totalPages": 1}"#,
        )
        .unwrap();
        assert_eq!(content.items.len(), 1);
        assert_eq!(content.total_elements, Some(1));

        let items: Page<Withdrawal> = serde_json::from_str(r#"{"items": [{"id": "w-1"}]}"#).unwrap();
        assert_eq!(items.items.len(), 1);

        let empty: Page<Withdrawal> = serde_json::from_str(r#"{}"#).unwrap();
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_transaction_parses_history_row() {
        let json = r#"{
            "id": "t-1",
            "txHash": "0xdef",
            "amount": "25.50",
            "transactionType": "DEPOSIT",
            "status": "CONFIRMED",
            "createdAt": "2024-01-01T00:00:00Z",
            "blockNumber": 12345
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_type, Some(TransactionType::Deposit));
        assert_eq!(tx.status, Some(TransactionStatus::Confirmed));
        assert_eq!(tx.block_number, Some(12345));
    }
}
