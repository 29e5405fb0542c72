//! Client for the admin operations surface.

use crate::http::{coerce_list, HttpClient};
use crate::ApiError;
use serde_json::{json, Value};
use tracing::debug;
use walletdash_core::{AuthResponse, DashboardOverview, Page, Transaction, Withdrawal};

/// Typed client for the admin endpoints. Admin sessions carry their own
/// token, separate from any user session.
#[derive(Debug, Clone)]
pub struct AdminApi {
    client: HttpClient,
}

impl AdminApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(base_url),
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut api = Self::new(base_url);
        api.client.set_token(token);
        api
    }

    pub fn token(&self) -> Option<&str> {
        self.client.token()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self
            .client
            .post_json(
                "/api/auth/login",
                Some(json!({ "username": username, "password": password })),
            )
            .await?;
        self.client.set_token(&auth.token);
        debug!(username, "admin logged in");
        Ok(auth)
    }

    // Dashboard

    pub async fn dashboard_overview(&self) -> Result<DashboardOverview, ApiError> {
        self.client.get_json("/api/admin/dashboard/overview").await
    }

    pub async fn withdrawals_management(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<Withdrawal>, ApiError> {
        self.client
            .get_json(&format!(
                "/api/admin/dashboard/withdrawals?page={page}&size={size}"
            ))
            .await
    }

    // Deposit scanner controls

    pub async fn scan_address(
        &self,
        address: &str,
        from_block: Option<u64>,
        to_block: Option<u64>,
    ) -> Result<Value, ApiError> {
        let mut query = Vec::new();
        if let Some(from) = from_block {
            query.push(format!("fromBlock={from}"));
        }
        if let Some(to) = to_block {
            query.push(format!("toBlock={to}"));
        }
        let suffix = if query.is_empty() {
            String::new()
        } else {
            format!("?{}", query.join("&"))
        };
        self.client
            .post(&format!("/api/admin/deposits/scan/address/{address}{suffix}"), None)
            .await
    }

    pub async fn scan_block_range(&self, from_block: u64, to_block: u64) -> Result<Value, ApiError> {
        self.client
            .post(
                &format!("/api/admin/deposits/scan/blocks?fromBlock={from_block}&toBlock={to_block}"),
                None,
            )
            .await
    }

    pub async fn stop_deposit_scanning(&self) -> Result<Value, ApiError> {
        self.client.post("/api/admin/deposits/scan/stop", None).await
    }

    pub async fn reset_scan_position(&self) -> Result<Value, ApiError> {
        self.client
            .post("/api/admin/dashboard/deposit/scan/reset", None)
            .await
    }

    // Sweeps

    pub async fn sweep_all_deposits(&self) -> Result<Value, ApiError> {
        self.client.post("/api/admin/deposits/sweep/all", None).await
    }

    pub async fn sweep_address(&self, address: &str) -> Result<Value, ApiError> {
        self.client
            .post(&format!("/api/admin/deposits/sweep/address/{address}"), None)
            .await
    }

    // Master wallet

    pub async fn master_balance(&self) -> Result<Value, ApiError> {
        self.client.get("/api/admin/master/balance").await
    }

    // Deposits

    pub async fn recent_deposits(&self, limit: u32) -> Result<Vec<Transaction>, ApiError> {
        let value = self
            .client
            .get(&format!("/api/admin/deposits/recent?limit={limit}"))
            .await?;
        coerce_list(value)
    }

    pub async fn pending_deposits(&self, limit: u32) -> Result<Vec<Transaction>, ApiError> {
        let value = self
            .client
            .get(&format!("/api/admin/deposits/pending?limit={limit}"))
            .await?;
        coerce_list(value)
    }

    // Withdrawal queue management

    pub async fn recent_withdrawals(&self, limit: u32) -> Result<Vec<Withdrawal>, ApiError> {
        let value = self
            .client
            .get(&format!("/api/admin/withdrawals/recent?limit={limit}"))
            .await?;
        coerce_list(value)
    }

    pub async fn failed_withdrawals(&self, limit: u32) -> Result<Vec<Withdrawal>, ApiError> {
        let value = self
            .client
            .get(&format!("/api/admin/withdrawals/failed?limit={limit}"))
            .await?;
        coerce_list(value)
    }

    pub async fn retry_withdrawal(&self, id: &str) -> Result<Value, ApiError> {
        self.client
            .post(&format!("/api/admin/withdrawals/retry/{id}"), None)
            .await
    }

    pub async fn retry_failed_withdrawals(&self) -> Result<Value, ApiError> {
        self.client
            .post("/api/admin/withdrawals/retry-failed", None)
            .await
    }

    pub async fn emergency_stop_withdrawals(&self) -> Result<Value, ApiError> {
        self.client
            .post("/api/admin/withdrawals/emergency-stop", None)
            .await
    }

    pub async fn resume_withdrawals(&self) -> Result<Value, ApiError> {
        self.client.post("/api/admin/withdrawals/resume", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token() {
        let api = AdminApi::with_token("http://localhost:8080", "admin-jwt");
        assert_eq!(api.token(), Some("admin-jwt"));
    }
}
