//! Client for the authenticated user surface.

use crate::http::{coerce_list, HttpClient};
use crate::ApiError;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;
use walletdash_core::{
    AuthResponse, DepositInfo, Page, PointsBalance, PointsTransaction, RegisterRequest,
    Transaction, TransactionSummary, UserProfile, WalletInfo, Withdrawal, WithdrawalLimits,
};

/// Peer-to-peer points transfer request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPointsRequest {
    pub to_user_id: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub password: String,
}

/// Second step of the withdrawal flow: confirm a pending request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalConfirmRequest {
    pub withdrawal_id: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_factor_code: Option<String>,
}

/// Typed client for the user-facing endpoints.
#[derive(Debug, Clone)]
pub struct UserApi {
    client: HttpClient,
}

impl UserApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(base_url),
        }
    }

    /// Resume an existing session with a previously issued token.
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut api = Self::new(base_url);
        api.client.set_token(token);
        api
    }

    pub fn token(&self) -> Option<&str> {
        self.client.token()
    }

    // Authentication

    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
        self.client
            .post("/api/auth/register", Some(serde_json::to_value(request)?))
            .await
    }

    /// Log in and keep the issued bearer token for subsequent calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self
            .client
            .post_json(
                "/api/auth/login",
                Some(json!({ "username": username, "password": password })),
            )
            .await?;
        self.client.set_token(&auth.token);
        debug!(username, "logged in");
        Ok(auth)
    }

    /// Log out. The local token is dropped even if the backend call fails.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let result = self.client.post("/api/auth/logout", None).await;
        self.client.clear_token();
        result.map(|_| ())
    }

    pub async fn forgot_password(&self, email: &str) -> Result<Value, ApiError> {
        self.client
            .post("/api/auth/forgot-password", Some(json!({ "email": email })))
            .await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<Value, ApiError> {
        self.client
            .post(
                "/api/auth/reset-password",
                Some(json!({ "token": token, "newPassword": new_password })),
            )
            .await
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.client.get_json("/api/auth/profile").await
    }

    pub async fn update_profile(&self, changes: Value) -> Result<UserProfile, ApiError> {
        let value = self.client.put("/api/auth/profile", Some(changes)).await?;
        Ok(serde_json::from_value(value)?)
    }

    // Wallet

    pub async fn wallet(&self) -> Result<WalletInfo, ApiError> {
        self.client.get_json("/api/auth/wallet").await
    }

    pub async fn deposit_address(&self) -> Result<DepositInfo, ApiError> {
        self.client.get_json("/api/auth/deposit-address").await
    }

    // Points

    pub async fn points_balance(&self) -> Result<PointsBalance, ApiError> {
        self.client.get_json("/api/points/balance").await
    }

    pub async fn points_history(&self, limit: u32) -> Result<Vec<PointsTransaction>, ApiError> {
        let value = self
            .client
            .get(&format!("/api/points/history?limit={limit}"))
            .await?;
        coerce_list(value)
    }

    pub async fn p2p_history(&self) -> Result<Vec<PointsTransaction>, ApiError> {
        let value = self.client.get("/api/points/p2p-history").await?;
        coerce_list(value)
    }

    pub async fn transfer_points(&self, request: &TransferPointsRequest) -> Result<Value, ApiError> {
        self.client
            .post("/api/points/transfer", Some(serde_json::to_value(request)?))
            .await
    }

    pub async fn user_stats(&self) -> Result<Value, ApiError> {
        self.client.get("/api/points/stats").await
    }

    // Deposits

    pub async fn deposit_history(&self, page: u32, size: u32) -> Result<Page<Transaction>, ApiError> {
        self.client
            .get_json(&format!(
                "/api/deposits/history?page={page}&size={size}&sortBy=createdAt&sortDir=desc"
            ))
            .await
    }

    pub async fn pending_deposits(&self) -> Result<Vec<Transaction>, ApiError> {
        let value = self.client.get("/api/deposits/pending").await?;
        coerce_list(value)
    }

    pub async fn deposit_status(&self, tx_hash: &str) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/api/deposits/status/{tx_hash}"))
            .await
    }

    // Withdrawals

    /// First step: create a pending withdrawal awaiting confirmation.
    pub async fn request_withdrawal(&self, amount: f64, to_address: &str) -> Result<Withdrawal, ApiError> {
        self.client
            .post_json(
                "/api/withdrawal/request",
                Some(json!({ "amount": amount, "toAddress": to_address })),
            )
            .await
    }

    pub async fn confirm_withdrawal(
        &self,
        request: &WithdrawalConfirmRequest,
    ) -> Result<Withdrawal, ApiError> {
        self.client
            .post_json("/api/withdrawal/confirm", Some(serde_json::to_value(request)?))
            .await
    }

    pub async fn withdrawal_history(&self, page: u32, size: u32) -> Result<Page<Withdrawal>, ApiError> {
        self.client
            .get_json(&format!("/api/withdrawal/history?page={page}&size={size}"))
            .await
    }

    pub async fn withdrawal_status(&self, id: &str) -> Result<Withdrawal, ApiError> {
        self.client
            .get_json(&format!("/api/withdrawal/status/{id}"))
            .await
    }

    pub async fn withdrawal_limits(&self) -> Result<WithdrawalLimits, ApiError> {
        self.client.get_json("/api/withdrawal/limits").await
    }

    pub async fn cancel_withdrawal(&self, id: &str) -> Result<Value, ApiError> {
        self.client
            .post(&format!("/api/withdrawal/cancel/{id}"), None)
            .await
    }

    // Transactions

    pub async fn transactions(&self, page: u32, size: u32) -> Result<Page<Transaction>, ApiError> {
        self.client
            .get_json(&format!(
                "/api/transactions?page={page}&size={size}&sortBy=createdAt&sortDir=desc"
            ))
            .await
    }

    pub async fn transaction_details(&self, id: &str) -> Result<Transaction, ApiError> {
        self.client.get_json(&format!("/api/transactions/{id}")).await
    }

    pub async fn transaction_summary(&self, days: u32) -> Result<TransactionSummary, ApiError> {
        self.client
            .get_json(&format!("/api/transactions/summary?days={days}"))
            .await
    }

    // Health

    pub async fn health(&self) -> Result<Value, ApiError> {
        self.client.get("/api/test/health").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_request_serializes_camel_case() {
        let request = TransferPointsRequest {
            to_user_id: "u-2".into(),
            amount: 25.0,
            description: None,
            password: "secret".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["toUserId"], "u-2");
        assert_eq!(value["amount"], 25.0);
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_confirm_request_serializes_camel_case() {
        let request = WithdrawalConfirmRequest {
            withdrawal_id: "42".into(),
            password: "secret".into(),
            two_factor_code: Some("123456".into()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["withdrawalId"], "42");
        assert_eq!(value["twoFactorCode"], "123456");
    }

    #[test]
    fn test_with_token_resumes_session() {
        let api = UserApi::with_token("http://localhost:8080", "jwt");
        assert_eq!(api.token(), Some("jwt"));
    }
}
