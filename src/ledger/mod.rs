//! Remote credit ledger client with a process-local cached balance.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SynthError};
use crate::identity::UserId;
use crate::services::http::{shared_client, status_to_error, trim_trailing_slash};
use crate::util::timeout::with_timeout;

/// Credits granted to a freshly created account.
pub const SIGNUP_BONUS: u32 = 5;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct AmountBody<'a> {
    uid: &'a str,
    amount: u32,
}

#[derive(Debug, Deserialize)]
struct LedgerResponseBody {
    success: bool,
    credits: Option<u32>,
    message: Option<String>,
}

/// Client for the authoritative remote credit ledger.
///
/// Holds the last balance the server reported. The cache is only ever set
/// from a successful server response — never computed locally by
/// subtraction — and a failed call leaves it unchanged, so admission
/// decisions always see a stale-but-defined value.
#[derive(Debug)]
pub struct CreditLedgerClient {
    base_url: String,
    timeout: Duration,
    cached: AtomicU32,
}

impl CreditLedgerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            cached: AtomicU32::new(0),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Last balance reported by the server (0 until the first fetch).
    pub fn cached_balance(&self) -> u32 {
        self.cached.load(Ordering::Acquire)
    }

    /// Fetch the authoritative balance and refresh the cache.
    pub async fn fetch_balance(&self, user: &UserId) -> Result<u32> {
        let url = format!(
            "{}/credits/fetch?uid={}",
            trim_trailing_slash(&self.base_url),
            user
        );
        let credits = with_timeout(self.timeout, async {
            let response = shared_client().get(url).send().await?;
            parse_ledger_response(response).await
        })
        .await?;

        self.cached.store(credits, Ordering::Release);
        debug!(credits, "fetched credit balance");
        Ok(credits)
    }

    /// Debit `amount` credits, caching the server's post-debit balance.
    ///
    /// Callers invoke this only after the metered unit of work has
    /// succeeded; a failure here leaves the cache unchanged and is settled
    /// by a later fetch, not a compensating transaction.
    pub async fn debit(&self, user: &UserId, amount: u32) -> Result<u32> {
        self.post_amount("credits/deduce", user, amount).await
    }

    /// Grant `amount` credits (e.g. [`SIGNUP_BONUS`]), caching the new balance.
    pub async fn grant(&self, user: &UserId, amount: u32) -> Result<u32> {
        self.post_amount("credits/save", user, amount).await
    }

    async fn post_amount(&self, endpoint: &str, user: &UserId, amount: u32) -> Result<u32> {
        let url = format!("{}/{}", trim_trailing_slash(&self.base_url), endpoint);
        let body = AmountBody {
            uid: user.as_str(),
            amount,
        };
        let credits = with_timeout(self.timeout, async {
            let response = shared_client().post(url).json(&body).send().await?;
            parse_ledger_response(response).await
        })
        .await?;

        self.cached.store(credits, Ordering::Release);
        debug!(endpoint, amount, credits, "ledger updated");
        Ok(credits)
    }
}

async fn parse_ledger_response(response: reqwest::Response) -> Result<u32> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    if !(200..300).contains(&status) {
        return Err(status_to_error(status, &body));
    }

    let parsed: LedgerResponseBody = serde_json::from_str(&body)?;
    if !parsed.success {
        return Err(SynthError::service(
            status,
            parsed
                .message
                .unwrap_or_else(|| "Ledger reported failure".to_string()),
        ));
    }
    parsed
        .credits
        .ok_or_else(|| SynthError::service(status, "Ledger response missing credits"))
}
