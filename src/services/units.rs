//! First-run unit roster download.
use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::models::Unit;

/// Roster entry as published remotely. Older feeds carry the code under
/// `unit`, newer ones under `unit_code` or `unitCode`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteUnit {
    #[serde(default, alias = "unit_code", alias = "code")]
    unit_code: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default, alias = "displayName")]
    name: Option<String>,
    #[serde(default, rename = "type")]
    unit_type: Option<String>,
    #[serde(default)]
    cost_per_operational_hour: Option<Decimal>,
}

impl RemoteUnit {
    fn into_unit(self) -> Option<Unit> {
        let code = self
            .unit_code
            .or(self.unit.clone())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())?;
        let display_name = self
            .name
            .or(self.unit)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| code.clone());

        Some(Unit {
            code,
            display_name,
            unit_type: self.unit_type.unwrap_or_default().trim().to_string(),
            cost_per_operational_hour: self.cost_per_operational_hour.unwrap_or(Decimal::ZERO),
        })
    }
}

/// Built-in roster used when the remote one cannot be read.
pub fn default_units() -> Vec<Unit> {
    vec![
        Unit::new("BSS-75", "DUMP TRUCK", dec!(100000)),
        Unit::new("EX7-43", "A2B", dec!(150000)),
        Unit::new("LT-01", "SUPPORT", dec!(50000)),
    ]
}

pub struct UnitRosterClient {
    client: Client,
    url: String,
}

impl UnitRosterClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::NetworkError(format!("failed to build http client: {}", e)))?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads the roster. Non-success statuses and bodies that are not a
    /// JSON list are errors; list entries without a code are skipped.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<Vec<Unit>, ServiceError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::NetworkError(format!(
                "unit roster request failed with status {}",
                status
            )));
        }

        let body: Value = response.json().await?;
        let Value::Array(entries) = body else {
            return Err(ServiceError::NetworkError(
                "unit roster response is not a list".to_string(),
            ));
        };

        let units: Vec<Unit> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<RemoteUnit>(entry).ok())
            .filter_map(RemoteUnit::into_unit)
            .collect();
        info!(count = units.len(), "unit roster downloaded");
        Ok(units)
    }

    /// Downloads the roster, falling back to [`default_units`] on any failure.
    pub async fn fetch_or_default(&self) -> Vec<Unit> {
        match self.fetch().await {
            Ok(units) => units,
            Err(e) => {
                warn!(url = %self.url, "using built-in unit roster: {}", e);
                default_units()
            }
        }
    }
}
