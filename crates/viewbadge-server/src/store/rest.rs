//! PostgREST client for the counter table.
//!
//! Only two table operations are used: an unfiltered `limit=1` select and an
//! update filtered by primary key. The optional atomic path calls a SQL
//! function through `/rpc` (see [`increment_function_sql`]).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use viewbadge_core::error::{Result, ViewBadgeError};
use viewbadge_core::{CounterRow, CounterStore, RowId};

use crate::config::{IdColumnType, ValidStoreSettings};

#[derive(Debug, Clone)]
pub struct RestCounterStore {
    client: Client,
    table_url: String,
    rpc_url: String,
}

impl RestCounterStore {
    pub fn new(settings: &ValidStoreSettings, rpc_function: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&settings.key)
            .map_err(|_| ViewBadgeError::Configuration("access key is not a valid header".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.key))
            .map_err(|_| ViewBadgeError::Configuration("access key is not a valid header".into()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ViewBadgeError::Internal(format!("http client build failed: {e}")))?;

        let base = settings.url.trim_end_matches('/');
        Ok(Self {
            client,
            table_url: format!("{base}/rest/v1/{}", settings.table),
            rpc_url: format!("{base}/rest/v1/rpc/{rpc_function}"),
        })
    }
}

/// Turn a non-2xx response into an error message carrying status and body.
async fn check(resp: Response) -> std::result::Result<Response, String> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(format!("status {status}: {body}"))
}

async fn decode<T: DeserializeOwned>(resp: Response) -> std::result::Result<T, String> {
    resp.json::<T>()
        .await
        .map_err(|e| format!("invalid response body: {e}"))
}

/// `/rpc` returns a set for `RETURNS TABLE`, but a scalar-row function
/// comes back as a bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RpcRows {
    Many(Vec<CounterRow>),
    One(CounterRow),
}

#[async_trait]
impl CounterStore for RestCounterStore {
    async fn fetch_first(&self) -> Result<Option<CounterRow>> {
        let resp = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| ViewBadgeError::StoreFetch(e.to_string()))?;
        let resp = check(resp).await.map_err(ViewBadgeError::StoreFetch)?;
        let rows: Vec<CounterRow> = decode(resp).await.map_err(ViewBadgeError::StoreFetch)?;
        Ok(rows.into_iter().next())
    }

    async fn update_count(&self, id: &RowId, count: i64) -> Result<()> {
        let resp = self
            .client
            .patch(&self.table_url)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&json!({ "count": count }))
            .send()
            .await
            .map_err(|e| ViewBadgeError::StoreUpdate(e.to_string()))?;
        check(resp).await.map_err(ViewBadgeError::StoreUpdate)?;
        Ok(())
    }

    async fn increment_atomic(&self) -> Result<Option<CounterRow>> {
        let resp = self
            .client
            .post(&self.rpc_url)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| ViewBadgeError::StoreUpdate(e.to_string()))?;
        let resp = check(resp).await.map_err(ViewBadgeError::StoreUpdate)?;
        let rows: RpcRows = decode(resp).await.map_err(ViewBadgeError::StoreUpdate)?;
        Ok(match rows {
            RpcRows::Many(rows) => rows.into_iter().next(),
            RpcRows::One(row) => Some(row),
        })
    }
}

/// DDL for the store-side function used by `atomic` mode.
///
/// `id_type` must match the table's `id` column; `count` is assumed to be an
/// `integer` column.
pub fn increment_function_sql(table: &str, function: &str, id_type: IdColumnType) -> String {
    let id_sql = id_type.as_sql();
    format!(
        r#"CREATE OR REPLACE FUNCTION {function}()
RETURNS TABLE (id {id_sql}, count integer)
LANGUAGE plpgsql
AS $$
DECLARE
  result record;
BEGIN
  UPDATE {table}
  SET count = COALESCE({table}.count, 0) + 1
  RETURNING {table}.id, {table}.count INTO result;

  RETURN QUERY SELECT result.id, result.count;
END;
$$;
"#
    )
}
