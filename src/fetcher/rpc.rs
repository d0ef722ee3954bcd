//! JSON-RPC game fetcher
//!
//! Talks to a game-ledger indexer over HTTP JSON-RPC 2.0. Two methods are
//! used: `getGames` (records for a set of ids, existing ids only) and
//! `getStats` (aggregate counters, including the highest game id).

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::domain::{AuthorityKey, GameRecord, LedgerStats};
use crate::fetcher::{GameFetcher, TransportError};

#[derive(Clone)]
pub struct RpcFetcher {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Serialize)]
struct GetGamesParams<'a> {
    authority: &'a str,
    ids: &'a [u64],
}

#[derive(Serialize)]
struct GetStatsParams<'a> {
    authority: &'a str,
}

impl RpcFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn call<P, T>(&self, method: &str, params: P) -> Result<T, TransportError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body: RpcResponse<T> = response.json().await?;
        if let Some(err) = body.error {
            return Err(TransportError::Rejected {
                code: err.code,
                message: err.message,
            });
        }
        body.result
            .ok_or_else(|| TransportError::Malformed(format!("{method}: missing result field")))
    }
}

impl GameFetcher for RpcFetcher {
    async fn fetch_games(
        &self,
        ids: &[u64],
        authority: &AuthorityKey,
    ) -> Result<Vec<GameRecord>, TransportError> {
        let params = GetGamesParams {
            authority: authority.as_str(),
            ids,
        };
        let games: Vec<GameRecord> = self.call("getGames", params).await?;
        log::debug!("getGames returned {} of {} requested ids", games.len(), ids.len());
        Ok(games)
    }

    async fn fetch_stats(&self, authority: &AuthorityKey) -> Result<LedgerStats, TransportError> {
        let params = GetStatsParams {
            authority: authority.as_str(),
        };
        self.call("getStats", params).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_response_with_result() {
        let json = r#"{"jsonrpc":"2.0","id":1,"result":{"total_games":25}}"#;
        let response: RpcResponse<LedgerStats> = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.result, Some(LedgerStats { total_games: 25 }));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_response_with_error_object() {
        let json = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"no such method"}}"#;
        let response: RpcResponse<LedgerStats> = serde_json::from_str(json).expect("deserialize");
        assert!(response.result.is_none());
        let error = response.error.expect("error object");
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "no such method");
    }

    #[test]
    fn test_request_wire_shape() {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "getGames",
            params: GetGamesParams {
                authority: "a1b2",
                ids: &[25, 24],
            },
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["method"], "getGames");
        assert_eq!(json["params"]["authority"], "a1b2");
        assert_eq!(json["params"]["ids"][0], 25);
    }
}
