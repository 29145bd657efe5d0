// API client module: a small blocking HTTP client that posts GraphQL
// documents to the configured endpoint. Responses come back as raw
// `serde_json::Value`; nothing is validated against a schema.

use crate::config::Credentials;
use crate::error::{QueryError, Result};
use crate::query::GraphQLRequest;
use log::{debug, trace, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

/// Holds a reqwest blocking client, the endpoint, and the prebuilt
/// `Authorization` header for every call.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
    auth: HeaderValue,
}

impl ApiClient {
    /// Build a client for the given credentials. Fails if the key cannot
    /// be sent as a header value.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", credentials.api_key))
            .map_err(|_| QueryError::InvalidApiKey)?;
        auth.set_sensitive(true);
        let client = Client::builder().build().map_err(QueryError::Client)?;
        Ok(ApiClient {
            client,
            endpoint: credentials.endpoint.clone(),
            auth,
        })
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth.clone());
        headers
    }

    pub fn search_companies(&self, query: &str) -> Result<Value> {
        self.execute(&GraphQLRequest::search_companies(query))
    }

    pub fn get_company_info_by_id(&self, company_id: &str) -> Result<Value> {
        self.execute(&GraphQLRequest::company_by_id(company_id))
    }

    pub fn get_company_info_by_ticker(&self, exchange: &str, symbol: &str) -> Result<Value> {
        self.execute(&GraphQLRequest::company_by_ticker(exchange, symbol))
    }

    pub fn list_exchanges(&self) -> Result<Value> {
        self.execute(&GraphQLRequest::list_exchanges())
    }

    pub fn get_companies_by_exchange(&self, exchange: &str, limit: u32, offset: u32) -> Result<Value> {
        self.execute(&GraphQLRequest::companies_by_exchange(exchange, limit, offset))
    }

    /// POST one GraphQL body and decode whatever JSON comes back. A
    /// response carrying a GraphQL `errors` array is still returned as-is.
    pub fn execute(&self, request: &GraphQLRequest) -> Result<Value> {
        debug!("POST {}", self.endpoint);
        trace!("request body: {:?}", request);

        let res = self
            .client
            .post(&self.endpoint)
            .headers(self.auth_headers())
            .json(request)
            .send()
            .map_err(QueryError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            warn!("API responded with {}", status);
            let body = res.text().unwrap_or_default();
            return Err(QueryError::Status { status, body });
        }
        let body = res.text().map_err(QueryError::Transport)?;
        serde_json::from_str(&body).map_err(QueryError::InvalidJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{COMPANIES_BY_EXCHANGE, COMPANY_BY_TICKER, LIST_EXCHANGES, SEARCH_COMPANIES};
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&Credentials {
            api_key: "test-key".into(),
            endpoint: server.url("/graphql"),
        })
        .unwrap()
    }

    #[test]
    fn posts_query_and_variables_with_bearer_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/graphql")
                .header("authorization", "Bearer test-key")
                .header("content-type", "application/json")
                .json_body(json!({
                    "query": SEARCH_COMPANIES,
                    "variables": { "query": "acme" },
                }));
            then.status(200)
                .json_body(json!({ "data": { "searchCompanies": [] } }));
        });

        let result = client_for(&server).search_companies("acme").unwrap();

        mock.assert();
        assert_eq!(result, json!({ "data": { "searchCompanies": [] } }));
    }

    #[test]
    fn ticker_lookup_sends_exchange_and_symbol() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).json_body(json!({
                "query": COMPANY_BY_TICKER,
                "variables": { "exchange": "NASDAQ", "symbol": "AAPL" },
            }));
            then.status(200).json_body(json!({ "data": null }));
        });

        client_for(&server)
            .get_company_info_by_ticker("NASDAQ", "AAPL")
            .unwrap();
        mock.assert();
    }

    #[test]
    fn list_exchanges_sends_no_variables() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).json_body(json!({ "query": LIST_EXCHANGES }));
            then.status(200)
                .json_body(json!({ "data": { "exchanges": [{ "symbol": "NASDAQ" }] } }));
        });

        let result = client_for(&server).list_exchanges().unwrap();
        mock.assert();
        assert_eq!(result["data"]["exchanges"][0]["symbol"], json!("NASDAQ"));
    }

    #[test]
    fn limit_and_offset_go_out_as_integers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).json_body(json!({
                "query": COMPANIES_BY_EXCHANGE,
                "variables": { "exchange": "NYSE", "limit": 25, "offset": 50 },
            }));
            then.status(200).json_body(json!({ "data": { "companies": [] } }));
        });

        client_for(&server)
            .get_companies_by_exchange("NYSE", 25, 50)
            .unwrap();
        mock.assert();
    }

    #[test]
    fn graphql_errors_are_returned_verbatim() {
        let server = MockServer::start();
        let payload = json!({ "errors": [{ "message": "company not found" }], "data": null });
        let body = payload.clone();
        server.mock(move |when, then| {
            when.method(POST);
            then.status(200).json_body(body);
        });

        let result = client_for(&server).get_company_info_by_id("nope").unwrap();
        assert_eq!(result, payload);
    }

    #[test]
    fn non_success_status_keeps_the_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(401).body("invalid token");
        });

        match client_for(&server).list_exchanges() {
            Err(QueryError::Status { status, body }) => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(body, "invalid token");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn status_survives_an_empty_error_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(502);
        });

        match client_for(&server).search_companies("acme") {
            Err(QueryError::Status { status, body }) => {
                assert_eq!(status.as_u16(), 502);
                assert_eq!(body, "");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).body("<html>maintenance</html>");
        });

        let err = client_for(&server).list_exchanges().unwrap_err();
        assert!(matches!(err, QueryError::InvalidJson(_)), "{err:?}");
    }

    #[test]
    fn unreachable_endpoint_is_a_transport_error() {
        // Port 9 (discard) is not expected to accept connections in test environments.
        let client = ApiClient::new(&Credentials {
            api_key: "k".into(),
            endpoint: "http://127.0.0.1:9/graphql".into(),
        })
        .unwrap();
        let err = client.list_exchanges().unwrap_err();
        assert!(matches!(err, QueryError::Transport(_)), "{err:?}");
    }

    #[test]
    fn key_with_newline_is_rejected_up_front() {
        let err = ApiClient::new(&Credentials {
            api_key: "bad\nkey".into(),
            endpoint: "http://localhost/graphql".into(),
        })
        .err()
        .unwrap();
        assert!(matches!(err, QueryError::InvalidApiKey));
    }
}
