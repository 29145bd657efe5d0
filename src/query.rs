// The five canned operations and the GraphQL documents behind them.

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

pub const SEARCH_COMPANIES: &str = r#"query searchCompanies($query: String!) {
  searchCompanies(query: $query) {
    id
    name
    exchangeSymbol
    tickerSymbol
  }
}"#;

pub const COMPANY_BY_ID: &str = r#"query Query($id: ID!) {
  company(id: $id) {
    id
    name
    tickerSymbol
  }
}"#;

pub const COMPANY_BY_TICKER: &str = r#"query companyByExchangeAndTickerSymbol($exchange: String!, $symbol: String!) {
  companyByExchangeAndTickerSymbol(exchange: $exchange, tickerSymbol: $symbol) {
    id
    name
    exchangeSymbol
    tickerSymbol
  }
}"#;

pub const LIST_EXCHANGES: &str = r#"query {
  exchanges {
    symbol
  }
}"#;

pub const COMPANIES_BY_EXCHANGE: &str = r#"query companies($exchange: String!, $limit: Int!, $offset: Int!) {
  companies(exchange: $exchange, limit: $limit, offset: $offset) {
    id
    name
    tickerSymbol
  }
}"#;

/// One of the selectable actions, identified in the UI by its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SearchCompanies,
    CompanyById,
    CompanyByTicker,
    ListExchanges,
    CompaniesByExchange,
}

impl Operation {
    /// Selector order.
    pub const ALL: [Operation; 5] = [
        Operation::SearchCompanies,
        Operation::CompanyById,
        Operation::CompanyByTicker,
        Operation::ListExchanges,
        Operation::CompaniesByExchange,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Operation::SearchCompanies => "Search Companies",
            Operation::CompanyById => "Get Company Info by ID",
            Operation::CompanyByTicker => "Get Company Info by Ticker",
            Operation::ListExchanges => "List Exchanges",
            Operation::CompaniesByExchange => "Get Companies by Exchange",
        }
    }

    /// Exact label match; the selector only ever offers these strings.
    pub fn from_label(label: &str) -> Option<Operation> {
        Operation::ALL.into_iter().find(|op| op.label() == label)
    }

    /// List Exchanges is the only operation that needs no input at all.
    pub fn takes_parameters(self) -> bool {
        !matches!(self, Operation::ListExchanges)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// POST body sent to the endpoint. `variables` is left out entirely for
/// operations that take none.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GraphQLRequest {
    pub query: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl GraphQLRequest {
    pub fn search_companies(query: &str) -> Self {
        GraphQLRequest {
            query: SEARCH_COMPANIES,
            variables: Some(json!({ "query": query })),
        }
    }

    pub fn company_by_id(id: &str) -> Self {
        GraphQLRequest {
            query: COMPANY_BY_ID,
            variables: Some(json!({ "id": id })),
        }
    }

    pub fn company_by_ticker(exchange: &str, symbol: &str) -> Self {
        GraphQLRequest {
            query: COMPANY_BY_TICKER,
            variables: Some(json!({ "exchange": exchange, "symbol": symbol })),
        }
    }

    pub fn list_exchanges() -> Self {
        GraphQLRequest {
            query: LIST_EXCHANGES,
            variables: None,
        }
    }

    pub fn companies_by_exchange(exchange: &str, limit: u32, offset: u32) -> Self {
        GraphQLRequest {
            query: COMPANIES_BY_EXCHANGE,
            variables: Some(json!({
                "exchange": exchange,
                "limit": limit,
                "offset": offset,
            })),
        }
    }
}
