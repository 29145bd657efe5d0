// Form controller: which parameter fields an operation needs, how their
// raw text becomes GraphQL variables, and dispatch to the API client.
// Nothing here touches the terminal, so the UI can be swapped out.

use crate::api::ApiClient;
use crate::error::{QueryError, Result};
use crate::query::{GraphQLRequest, Operation};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

/// Shown instead of a response when the selection is not one of the
/// five operations.
pub const INVALID_SELECTION: &str = "Invalid function selected";

/// The four parameter slots of the form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    /// Search text, company id, or exchange code.
    Primary,
    /// Ticker symbol.
    Secondary,
    Limit,
    Offset,
}

impl ParamField {
    pub fn label(self) -> &'static str {
        match self {
            ParamField::Primary => "Name",
            ParamField::Secondary => "Exchange",
            ParamField::Limit => "Limit",
            ParamField::Offset => "Offset",
        }
    }

    /// Prompt text for this slot once an operation is chosen.
    pub fn label_for(self, operation: Operation) -> &'static str {
        match (operation, self) {
            (Operation::SearchCompanies, ParamField::Primary) => "Search query",
            (Operation::CompanyById, ParamField::Primary) => "Company ID",
            (Operation::CompanyByTicker, ParamField::Primary) => "Exchange",
            (Operation::CompanyByTicker, ParamField::Secondary) => "Ticker symbol",
            (Operation::CompaniesByExchange, ParamField::Primary) => "Exchange",
            _ => self.label(),
        }
    }
}

/// Every field shown for a selection, in form order. The primary field is
/// left out only for operations that take no input.
pub fn fields_visible_for(selection: &str) -> Vec<ParamField> {
    let mut fields = match Operation::from_label(selection) {
        Some(op) if !op.takes_parameters() => Vec::new(),
        _ => vec![ParamField::Primary],
    };
    fields.extend(optional_fields_visible_for(selection));
    fields
}

/// Only the optional fields (everything after the primary one).
pub fn optional_fields_visible_for(selection: &str) -> Vec<ParamField> {
    match Operation::from_label(selection) {
        Some(Operation::CompanyByTicker) => vec![ParamField::Secondary],
        Some(Operation::CompaniesByExchange) => vec![ParamField::Limit, ParamField::Offset],
        _ => Vec::new(),
    }
}

/// Raw text of the four inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub primary: String,
    pub secondary: String,
    pub limit: String,
    pub offset: String,
}

impl FormInput {
    pub fn set(&mut self, field: ParamField, value: String) {
        match field {
            ParamField::Primary => self.primary = value,
            ParamField::Secondary => self.secondary = value,
            ParamField::Limit => self.limit = value,
            ParamField::Offset => self.offset = value,
        }
    }
}

fn parse_count(field: ParamField, raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|source| QueryError::InvalidNumber {
            field: field.label(),
            value: raw.to_string(),
            source,
        })
}

/// Turn the form into the request body for `operation`. Only
/// companies-by-exchange does any conversion; its limit and offset are
/// read from their own fields.
pub fn variables_for(operation: Operation, input: &FormInput) -> Result<GraphQLRequest> {
    let request = match operation {
        Operation::SearchCompanies => GraphQLRequest::search_companies(&input.primary),
        Operation::CompanyById => GraphQLRequest::company_by_id(&input.primary),
        Operation::CompanyByTicker => {
            GraphQLRequest::company_by_ticker(&input.primary, &input.secondary)
        }
        Operation::ListExchanges => GraphQLRequest::list_exchanges(),
        Operation::CompaniesByExchange => {
            let limit = parse_count(ParamField::Limit, &input.limit)?;
            let offset = parse_count(ParamField::Offset, &input.offset)?;
            GraphQLRequest::companies_by_exchange(&input.primary, limit, offset)
        }
    };
    Ok(request)
}

/// What the result panel shows after one execute action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Response(Value),
    InvalidSelection,
}

impl Outcome {
    /// Pretty-printed response with four-space indentation, or the
    /// placeholder text for an unknown selection.
    pub fn render(&self) -> String {
        match self {
            Outcome::Response(value) => pretty_json(value),
            Outcome::InvalidSelection => INVALID_SELECTION.to_string(),
        }
    }
}

fn pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

/// Execute the selected operation with the given fields. An unknown
/// selection returns `Outcome::InvalidSelection` without any request.
pub fn run(api: &ApiClient, selection: &str, input: &FormInput) -> Result<Outcome> {
    let Some(operation) = Operation::from_label(selection) else {
        info!("ignoring unknown selection `{}`", selection);
        return Ok(Outcome::InvalidSelection);
    };
    let request = variables_for(operation, input)?;
    debug!("executing `{}`", operation);
    Ok(Outcome::Response(api.execute(&request)?))
}
