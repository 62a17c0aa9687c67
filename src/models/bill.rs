//! Bill data models
//!
//! Defines the structured shapes exchanged with callers and requested
//! from the generative model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of bill categories the model may assign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillType {
    Utility,
    Telecom,
    Medical,
    Financial,
    Government,
    Subscription,
    Educational,
    Others,
}

impl BillType {
    /// All categories, in schema order
    pub const ALL: [BillType; 8] = [
        BillType::Utility,
        BillType::Telecom,
        BillType::Medical,
        BillType::Financial,
        BillType::Government,
        BillType::Subscription,
        BillType::Educational,
        BillType::Others,
    ];

    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            BillType::Utility => "utility",
            BillType::Telecom => "telecom",
            BillType::Medical => "medical",
            BillType::Financial => "financial",
            BillType::Government => "government",
            BillType::Subscription => "subscription",
            BillType::Educational => "educational",
            BillType::Others => "others",
        }
    }
}

/// Structured bill summary requested from the generative model
///
/// The bill-reading endpoints return the model's JSON text verbatim;
/// this type documents the requested layout and backs the response
/// schema sent with each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResponse {
    /// Category of the bill
    pub bill_type: BillType,
    /// Issuing company or institution
    pub issuer: String,
    /// Total amount due
    pub total_bill: f64,
    /// Billing date as printed on the bill
    pub bill_date: String,
    /// Plain-language explanation of the charges
    pub explanation: String,
    /// Notable line items
    pub highlights: Vec<String>,
    /// Irregularities the model noticed, or "None"
    pub discrepancies: String,
    /// Whether the submitted images form one coherent bill
    pub is_valid_bill: bool,
}

/// Structured summary of a bill time series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillTimeSeriesResponse {
    /// Summary of the spending history
    pub summary: String,
    /// Advice derived from the history
    pub suggestion: String,
}

/// Analytics request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    /// Historical bill records for one category, as free text
    pub time_series_data: String,
}

/// Uniform success envelope for the generative endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptResponse {
    /// Raw text returned by the remote model
    pub response: String,
}

/// Upload signature request body
///
/// Fields are optional so missing input is rejected by the handler
/// rather than the JSON extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSignatureRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Signed parameter set for a direct browser upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSignatureResponse {
    /// Storage account identifier
    pub cloud_name: String,
    /// Public API key of the account
    pub api_key: String,
    /// Unix timestamp the signature is bound to
    pub timestamp: i64,
    /// Target folder, namespaced by user
    pub folder: String,
    /// Hex digest authorizing the upload
    pub signature: String,
    /// Asset identifier the upload will be stored under
    pub public_id: String,
}

/// Delete request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

/// Delete response, carrying the provider's own result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub result: Value,
}
