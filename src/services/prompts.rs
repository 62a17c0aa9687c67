//! Prompt and schema builders
//!
//! Centralizes the instruction text and response schemas sent to the
//! generative model, so the remote contract can be exercised without the
//! HTTP layer

use crate::models::bill::BillType;
use serde_json::{json, Value};

/// Field list and worked example shared by the bill-reading prompts
const BILL_FIELDS_AND_EXAMPLE: &str = r#"Provide a JSON response with the following fields:
billType, issuer, totalBill, billDate, explanation, highlights, discrepancies, isValidBill.

Example response:
{
    "billType": "utility",
    "issuer": "VECO",
    "totalBill": 4470.13,
    "billDate": "2025-06-16",
    "explanation": "For the billing period of May 15 to June 15, 2025, you consumed a total of 335.64 kWh. Most of your charges came from generation and transmission (₱2,697.00), followed by distribution charges (₱1,116.42). Additional taxes and universal charges brought your total to ₱4,470.13. This is a typical bill amount for your average usage, with no unusual increases detected.",
    "highlights": [
        "energy_consumed_kWh: 335.64",
        "generation_and_transmission: 2697.00",
        "distribution_charges: 1116.42",
        "taxes_and_others: 657.00",
        "previous_balance: 0.00"
    ],
    "discrepancies": "None",
    "isValidBill": true
}"#;

/// Instruction for reading a single bill image
pub fn bill_reading_prompt() -> String {
    format!(
        "Summarize this bill. {}\n\n\
         Set isValidBill to false when the image does not show a single readable bill, \
         and explain why in discrepancies.",
        BILL_FIELDS_AND_EXAMPLE
    )
}

/// Instruction for reading an ordered batch of bill page images
///
/// Cross-checking the pages (issuer, date, type, sequence) is delegated
/// entirely to the model; no local verification happens.
pub fn bill_reading_batch_prompt(page_count: usize) -> String {
    format!(
        "The {} attached images are the pages of what should be a single bill, in page order. \
         Check that they belong together: same issuer, same billing date, same bill type, and \
         consecutive pages with none missing or out of order. Summarize the whole bill. {}\n\n\
         Set isValidBill to false when the images do not form one coherent bill, and describe \
         the mismatch in discrepancies.",
        page_count, BILL_FIELDS_AND_EXAMPLE
    )
}

/// Instruction for summarizing a bill time series
pub fn analytics_prompt(time_series_data: &str) -> String {
    format!(
        "{}\n\n\
         Context: This time series data are the expenses or bills of a user in a particular \
         type or category. Find me the key information from this time series data and summarize \
         it. Format it into two paragraphs: one for the summary and the other for the suggestions.\n\n\
         The formatting will be as follows:\n\n\
         {{\n\
         \x20   \"summary\": \"This is the summary of the time series data\",\n\
         \x20   \"suggestion\": \"This is the suggestion of the time series data\"\n\
         }}",
        time_series_data
    )
}

/// Response schema for the bill-reading endpoints, in Gemini's
/// OpenAPI-subset dialect
pub fn bill_response_schema() -> Value {
    let categories: Vec<&str> = BillType::ALL.iter().map(BillType::as_str).collect();
    let ordering = [
        "billType",
        "issuer",
        "totalBill",
        "billDate",
        "explanation",
        "highlights",
        "discrepancies",
        "isValidBill",
    ];

    json!({
        "type": "OBJECT",
        "properties": {
            "billType": {"type": "STRING", "enum": categories},
            "issuer": {"type": "STRING"},
            "totalBill": {"type": "NUMBER"},
            "billDate": {"type": "STRING"},
            "explanation": {"type": "STRING"},
            "highlights": {"type": "ARRAY", "items": {"type": "STRING"}},
            "discrepancies": {"type": "STRING"},
            "isValidBill": {"type": "BOOLEAN"}
        },
        "required": ordering,
        "propertyOrdering": ordering,
    })
}

/// Response schema for the analytics endpoint
pub fn time_series_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {"type": "STRING"},
            "suggestion": {"type": "STRING"}
        },
        "required": ["summary", "suggestion"],
        "propertyOrdering": ["summary", "suggestion"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_reading_prompt_names_every_field() {
        let prompt = bill_reading_prompt();
        for field in [
            "billType",
            "issuer",
            "totalBill",
            "billDate",
            "explanation",
            "highlights",
            "discrepancies",
            "isValidBill",
        ] {
            assert!(prompt.contains(field), "prompt is missing {}", field);
        }
    }

    #[test]
    fn test_bill_reading_prompt_example_is_valid_json() {
        let prompt = bill_reading_prompt();
        let start = prompt.find('{').unwrap();
        let end = prompt.rfind('}').unwrap();
        let example: Value = serde_json::from_str(&prompt[start..=end])
            .expect("worked example must be valid JSON");
        assert_eq!(example["billType"], "utility");
        assert_eq!(example["isValidBill"], true);
    }

    #[test]
    fn test_batch_prompt_mentions_page_checks() {
        let prompt = bill_reading_batch_prompt(3);
        assert!(prompt.contains("3 attached images"));
        assert!(prompt.contains("same issuer"));
        assert!(prompt.contains("page order"));
    }

    #[test]
    fn test_analytics_prompt_embeds_data() {
        let prompt = analytics_prompt("Jan: 100\nFeb: 120");
        assert!(prompt.starts_with("Jan: 100\nFeb: 120"));
        assert!(prompt.contains("\"summary\""));
        assert!(prompt.contains("\"suggestion\""));
    }

    #[test]
    fn test_bill_schema_covers_all_categories() {
        let schema = bill_response_schema();
        let categories = schema["properties"]["billType"]["enum"].as_array().unwrap();
        assert_eq!(categories.len(), BillType::ALL.len());
        assert!(categories.iter().any(|c| c == "utility"));
        assert!(categories.iter().any(|c| c == "others"));
    }

    #[test]
    fn test_bill_schema_requires_every_field() {
        let schema = bill_response_schema();
        let required = schema["required"].as_array().unwrap();
        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(required.len(), properties.len());
        for field in required {
            assert!(properties.contains_key(field.as_str().unwrap()));
        }
    }

    #[test]
    fn test_time_series_schema_shape() {
        let schema = time_series_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert!(schema["properties"]["summary"].is_object());
        assert!(schema["properties"]["suggestion"].is_object());
    }
}
