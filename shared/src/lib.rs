use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single donation row as stored in the `donations` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    /// Store-generated identifier
    pub donation_id: i64,
    /// ID of the user this donation belongs to
    pub donation_user_id: i64,
    /// Donated amount
    pub amount: f64,
    /// Free-text category label (e.g. "food", "education")
    pub donation_category: String,
    /// How the donation was paid, if the store recorded it
    pub payment_method: Option<String>,
    /// Store-assigned insert time
    pub created_at: NaiveDateTime,
}

/// Projection of a donation used by the dashboard's recent-transactions view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub donation_id: i64,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub donation_category: String,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /donations`, sent either as JSON or as a url-encoded form.
///
/// Every field is optional and loosely typed on the wire: absent values are
/// passed through to the store as NULL, present ones as text, and the store's
/// own column types and constraints decide whether the insert is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDonationRequest {
    pub user_id: Option<FieldValue>,
    pub amount: Option<FieldValue>,
    pub category: Option<FieldValue>,
}

/// A scalar body value as the client sent it (`7`, `"7"`, `true`, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
    Boolean(bool),
}

impl FieldValue {
    /// Text handed to the store, which coerces it into the column type
    pub fn to_bind_text(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(FieldValue::Number)
            .unwrap_or_else(|| FieldValue::Text(value.to_string()))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Response of `GET /dashboard/total-donations/:user_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalDonationsResponse {
    pub total_donations: f64,
}

/// JSON error body returned by the dashboard endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_create_request_accepts_partial_body() {
        let request: CreateDonationRequest =
            serde_json::from_str(r#"{"user_id": 7, "category": "food"}"#).unwrap();

        assert_eq!(request.user_id, Some(FieldValue::from(7_i64)));
        assert_eq!(request.amount, None);
        assert_eq!(request.category, Some(FieldValue::from("food")));
    }

    #[test]
    fn test_create_request_accepts_strings_for_numbers() {
        let request: CreateDonationRequest =
            serde_json::from_str(r#"{"user_id": "7", "amount": "abc", "category": "food"}"#)
                .unwrap();

        assert_eq!(request.user_id, Some(FieldValue::Text("7".to_string())));
        assert_eq!(request.amount.unwrap().to_bind_text(), "abc");
    }

    #[test]
    fn test_bind_text_of_each_variant() {
        assert_eq!(FieldValue::from(7_i64).to_bind_text(), "7");
        assert_eq!(FieldValue::from(50.5_f64).to_bind_text(), "50.5");
        assert_eq!(FieldValue::from("food").to_bind_text(), "food");
        assert_eq!(FieldValue::Boolean(true).to_bind_text(), "1");
    }

    #[test]
    fn test_total_donations_serializes_as_number() {
        let json = serde_json::to_value(TotalDonationsResponse { total_donations: 0.0 }).unwrap();
        assert_eq!(json, serde_json::json!({ "total_donations": 0.0 }));
        assert!(json["total_donations"].is_number());
    }

    #[test]
    fn test_donation_field_names() {
        let donation = Donation {
            donation_id: 1,
            donation_user_id: 7,
            amount: 50.0,
            donation_category: "food".to_string(),
            payment_method: None,
            created_at: NaiveDate::from_ymd_opt(2025, 5, 4)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
        };

        let json = serde_json::to_value(&donation).unwrap();
        assert_eq!(json["donation_user_id"], 7);
        assert_eq!(json["donation_category"], "food");
        assert!(json["payment_method"].is_null());
        assert_eq!(json["created_at"], "2025-05-04T12:30:00");
    }
}
