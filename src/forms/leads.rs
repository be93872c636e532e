//! Lead submissions. The same structs parse the JSON API bodies and the
//! urlencoded `/kredi` and `/test-surusu` forms.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::lead::{NewCreditApplication, NewTestDriveRequest};
use crate::domain::types::{MotorcycleId, PersonName, PhoneNumber, TypeConstraintError};

#[derive(Debug, Error, PartialEq)]
pub enum LeadFormError {
    #[error("Form geçersiz: {0}")]
    Validation(String),
    #[error("{0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for LeadFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for LeadFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Motorcycle reference as a JSON number or a form string (blank = none).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ModelRef {
    Number(i32),
    Text(String),
}

impl ModelRef {
    fn into_id(self) -> Result<Option<MotorcycleId>, LeadFormError> {
        let raw = match self {
            Self::Number(id) => id,
            Self::Text(text) if text.trim().is_empty() => return Ok(None),
            Self::Text(text) => text.trim().parse::<i32>().map_err(|_| {
                LeadFormError::Validation("Geçerli bir model seçiniz".to_string())
            })?,
        };
        MotorcycleId::new(raw)
            .map(Some)
            .map_err(|_| LeadFormError::Validation("Geçerli bir model seçiniz".to_string()))
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreditApplicationForm {
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    #[validate(length(min = 1, max = 40))]
    pub phone: String,
    #[serde(default, alias = "incomeRange")]
    #[validate(length(max = 60))]
    pub income_range: Option<String>,
    #[serde(default, alias = "modelId", alias = "motorcycle_id")]
    pub model_id: Option<ModelRef>,
}

impl TryFrom<CreditApplicationForm> for NewCreditApplication {
    type Error = LeadFormError;

    fn try_from(form: CreditApplicationForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewCreditApplication {
            full_name: PersonName::new(form.full_name)?,
            phone: PhoneNumber::new(form.phone)?,
            income_range: optional_text(form.income_range),
            motorcycle_id: form.model_id.map(ModelRef::into_id).transpose()?.flatten(),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct TestDriveRequestForm {
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    #[validate(length(min = 1, max = 40))]
    pub phone: String,
    #[serde(default, alias = "modelId", alias = "motorcycle_id")]
    pub model_id: Option<ModelRef>,
    /// `YYYY-MM-DD`.
    #[serde(default, alias = "preferredDate")]
    pub preferred_date: Option<String>,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub note: Option<String>,
}

impl TryFrom<TestDriveRequestForm> for NewTestDriveRequest {
    type Error = LeadFormError;

    fn try_from(form: TestDriveRequestForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let preferred_date = optional_text(form.preferred_date)
            .map(|date| {
                NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|_| LeadFormError::Validation(format!("Geçersiz tarih: {date}")))
            })
            .transpose()?;
        Ok(NewTestDriveRequest {
            full_name: PersonName::new(form.full_name)?,
            phone: PhoneNumber::new(form.phone)?,
            motorcycle_id: form.model_id.map(ModelRef::into_id).transpose()?.flatten(),
            preferred_date,
            note: optional_text(form.note),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_body_with_numeric_model() {
        let form: CreditApplicationForm = serde_json::from_value(serde_json::json!({
            "full_name": "Ayşe Yılmaz",
            "phone": "0532 152 51 45",
            "model_id": 7,
        }))
        .unwrap();
        let lead = NewCreditApplication::try_from(form).unwrap();
        assert_eq!(lead.motorcycle_id.map(|id| id.get()), Some(7));
        assert_eq!(lead.income_range, None);
    }

    #[test]
    fn blank_form_model_means_none() {
        let form: TestDriveRequestForm = serde_json::from_value(serde_json::json!({
            "fullName": "Mehmet Kaya",
            "phone": "+90 532 000 00 00",
            "modelId": "",
            "preferredDate": "2025-06-01",
        }))
        .unwrap();
        let lead = NewTestDriveRequest::try_from(form).unwrap();
        assert_eq!(lead.motorcycle_id, None);
        assert_eq!(
            lead.preferred_date,
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let form: CreditApplicationForm = serde_json::from_value(serde_json::json!({
            "full_name": "Ayşe",
            "phone": "abc",
        }))
        .unwrap();
        assert!(NewCreditApplication::try_from(form).is_err());

        let form: CreditApplicationForm = serde_json::from_value(serde_json::json!({
            "full_name": "",
            "phone": "0532 152 51 45",
        }))
        .unwrap();
        assert!(matches!(
            NewCreditApplication::try_from(form),
            Err(LeadFormError::Validation(_))
        ));

        let form: CreditApplicationForm = serde_json::from_value(serde_json::json!({
            "full_name": "Ayşe",
            "phone": "0532 152 51 45",
            "model_id": -1,
        }))
        .unwrap();
        assert!(NewCreditApplication::try_from(form).is_err());
    }
}
