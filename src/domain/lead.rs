use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{LeadId, MotorcycleId, PersonName, PhoneNumber};

/// Financing request submitted from the `/kredi` page or the public API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditApplication {
    pub id: LeadId,
    pub full_name: PersonName,
    pub phone: PhoneNumber,
    pub income_range: Option<String>,
    pub motorcycle_id: Option<MotorcycleId>,
    pub created_at: NaiveDateTime,
    pub processed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCreditApplication {
    pub full_name: PersonName,
    pub phone: PhoneNumber,
    pub income_range: Option<String>,
    pub motorcycle_id: Option<MotorcycleId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestDriveRequest {
    pub id: LeadId,
    pub full_name: PersonName,
    pub phone: PhoneNumber,
    pub motorcycle_id: Option<MotorcycleId>,
    pub preferred_date: Option<NaiveDate>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub processed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTestDriveRequest {
    pub full_name: PersonName,
    pub phone: PhoneNumber,
    pub motorcycle_id: Option<MotorcycleId>,
    pub preferred_date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Name and slug of the motorcycle a lead refers to, when it still exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadMotorcycle {
    pub name: String,
    pub slug: String,
}

/// A lead together with its motorcycle reference, as listed in the back office.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadListItem<T> {
    #[serde(flatten)]
    pub lead: T,
    pub motorcycle: Option<LeadMotorcycle>,
}
