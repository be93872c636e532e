use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::lead::{
    CreditApplication as DomainCreditApplication,
    NewCreditApplication as DomainNewCreditApplication, NewTestDriveRequest as DomainNewTestDrive,
    TestDriveRequest as DomainTestDriveRequest,
};
use crate::domain::types::{PersonName, PhoneNumber, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::credit_applications)]
pub struct CreditApplication {
    pub id: i32,
    pub full_name: String,
    pub phone: String,
    pub income_range: Option<String>,
    pub motorcycle_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub processed: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::credit_applications)]
pub struct NewCreditApplication {
    pub full_name: String,
    pub phone: String,
    pub income_range: Option<String>,
    pub motorcycle_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::test_drive_requests)]
pub struct TestDriveRequest {
    pub id: i32,
    pub full_name: String,
    pub phone: String,
    pub motorcycle_id: Option<i32>,
    pub preferred_date: Option<NaiveDate>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub processed: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::test_drive_requests)]
pub struct NewTestDriveRequest {
    pub full_name: String,
    pub phone: String,
    pub motorcycle_id: Option<i32>,
    pub preferred_date: Option<NaiveDate>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<CreditApplication> for DomainCreditApplication {
    type Error = TypeConstraintError;

    fn try_from(row: CreditApplication) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            full_name: PersonName::new(row.full_name)?,
            phone: PhoneNumber::new(row.phone)?,
            income_range: row.income_range,
            motorcycle_id: row.motorcycle_id.map(TryInto::try_into).transpose()?,
            created_at: row.created_at,
            processed: row.processed,
        })
    }
}

impl From<&DomainNewCreditApplication> for NewCreditApplication {
    fn from(value: &DomainNewCreditApplication) -> Self {
        Self {
            full_name: value.full_name.as_str().to_string(),
            phone: value.phone.as_str().to_string(),
            income_range: value.income_range.clone(),
            motorcycle_id: value.motorcycle_id.map(|id| id.get()),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<TestDriveRequest> for DomainTestDriveRequest {
    type Error = TypeConstraintError;

    fn try_from(row: TestDriveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            full_name: PersonName::new(row.full_name)?,
            phone: PhoneNumber::new(row.phone)?,
            motorcycle_id: row.motorcycle_id.map(TryInto::try_into).transpose()?,
            preferred_date: row.preferred_date,
            note: row.note,
            created_at: row.created_at,
            processed: row.processed,
        })
    }
}

impl From<&DomainNewTestDrive> for NewTestDriveRequest {
    fn from(value: &DomainNewTestDrive) -> Self {
        Self {
            full_name: value.full_name.as_str().to_string(),
            phone: value.phone.as_str().to_string(),
            motorcycle_id: value.motorcycle_id.map(|id| id.get()),
            preferred_date: value.preferred_date,
            note: value.note.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
