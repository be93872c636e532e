use diesel::prelude::*;

use crate::domain::lead::{
    CreditApplication, LeadListItem, LeadMotorcycle, NewCreditApplication, NewTestDriveRequest,
    TestDriveRequest,
};
use crate::models::lead::{
    CreditApplication as DbCreditApplication, NewCreditApplication as DbNewCreditApplication,
    NewTestDriveRequest as DbNewTestDriveRequest, TestDriveRequest as DbTestDriveRequest,
};
use crate::pagination::Pagination;
use crate::repository::{DieselRepository, LeadReader, LeadWriter, RepositoryResult};

fn lead_motorcycle(name: Option<String>, slug: Option<String>) -> Option<LeadMotorcycle> {
    match (name, slug) {
        (Some(name), Some(slug)) => Some(LeadMotorcycle { name, slug }),
        _ => None,
    }
}

impl LeadReader for DieselRepository {
    fn list_credit_applications(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<LeadListItem<CreditApplication>>)> {
        use crate::schema::{credit_applications, motorcycles};

        let mut conn = self.conn()?;

        let total = credit_applications::table
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let rows = credit_applications::table
            .left_join(motorcycles::table)
            .order((
                credit_applications::created_at.desc(),
                credit_applications::id.desc(),
            ))
            .offset(pagination.offset())
            .limit(pagination.limit())
            .select((
                DbCreditApplication::as_select(),
                motorcycles::name.nullable(),
                motorcycles::slug.nullable(),
            ))
            .load::<(DbCreditApplication, Option<String>, Option<String>)>(&mut conn)?;

        let items = rows
            .into_iter()
            .map(|(row, name, slug)| {
                Ok(LeadListItem {
                    lead: CreditApplication::try_from(row)?,
                    motorcycle: lead_motorcycle(name, slug),
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, items))
    }

    fn list_test_drive_requests(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<LeadListItem<TestDriveRequest>>)> {
        use crate::schema::{motorcycles, test_drive_requests};

        let mut conn = self.conn()?;

        let total = test_drive_requests::table
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let rows = test_drive_requests::table
            .left_join(motorcycles::table)
            .order((
                test_drive_requests::created_at.desc(),
                test_drive_requests::id.desc(),
            ))
            .offset(pagination.offset())
            .limit(pagination.limit())
            .select((
                DbTestDriveRequest::as_select(),
                motorcycles::name.nullable(),
                motorcycles::slug.nullable(),
            ))
            .load::<(DbTestDriveRequest, Option<String>, Option<String>)>(&mut conn)?;

        let items = rows
            .into_iter()
            .map(|(row, name, slug)| {
                Ok(LeadListItem {
                    lead: TestDriveRequest::try_from(row)?,
                    motorcycle: lead_motorcycle(name, slug),
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, items))
    }
}

impl LeadWriter for DieselRepository {
    fn create_credit_application(
        &self,
        application: &NewCreditApplication,
    ) -> RepositoryResult<CreditApplication> {
        use crate::schema::credit_applications;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(credit_applications::table)
            .values(DbNewCreditApplication::from(application))
            .get_result::<DbCreditApplication>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn create_test_drive_request(
        &self,
        request: &NewTestDriveRequest,
    ) -> RepositoryResult<TestDriveRequest> {
        use crate::schema::test_drive_requests;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(test_drive_requests::table)
            .values(DbNewTestDriveRequest::from(request))
            .get_result::<DbTestDriveRequest>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
