//! Credit application and test drive lead capture.

use crate::domain::lead::{
    CreditApplication, LeadListItem, NewCreditApplication, NewTestDriveRequest, TestDriveRequest,
};
use crate::domain::types::MotorcycleId;
use crate::forms::catalog::PageQuery;
use crate::pagination::{PageInfo, Pagination};
use crate::rate_limit::RateLimiter;
use crate::repository::{LeadReader, LeadWriter, MotorcycleReader, RepositoryError};

use super::{ServiceError, ServiceResult};

pub const MODEL_NOT_FOUND: &str = "Geçerli bir model seçiniz";

fn check_rate(limiter: &RateLimiter, scope: &str, client: &str) -> ServiceResult<()> {
    if limiter.check(&format!("{scope}:{client}")) {
        Ok(())
    } else {
        Err(ServiceError::RateLimited)
    }
}

fn ensure_motorcycle<R: MotorcycleReader>(
    repo: &R,
    id: Option<MotorcycleId>,
) -> ServiceResult<()> {
    let Some(id) = id else {
        return Ok(());
    };
    match repo.get_motorcycle_by_id(id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::Form(MODEL_NOT_FOUND.to_string())),
        Err(e) => {
            log::error!("Failed to get motorcycle: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn map_insert_error(e: RepositoryError, what: &str) -> ServiceError {
    match e {
        RepositoryError::ForeignKey(_) => ServiceError::Form(MODEL_NOT_FOUND.to_string()),
        other => {
            log::error!("Failed to create {what}: {other}");
            ServiceError::Internal
        }
    }
}

/// Stores a credit application. `client` identifies the submitter for rate
/// limiting, normally the peer IP.
pub fn submit_credit_application<R>(
    application: &NewCreditApplication,
    client: &str,
    limiter: &RateLimiter,
    repo: &R,
) -> ServiceResult<CreditApplication>
where
    R: LeadWriter + MotorcycleReader,
{
    check_rate(limiter, "credit", client)?;
    ensure_motorcycle(repo, application.motorcycle_id)?;
    let created = repo
        .create_credit_application(application)
        .map_err(|e| map_insert_error(e, "credit application"))?;
    log::info!("Received credit application {}", created.id);
    Ok(created)
}

pub fn submit_test_drive_request<R>(
    request: &NewTestDriveRequest,
    client: &str,
    limiter: &RateLimiter,
    repo: &R,
) -> ServiceResult<TestDriveRequest>
where
    R: LeadWriter + MotorcycleReader,
{
    check_rate(limiter, "test-drive", client)?;
    ensure_motorcycle(repo, request.motorcycle_id)?;
    let created = repo
        .create_test_drive_request(request)
        .map_err(|e| map_insert_error(e, "test drive request"))?;
    log::info!("Received test drive request {}", created.id);
    Ok(created)
}

pub fn list_credit_applications<R: LeadReader>(
    query: &PageQuery,
    repo: &R,
) -> ServiceResult<(PageInfo, Vec<LeadListItem<CreditApplication>>)> {
    let pagination = Pagination::clamped(query.page, query.limit);
    match repo.list_credit_applications(pagination) {
        Ok((total, items)) => Ok((PageInfo::new(pagination, total), items)),
        Err(e) => {
            log::error!("Failed to list credit applications: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_test_drive_requests<R: LeadReader>(
    query: &PageQuery,
    repo: &R,
) -> ServiceResult<(PageInfo, Vec<LeadListItem<TestDriveRequest>>)> {
    let pagination = Pagination::clamped(query.page, query.limit);
    match repo.list_test_drive_requests(pagination) {
        Ok((total, items)) => Ok((PageInfo::new(pagination, total), items)),
        Err(e) => {
            log::error!("Failed to list test drive requests: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{PersonName, PhoneNumber};
    use crate::repository::test::TestRepository;
    use std::time::Duration;

    fn application(motorcycle_id: Option<MotorcycleId>) -> NewCreditApplication {
        NewCreditApplication {
            full_name: PersonName::new("Ayşe Yılmaz").unwrap(),
            phone: PhoneNumber::new("0532 152 51 45").unwrap(),
            income_range: None,
            motorcycle_id,
        }
    }

    #[test]
    fn fourth_submission_within_a_minute_is_limited() {
        let repo = TestRepository::new();
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            submit_credit_application(&application(None), "10.0.0.1", &limiter, &repo).unwrap();
        }
        assert_eq!(
            submit_credit_application(&application(None), "10.0.0.1", &limiter, &repo),
            Err(ServiceError::RateLimited)
        );
        // other clients are unaffected
        assert!(
            submit_credit_application(&application(None), "10.0.0.2", &limiter, &repo).is_ok()
        );
    }

    #[test]
    fn unknown_motorcycle_is_a_form_error() {
        let repo = TestRepository::new();
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        assert_eq!(
            submit_credit_application(
                &application(Some(MotorcycleId::new(42).unwrap())),
                "10.0.0.1",
                &limiter,
                &repo
            ),
            Err(ServiceError::Form(MODEL_NOT_FOUND.to_string()))
        );
    }

    #[test]
    fn listing_is_newest_first_with_motorcycle() {
        let repo = TestRepository::new();
        let limiter = RateLimiter::new(10, Duration::from_secs(60));
        let brand = repo.add_brand("Yamaha", "yamaha");
        let motorcycle = repo.add_motorcycle(&brand, "MT-07", "mt-07", 100.0);

        submit_credit_application(&application(None), "a", &limiter, &repo).unwrap();
        let latest =
            submit_credit_application(&application(Some(motorcycle.id)), "a", &limiter, &repo)
                .unwrap();

        let (info, items) = list_credit_applications(
            &PageQuery {
                page: Some(1),
                limit: Some(1),
                search: None,
            },
            &repo,
        )
        .unwrap();
        assert_eq!(info.total, 2);
        assert_eq!(info.total_pages, 2);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].lead.id, latest.id);
        assert_eq!(items[0].motorcycle.as_ref().unwrap().slug, "mt-07");
    }
}
