use crate::models::lead::{GroupCount, Lead, LeadStats, NewLead, SubmitLeadRequest};
use crate::repositories::{LeadRepository, RepositoryError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("A consultation request with this phone or email already exists.")]
    Duplicate,
    #[error("Lead not found.")]
    NotFound,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct LeadService {
    repository: Arc<dyn LeadRepository>,
    default_city: String,
}

impl LeadService {
    pub fn new(repository: Arc<dyn LeadRepository>, default_city: String) -> Self {
        Self {
            repository,
            default_city,
        }
    }

    /// Validates and stores a public consultation request.
    ///
    /// The pre-check query catches the common duplicate case with a friendly
    /// message; two concurrent submissions can still slip past it, so the
    /// UNIQUE constraints remain the final arbiter and map to the same error.
    pub async fn submit(&self, request: SubmitLeadRequest) -> Result<i64, LeadServiceError> {
        let lead = self.validate(request)?;

        if self
            .repository
            .exists_with_phone_or_email(&lead.phone, &lead.email)
            .await?
        {
            return Err(LeadServiceError::Duplicate);
        }

        match self.repository.insert(&lead).await {
            Ok(id) => {
                tracing::info!(lead_id = id, phone = %lead.phone, "new lead");
                Ok(id)
            }
            Err(RepositoryError::AlreadyExists) => Err(LeadServiceError::Duplicate),
            Err(e) => Err(LeadServiceError::RepositoryError(e)),
        }
    }

    fn validate(&self, request: SubmitLeadRequest) -> Result<NewLead, LeadServiceError> {
        if request.name.trim().is_empty()
            || request.phone.trim().is_empty()
            || request.email.trim().is_empty()
        {
            return Err(LeadServiceError::Validation(
                "Name, phone, and email are required.".to_string(),
            ));
        }
        if !PHONE_RE.is_match(&request.phone) {
            return Err(LeadServiceError::Validation(
                "Phone must be exactly 10 digits.".to_string(),
            ));
        }
        if !EMAIL_RE.is_match(&request.email) {
            return Err(LeadServiceError::Validation(
                "Invalid email format.".to_string(),
            ));
        }

        let city = request
            .city
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.default_city.clone());

        Ok(NewLead {
            name: request.name,
            phone: request.phone,
            email: request.email,
            age_group: request.age_group,
            has_existing_sip: request.has_existing_sip,
            current_sip_amount: request.current_sip_amount,
            desired_investment_amount: request.desired_investment_amount,
            objective: request.objective,
            financial_goal: request.financial_goal,
            goal_timeline: request.goal_timeline,
            city,
        })
    }

    pub async fn list(&self) -> Result<Vec<Lead>, LeadServiceError> {
        Ok(self.repository.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Lead, LeadServiceError> {
        self.repository
            .get(id)
            .await?
            .ok_or(LeadServiceError::NotFound)
    }

    pub async fn update(
        &self,
        id: i64,
        status: &str,
        notes: Option<&str>,
    ) -> Result<(), LeadServiceError> {
        match self.repository.update(id, status, notes).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(LeadServiceError::NotFound),
            Err(e) => Err(LeadServiceError::RepositoryError(e)),
        }
    }

    /// Status counts with every known bucket present, zero-filled.
    pub async fn stats_by_status(&self) -> Result<LeadStats, LeadServiceError> {
        let rows = self.repository.count_by_status().await?;

        let mut stats = LeadStats::default();
        for row in rows {
            stats.total += row.count;
            match row.label.as_deref() {
                Some("new") => stats.new = row.count,
                Some("contacted") => stats.contacted = row.count,
                Some("converted") => stats.converted = row.count,
                Some("rejected") => stats.rejected = row.count,
                _ => {}
            }
        }
        Ok(stats)
    }

    pub async fn stats_by_age(&self) -> Result<Vec<GroupCount>, LeadServiceError> {
        Ok(self.repository.count_by_age().await?)
    }

    pub async fn stats_by_goal(&self) -> Result<Vec<GroupCount>, LeadServiceError> {
        Ok(self.repository.count_by_goal().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::lead_repository::MockLeadRepository;

    fn request(phone: &str, email: &str) -> SubmitLeadRequest {
        SubmitLeadRequest {
            name: "Ravi".to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            age_group: Some("25-34".to_string()),
            has_existing_sip: None,
            current_sip_amount: None,
            desired_investment_amount: None,
            objective: None,
            financial_goal: Some("Retirement".to_string()),
            goal_timeline: None,
            city: None,
        }
    }

    fn service(repo: MockLeadRepository) -> LeadService {
        LeadService::new(Arc::new(repo), "Pune".to_string())
    }

    #[tokio::test]
    async fn valid_submission_inserts_with_default_city() {
        let mut repo = MockLeadRepository::new();
        repo.expect_exists_with_phone_or_email()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        repo.expect_insert()
            .withf(|lead| lead.city == "Pune" && lead.phone == "9876543210")
            .times(1)
            .returning(|_| Box::pin(async { Ok(42) }));

        let id = service(repo)
            .submit(request("9876543210", "ravi@example.com"))
            .await
            .expect("submit");
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn phone_length_is_enforced() {
        for phone in ["987654321", "98765432100", "98765abcde", "98765 4321"] {
            let result = service(MockLeadRepository::new())
                .submit(request(phone, "ravi@example.com"))
                .await;
            match result {
                Err(LeadServiceError::Validation(msg)) => {
                    assert_eq!(msg, "Phone must be exactly 10 digits.")
                }
                other => panic!("expected validation error for {phone:?}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn email_shape_is_enforced() {
        for email in ["plainaddress", "a@b", "a b@c.com", "@missing.local"] {
            let result = service(MockLeadRepository::new())
                .submit(request("9876543210", email))
                .await;
            match result {
                Err(LeadServiceError::Validation(msg)) => {
                    assert_eq!(msg, "Invalid email format.")
                }
                other => panic!("expected validation error for {email:?}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn missing_required_fields_report_first_failure() {
        let mut req = request("9876543210", "ravi@example.com");
        req.name = String::new();
        let result = service(MockLeadRepository::new()).submit(req).await;
        match result {
            Err(LeadServiceError::Validation(msg)) => {
                assert_eq!(msg, "Name, phone, and email are required.")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_precheck_rejects() {
        let mut repo = MockLeadRepository::new();
        repo.expect_exists_with_phone_or_email()
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let result = service(repo)
            .submit(request("9876543210", "ravi@example.com"))
            .await;
        assert!(matches!(result, Err(LeadServiceError::Duplicate)));
    }

    #[tokio::test]
    async fn constraint_race_maps_to_duplicate() {
        let mut repo = MockLeadRepository::new();
        repo.expect_exists_with_phone_or_email()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        repo.expect_insert()
            .returning(|_| Box::pin(async { Err(RepositoryError::AlreadyExists) }));

        let result = service(repo)
            .submit(request("9876543210", "ravi@example.com"))
            .await;
        assert!(matches!(result, Err(LeadServiceError::Duplicate)));
    }

    #[tokio::test]
    async fn status_stats_are_zero_filled() {
        let mut repo = MockLeadRepository::new();
        repo.expect_count_by_status().returning(|| {
            Box::pin(async {
                Ok(vec![
                    GroupCount {
                        label: Some("new".to_string()),
                        count: 3,
                    },
                    GroupCount {
                        label: Some("converted".to_string()),
                        count: 1,
                    },
                ])
            })
        });

        let stats = service(repo).stats_by_status().await.expect("stats");
        assert_eq!(
            stats,
            LeadStats {
                total: 4,
                new: 3,
                contacted: 0,
                converted: 1,
                rejected: 0,
            }
        );
    }
}
