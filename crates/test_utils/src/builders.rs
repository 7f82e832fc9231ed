//! Builder patterns for test data construction

use chrono::Utc;
use std::collections::HashMap;

use core_kernel::AccountId;
use domain_account::account::{ExternalAccount, Requirements, METADATA_ACCOUNT_KEY};
use domain_account::{BusinessType, ConnectedAccount};

/// Dashboard account id the builders attach by default
pub const TEST_DASHBOARD_ACCOUNT: &str = "dashboard-test-account";

/// Builder for connected-account mirrors
///
/// Defaults to a German individual account owned by
/// [`TEST_DASHBOARD_ACCOUNT`] with one external bank account.
pub struct ConnectedAccountBuilder {
    id: String,
    business_type: BusinessType,
    country: String,
    currently_due: Vec<String>,
    metadata: HashMap<String, String>,
    with_bank_account: bool,
}

impl ConnectedAccountBuilder {
    pub fn new(id: &str) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(
            METADATA_ACCOUNT_KEY.to_string(),
            TEST_DASHBOARD_ACCOUNT.to_string(),
        );
        Self {
            id: id.to_string(),
            business_type: BusinessType::Individual,
            country: "DE".to_string(),
            currently_due: Vec::new(),
            metadata,
            with_bank_account: true,
        }
    }

    pub fn company(mut self) -> Self {
        self.business_type = BusinessType::Company;
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.country = country.to_string();
        self
    }

    pub fn currently_due(mut self, paths: &[&str]) -> Self {
        self.currently_due = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn owned_by(mut self, dashboard_account_id: &str) -> Self {
        self.metadata.insert(
            METADATA_ACCOUNT_KEY.to_string(),
            dashboard_account_id.to_string(),
        );
        self
    }

    pub fn without_bank_account(mut self) -> Self {
        self.with_bank_account = false;
        self
    }

    pub fn build(self) -> ConnectedAccount {
        let external_accounts = if self.with_bank_account {
            vec![ExternalAccount {
                id: "ba_test".to_string(),
                currency: "eur".to_string(),
                country: self.country.clone(),
            }]
        } else {
            Vec::new()
        };
        ConnectedAccount {
            id: AccountId::parse(&self.id).expect("builder requires an acct_ id"),
            business_type: self.business_type,
            country: self.country,
            requirements: Requirements {
                currently_due: self.currently_due,
                ..Requirements::default()
            },
            metadata: self.metadata,
            individual: None,
            company: None,
            external_accounts,
            payouts_enabled: false,
            created: Utc::now(),
        }
    }
}
