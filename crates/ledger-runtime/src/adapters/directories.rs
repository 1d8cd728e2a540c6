//! # Directory Adapters
//!
//! Read-only views of the admin and validator registries.

use rf_01_admin_registry::AdminRegistry;
use rf_02_validator_registry::ValidatorRegistry;
use rf_03_project_registry::{AreaTerms, FundingDirectory, ValidatorDirectory};
use shared_types::{Address, ResearchAreaId};

/// Admin registry as seen by the other registries.
pub struct AdminPort<'a>(pub &'a AdminRegistry);

impl rf_02_validator_registry::AdminDirectory for AdminPort<'_> {
    fn is_admin(&self, address: &Address) -> bool {
        self.0.is_admin(address)
    }

    fn research_area_exists(&self, id: ResearchAreaId) -> bool {
        self.0.research_area(id).exists
    }
}

impl FundingDirectory for AdminPort<'_> {
    fn is_admin(&self, address: &Address) -> bool {
        self.0.is_admin(address)
    }

    fn research_area(&self, id: ResearchAreaId) -> Option<AreaTerms> {
        let area = self.0.research_area(id);
        area.exists.then_some(AreaTerms {
            milestone_count: area.milestone_count,
            budget: area.budget,
        })
    }
}

impl rf_04_milestone_tracker::AdminDirectory for AdminPort<'_> {
    fn is_admin(&self, address: &Address) -> bool {
        self.0.is_admin(address)
    }
}

/// Validator registry as seen by the project registry and milestone tracker.
pub struct ValidatorPort<'a>(pub &'a ValidatorRegistry);

impl ValidatorPort<'_> {
    fn area_if_verified(&self, address: &Address) -> Option<ResearchAreaId> {
        self.0
            .require_verified(address)
            .ok()
            .map(|validator| validator.research_area)
    }
}

impl ValidatorDirectory for ValidatorPort<'_> {
    fn verified_area(&self, address: &Address) -> Option<ResearchAreaId> {
        self.area_if_verified(address)
    }
}

impl rf_04_milestone_tracker::ApproverDirectory for ValidatorPort<'_> {
    fn verified_area(&self, address: &Address) -> Option<ResearchAreaId> {
        self.area_if_verified(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_02_validator_registry::VerificationVote;

    fn super_admin() -> Address {
        Address::repeat_byte(0x01)
    }

    fn admin_registry() -> AdminRegistry {
        let mut registry = AdminRegistry::new(super_admin());
        registry.add_research_area(super_admin(), 2, 3, 1, 5000).unwrap();
        registry
    }

    #[test]
    fn test_area_terms_only_for_existing_areas() {
        let registry = admin_registry();
        let port = AdminPort(&registry);
        assert_eq!(
            FundingDirectory::research_area(&port, 2),
            Some(AreaTerms {
                milestone_count: 3,
                budget: 5000
            })
        );
        assert_eq!(FundingDirectory::research_area(&port, 9), None);
        assert!(rf_02_validator_registry::AdminDirectory::research_area_exists(&port, 2));
    }

    #[test]
    fn test_verified_area_hides_unverified() {
        let admins = admin_registry();
        let mut validators = ValidatorRegistry::new();
        let v = Address::repeat_byte(0x11);
        validators
            .register_validator(v, 2, &AdminPort(&admins))
            .unwrap();
        assert_eq!(ValidatorDirectory::verified_area(&ValidatorPort(&validators), &v), None);

        // The super-admin is the only admin here; quorum needs three.
        let mut admins = admins;
        for byte in [0x02, 0x03] {
            admins.add_admin(super_admin(), Address::repeat_byte(byte)).unwrap();
        }
        for admin in [0x01, 0x02, 0x03] {
            validators
                .cast_verification_vote(
                    Address::repeat_byte(admin),
                    v,
                    VerificationVote::Approve,
                    &AdminPort(&admins),
                )
                .unwrap();
        }
        assert_eq!(
            ValidatorDirectory::verified_area(&ValidatorPort(&validators), &v),
            Some(2)
        );
    }
}
