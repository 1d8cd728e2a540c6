//! # Admin Registry
//!
//! Holds the super-admin, the admin set and the research-area table.
//!
//! ## Invariants
//!
//! - The super-admin is always in the admin set.
//! - Admin membership is monotonic (no removal path).
//! - A research-area id is assigned at most once and never changes.

use crate::domain::{AdminError, AdminResult, ResearchArea, ResearchAreaView};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, DomainEvent, ResearchAreaId};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Admin and research-area registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminRegistry {
    /// The initializer identity; sole holder of `add_admin`.
    super_admin: Address,
    /// Admin set (super-admin included).
    admins: BTreeSet<Address>,
    /// Research areas by id.
    research_areas: HashMap<ResearchAreaId, ResearchArea>,
    /// Area ids in insertion order.
    research_ids: Vec<ResearchAreaId>,
    /// Events not yet drained by the runtime.
    #[serde(skip)]
    pending_events: Vec<DomainEvent>,
}

impl AdminRegistry {
    /// Create a registry whose super-admin is `super_admin`.
    pub fn new(super_admin: Address) -> Self {
        let mut admins = BTreeSet::new();
        admins.insert(super_admin);
        Self {
            super_admin,
            admins,
            research_areas: HashMap::new(),
            research_ids: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Add an admin. Only the super-admin may call this.
    ///
    /// Re-adding an existing admin is rejected rather than ignored so that a
    /// caller can tell a no-op from a change.
    pub fn add_admin(&mut self, caller: Address, admin: Address) -> AdminResult<()> {
        if caller != self.super_admin {
            return Err(AdminError::NotSuperAdmin { caller });
        }
        if admin.is_zero() {
            return Err(AdminError::ZeroAddress);
        }
        if self.admins.contains(&admin) {
            return Err(AdminError::AdminAlreadyExists(admin));
        }

        self.admins.insert(admin);
        info!(%admin, "Admin added");
        self.pending_events.push(DomainEvent::AdminAdded { admin });
        Ok(())
    }

    /// Configure a new research area. Any admin may call this.
    pub fn add_research_area(
        &mut self,
        caller: Address,
        id: ResearchAreaId,
        milestone_count: u32,
        round: u32,
        budget: Amount,
    ) -> AdminResult<()> {
        if !self.is_admin(&caller) {
            return Err(AdminError::NotAdmin { caller });
        }
        if self.research_areas.contains_key(&id) {
            return Err(AdminError::ResearchAreaExists(id));
        }
        if milestone_count == 0 {
            return Err(AdminError::InvalidMilestoneCount);
        }

        self.research_areas
            .insert(id, ResearchArea::new(id, milestone_count, round, budget));
        self.research_ids.push(id);
        info!(
            research_area = id,
            milestone_count, round, budget, "Research area added"
        );
        self.pending_events.push(DomainEvent::ResearchAreaAdded {
            id,
            milestone_count,
            round,
            budget,
        });
        Ok(())
    }

    /// Whether `address` is an admin.
    pub fn is_admin(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }

    /// Whether `address` is the super-admin.
    pub fn is_super_admin(&self, address: &Address) -> bool {
        *address == self.super_admin
    }

    /// The super-admin.
    pub fn super_admin(&self) -> Address {
        self.super_admin
    }

    /// All admins, ordered by address.
    pub fn admins(&self) -> Vec<Address> {
        self.admins.iter().copied().collect()
    }

    /// Look up an area; unknown ids yield the zero sentinel.
    pub fn research_area(&self, id: ResearchAreaId) -> ResearchAreaView {
        match self.research_areas.get(&id) {
            Some(area) => area.view(),
            None => {
                debug!(research_area = id, "Lookup of unknown research area");
                ResearchAreaView::missing()
            }
        }
    }

    /// Milestone count of an existing area.
    pub fn research_milestones(&self, id: ResearchAreaId) -> AdminResult<u32> {
        self.research_areas
            .get(&id)
            .map(|area| area.milestone_count)
            .ok_or(AdminError::ResearchAreaNotFound(id))
    }

    /// All area ids in the order they were added.
    pub fn research_ids(&self) -> &[ResearchAreaId] {
        &self.research_ids
    }

    /// Number of configured areas.
    pub fn research_count(&self) -> usize {
        self.research_ids.len()
    }

    /// Drain buffered events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
