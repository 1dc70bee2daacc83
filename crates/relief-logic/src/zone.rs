//! Affected zones, the two relief resources and the camp's supply pool.

use serde::{Deserialize, Serialize};

/// Zone identifier. Usually a node of the road graph, but not required to be.
pub type ZoneId = i64;

/// The two resources shipped from the camp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Food,
    Water,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Food, Resource::Water];

    pub fn name(self) -> &'static str {
        match self {
            Resource::Food => "food",
            Resource::Water => "water",
        }
    }
}

/// An affected zone and its outstanding demand.
///
/// Demands shrink as allocations commit; the zone itself is never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    /// Food units still required.
    pub food_demand: u32,
    /// Water units still required.
    pub water_demand: u32,
    /// Higher = more critical.
    pub urgency: u32,
}

impl Zone {
    pub fn new(id: ZoneId, food_demand: u32, water_demand: u32, urgency: u32) -> Self {
        Self {
            id,
            food_demand,
            water_demand,
            urgency,
        }
    }

    pub fn demand(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Food => self.food_demand,
            Resource::Water => self.water_demand,
        }
    }

    fn demand_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Food => &mut self.food_demand,
            Resource::Water => &mut self.water_demand,
        }
    }

    /// Lower the outstanding demand by `amount`, never below zero.
    pub fn receive(&mut self, resource: Resource, amount: u32) {
        let demand = self.demand_mut(resource);
        *demand = demand.saturating_sub(amount);
    }

    /// Nothing left to send.
    pub fn is_satisfied(&self) -> bool {
        self.food_demand == 0 && self.water_demand == 0
    }

    pub fn tier(&self) -> UrgencyTier {
        UrgencyTier::from_urgency(self.urgency)
    }
}

/// Remaining stock at the camp. Only ever decreases during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyPool {
    pub food: u32,
    pub water: u32,
}

impl SupplyPool {
    pub fn new(food: u32, water: u32) -> Self {
        Self { food, water }
    }

    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Food => self.food,
            Resource::Water => self.water,
        }
    }

    /// Remove up to `amount`, returning how much was actually taken.
    pub fn take(&mut self, resource: Resource, amount: u32) -> u32 {
        let stock = match resource {
            Resource::Food => &mut self.food,
            Resource::Water => &mut self.water,
        };
        let taken = amount.min(*stock);
        *stock -= taken;
        taken
    }

    /// Both pools are empty.
    pub fn is_exhausted(&self) -> bool {
        self.food == 0 && self.water == 0
    }
}

/// Display band for urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UrgencyTier {
    Normal,
    High,
    Critical,
}

impl UrgencyTier {
    pub const HIGH_THRESHOLD: u32 = 50;
    pub const CRITICAL_THRESHOLD: u32 = 80;

    pub fn from_urgency(urgency: u32) -> Self {
        if urgency >= Self::CRITICAL_THRESHOLD {
            UrgencyTier::Critical
        } else if urgency >= Self::HIGH_THRESHOLD {
            UrgencyTier::High
        } else {
            UrgencyTier::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UrgencyTier::Normal => "normal",
            UrgencyTier::High => "high",
            UrgencyTier::Critical => "critical",
        }
    }
}
