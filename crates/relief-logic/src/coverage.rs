//! How well an allocation plan covered demand.

use serde::{Deserialize, Serialize};

use crate::allocation::AllocationPlan;
use crate::zone::{Resource, Zone};

/// Per-resource tallies over all zones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCoverage {
    /// Zones that received their whole demand (and something).
    pub fully: usize,
    /// Zones that received some but not all.
    pub partial: usize,
    /// Zones that received nothing.
    pub none: usize,
    pub total_demand: u64,
    pub total_sent: u64,
}

impl ResourceCoverage {
    /// Sent as a percentage of demand; 0 when there was no demand.
    pub fn percent(&self) -> f64 {
        if self.total_demand == 0 {
            0.0
        } else {
            self.total_sent as f64 / self.total_demand as f64 * 100.0
        }
    }

    fn record(&mut self, demand: u32, sent: u32) {
        self.total_demand += u64::from(demand);
        self.total_sent += u64::from(sent);
        if sent == 0 {
            self.none += 1;
        } else if sent >= demand {
            self.fully += 1;
        } else {
            self.partial += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub zones: usize,
    pub food: ResourceCoverage,
    pub water: ResourceCoverage,
}

impl CoverageReport {
    /// Tally `plan` against `zones`, the demands as they stood before the run.
    ///
    /// Zones are matched to transfers by position, so duplicate ids are fine.
    pub fn compute(zones: &[Zone], plan: &AllocationPlan) -> Self {
        let mut sent = vec![(0u32, 0u32); zones.len()];
        for t in &plan.transfers {
            if let Some(slot) = sent.get_mut(t.zone_index) {
                slot.0 += t.food.sent;
                slot.1 += t.water.sent;
            }
        }

        let mut report = CoverageReport {
            zones: zones.len(),
            ..Default::default()
        };
        for (zone, &(food, water)) in zones.iter().zip(&sent) {
            report.food.record(zone.food_demand, food);
            report.water.record(zone.water_demand, water);
        }
        report
    }

    pub fn resource(&self, resource: Resource) -> &ResourceCoverage {
        match resource {
            Resource::Food => &self.food,
            Resource::Water => &self.water,
        }
    }
}
