//! Resource provisioners
//!
//! [`ResourceProvisionerSimple`] hands out bandwidth or RAM units on a first
//! come, first served basis. [`PeProvisionerSimple`] does the same for the
//! MIPS of a single PE and also reports its utilization.

use std::collections::HashMap;

use simplus_core::{PeProvisioner, PolicyError, ResourceProvisioner, Result, VmId};
use tracing::debug;

/// First come, first served provisioner for a single resource
#[derive(Debug, Default)]
pub struct ResourceProvisionerSimple {
    capacity: u64,
    allocations: HashMap<VmId, u64>,
}

impl ResourceProvisionerSimple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provisioner already managing `capacity` units
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            capacity,
            allocations: HashMap::new(),
        }
    }

    fn total_allocated(&self) -> u64 {
        self.allocations.values().sum()
    }
}

impl ResourceProvisioner for ResourceProvisionerSimple {
    fn name(&self) -> &str {
        "Simple"
    }

    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn set_capacity(&mut self, capacity: u64) -> Result<()> {
        let allocated = self.total_allocated();
        if capacity < allocated {
            return Err(PolicyError::CapacityBelowAllocation {
                requested: capacity,
                allocated,
            });
        }
        self.capacity = capacity;
        Ok(())
    }

    fn allocate_resource_for_vm(&mut self, vm_id: VmId, amount: u64) -> bool {
        let previous = self.allocated_resource_for_vm(vm_id);
        if amount > self.available_resource() + previous {
            debug!(vm_id, amount, available = self.available_resource(), "allocation refused");
            return false;
        }
        self.allocations.insert(vm_id, amount);
        true
    }

    fn deallocate_resource_for_vm(&mut self, vm_id: VmId) -> u64 {
        self.allocations.remove(&vm_id).unwrap_or(0)
    }

    fn allocated_resource_for_vm(&self, vm_id: VmId) -> u64 {
        self.allocations.get(&vm_id).copied().unwrap_or(0)
    }

    fn available_resource(&self) -> u64 {
        self.capacity.saturating_sub(self.total_allocated())
    }
}

/// Provisioner for the MIPS of one PE
#[derive(Debug, Default)]
pub struct PeProvisionerSimple {
    mips: ResourceProvisionerSimple,
}

impl PeProvisionerSimple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provisioner for a PE of `mips` capacity
    pub fn with_capacity(mips: u64) -> Self {
        Self {
            mips: ResourceProvisionerSimple::with_capacity(mips),
        }
    }
}

impl ResourceProvisioner for PeProvisionerSimple {
    fn name(&self) -> &str {
        "PeSimple"
    }

    fn capacity(&self) -> u64 {
        self.mips.capacity()
    }

    fn set_capacity(&mut self, capacity: u64) -> Result<()> {
        self.mips.set_capacity(capacity)
    }

    fn allocate_resource_for_vm(&mut self, vm_id: VmId, amount: u64) -> bool {
        self.mips.allocate_resource_for_vm(vm_id, amount)
    }

    fn deallocate_resource_for_vm(&mut self, vm_id: VmId) -> u64 {
        self.mips.deallocate_resource_for_vm(vm_id)
    }

    fn allocated_resource_for_vm(&self, vm_id: VmId) -> u64 {
        self.mips.allocated_resource_for_vm(vm_id)
    }

    fn available_resource(&self) -> u64 {
        self.mips.available_resource()
    }
}

impl PeProvisioner for PeProvisionerSimple {
    fn utilization(&self) -> f64 {
        let capacity = self.capacity();
        if capacity == 0 {
            return 0.0;
        }
        (capacity - self.available_resource()) as f64 / capacity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release() {
        let mut provisioner = ResourceProvisionerSimple::with_capacity(1000);

        assert!(provisioner.allocate_resource_for_vm(1, 600));
        assert!(!provisioner.allocate_resource_for_vm(2, 500));
        assert_eq!(provisioner.allocated_resource_for_vm(2), 0);
        assert!(provisioner.allocate_resource_for_vm(2, 400));
        assert_eq!(provisioner.available_resource(), 0);

        assert_eq!(provisioner.deallocate_resource_for_vm(1), 600);
        assert_eq!(provisioner.deallocate_resource_for_vm(1), 0);
        assert_eq!(provisioner.available_resource(), 600);
    }

    #[test]
    fn test_reallocation_replaces_previous() {
        let mut provisioner = ResourceProvisionerSimple::with_capacity(1000);

        assert!(provisioner.allocate_resource_for_vm(1, 800));
        // Growing to the full capacity is fine: the old 800 is given back first
        assert!(provisioner.allocate_resource_for_vm(1, 1000));
        assert_eq!(provisioner.allocated_resource_for_vm(1), 1000);

        // A refused resize keeps the previous allocation
        assert!(!provisioner.allocate_resource_for_vm(1, 1200));
        assert_eq!(provisioner.allocated_resource_for_vm(1), 1000);
    }

    #[test]
    fn test_capacity_below_allocation() {
        let mut provisioner = ResourceProvisionerSimple::new();
        assert_eq!(provisioner.capacity(), 0);
        assert!(!provisioner.allocate_resource_for_vm(1, 1));

        provisioner.set_capacity(500).unwrap();
        assert!(provisioner.allocate_resource_for_vm(1, 300));

        let err = provisioner.set_capacity(200).unwrap_err();
        assert_eq!(
            err,
            PolicyError::CapacityBelowAllocation {
                requested: 200,
                allocated: 300
            }
        );
        assert_eq!(provisioner.capacity(), 500);
    }

    #[test]
    fn test_pe_utilization() {
        let mut pe = PeProvisionerSimple::with_capacity(1000);
        assert_eq!(pe.utilization(), 0.0);

        assert!(pe.allocate_resource_for_vm(1, 250));
        assert!(pe.allocate_resource_for_vm(2, 250));
        assert_eq!(pe.utilization(), 0.5);

        pe.deallocate_resource_for_vm(1);
        assert_eq!(pe.utilization(), 0.25);
        assert_eq!(PeProvisionerSimple::new().utilization(), 0.0);
    }
}
