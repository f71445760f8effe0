//! VM schedulers: how the PEs of a host are shared among its VMs
//!
//! - **SpaceShared**: every VM PE takes a whole host PE for itself
//! - **TimeShared**: VM PEs share the total host MIPS, each no larger than the
//!   biggest host PE

use std::collections::HashMap;

use simplus_core::{PolicyError, Result, VmId, VmScheduler};
use tracing::debug;

fn validate_pes(pe_mips: &[f64]) -> Result<()> {
    match pe_mips.iter().find(|mips| !mips.is_finite() || **mips <= 0.0) {
        Some(mips) => Err(PolicyError::invalid_capacity(format!(
            "PE capacity must be a positive MIPS figure, got {mips}"
        ))),
        None => Ok(()),
    }
}

fn is_valid_request(requested_mips: &[f64]) -> bool {
    !requested_mips.is_empty() && requested_mips.iter().all(|m| m.is_finite() && *m > 0.0)
}

/// Space-shared VM scheduler: one host PE per VM PE, no sharing
#[derive(Debug, Default)]
pub struct VmSchedulerSpaceShared {
    pe_mips: Vec<f64>,
    /// Owner of each host PE, indexed like `pe_mips`
    owners: Vec<Option<VmId>>,
}

impl VmSchedulerSpaceShared {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host PEs a request would get, smallest sufficient free PE first
    fn select_pes(&self, requested_mips: &[f64]) -> Option<Vec<usize>> {
        if !is_valid_request(requested_mips) {
            return None;
        }

        let mut requests = requested_mips.to_vec();
        requests.sort_by(|a, b| b.total_cmp(a));

        let mut taken = vec![false; self.pe_mips.len()];
        let mut selected = Vec::with_capacity(requests.len());
        for request in requests {
            let pe = self
                .pe_mips
                .iter()
                .enumerate()
                .filter(|(i, mips)| self.owners[*i].is_none() && !taken[*i] && **mips >= request)
                .min_by(|(_, a), (_, b)| a.total_cmp(b))
                .map(|(i, _)| i)?;
            taken[pe] = true;
            selected.push(pe);
        }
        Some(selected)
    }
}

impl VmScheduler for VmSchedulerSpaceShared {
    fn name(&self) -> &str {
        "SpaceShared"
    }

    fn set_host_pes(&mut self, pe_mips: &[f64]) -> Result<()> {
        validate_pes(pe_mips)?;
        self.pe_mips = pe_mips.to_vec();
        self.owners = vec![None; pe_mips.len()];
        Ok(())
    }

    fn is_suitable_for_vm(&self, requested_mips: &[f64]) -> bool {
        self.select_pes(requested_mips).is_some()
    }

    fn allocate_pes_for_vm(&mut self, vm_id: VmId, requested_mips: &[f64]) -> bool {
        // A VM being resized may reuse the PEs it already holds
        let previous = self.owners.clone();
        self.deallocate_pes_for_vm(vm_id);
        let Some(selected) = self.select_pes(requested_mips) else {
            debug!(vm_id, "not enough free PEs for space-shared allocation");
            self.owners = previous;
            return false;
        };
        for pe in selected {
            self.owners[pe] = Some(vm_id);
        }
        true
    }

    fn deallocate_pes_for_vm(&mut self, vm_id: VmId) {
        for owner in self.owners.iter_mut().filter(|o| **o == Some(vm_id)) {
            *owner = None;
        }
    }

    fn available_mips(&self) -> f64 {
        self.pe_mips
            .iter()
            .zip(&self.owners)
            .filter(|(_, owner)| owner.is_none())
            .map(|(mips, _)| mips)
            .sum()
    }
}

/// Time-shared VM scheduler: VMs share the host MIPS
#[derive(Debug, Default)]
pub struct VmSchedulerTimeShared {
    pe_mips: Vec<f64>,
    allocations: HashMap<VmId, Vec<f64>>,
}

impl VmSchedulerTimeShared {
    pub fn new() -> Self {
        Self::default()
    }

    fn largest_pe(&self) -> f64 {
        self.pe_mips.iter().copied().fold(0.0, f64::max)
    }

    fn fits(&self, requested_mips: &[f64], available: f64) -> bool {
        let largest = self.largest_pe();
        is_valid_request(requested_mips)
            && requested_mips.iter().all(|m| *m <= largest)
            && requested_mips.iter().sum::<f64>() <= available
    }
}

impl VmScheduler for VmSchedulerTimeShared {
    fn name(&self) -> &str {
        "TimeShared"
    }

    fn set_host_pes(&mut self, pe_mips: &[f64]) -> Result<()> {
        validate_pes(pe_mips)?;
        self.pe_mips = pe_mips.to_vec();
        self.allocations.clear();
        Ok(())
    }

    fn is_suitable_for_vm(&self, requested_mips: &[f64]) -> bool {
        self.fits(requested_mips, self.available_mips())
    }

    fn allocate_pes_for_vm(&mut self, vm_id: VmId, requested_mips: &[f64]) -> bool {
        let previous: f64 = self
            .allocations
            .get(&vm_id)
            .map(|mips| mips.iter().sum())
            .unwrap_or(0.0);

        // A VM being resized may reuse what it already holds
        if !self.fits(requested_mips, self.available_mips() + previous) {
            debug!(vm_id, "not enough host MIPS for time-shared allocation");
            return false;
        }
        self.allocations.insert(vm_id, requested_mips.to_vec());
        true
    }

    fn deallocate_pes_for_vm(&mut self, vm_id: VmId) {
        self.allocations.remove(&vm_id);
    }

    fn available_mips(&self) -> f64 {
        let total: f64 = self.pe_mips.iter().sum();
        let allocated: f64 = self.allocations.values().flatten().sum();
        (total - allocated).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_shared_takes_whole_pes() {
        let mut scheduler = VmSchedulerSpaceShared::new();
        scheduler.set_host_pes(&[1000.0, 1000.0, 2000.0]).unwrap();

        // Needs the 2000 MIPS PE
        assert!(scheduler.allocate_pes_for_vm(1, &[1500.0]));
        assert_eq!(scheduler.available_mips(), 2000.0);

        // Half a PE still occupies it entirely
        assert!(scheduler.allocate_pes_for_vm(2, &[500.0]));
        assert_eq!(scheduler.available_mips(), 1000.0);

        // Two PEs requested, one free
        assert!(!scheduler.is_suitable_for_vm(&[500.0, 500.0]));
        assert!(!scheduler.allocate_pes_for_vm(3, &[500.0, 500.0]));
        assert_eq!(scheduler.available_mips(), 1000.0);

        scheduler.deallocate_pes_for_vm(1);
        assert_eq!(scheduler.available_mips(), 3000.0);
        assert!(scheduler.allocate_pes_for_vm(3, &[500.0, 500.0]));
    }

    #[test]
    fn test_space_shared_prefers_smallest_sufficient_pe() {
        let mut scheduler = VmSchedulerSpaceShared::new();
        scheduler.set_host_pes(&[2000.0, 1000.0]).unwrap();

        assert!(scheduler.allocate_pes_for_vm(1, &[800.0]));
        // The large PE is still free for a large request
        assert!(scheduler.allocate_pes_for_vm(2, &[1800.0]));
    }

    #[test]
    fn test_time_shared_shares_mips() {
        let mut scheduler = VmSchedulerTimeShared::new();
        scheduler.set_host_pes(&[1000.0, 1000.0]).unwrap();

        assert!(scheduler.allocate_pes_for_vm(1, &[500.0, 500.0]));
        assert!(scheduler.allocate_pes_for_vm(2, &[700.0]));
        assert_eq!(scheduler.available_mips(), 300.0);

        // A single PE can't exceed the biggest host PE
        scheduler.deallocate_pes_for_vm(2);
        assert!(!scheduler.is_suitable_for_vm(&[1200.0]));

        // Resizing a VM reuses its own allocation
        assert!(scheduler.allocate_pes_for_vm(1, &[1000.0, 1000.0]));
        assert_eq!(scheduler.available_mips(), 0.0);
    }

    #[test]
    fn test_invalid_host_pes() {
        let mut scheduler = VmSchedulerTimeShared::new();
        assert!(scheduler.set_host_pes(&[1000.0, 0.0]).is_err());
        assert!(VmSchedulerSpaceShared::new().set_host_pes(&[f64::NAN]).is_err());
    }

    #[test]
    fn test_empty_request_is_rejected() {
        let mut scheduler = VmSchedulerSpaceShared::new();
        scheduler.set_host_pes(&[1000.0]).unwrap();
        assert!(!scheduler.allocate_pes_for_vm(1, &[]));
    }
}
