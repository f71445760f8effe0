//! Capability traits for Simplus policy families
//!
//! Every concrete policy implements exactly one of these traits (PE
//! provisioners implement [`ResourceProvisioner`] and its [`PeProvisioner`]
//! extension). Callers hold resolved policies as boxed trait objects and
//! never see the concrete type.

use std::fmt::Debug;

use crate::error::Result;
use crate::types::*;

/// Shares the PEs of a host among the VMs placed on it
pub trait VmScheduler: Send + Debug {
    /// Policy name
    fn name(&self) -> &str;

    /// Attach the PEs of the host this scheduler runs on, dropping every allocation
    fn set_host_pes(&mut self, pe_mips: &[f64]) -> Result<()>;

    /// Check whether the requested PEs could be allocated right now
    fn is_suitable_for_vm(&self, requested_mips: &[f64]) -> bool;

    /// Allocate one host share per requested PE.
    /// Returns false, allocating nothing, if the request doesn't fit.
    fn allocate_pes_for_vm(&mut self, vm_id: VmId, requested_mips: &[f64]) -> bool;

    /// Release everything allocated to a VM
    fn deallocate_pes_for_vm(&mut self, vm_id: VmId);

    /// MIPS not allocated to any VM
    fn available_mips(&self) -> f64;
}

/// Picks the host a new VM is placed on
pub trait VmAllocationPolicy: Send + Debug {
    /// Policy name
    fn name(&self) -> &str;

    /// Select a host for the VM.
    ///
    /// Returns `None` if no suitable host is available.
    fn find_host_for_vm(&mut self, hosts: &[HostCandidate], vm: &VmDemand) -> Option<HostId>;
}

/// Shares the capacity of a VM among its cloudlets
pub trait CloudletScheduler: Send + Debug {
    /// Policy name
    fn name(&self) -> &str;

    /// Submit a cloudlet for execution
    fn submit(&mut self, cloudlet: CloudletSpec);

    /// Advance execution by `elapsed_secs` and return the cloudlets that finished
    fn update_processing(&mut self, elapsed_secs: f64, vm: &VmCapacity) -> Vec<CloudletId>;

    /// Number of cloudlets currently executing
    fn running(&self) -> usize;

    /// Number of cloudlets waiting for capacity
    fn waiting(&self) -> usize;

    /// Check if no cloudlet is left
    fn is_empty(&self) -> bool {
        self.running() == 0 && self.waiting() == 0
    }
}

/// Hands out units of a single host resource (bandwidth, RAM, PE MIPS) to VMs
pub trait ResourceProvisioner: Send + Debug {
    /// Policy name
    fn name(&self) -> &str;

    /// Total capacity managed by this provisioner
    fn capacity(&self) -> u64;

    /// Change the managed capacity.
    /// Fails if the new capacity is below what is already allocated.
    fn set_capacity(&mut self, capacity: u64) -> Result<()>;

    /// Allocate `amount` units to a VM, replacing any previous allocation.
    /// Returns false, keeping the previous allocation, if it doesn't fit.
    fn allocate_resource_for_vm(&mut self, vm_id: VmId, amount: u64) -> bool;

    /// Release the allocation of a VM, returning how much was freed
    fn deallocate_resource_for_vm(&mut self, vm_id: VmId) -> u64;

    /// Units currently allocated to a VM
    fn allocated_resource_for_vm(&self, vm_id: VmId) -> u64;

    /// Units not allocated to any VM
    fn available_resource(&self) -> u64;
}

/// Provisioner for the MIPS of a single processing element
pub trait PeProvisioner: ResourceProvisioner {
    /// Fraction of the PE capacity in use, in [0, 1]
    fn utilization(&self) -> f64;
}

/// How much of a resource a cloudlet uses over time
pub trait UtilizationModel: Send + Debug {
    /// Policy name
    fn name(&self) -> &str;

    /// Utilization in [0, 1] at the given simulation time (seconds)
    fn utilization(&mut self, time: f64) -> f64;
}
