//! Core types shared across Simplus components

use serde::{Deserialize, Serialize};

/// Identifier of a VM within a scenario
pub type VmId = u64;

/// Identifier of a host within a datacenter
pub type HostId = u64;

/// Identifier of a cloudlet (unit of work submitted to a VM)
pub type CloudletId = u64;

/// The five policy families resolvable from an alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityFamily {
    VmScheduler,
    VmAllocationPolicy,
    CloudletScheduler,
    ResourceProvisioner,
    UtilizationModel,
}

impl CapabilityFamily {
    /// Every family, in resolution-table order
    pub const ALL: [CapabilityFamily; 5] = [
        CapabilityFamily::VmScheduler,
        CapabilityFamily::VmAllocationPolicy,
        CapabilityFamily::CloudletScheduler,
        CapabilityFamily::ResourceProvisioner,
        CapabilityFamily::UtilizationModel,
    ];

    /// Human readable family name, used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityFamily::VmScheduler => "VM scheduler",
            CapabilityFamily::VmAllocationPolicy => "VM allocation policy",
            CapabilityFamily::CloudletScheduler => "cloudlet scheduler",
            CapabilityFamily::ResourceProvisioner => "resource provisioner",
            CapabilityFamily::UtilizationModel => "utilization model",
        }
    }
}

impl std::fmt::Display for CapabilityFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host description as read from a scenario
///
/// Carries the aliases of the VM scheduler and of the bandwidth and PE
/// provisioners each host of this kind uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostRegistry {
    pub name: String,
    pub vm_scheduler_alias: String,
    pub bw_provisioner_alias: String,
    pub pe_provisioner_alias: String,
    pub num_of_pes: u32,
    pub mips_per_pe: f64,
    pub ram: u64,
    pub bw: u64,
    pub storage: u64,
}

impl Default for HostRegistry {
    fn default() -> Self {
        Self {
            name: String::new(),
            vm_scheduler_alias: "TimeShared".to_string(),
            bw_provisioner_alias: "Simple".to_string(),
            pe_provisioner_alias: "Simple".to_string(),
            num_of_pes: 1,
            mips_per_pe: 1000.0,
            ram: 2048,
            bw: 1_000_000,
            storage: 1_000_000,
        }
    }
}

impl HostRegistry {
    /// Create a host record with default resources and aliases
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the VM scheduler alias
    pub fn with_vm_scheduler(mut self, alias: impl Into<String>) -> Self {
        self.vm_scheduler_alias = alias.into();
        self
    }

    /// Set the bandwidth provisioner alias
    pub fn with_bw_provisioner(mut self, alias: impl Into<String>) -> Self {
        self.bw_provisioner_alias = alias.into();
        self
    }

    /// Set the PE provisioner alias
    pub fn with_pe_provisioner(mut self, alias: impl Into<String>) -> Self {
        self.pe_provisioner_alias = alias.into();
        self
    }

    /// Set the number of PEs and the MIPS capacity of each
    pub fn with_pes(mut self, num_of_pes: u32, mips_per_pe: f64) -> Self {
        self.num_of_pes = num_of_pes;
        self.mips_per_pe = mips_per_pe;
        self
    }

    /// MIPS capacity of every PE of this host
    pub fn pe_mips(&self) -> Vec<f64> {
        vec![self.mips_per_pe; self.num_of_pes as usize]
    }
}

/// Datacenter description as read from a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatacenterRegistry {
    pub name: String,
    pub allocation_policy_alias: String,
    pub hosts: Vec<HostRegistry>,
}

impl Default for DatacenterRegistry {
    fn default() -> Self {
        Self {
            name: String::new(),
            allocation_policy_alias: "Simple".to_string(),
            hosts: Vec::new(),
        }
    }
}

impl DatacenterRegistry {
    /// Create a datacenter record with the default allocation policy
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the VM allocation policy alias
    pub fn with_allocation_policy(mut self, alias: impl Into<String>) -> Self {
        self.allocation_policy_alias = alias.into();
        self
    }

    /// Add a host
    pub fn with_host(mut self, host: HostRegistry) -> Self {
        self.hosts.push(host);
        self
    }
}

/// Virtual machine description as read from a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualMachineRegistry {
    pub name: String,
    pub scheduling_policy_alias: String,
    pub pes: u32,
    pub mips: f64,
    pub ram: u64,
    pub bw: u64,
    pub size: u64,
}

impl Default for VirtualMachineRegistry {
    fn default() -> Self {
        Self {
            name: String::new(),
            scheduling_policy_alias: "TimeShared".to_string(),
            pes: 1,
            mips: 1000.0,
            ram: 512,
            bw: 1000,
            size: 10_000,
        }
    }
}

impl VirtualMachineRegistry {
    /// Create a VM record with default resources
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the cloudlet scheduling policy alias
    pub fn with_scheduling_policy(mut self, alias: impl Into<String>) -> Self {
        self.scheduling_policy_alias = alias.into();
        self
    }

    /// Set the number of PEs and the MIPS capacity of each
    pub fn with_pes(mut self, pes: u32, mips: f64) -> Self {
        self.pes = pes;
        self.mips = mips;
        self
    }
}

/// Free resources of a host, as seen by an allocation policy
#[derive(Debug, Clone, PartialEq)]
pub struct HostCandidate {
    pub id: HostId,
    pub free_pes: u32,
    pub free_ram: u64,
    pub free_bw: u64,
    pub active: bool,
}

impl HostCandidate {
    /// Create an idle, active candidate
    pub fn new(id: HostId, free_pes: u32, free_ram: u64, free_bw: u64) -> Self {
        Self {
            id,
            free_pes,
            free_ram,
            free_bw,
            active: true,
        }
    }

    /// Candidate for an idle host built from its scenario record
    pub fn from_registry(id: HostId, host: &HostRegistry) -> Self {
        Self::new(id, host.num_of_pes, host.ram, host.bw)
    }

    /// Mark the host as failed or powered off
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Check whether this host can hold the VM
    pub fn is_suitable_for(&self, vm: &VmDemand) -> bool {
        self.active
            && self.free_pes >= vm.pes
            && self.free_ram >= vm.ram
            && self.free_bw >= vm.bw
    }
}

/// Resources a VM asks from a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmDemand {
    pub id: VmId,
    pub pes: u32,
    pub ram: u64,
    pub bw: u64,
}

impl VmDemand {
    pub fn new(id: VmId, pes: u32, ram: u64, bw: u64) -> Self {
        Self { id, pes, ram, bw }
    }

    /// Demand of a VM built from its scenario record
    pub fn from_registry(id: VmId, vm: &VirtualMachineRegistry) -> Self {
        Self::new(id, vm.pes, vm.ram, vm.bw)
    }
}

/// Processing capacity a cloudlet scheduler has available
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VmCapacity {
    pub pes: u32,
    pub mips: f64,
}

impl VmCapacity {
    pub fn new(pes: u32, mips: f64) -> Self {
        Self { pes, mips }
    }

    /// Total MIPS across every PE
    pub fn total_mips(&self) -> f64 {
        self.pes as f64 * self.mips
    }
}

impl From<&VirtualMachineRegistry> for VmCapacity {
    fn from(vm: &VirtualMachineRegistry) -> Self {
        Self::new(vm.pes, vm.mips)
    }
}

/// A cloudlet submitted to a cloudlet scheduler
#[derive(Debug, Clone, PartialEq)]
pub struct CloudletSpec {
    pub id: CloudletId,
    /// Length in million instructions, per PE
    pub length_mi: f64,
    pub pes: u32,
    /// Nice-style priority: lower runs with a larger share
    pub priority: i32,
}

impl CloudletSpec {
    pub fn new(id: CloudletId, length_mi: f64, pes: u32) -> Self {
        Self {
            id,
            length_mi,
            pes,
            priority: 0,
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_serialization() {
        let json = serde_json::to_string(&CapabilityFamily::VmAllocationPolicy).unwrap();
        assert_eq!(json, "\"vm-allocation-policy\"");

        let parsed: CapabilityFamily = serde_json::from_str("\"utilization-model\"").unwrap();
        assert_eq!(parsed, CapabilityFamily::UtilizationModel);
    }

    #[test]
    fn test_host_registry_camel_case() {
        let json = r#"{
            "name": "h1",
            "vmSchedulerAlias": "SpaceShared",
            "bwProvisionerAlias": "Simple",
            "peProvisionerAlias": "Simple",
            "numOfPes": 4,
            "mipsPerPe": 2500.0
        }"#;
        let host: HostRegistry = serde_json::from_str(json).unwrap();

        assert_eq!(host.vm_scheduler_alias, "SpaceShared");
        assert_eq!(host.num_of_pes, 4);
        assert_eq!(host.pe_mips(), vec![2500.0; 4]);
        // Missing fields fall back to defaults
        assert_eq!(host.ram, 2048);
    }

    #[test]
    fn test_host_candidate_suitability() {
        let host = HostCandidate::new(1, 4, 4096, 1000);

        assert!(host.is_suitable_for(&VmDemand::new(1, 4, 4096, 1000)));
        assert!(!host.is_suitable_for(&VmDemand::new(2, 5, 1024, 100)));
        assert!(!host.is_suitable_for(&VmDemand::new(3, 1, 8192, 100)));
        assert!(!host.inactive().is_suitable_for(&VmDemand::new(4, 1, 1, 1)));
    }

    #[test]
    fn test_registry_builders() {
        let dc = DatacenterRegistry::new("dc-1")
            .with_allocation_policy("BestFit")
            .with_host(HostRegistry::new("h1").with_pes(8, 1000.0));

        assert_eq!(dc.allocation_policy_alias, "BestFit");
        assert_eq!(dc.hosts.len(), 1);

        let vm = VirtualMachineRegistry::new("vm-1")
            .with_scheduling_policy("SpaceShared")
            .with_pes(2, 500.0);
        assert_eq!(VmCapacity::from(&vm).total_mips(), 1000.0);
    }
}
