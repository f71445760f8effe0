//! VM allocation policies: which host a new VM is placed on
//!
//! ## Strategies
//!
//! - **Simple**: host with the most free PEs (spreads load, worst fit)
//! - **BestFit**: host with the fewest free PEs that still fits (packs hosts)
//! - **FirstFit**: first suitable host in the given order
//! - **RoundRobin**: first suitable host after the one chosen last time

use simplus_core::{HostCandidate, HostId, VmAllocationPolicy, VmDemand};

/// Worst fit: the suitable host with the most free PEs
#[derive(Debug, Default)]
pub struct VmAllocationPolicySimple;

impl VmAllocationPolicySimple {
    pub fn new() -> Self {
        VmAllocationPolicySimple
    }
}

impl VmAllocationPolicy for VmAllocationPolicySimple {
    fn name(&self) -> &str {
        "Simple"
    }

    fn find_host_for_vm(&mut self, hosts: &[HostCandidate], vm: &VmDemand) -> Option<HostId> {
        // max_by_key keeps the last maximum; reverse so ties go to the earliest host
        hosts
            .iter()
            .rev()
            .filter(|h| h.is_suitable_for(vm))
            .max_by_key(|h| h.free_pes)
            .map(|h| h.id)
    }
}

/// Best fit: the suitable host with the fewest free PEs
#[derive(Debug, Default)]
pub struct VmAllocationPolicyBestFit;

impl VmAllocationPolicyBestFit {
    pub fn new() -> Self {
        VmAllocationPolicyBestFit
    }
}

impl VmAllocationPolicy for VmAllocationPolicyBestFit {
    fn name(&self) -> &str {
        "BestFit"
    }

    fn find_host_for_vm(&mut self, hosts: &[HostCandidate], vm: &VmDemand) -> Option<HostId> {
        hosts
            .iter()
            .filter(|h| h.is_suitable_for(vm))
            .min_by_key(|h| h.free_pes)
            .map(|h| h.id)
    }
}

/// First fit: the first suitable host
#[derive(Debug, Default)]
pub struct VmAllocationPolicyFirstFit;

impl VmAllocationPolicyFirstFit {
    pub fn new() -> Self {
        VmAllocationPolicyFirstFit
    }
}

impl VmAllocationPolicy for VmAllocationPolicyFirstFit {
    fn name(&self) -> &str {
        "FirstFit"
    }

    fn find_host_for_vm(&mut self, hosts: &[HostCandidate], vm: &VmDemand) -> Option<HostId> {
        hosts.iter().find(|h| h.is_suitable_for(vm)).map(|h| h.id)
    }
}

/// Round robin: continue scanning after the host chosen last time
#[derive(Debug, Default)]
pub struct VmAllocationPolicyRoundRobin {
    /// Position after the last chosen host
    next_index: usize,
}

impl VmAllocationPolicyRoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VmAllocationPolicy for VmAllocationPolicyRoundRobin {
    fn name(&self) -> &str {
        "RoundRobin"
    }

    fn find_host_for_vm(&mut self, hosts: &[HostCandidate], vm: &VmDemand) -> Option<HostId> {
        if hosts.is_empty() {
            return None;
        }

        let start = self.next_index % hosts.len();
        let index = (0..hosts.len())
            .map(|offset| (start + offset) % hosts.len())
            .find(|i| hosts[*i].is_suitable_for(vm))?;

        self.next_index = index + 1;
        Some(hosts[index].id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts() -> Vec<HostCandidate> {
        vec![
            HostCandidate::new(10, 2, 4096, 1000),
            HostCandidate::new(11, 8, 4096, 1000),
            HostCandidate::new(12, 4, 4096, 1000),
        ]
    }

    #[test]
    fn test_simple_picks_most_free_pes() {
        let mut policy = VmAllocationPolicySimple::new();
        let vm = VmDemand::new(1, 2, 1024, 100);

        assert_eq!(policy.find_host_for_vm(&hosts(), &vm), Some(11));
    }

    #[test]
    fn test_simple_ties_go_to_earliest_host() {
        let mut policy = VmAllocationPolicySimple::new();
        let hosts = vec![
            HostCandidate::new(1, 4, 4096, 1000),
            HostCandidate::new(2, 4, 4096, 1000),
        ];

        assert_eq!(
            policy.find_host_for_vm(&hosts, &VmDemand::new(1, 1, 1, 1)),
            Some(1)
        );
    }

    #[test]
    fn test_best_fit_packs() {
        let mut policy = VmAllocationPolicyBestFit::new();

        let small = VmDemand::new(1, 2, 1024, 100);
        assert_eq!(policy.find_host_for_vm(&hosts(), &small), Some(10));

        let medium = VmDemand::new(2, 3, 1024, 100);
        assert_eq!(policy.find_host_for_vm(&hosts(), &medium), Some(12));
    }

    #[test]
    fn test_first_fit_skips_unsuitable() {
        let mut policy = VmAllocationPolicyFirstFit::new();
        let vm = VmDemand::new(1, 3, 1024, 100);

        assert_eq!(policy.find_host_for_vm(&hosts(), &vm), Some(11));
    }

    #[test]
    fn test_round_robin_rotates() {
        let mut policy = VmAllocationPolicyRoundRobin::new();
        let vm = VmDemand::new(1, 1, 1024, 100);
        let hosts = hosts();

        assert_eq!(policy.find_host_for_vm(&hosts, &vm), Some(10));
        assert_eq!(policy.find_host_for_vm(&hosts, &vm), Some(11));
        assert_eq!(policy.find_host_for_vm(&hosts, &vm), Some(12));
        assert_eq!(policy.find_host_for_vm(&hosts, &vm), Some(10));

        // Host 10 is too small for 4 PEs and gets skipped
        let big = VmDemand::new(2, 4, 1024, 100);
        assert_eq!(policy.find_host_for_vm(&hosts, &big), Some(11));
        assert_eq!(policy.find_host_for_vm(&hosts, &big), Some(12));
        assert_eq!(policy.find_host_for_vm(&hosts, &big), Some(11));
    }

    #[test]
    fn test_no_suitable_host() {
        let vm = VmDemand::new(1, 16, 1024, 100);

        assert_eq!(VmAllocationPolicySimple::new().find_host_for_vm(&hosts(), &vm), None);
        assert_eq!(VmAllocationPolicyBestFit::new().find_host_for_vm(&hosts(), &vm), None);
        assert_eq!(VmAllocationPolicyFirstFit::new().find_host_for_vm(&hosts(), &vm), None);
        assert_eq!(VmAllocationPolicyRoundRobin::new().find_host_for_vm(&hosts(), &vm), None);
        assert_eq!(VmAllocationPolicyRoundRobin::new().find_host_for_vm(&[], &vm), None);
    }
}
