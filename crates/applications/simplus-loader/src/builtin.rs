//! Catalogue of shipped policies
//!
//! Every alias a scenario may use is listed here, in the identifier form the
//! loader composes for it.

use simplus_core::CapabilityFamily;
use simplus_policies::{
    CloudletSchedulerCompletelyFair, CloudletSchedulerSpaceShared, CloudletSchedulerTimeShared,
    PeProvisionerSimple, ResourceProvisionerSimple, UtilizationModelDynamic, UtilizationModelFull,
    UtilizationModelStochastic, VmAllocationPolicyBestFit, VmAllocationPolicyFirstFit,
    VmAllocationPolicyRoundRobin, VmAllocationPolicySimple, VmSchedulerSpaceShared,
    VmSchedulerTimeShared,
};

use crate::naming::{canonical_id, provisioner_id, DEFAULT_KIND, PE_KIND};
use crate::registry::RegistryBuilder;

/// Aliases of the VM schedulers
pub const VM_SCHEDULER_ALIASES: &[&str] = &["SpaceShared", "TimeShared"];

/// Aliases of the VM allocation policies
pub const VM_ALLOCATION_POLICY_ALIASES: &[&str] = &["Simple", "BestFit", "FirstFit", "RoundRobin"];

/// Aliases of the cloudlet schedulers
pub const CLOUDLET_SCHEDULER_ALIASES: &[&str] = &["SpaceShared", "TimeShared", "CompletelyFair"];

/// Aliases of the generic resource provisioners
pub const RESOURCE_PROVISIONER_ALIASES: &[&str] = &["Simple"];

/// Aliases of the PE provisioners
pub const PE_PROVISIONER_ALIASES: &[&str] = &["Simple"];

/// Aliases of the utilization models
pub const UTILIZATION_MODEL_ALIASES: &[&str] = &["Full", "Dynamic", "Stochastic"];

/// Register every shipped policy
pub(crate) fn register_builtins(builder: RegistryBuilder) -> RegistryBuilder {
    use CapabilityFamily::*;

    builder
        .register_vm_scheduler(canonical_id(VmScheduler, "SpaceShared"), || {
            Ok(VmSchedulerSpaceShared::new())
        })
        .register_vm_scheduler(canonical_id(VmScheduler, "TimeShared"), || {
            Ok(VmSchedulerTimeShared::new())
        })
        .register_vm_allocation_policy(canonical_id(VmAllocationPolicy, "Simple"), || {
            Ok(VmAllocationPolicySimple::new())
        })
        .register_vm_allocation_policy(canonical_id(VmAllocationPolicy, "BestFit"), || {
            Ok(VmAllocationPolicyBestFit::new())
        })
        .register_vm_allocation_policy(canonical_id(VmAllocationPolicy, "FirstFit"), || {
            Ok(VmAllocationPolicyFirstFit::new())
        })
        .register_vm_allocation_policy(canonical_id(VmAllocationPolicy, "RoundRobin"), || {
            Ok(VmAllocationPolicyRoundRobin::new())
        })
        .register_cloudlet_scheduler(canonical_id(CloudletScheduler, "SpaceShared"), || {
            Ok(CloudletSchedulerSpaceShared::new())
        })
        .register_cloudlet_scheduler(canonical_id(CloudletScheduler, "TimeShared"), || {
            Ok(CloudletSchedulerTimeShared::new())
        })
        .register_cloudlet_scheduler(canonical_id(CloudletScheduler, "CompletelyFair"), || {
            Ok(CloudletSchedulerCompletelyFair::new())
        })
        .register_resource_provisioner(provisioner_id(DEFAULT_KIND, "Simple"), || {
            Ok(ResourceProvisionerSimple::new())
        })
        .register_pe_provisioner(provisioner_id(PE_KIND, "Simple"), || {
            Ok(PeProvisionerSimple::new())
        })
        .register_utilization_model(canonical_id(UtilizationModel, "Full"), || {
            Ok(UtilizationModelFull::new())
        })
        .register_utilization_model(canonical_id(UtilizationModel, "Dynamic"), || {
            Ok(UtilizationModelDynamic::new())
        })
        .register_utilization_model(canonical_id(UtilizationModel, "Stochastic"), || {
            Ok(UtilizationModelStochastic::new())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_matches_aliases() {
        use CapabilityFamily::*;
        let registry = RegistryBuilder::new().with_builtins().build();

        for alias in VM_SCHEDULER_ALIASES {
            assert!(registry.contains(VmScheduler, &canonical_id(VmScheduler, alias)));
        }
        for alias in VM_ALLOCATION_POLICY_ALIASES {
            assert!(registry.contains(VmAllocationPolicy, &canonical_id(VmAllocationPolicy, alias)));
        }
        for alias in CLOUDLET_SCHEDULER_ALIASES {
            assert!(registry.contains(CloudletScheduler, &canonical_id(CloudletScheduler, alias)));
        }
        for alias in RESOURCE_PROVISIONER_ALIASES {
            assert!(registry.resource_provisioner(&provisioner_id(DEFAULT_KIND, alias)).is_some());
        }
        for alias in PE_PROVISIONER_ALIASES {
            assert!(registry.pe_provisioner(&provisioner_id(PE_KIND, alias)).is_some());
        }
        for alias in UTILIZATION_MODEL_ALIASES {
            assert!(registry.contains(UtilizationModel, &canonical_id(UtilizationModel, alias)));
        }

        let expected = VM_SCHEDULER_ALIASES.len()
            + VM_ALLOCATION_POLICY_ALIASES.len()
            + CLOUDLET_SCHEDULER_ALIASES.len()
            + RESOURCE_PROVISIONER_ALIASES.len()
            + PE_PROVISIONER_ALIASES.len()
            + UTILIZATION_MODEL_ALIASES.len();
        assert_eq!(registry.len(), expected);
    }
}
