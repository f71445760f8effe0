//! Policy loader
//!
//! Turns aliases from scenario records into policy instances:
//!
//! 1. **Compose**: build the canonical identifier for the family and alias
//! 2. **Lookup**: find the constructor in that family's table
//! 3. **Construct**: call it, handing a fresh instance to the caller
//!
//! Failures are logged and returned as [`LoaderError`]; nothing falls back
//! to a default policy and nothing is retried.

use simplus_core::{
    CapabilityFamily, CloudletScheduler, DatacenterRegistry, HostRegistry, PeProvisioner,
    ResourceProvisioner, UtilizationModel, VirtualMachineRegistry, VmAllocationPolicy,
    VmScheduler,
};
use tracing::{debug, error};

use crate::error::{LoaderError, Result};
use crate::naming::{canonical_id, provisioner_id, CanonicalId, DEFAULT_KIND, PE_KIND};
use crate::registry::{Constructor, PolicyRegistry};

/// Resolves policy aliases against a registry
#[derive(Debug, Clone, Copy)]
pub struct PolicyLoader<'r> {
    registry: &'r PolicyRegistry,
}

impl PolicyLoader<'static> {
    /// Loader over the built-in registry
    pub fn global() -> Self {
        Self::new(PolicyRegistry::global())
    }
}

impl Default for PolicyLoader<'static> {
    fn default() -> Self {
        Self::global()
    }
}

impl<'r> PolicyLoader<'r> {
    /// Create a loader over a specific registry
    pub fn new(registry: &'r PolicyRegistry) -> Self {
        Self { registry }
    }

    /// Registry this loader resolves against
    pub fn registry(&self) -> &'r PolicyRegistry {
        self.registry
    }

    /// VM scheduler for an alias such as `TimeShared`
    pub fn vm_scheduler(&self, alias: &str) -> Result<Box<dyn VmScheduler>> {
        let family = CapabilityFamily::VmScheduler;
        let identifier = canonical_id(family, alias);
        let constructor = self.registry.vm_scheduler(&identifier);
        instantiate(family, alias, identifier, constructor)
    }

    /// VM scheduler named by a host record
    pub fn host_vm_scheduler(&self, host: &HostRegistry) -> Result<Box<dyn VmScheduler>> {
        self.vm_scheduler(&host.vm_scheduler_alias)
    }

    /// Resource provisioner of a given kind.
    ///
    /// With kind `""` and alias `Simple` this resolves
    /// `ResourceProvisionerSimple`; with kind `"Pe"`, `PeProvisionerSimple`.
    pub fn resource_provisioner(
        &self,
        kind_prefix: &str,
        alias: &str,
    ) -> Result<Box<dyn ResourceProvisioner>> {
        let identifier = provisioner_id(kind_prefix, alias);
        let constructor = self.registry.resource_provisioner(&identifier);
        instantiate(CapabilityFamily::ResourceProvisioner, alias, identifier, constructor)
    }

    /// Bandwidth provisioner named by a host record
    pub fn new_resource_provisioner(
        &self,
        host: &HostRegistry,
    ) -> Result<Box<dyn ResourceProvisioner>> {
        self.resource_provisioner(DEFAULT_KIND, &host.bw_provisioner_alias)
    }

    /// PE provisioner named by a host record
    pub fn new_pe_provisioner(&self, host: &HostRegistry) -> Result<Box<dyn PeProvisioner>> {
        let alias = host.pe_provisioner_alias.as_str();
        let identifier = provisioner_id(PE_KIND, alias);
        let constructor = self.registry.pe_provisioner(&identifier);
        instantiate(CapabilityFamily::ResourceProvisioner, alias, identifier, constructor)
    }

    /// VM allocation policy named by a datacenter record
    pub fn vm_allocation_policy(
        &self,
        datacenter: &DatacenterRegistry,
    ) -> Result<Box<dyn VmAllocationPolicy>> {
        let family = CapabilityFamily::VmAllocationPolicy;
        let alias = datacenter.allocation_policy_alias.as_str();
        let identifier = canonical_id(family, alias);
        let constructor = self.registry.vm_allocation_policy(&identifier);
        instantiate(family, alias, identifier, constructor)
    }

    /// Cloudlet scheduler named by a VM record
    pub fn cloudlet_scheduler(
        &self,
        vm: &VirtualMachineRegistry,
    ) -> Result<Box<dyn CloudletScheduler>> {
        let family = CapabilityFamily::CloudletScheduler;
        let alias = vm.scheduling_policy_alias.as_str();
        let identifier = canonical_id(family, alias);
        let constructor = self.registry.cloudlet_scheduler(&identifier);
        instantiate(family, alias, identifier, constructor)
    }

    /// Utilization model for an alias such as `Full`
    pub fn utilization_model(&self, alias: &str) -> Result<Box<dyn UtilizationModel>> {
        let family = CapabilityFamily::UtilizationModel;
        let identifier = canonical_id(family, alias);
        let constructor = self.registry.utilization_model(&identifier);
        instantiate(family, alias, identifier, constructor)
    }

    /// Resolve an alias of any family.
    ///
    /// `kind_prefix` only applies to provisioners and is ignored otherwise.
    pub fn resolve(
        &self,
        family: CapabilityFamily,
        kind_prefix: &str,
        alias: &str,
    ) -> Result<Resolution> {
        let identifier = match family {
            CapabilityFamily::ResourceProvisioner => provisioner_id(kind_prefix, alias),
            _ => canonical_id(family, alias),
        };
        let registry = self.registry;
        let id = identifier.clone();

        let policy = match family {
            CapabilityFamily::VmScheduler => ResolvedPolicy::VmScheduler(instantiate(
                family,
                alias,
                id,
                registry.vm_scheduler(&identifier),
            )?),
            CapabilityFamily::VmAllocationPolicy => ResolvedPolicy::VmAllocationPolicy(
                instantiate(family, alias, id, registry.vm_allocation_policy(&identifier))?,
            ),
            CapabilityFamily::CloudletScheduler => ResolvedPolicy::CloudletScheduler(instantiate(
                family,
                alias,
                id,
                registry.cloudlet_scheduler(&identifier),
            )?),
            CapabilityFamily::ResourceProvisioner => ResolvedPolicy::ResourceProvisioner(
                instantiate(family, alias, id, registry.resource_provisioner(&identifier))?,
            ),
            CapabilityFamily::UtilizationModel => ResolvedPolicy::UtilizationModel(instantiate(
                family,
                alias,
                id,
                registry.utilization_model(&identifier),
            )?),
        };
        Ok(Resolution { identifier, policy })
    }
}

/// Outcome of [`PolicyLoader::resolve`]
#[derive(Debug)]
pub struct Resolution {
    /// Identifier the policy was looked up under
    pub identifier: CanonicalId,
    /// The constructed policy
    pub policy: ResolvedPolicy,
}

/// A policy of any family
#[derive(Debug)]
pub enum ResolvedPolicy {
    /// VM scheduler
    VmScheduler(Box<dyn VmScheduler>),
    /// VM allocation policy
    VmAllocationPolicy(Box<dyn VmAllocationPolicy>),
    /// Cloudlet scheduler
    CloudletScheduler(Box<dyn CloudletScheduler>),
    /// Resource provisioner of any kind
    ResourceProvisioner(Box<dyn ResourceProvisioner>),
    /// Utilization model
    UtilizationModel(Box<dyn UtilizationModel>),
}

impl ResolvedPolicy {
    /// Family of the resolved policy
    pub fn family(&self) -> CapabilityFamily {
        match self {
            ResolvedPolicy::VmScheduler(_) => CapabilityFamily::VmScheduler,
            ResolvedPolicy::VmAllocationPolicy(_) => CapabilityFamily::VmAllocationPolicy,
            ResolvedPolicy::CloudletScheduler(_) => CapabilityFamily::CloudletScheduler,
            ResolvedPolicy::ResourceProvisioner(_) => CapabilityFamily::ResourceProvisioner,
            ResolvedPolicy::UtilizationModel(_) => CapabilityFamily::UtilizationModel,
        }
    }

    /// Name the policy reports for itself
    pub fn name(&self) -> &str {
        match self {
            ResolvedPolicy::VmScheduler(p) => p.name(),
            ResolvedPolicy::VmAllocationPolicy(p) => p.name(),
            ResolvedPolicy::CloudletScheduler(p) => p.name(),
            ResolvedPolicy::ResourceProvisioner(p) => p.name(),
            ResolvedPolicy::UtilizationModel(p) => p.name(),
        }
    }
}

/// Call the constructor found for `identifier`, or report why there is none
fn instantiate<T: ?Sized>(
    family: CapabilityFamily,
    alias: &str,
    identifier: CanonicalId,
    constructor: Option<&Constructor<T>>,
) -> Result<Box<T>> {
    let Some(constructor) = constructor else {
        error!(%family, alias, %identifier, "no policy registered for alias");
        return Err(LoaderError::UnknownAlias {
            family,
            alias: alias.to_string(),
            identifier,
        });
    };

    match constructor.construct() {
        Ok(policy) => {
            debug!(%family, alias, %identifier, "resolved policy");
            Ok(policy)
        }
        Err(source) => {
            error!(%family, alias, %identifier, error = %source, "policy constructor failed");
            Err(LoaderError::Construction {
                family,
                alias: alias.to_string(),
                identifier,
                source,
            })
        }
    }
}
