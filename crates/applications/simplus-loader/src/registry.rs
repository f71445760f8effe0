//! Constructor registry
//!
//! Maps canonical identifiers to zero-argument constructors, one table per
//! capability family. A [`PolicyRegistry`] is assembled once through a
//! [`RegistryBuilder`] and is read-only afterwards, so it can be shared by
//! any number of threads without locking.
//!
//! The process-wide registry holding every shipped policy is available
//! through [`PolicyRegistry::global`].

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use simplus_core::{
    CapabilityFamily, CloudletScheduler, PeProvisioner, ResourceProvisioner, UtilizationModel,
    VmAllocationPolicy, VmScheduler,
};
use tracing::{info, warn};

use crate::builtin;
use crate::error::BoxError;
use crate::naming::CanonicalId;

static BUILTIN_REGISTRY: LazyLock<PolicyRegistry> = LazyLock::new(|| {
    let registry = PolicyRegistry::builder().with_builtins().build();
    info!(
        vm_schedulers = registry.vm_schedulers.len(),
        vm_allocation_policies = registry.vm_allocation_policies.len(),
        cloudlet_schedulers = registry.cloudlet_schedulers.len(),
        resource_provisioners = registry.resource_provisioners.len(),
        utilization_models = registry.utilization_models.len(),
        "built-in policy registry initialized"
    );
    registry
});

/// Zero-argument constructor producing a fresh `Box<T>` on every call
pub struct Constructor<T: ?Sized> {
    build: Box<dyn Fn() -> Result<Box<T>, BoxError> + Send + Sync>,
}

impl<T: ?Sized> Constructor<T> {
    fn new<F>(build: F) -> Self
    where
        F: Fn() -> Result<Box<T>, BoxError> + Send + Sync + 'static,
    {
        Self {
            build: Box::new(build),
        }
    }

    /// Build a new instance
    pub fn construct(&self) -> Result<Box<T>, BoxError> {
        (self.build)()
    }
}

impl<T: ?Sized> std::fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Constructor")
    }
}

/// Constructors of a single family
struct Table<T: ?Sized> {
    family: CapabilityFamily,
    entries: HashMap<CanonicalId, Constructor<T>>,
}

impl<T: ?Sized> Table<T> {
    fn new(family: CapabilityFamily) -> Self {
        Self {
            family,
            entries: HashMap::new(),
        }
    }

    fn insert(&mut self, identifier: CanonicalId, constructor: Constructor<T>) {
        if self.entries.contains_key(&identifier) {
            warn!(family = %self.family, %identifier, "replacing registered constructor");
        }
        self.entries.insert(identifier, constructor);
    }

    fn get(&self, identifier: &CanonicalId) -> Option<&Constructor<T>> {
        self.entries.get(identifier)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn identifiers(&self) -> impl Iterator<Item = &CanonicalId> {
        self.entries.keys()
    }
}

/// Assembles a [`PolicyRegistry`]
pub struct RegistryBuilder {
    vm_schedulers: Table<dyn VmScheduler>,
    vm_allocation_policies: Table<dyn VmAllocationPolicy>,
    cloudlet_schedulers: Table<dyn CloudletScheduler>,
    resource_provisioners: Table<dyn ResourceProvisioner>,
    pe_provisioners: Table<dyn PeProvisioner>,
    utilization_models: Table<dyn UtilizationModel>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            vm_schedulers: Table::new(CapabilityFamily::VmScheduler),
            vm_allocation_policies: Table::new(CapabilityFamily::VmAllocationPolicy),
            cloudlet_schedulers: Table::new(CapabilityFamily::CloudletScheduler),
            resource_provisioners: Table::new(CapabilityFamily::ResourceProvisioner),
            pe_provisioners: Table::new(CapabilityFamily::ResourceProvisioner),
            utilization_models: Table::new(CapabilityFamily::UtilizationModel),
        }
    }

    /// Add every shipped policy
    pub fn with_builtins(self) -> Self {
        builtin::register_builtins(self)
    }

    /// Register a VM scheduler constructor
    pub fn register_vm_scheduler<P, F>(mut self, identifier: impl Into<CanonicalId>, build: F) -> Self
    where
        P: VmScheduler + 'static,
        F: Fn() -> Result<P, BoxError> + Send + Sync + 'static,
    {
        self.vm_schedulers.insert(
            identifier.into(),
            Constructor::new(move || build().map(|p| Box::new(p) as Box<dyn VmScheduler>)),
        );
        self
    }

    /// Register a VM allocation policy constructor
    pub fn register_vm_allocation_policy<P, F>(
        mut self,
        identifier: impl Into<CanonicalId>,
        build: F,
    ) -> Self
    where
        P: VmAllocationPolicy + 'static,
        F: Fn() -> Result<P, BoxError> + Send + Sync + 'static,
    {
        self.vm_allocation_policies.insert(
            identifier.into(),
            Constructor::new(move || build().map(|p| Box::new(p) as Box<dyn VmAllocationPolicy>)),
        );
        self
    }

    /// Register a cloudlet scheduler constructor
    pub fn register_cloudlet_scheduler<P, F>(
        mut self,
        identifier: impl Into<CanonicalId>,
        build: F,
    ) -> Self
    where
        P: CloudletScheduler + 'static,
        F: Fn() -> Result<P, BoxError> + Send + Sync + 'static,
    {
        self.cloudlet_schedulers.insert(
            identifier.into(),
            Constructor::new(move || build().map(|p| Box::new(p) as Box<dyn CloudletScheduler>)),
        );
        self
    }

    /// Register a generic resource provisioner constructor
    pub fn register_resource_provisioner<P, F>(
        mut self,
        identifier: impl Into<CanonicalId>,
        build: F,
    ) -> Self
    where
        P: ResourceProvisioner + 'static,
        F: Fn() -> Result<P, BoxError> + Send + Sync + 'static,
    {
        self.resource_provisioners.insert(
            identifier.into(),
            Constructor::new(move || build().map(|p| Box::new(p) as Box<dyn ResourceProvisioner>)),
        );
        self
    }

    /// Register a PE provisioner constructor.
    ///
    /// The identifier resolves both as a PE provisioner and as a generic
    /// resource provisioner.
    pub fn register_pe_provisioner<P, F>(
        mut self,
        identifier: impl Into<CanonicalId>,
        build: F,
    ) -> Self
    where
        P: PeProvisioner + 'static,
        F: Fn() -> Result<P, BoxError> + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        let build = Arc::new(build);
        let as_resource = Arc::clone(&build);

        self.resource_provisioners.insert(
            identifier.clone(),
            Constructor::new(move || {
                as_resource().map(|p| Box::new(p) as Box<dyn ResourceProvisioner>)
            }),
        );
        self.pe_provisioners.insert(
            identifier,
            Constructor::new(move || build().map(|p| Box::new(p) as Box<dyn PeProvisioner>)),
        );
        self
    }

    /// Register a utilization model constructor
    pub fn register_utilization_model<P, F>(
        mut self,
        identifier: impl Into<CanonicalId>,
        build: F,
    ) -> Self
    where
        P: UtilizationModel + 'static,
        F: Fn() -> Result<P, BoxError> + Send + Sync + 'static,
    {
        self.utilization_models.insert(
            identifier.into(),
            Constructor::new(move || build().map(|p| Box::new(p) as Box<dyn UtilizationModel>)),
        );
        self
    }

    /// Freeze the registered constructors
    pub fn build(self) -> PolicyRegistry {
        PolicyRegistry {
            vm_schedulers: self.vm_schedulers,
            vm_allocation_policies: self.vm_allocation_policies,
            cloudlet_schedulers: self.cloudlet_schedulers,
            resource_provisioners: self.resource_provisioners,
            pe_provisioners: self.pe_provisioners,
            utilization_models: self.utilization_models,
        }
    }
}

/// Read-only constructor tables, one per family
pub struct PolicyRegistry {
    vm_schedulers: Table<dyn VmScheduler>,
    vm_allocation_policies: Table<dyn VmAllocationPolicy>,
    cloudlet_schedulers: Table<dyn CloudletScheduler>,
    resource_provisioners: Table<dyn ResourceProvisioner>,
    pe_provisioners: Table<dyn PeProvisioner>,
    utilization_models: Table<dyn UtilizationModel>,
}

impl PolicyRegistry {
    /// Registry of every shipped policy, built on first use
    pub fn global() -> &'static PolicyRegistry {
        &BUILTIN_REGISTRY
    }

    /// Start assembling a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Constructor of a VM scheduler
    pub fn vm_scheduler(&self, identifier: &CanonicalId) -> Option<&Constructor<dyn VmScheduler>> {
        self.vm_schedulers.get(identifier)
    }

    /// Constructor of a VM allocation policy
    pub fn vm_allocation_policy(
        &self,
        identifier: &CanonicalId,
    ) -> Option<&Constructor<dyn VmAllocationPolicy>> {
        self.vm_allocation_policies.get(identifier)
    }

    /// Constructor of a cloudlet scheduler
    pub fn cloudlet_scheduler(
        &self,
        identifier: &CanonicalId,
    ) -> Option<&Constructor<dyn CloudletScheduler>> {
        self.cloudlet_schedulers.get(identifier)
    }

    /// Constructor of a resource provisioner, PE provisioners included
    pub fn resource_provisioner(
        &self,
        identifier: &CanonicalId,
    ) -> Option<&Constructor<dyn ResourceProvisioner>> {
        self.resource_provisioners.get(identifier)
    }

    /// PE provisioners only; generic provisioners are not visible here
    pub fn pe_provisioner(&self, identifier: &CanonicalId) -> Option<&Constructor<dyn PeProvisioner>> {
        self.pe_provisioners.get(identifier)
    }

    /// Constructor of a utilization model
    pub fn utilization_model(
        &self,
        identifier: &CanonicalId,
    ) -> Option<&Constructor<dyn UtilizationModel>> {
        self.utilization_models.get(identifier)
    }

    /// Check if the family has a constructor for the identifier
    pub fn contains(&self, family: CapabilityFamily, identifier: &CanonicalId) -> bool {
        match family {
            CapabilityFamily::VmScheduler => self.vm_schedulers.get(identifier).is_some(),
            CapabilityFamily::VmAllocationPolicy => {
                self.vm_allocation_policies.get(identifier).is_some()
            }
            CapabilityFamily::CloudletScheduler => {
                self.cloudlet_schedulers.get(identifier).is_some()
            }
            CapabilityFamily::ResourceProvisioner => {
                self.resource_provisioners.get(identifier).is_some()
            }
            CapabilityFamily::UtilizationModel => self.utilization_models.get(identifier).is_some(),
        }
    }

    /// Registered identifiers of a family, sorted
    pub fn identifiers(&self, family: CapabilityFamily) -> Vec<&CanonicalId> {
        let mut identifiers: Vec<_> = match family {
            CapabilityFamily::VmScheduler => self.vm_schedulers.identifiers().collect(),
            CapabilityFamily::VmAllocationPolicy => {
                self.vm_allocation_policies.identifiers().collect()
            }
            CapabilityFamily::CloudletScheduler => self.cloudlet_schedulers.identifiers().collect(),
            CapabilityFamily::ResourceProvisioner => {
                self.resource_provisioners.identifiers().collect()
            }
            CapabilityFamily::UtilizationModel => self.utilization_models.identifiers().collect(),
        };
        identifiers.sort();
        identifiers
    }

    /// Number of registered identifiers across all families
    pub fn len(&self) -> usize {
        self.vm_schedulers.len()
            + self.vm_allocation_policies.len()
            + self.cloudlet_schedulers.len()
            + self.resource_provisioners.len()
            + self.utilization_models.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyRegistry")
            .field("vm_schedulers", &self.vm_schedulers.len())
            .field("vm_allocation_policies", &self.vm_allocation_policies.len())
            .field("cloudlet_schedulers", &self.cloudlet_schedulers.len())
            .field("resource_provisioners", &self.resource_provisioners.len())
            .field("pe_provisioners", &self.pe_provisioners.len())
            .field("utilization_models", &self.utilization_models.len())
            .finish()
    }
}
