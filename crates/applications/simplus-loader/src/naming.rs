//! Canonical identifiers for policy aliases
//!
//! A policy is registered under the fully qualified name of its type:
//! `<namespace>.<stem><alias>`, e.g. `VmScheduler` + `TimeShared` in
//! `org.cloudbus.cloudsim.schedulers.vm` gives
//! `org.cloudbus.cloudsim.schedulers.vm.VmSchedulerTimeShared`.
//!
//! Provisioners add one level: the stem is built from a kind prefix, so
//! kind `""` gives `ResourceProvisioner<alias>` and kind `"Pe"` gives
//! `PeProvisioner<alias>`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use simplus_core::CapabilityFamily;

/// Base namespace of every policy family
pub const BASE_PACKAGE: &str = "org.cloudbus.cloudsim";

/// Kind prefix of the generic (bandwidth, RAM) provisioner
pub const DEFAULT_KIND: &str = "";

/// Kind prefix of processing element provisioners
pub const PE_KIND: &str = "Pe";

/// Fully qualified policy type name, the registry lookup key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalId(String);

impl CanonicalId {
    /// Full identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type name without the namespace
    pub fn type_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CanonicalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CanonicalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Namespace the types of a family live in
pub fn namespace(family: CapabilityFamily) -> String {
    let subpackage = match family {
        CapabilityFamily::VmScheduler => "schedulers.vm",
        CapabilityFamily::VmAllocationPolicy => "allocationpolicies",
        CapabilityFamily::CloudletScheduler => "schedulers.cloudlet",
        CapabilityFamily::ResourceProvisioner => "provisioners",
        CapabilityFamily::UtilizationModel => "utilizationmodels",
    };
    format!("{BASE_PACKAGE}.{subpackage}")
}

/// Type name stem of a family; provisioners use the default kind
pub fn stem(family: CapabilityFamily) -> &'static str {
    match family {
        CapabilityFamily::VmScheduler => "VmScheduler",
        CapabilityFamily::VmAllocationPolicy => "VmAllocationPolicy",
        CapabilityFamily::CloudletScheduler => "CloudletScheduler",
        CapabilityFamily::ResourceProvisioner => "ResourceProvisioner",
        CapabilityFamily::UtilizationModel => "UtilizationModel",
    }
}

/// Provisioner stem for a kind prefix
pub fn provisioner_stem(kind_prefix: &str) -> Cow<'static, str> {
    if kind_prefix.is_empty() {
        Cow::Borrowed("ResourceProvisioner")
    } else {
        Cow::Owned(format!("{kind_prefix}Provisioner"))
    }
}

/// `namespace`, a dot, then `stem` and `alias` back to back
pub fn compose(namespace: &str, stem: &str, alias: &str) -> CanonicalId {
    CanonicalId(format!("{namespace}.{stem}{alias}"))
}

/// Identifier of `alias` within a family, provisioners taking the default kind
pub fn canonical_id(family: CapabilityFamily, alias: &str) -> CanonicalId {
    compose(&namespace(family), stem(family), alias)
}

/// Identifier of a provisioner of the given kind
pub fn provisioner_id(kind_prefix: &str, alias: &str) -> CanonicalId {
    compose(
        &namespace(CapabilityFamily::ResourceProvisioner),
        &provisioner_stem(kind_prefix),
        alias,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vm_scheduler_id() {
        let id = canonical_id(CapabilityFamily::VmScheduler, "RoundRobin");
        assert_eq!(
            id.as_str(),
            "org.cloudbus.cloudsim.schedulers.vm.VmSchedulerRoundRobin"
        );
        assert_eq!(id.type_name(), "VmSchedulerRoundRobin");

        // Deterministic
        assert_eq!(id, canonical_id(CapabilityFamily::VmScheduler, "RoundRobin"));
    }

    #[test]
    fn test_direct_families() {
        assert_eq!(
            canonical_id(CapabilityFamily::VmAllocationPolicy, "Simple").as_str(),
            "org.cloudbus.cloudsim.allocationpolicies.VmAllocationPolicySimple"
        );
        assert_eq!(
            canonical_id(CapabilityFamily::CloudletScheduler, "TimeShared").as_str(),
            "org.cloudbus.cloudsim.schedulers.cloudlet.CloudletSchedulerTimeShared"
        );
        assert_eq!(
            canonical_id(CapabilityFamily::UtilizationModel, "Full").as_str(),
            "org.cloudbus.cloudsim.utilizationmodels.UtilizationModelFull"
        );
    }

    #[test]
    fn test_provisioner_stems() {
        assert_eq!(provisioner_stem(""), "ResourceProvisioner");
        assert_eq!(provisioner_stem("Pe"), "PeProvisioner");
        assert_eq!(provisioner_stem("Bw"), "BwProvisioner");
    }

    #[test]
    fn test_provisioner_ids() {
        assert_eq!(
            provisioner_id(DEFAULT_KIND, "Simple").as_str(),
            "org.cloudbus.cloudsim.provisioners.ResourceProvisionerSimple"
        );
        assert_eq!(
            provisioner_id(PE_KIND, "Simple").as_str(),
            "org.cloudbus.cloudsim.provisioners.PeProvisionerSimple"
        );
        // The default kind matches the family stem
        assert_eq!(
            provisioner_id(DEFAULT_KIND, "Simple"),
            canonical_id(CapabilityFamily::ResourceProvisioner, "Simple")
        );
    }

    #[test]
    fn test_no_separator_added() {
        assert_eq!(compose("a.b", "Stem", "Alias").as_str(), "a.b.StemAlias");
        // Empty alias leaves the bare stem
        assert_eq!(compose("a.b", "Stem", "").as_str(), "a.b.Stem");
    }
}
