//! Simplus Policies
//!
//! Concrete policy variants for every capability family. Each variant has a
//! zero-argument constructor (`new()` / `Default`) so it can be built from an
//! alias alone.
//!
//! - VM schedulers: [`VmSchedulerSpaceShared`], [`VmSchedulerTimeShared`]
//! - VM allocation: [`VmAllocationPolicySimple`], [`VmAllocationPolicyBestFit`],
//!   [`VmAllocationPolicyFirstFit`], [`VmAllocationPolicyRoundRobin`]
//! - Cloudlet schedulers: [`CloudletSchedulerSpaceShared`],
//!   [`CloudletSchedulerTimeShared`], [`CloudletSchedulerCompletelyFair`]
//! - Provisioners: [`ResourceProvisionerSimple`], [`PeProvisionerSimple`]
//! - Utilization: [`UtilizationModelFull`], [`UtilizationModelDynamic`],
//!   [`UtilizationModelStochastic`]

pub mod allocation;
pub mod cloudlet_scheduler;
pub mod provisioner;
pub mod utilization;
pub mod vm_scheduler;

pub use allocation::{
    VmAllocationPolicyBestFit, VmAllocationPolicyFirstFit, VmAllocationPolicyRoundRobin,
    VmAllocationPolicySimple,
};
pub use cloudlet_scheduler::{
    CloudletSchedulerCompletelyFair, CloudletSchedulerSpaceShared, CloudletSchedulerTimeShared,
};
pub use provisioner::{PeProvisionerSimple, ResourceProvisionerSimple};
pub use utilization::{UtilizationModelDynamic, UtilizationModelFull, UtilizationModelStochastic};
pub use vm_scheduler::{VmSchedulerSpaceShared, VmSchedulerTimeShared};
