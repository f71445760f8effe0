//! Cloudlet schedulers: how the capacity of a VM is shared among its cloudlets
//!
//! - **SpaceShared**: FIFO, a cloudlet runs only when enough VM PEs are free;
//!   one needing more PEs than the VM has is rejected instead of queued forever
//! - **TimeShared**: every cloudlet runs, sharing the VM PEs equally
//! - **CompletelyFair**: every cloudlet runs, with a share weighted by its
//!   nice-style priority
//!
//! Processing is advanced in coarse steps: a cloudlet that finishes inside a
//! step frees its capacity for the next step only.

use std::collections::VecDeque;

use simplus_core::{CloudletId, CloudletScheduler, CloudletSpec, VmCapacity};
use tracing::warn;

/// Tolerance below which remaining work counts as done
const FINISHED_EPSILON: f64 = 1e-9;

/// A cloudlet being executed
#[derive(Debug, Clone)]
struct Execution {
    spec: CloudletSpec,
    /// Million instructions left, per PE
    remaining_mi: f64,
}

impl Execution {
    fn new(spec: CloudletSpec) -> Self {
        let remaining_mi = spec.length_mi.max(0.0);
        Self { spec, remaining_mi }
    }
}

/// Run every execution at its per-PE rate and drain the finished ones
fn advance(
    executions: &mut Vec<Execution>,
    elapsed_secs: f64,
    per_pe_mips: impl Fn(&Execution) -> f64,
) -> Vec<CloudletId> {
    let elapsed = elapsed_secs.max(0.0);
    for execution in executions.iter_mut() {
        execution.remaining_mi -= per_pe_mips(execution) * elapsed;
    }

    let mut finished = Vec::new();
    executions.retain(|e| {
        if e.remaining_mi <= FINISHED_EPSILON {
            finished.push(e.spec.id);
            false
        } else {
            true
        }
    });
    finished
}

/// PEs asked for by a set of executions
fn requested_pes(executions: &[Execution]) -> u64 {
    executions.iter().map(|e| u64::from(e.spec.pes)).sum()
}

/// Space-shared cloudlet scheduler
#[derive(Debug, Default)]
pub struct CloudletSchedulerSpaceShared {
    running: Vec<Execution>,
    waiting: VecDeque<CloudletSpec>,
    rejected: Vec<CloudletId>,
}

impl CloudletSchedulerSpaceShared {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cloudlets dropped because they need more PEs than the VM has
    pub fn rejected(&self) -> &[CloudletId] {
        &self.rejected
    }

    /// Move waiting cloudlets to execution, in order, while PEs are free
    fn admit_waiting(&mut self, vm: &VmCapacity) {
        while let Some(next) = self.waiting.front() {
            if next.pes > vm.pes {
                warn!(
                    cloudlet = next.id,
                    pes = next.pes,
                    vm_pes = vm.pes,
                    "cloudlet can never fit the VM, rejecting"
                );
                self.rejected.push(next.id);
                self.waiting.pop_front();
                continue;
            }
            if requested_pes(&self.running) + u64::from(next.pes) > u64::from(vm.pes) {
                break;
            }
            if let Some(spec) = self.waiting.pop_front() {
                self.running.push(Execution::new(spec));
            }
        }
    }
}

impl CloudletScheduler for CloudletSchedulerSpaceShared {
    fn name(&self) -> &str {
        "SpaceShared"
    }

    fn submit(&mut self, cloudlet: CloudletSpec) {
        self.waiting.push_back(cloudlet);
    }

    fn update_processing(&mut self, elapsed_secs: f64, vm: &VmCapacity) -> Vec<CloudletId> {
        self.admit_waiting(vm);
        let finished = advance(&mut self.running, elapsed_secs, |_| vm.mips);
        self.admit_waiting(vm);
        finished
    }

    fn running(&self) -> usize {
        self.running.len()
    }

    fn waiting(&self) -> usize {
        self.waiting.len()
    }
}

/// Time-shared cloudlet scheduler
#[derive(Debug, Default)]
pub struct CloudletSchedulerTimeShared {
    running: Vec<Execution>,
}

impl CloudletSchedulerTimeShared {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CloudletScheduler for CloudletSchedulerTimeShared {
    fn name(&self) -> &str {
        "TimeShared"
    }

    fn submit(&mut self, cloudlet: CloudletSpec) {
        self.running.push(Execution::new(cloudlet));
    }

    fn update_processing(&mut self, elapsed_secs: f64, vm: &VmCapacity) -> Vec<CloudletId> {
        let requested = requested_pes(&self.running);
        // Oversubscribed PEs slow every cloudlet down evenly
        let share = if requested > u64::from(vm.pes) {
            vm.pes as f64 / requested as f64
        } else {
            1.0
        };
        advance(&mut self.running, elapsed_secs, |_| vm.mips * share)
    }

    fn running(&self) -> usize {
        self.running.len()
    }

    fn waiting(&self) -> usize {
        0
    }
}

/// Completely fair cloudlet scheduler
#[derive(Debug, Default)]
pub struct CloudletSchedulerCompletelyFair {
    running: Vec<Execution>,
}

impl CloudletSchedulerCompletelyFair {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nice-style weight: each priority step changes the share by 25%
    fn weight(priority: i32) -> f64 {
        1024.0 / 1.25_f64.powi(priority)
    }
}

impl CloudletScheduler for CloudletSchedulerCompletelyFair {
    fn name(&self) -> &str {
        "CompletelyFair"
    }

    fn submit(&mut self, cloudlet: CloudletSpec) {
        self.running.push(Execution::new(cloudlet));
    }

    fn update_processing(&mut self, elapsed_secs: f64, vm: &VmCapacity) -> Vec<CloudletId> {
        let total_weight: f64 = self
            .running
            .iter()
            .map(|e| Self::weight(e.spec.priority))
            .sum();
        let total_mips = vm.total_mips();

        advance(&mut self.running, elapsed_secs, |e| {
            let share = total_mips * Self::weight(e.spec.priority) / total_weight;
            // No cloudlet runs a PE faster than the VM PE itself
            (share / e.spec.pes.max(1) as f64).min(vm.mips)
        })
    }

    fn running(&self) -> usize {
        self.running.len()
    }

    fn waiting(&self) -> usize {
        0
    }
}
