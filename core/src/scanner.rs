//! Scan passes over a target list.
//!
//! A pass probes every target exactly once, in list order, and never reuses a
//! sample from an earlier pass: each of [`extremes`], [`ranking`] and [`average`]
//! measures afresh, so values reported by different passes may differ by jitter.
//!
//! Rendering is kept out of this module. Callers hand in a [`ScanProgress`]
//! that is told when a pass begins, after every target, and when it ends.

use std::net::IpAddr;

use surveyor_common::network::target::{Target, TargetList};
use tracing::{debug, warn};

use crate::probe::Prober;

pub mod average;
pub mod extremes;
pub mod ranking;

pub use average::{average_latency, mean};
pub use extremes::{Extremes, find_fastest_and_slowest};
pub use ranking::{rank, rank_by_latency};

/// Receives progress of a single scan pass.
pub trait ScanProgress {
    fn begin(&mut self, label: &str, total: usize);
    fn advance(&mut self, target: &Target);
    fn finish(&mut self);
}

/// Progress sink that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ScanProgress for NoProgress {
    fn begin(&mut self, _label: &str, _total: usize) {}
    fn advance(&mut self, _target: &Target) {}
    fn finish(&mut self) {}
}

/// One probe result of a pass. `None` means the probe failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub target: Target,
    pub latency_ms: Option<f64>,
}

impl Sample {
    pub fn new(target: Target, latency_ms: Option<f64>) -> Self {
        Self { target, latency_ms }
    }
}

/// Probes every target once, skipping the local address, and returns the samples in list order.
pub async fn collect_samples<P>(
    label: &str,
    targets: &TargetList,
    local: IpAddr,
    prober: &mut P,
    progress: &mut dyn ScanProgress,
) -> Vec<Sample>
where
    P: Prober + ?Sized,
{
    let mut samples = Vec::with_capacity(targets.len());
    progress.begin(label, targets.len());

    for target in targets {
        if !target.is_address(&local) {
            let latency_ms = sample(prober, target).await;
            samples.push(Sample::new(target.clone(), latency_ms));
        }
        progress.advance(target);
    }

    progress.finish();
    samples
}

async fn sample<P>(prober: &mut P, target: &Target) -> Option<f64>
where
    P: Prober + ?Sized,
{
    match prober.probe(target).await {
        Ok(latency_ms) => {
            debug!(host = %target, latency_ms, "Probe succeeded");
            Some(latency_ms)
        }
        Err(e) => {
            warn!("Error while pinging {target}: {e}");
            None
        }
    }
}


// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
