use std::net::IpAddr;

use surveyor_common::network::target::TargetList;

use super::{Sample, ScanProgress, collect_samples};
use crate::probe::Prober;

/// Sorts samples by ascending latency, failed probes last.
///
/// The sort is stable, so equal latencies and failures keep list order.
pub fn rank(mut samples: Vec<Sample>) -> Vec<Sample> {
    samples.sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));
    samples
}

fn sort_key(sample: &Sample) -> f64 {
    sample.latency_ms.unwrap_or(f64::INFINITY)
}

/// Probes every target once more and returns the samples ranked.
pub async fn rank_by_latency<P>(
    label: &str,
    targets: &TargetList,
    local: IpAddr,
    prober: &mut P,
    progress: &mut dyn ScanProgress,
) -> Vec<Sample>
where
    P: Prober + ?Sized,
{
    rank(collect_samples(label, targets, local, prober, progress).await)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
