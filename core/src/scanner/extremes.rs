use std::net::IpAddr;

use surveyor_common::network::target::{Target, TargetList};

use super::{Sample, ScanProgress, collect_samples};
use crate::probe::Prober;

/// Fastest and slowest responder of one pass.
///
/// The raw fields keep their sentinels (`+inf` and `0`) while nothing has been
/// recorded. Use [`Extremes::fastest`] and [`Extremes::slowest`] for display,
/// they never expose a sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremes {
    pub fastest: Option<Target>,
    pub fastest_ms: f64,
    pub slowest: Option<Target>,
    pub slowest_ms: f64,
}

impl Default for Extremes {
    fn default() -> Self {
        Self {
            fastest: None,
            fastest_ms: f64::INFINITY,
            slowest: None,
            slowest_ms: 0.0,
        }
    }
}

impl Extremes {
    /// Strict comparisons: on ties the first target seen keeps its place.
    pub fn record(&mut self, target: &Target, latency_ms: f64) {
        if latency_ms < self.fastest_ms {
            self.fastest_ms = latency_ms;
            self.fastest = Some(target.clone());
        }
        if latency_ms > self.slowest_ms {
            self.slowest_ms = latency_ms;
            self.slowest = Some(target.clone());
        }
    }

    pub fn from_samples<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        let mut extremes = Self::default();
        for sample in samples {
            if let Some(latency_ms) = sample.latency_ms {
                extremes.record(&sample.target, latency_ms);
            }
        }
        extremes
    }

    pub fn fastest(&self) -> Option<(&Target, f64)> {
        self.fastest.as_ref().map(|target| (target, self.fastest_ms))
    }

    pub fn slowest(&self) -> Option<(&Target, f64)> {
        self.slowest.as_ref().map(|target| (target, self.slowest_ms))
    }
}

/// Probes every target once and keeps the fastest and slowest responder.
pub async fn find_fastest_and_slowest<P>(
    label: &str,
    targets: &TargetList,
    local: IpAddr,
    prober: &mut P,
    progress: &mut dyn ScanProgress,
) -> Extremes
where
    P: Prober + ?Sized,
{
    let samples = collect_samples(label, targets, local, prober, progress).await;
    Extremes::from_samples(&samples)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
