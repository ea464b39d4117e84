//! The survey pipeline.
//!
//! Four independent scan passes run one after another over a target list that
//! never contains the local address:
//!
//! 1. fastest and slowest of the whole list,
//! 2. fastest of the list once the first fastest is removed,
//! 3. every remaining target ranked by latency,
//! 4. the average latency of the remaining targets.
//!
//! Each completed phase is handed to a [`SurveyObserver`] as soon as it is known,
//! and everything is collected into the returned [`SurveyReport`].

use std::net::IpAddr;

use surveyor_common::info;
use surveyor_common::network::target::{Target, TargetList};
use thiserror::Error;
use tracing::debug;

use crate::probe::Prober;
use crate::scanner::{self, Extremes, Sample, ScanProgress};

const FIRST_PASS: &str = "Checking speed";
const SECOND_PASS: &str = "Checking speed without the fastest";
const RANKING_PASS: &str = "Ranking servers";
const AVERAGE_PASS: &str = "Averaging response times";

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("the target list is empty")]
    NoTargets,
}

/// Why the second scan did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than two targets, removing one would leave nothing to compare.
    TooFewTargets,
    /// Every probe of the first scan failed, so there is no fastest to remove.
    NoFastest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SecondScan {
    Skipped(SkipReason),
    Completed { excluded: Target, extremes: Extremes },
}

/// A finished phase, as reported to observers.
#[derive(Debug, Clone, Copy)]
pub enum Phase<'a> {
    FirstScan(&'a Extremes),
    SecondScan(&'a SecondScan),
    Ranking(&'a [Sample]),
    Average(Option<f64>),
}

pub trait SurveyObserver {
    fn on_phase(&mut self, phase: Phase<'_>);
}

/// Observer that ignores every phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SurveyObserver for Silent {
    fn on_phase(&mut self, _phase: Phase<'_>) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurveyReport {
    pub first: Extremes,
    pub second: SecondScan,
    pub ranking: Vec<Sample>,
    pub average: Option<f64>,
}

/// Runs the whole survey.
///
/// An empty list is rejected before anything is probed. The local address is
/// filtered out first, even though a well-formed list should not contain it.
pub async fn run<P>(
    targets: TargetList,
    local: IpAddr,
    prober: &mut P,
    progress: &mut dyn ScanProgress,
    observer: &mut dyn SurveyObserver,
) -> Result<SurveyReport, SurveyError>
where
    P: Prober + ?Sized,
{
    if targets.is_empty() {
        return Err(SurveyError::NoTargets);
    }

    let before = targets.len();
    let mut targets = targets.without(&local);
    if targets.len() != before {
        info!("Excluded the local address {local} from the target list");
    }

    let first =
        scanner::find_fastest_and_slowest(FIRST_PASS, &targets, local, prober, progress).await;
    observer.on_phase(Phase::FirstScan(&first));

    let second = second_scan(&first, &mut targets, local, prober, progress).await;
    observer.on_phase(Phase::SecondScan(&second));

    let ranking = scanner::rank_by_latency(RANKING_PASS, &targets, local, prober, progress).await;
    observer.on_phase(Phase::Ranking(&ranking));

    let average = scanner::average_latency(AVERAGE_PASS, &targets, local, prober, progress).await;
    observer.on_phase(Phase::Average(average));

    Ok(SurveyReport {
        first,
        second,
        ranking,
        average,
    })
}

/// Removes the first fastest from `targets` and scans what is left.
///
/// The removal sticks: the later passes run on the reduced list.
async fn second_scan<P>(
    first: &Extremes,
    targets: &mut TargetList,
    local: IpAddr,
    prober: &mut P,
    progress: &mut dyn ScanProgress,
) -> SecondScan
where
    P: Prober + ?Sized,
{
    if targets.len() < 2 {
        return SecondScan::Skipped(SkipReason::TooFewTargets);
    }
    let Some(excluded) = first.fastest.clone() else {
        debug!("No target answered the first scan, skipping the second one");
        return SecondScan::Skipped(SkipReason::NoFastest);
    };

    targets.remove_first(&excluded);
    let extremes =
        scanner::find_fastest_and_slowest(SECOND_PASS, targets, local, prober, progress).await;

    SecondScan::Completed { excluded, extremes }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
