use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use colored::*;
use is_root::is_root;
use surveyor_common::config::Config;
use surveyor_common::network::local::{self, LocalAddress};
use surveyor_common::network::target::TargetList;
use surveyor_common::{success, warn};
use surveyor_core::probe::IcmpProber;
use surveyor_core::scanner::{Extremes, Sample};
use surveyor_core::survey::{self, Phase, SecondScan, SurveyError, SurveyObserver, SurveyReport};
use tracing::{debug, error};

use crate::terminal::spinner::SpanProgress;
use crate::terminal::{colors, format, print};

/// Width of the labels in the fixed report blocks.
const LABEL_WIDTH: usize = 21;

/// How a run ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    NoTargets,
    NoLocalAddress,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Completed => ExitCode::SUCCESS,
            Outcome::NoLocalAddress => ExitCode::from(1),
            Outcome::NoTargets => ExitCode::from(2),
        }
    }
}

pub async fn survey(file_path: &Path, cfg: &Config) -> Outcome {
    print::header("local address");

    let local = match local::discover(cfg.discovery_endpoint) {
        Ok(local) => local,
        Err(e) => {
            error!("Error while determining the local IP address: {e}");
            error!("Failed to determine the local IP address, nothing will be probed");
            return Outcome::NoLocalAddress;
        }
    };
    print_local_address(&local);
    log_socket_mode();

    let targets = TargetList::load(file_path);
    let mut prober = IcmpProber::new(cfg.probe_timeout);
    let mut progress = SpanProgress::default();
    let mut printer = ReportPrinter;

    let start_time = Instant::now();
    match survey::run(targets, local.ip, &mut prober, &mut progress, &mut printer).await {
        Ok(report) => {
            print_summary(&report, start_time.elapsed());
            Outcome::Completed
        }
        Err(SurveyError::NoTargets) => {
            warn!(
                "The server list from the file {} is empty or cannot be read",
                file_path.display()
            );
            Outcome::NoTargets
        }
    }
}

fn log_socket_mode() {
    if is_root() {
        debug!("Root privileges detected, raw ICMP sockets are available");
    } else {
        debug!("Running unprivileged, probes rely on ICMP datagram sockets (net.ipv4.ping_group_range)");
    }
}

fn print_local_address(local: &LocalAddress) {
    print::set_key_width(LABEL_WIDTH);
    print::aligned_line("Local IP address", local.ip.to_string().color(colors::IPV4_ADDR));
    if let Some(interface) = &local.interface {
        print::aligned_line("Interface", interface.as_str());
    }
}

/// Prints every phase as soon as the pipeline reports it.
struct ReportPrinter;

impl SurveyObserver for ReportPrinter {
    fn on_phase(&mut self, phase: Phase<'_>) {
        match phase {
            Phase::FirstScan(extremes) => print_first_scan(extremes),
            Phase::SecondScan(second) => print_second_scan(second),
            Phase::Ranking(samples) => print_ranking(samples),
            Phase::Average(average) => print_average(average),
        }
    }
}

fn print_first_scan(extremes: &Extremes) {
    print::header("first scan");
    print::set_key_width(LABEL_WIDTH);

    if extremes.fastest().is_none() && extremes.slowest().is_none() {
        print::print_status("No server answered the first scan");
        return;
    }
    if let Some((target, latency_ms)) = extremes.fastest() {
        print::aligned_line("Fastest server", format::responder(target, latency_ms));
    }
    if let Some((target, latency_ms)) = extremes.slowest() {
        print::aligned_line("Slowest server", format::responder(target, latency_ms));
    }
}

fn print_second_scan(second: &SecondScan) {
    print::header("excluding the fastest");
    print::set_key_width(LABEL_WIDTH);

    match second {
        SecondScan::Skipped(reason) => print::print_status(format::skip_reason(*reason)),
        SecondScan::Completed { excluded, extremes } => {
            print::aligned_line("Excluded server", excluded.as_str());
            match extremes.fastest() {
                Some((target, latency_ms)) => {
                    print::aligned_line("Fastest server", format::responder(target, latency_ms))
                }
                None => print::print_status("No remaining server answered"),
            }
        }
    }
}

fn print_ranking(samples: &[Sample]) {
    print::header("sorted by response time");

    if samples.is_empty() {
        print::print_status("No servers left to rank");
        return;
    }

    let width = samples
        .iter()
        .map(|sample| sample.target.as_str().len())
        .max()
        .unwrap_or(0);
    print::set_key_width(width);

    for sample in samples {
        let key = sample.target.as_str();
        match sample.latency_ms {
            Some(latency_ms) => print::aligned_line(key, format::latency(latency_ms)),
            None => print::aligned_line(key, format::no_response()),
        }
    }
}

fn print_average(average: Option<f64>) {
    print::header("average");
    print::set_key_width(LABEL_WIDTH);

    match average {
        Some(latency_ms) => print::aligned_line("Average response time", format::latency(latency_ms)),
        None => print::print_status("No server answered, there is nothing to average"),
    }
}

fn print_summary(report: &SurveyReport, total_time: Duration) {
    let answered = report
        .ranking
        .iter()
        .filter(|sample| sample.latency_ms.is_some())
        .count();
    let answered: ColoredString = format!("{answered}/{} servers", report.ranking.len())
        .bold()
        .green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    print::fat_separator();
    success!("Survey complete: {answered} answered the last scan, finished in {total_time}");
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
