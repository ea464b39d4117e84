use colored::*;
use surveyor_common::network::target::Target;
use surveyor_core::survey::SkipReason;

use crate::terminal::colors;

/// Round trips below this are shown green.
const FAST_MS: f64 = 50.0;
/// Round trips from here on are shown red.
const SLOW_MS: f64 = 150.0;

pub fn latency(latency_ms: f64) -> ColoredString {
    let text = format!("{latency_ms:.2} ms");
    if latency_ms < FAST_MS {
        text.green()
    } else if latency_ms < SLOW_MS {
        text.yellow()
    } else {
        text.red()
    }
}

pub fn no_response() -> ColoredString {
    "no response".color(colors::ACCENT).italic()
}

pub fn responder(target: &Target, latency_ms: f64) -> String {
    format!("{} ({})", target.as_str().color(colors::PRIMARY), latency(latency_ms))
}

pub fn skip_reason(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::TooFewTargets => "Fewer than two servers, nothing left to compare",
        SkipReason::NoFastest => "No fastest server in the first scan, nothing to exclude",
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
