use colored::*;
use indicatif::ProgressStyle;
use surveyor_common::network::target::Target;
use surveyor_core::scanner::ScanProgress;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Renders one progress bar per scan pass, removed once the pass ends.
#[derive(Default)]
pub struct SpanProgress {
    label: String,
    current: Option<Span>,
}

impl ScanProgress for SpanProgress {
    fn begin(&mut self, label: &str, total: usize) {
        let span = info_span!("scan_pass", indicatif.pb_show = true);
        span.pb_set_style(&bar_style());
        span.pb_set_length(total as u64);
        span.pb_set_message(label);
        span.pb_start();

        self.label = label.to_string();
        self.current = Some(span);
    }

    fn advance(&mut self, target: &Target) {
        if let Some(span) = &self.current {
            span.pb_set_message(&format!("{} {}", self.label, target.as_str().dimmed()));
            span.pb_inc(1);
        }
    }

    fn finish(&mut self) {
        // Closing the span clears its bar.
        self.current = None;
    }
}

fn bar_style() -> ProgressStyle {
    let template = "{spinner:.blue} {msg} [{bar:30.cyan/blue}] {pos}/{len} {elapsed}";
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICK_STRINGS)
        .progress_chars("=> ")
}
