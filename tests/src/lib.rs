//! Test doubles shared by the end-to-end pipeline tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use surveyor_common::network::target::{Target, TargetList};
use surveyor_core::probe::{ProbeError, Prober};
use surveyor_core::survey::{Phase, SurveyObserver};

/// Replays a scripted latency per probe and per target.
///
/// Every call consumes the next scripted answer of that target, so repeated
/// passes see different values. Unscripted or exhausted targets time out.
#[derive(Default)]
pub struct ScriptedProber {
    script: HashMap<String, VecDeque<Option<f64>>>,
    calls: Vec<String>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, target: &str, answers: &[Option<f64>]) -> Self {
        self.script
            .entry(target.to_string())
            .or_default()
            .extend(answers.iter().copied());
        self
    }

    /// Same latency for every pass.
    pub fn steady(self, target: &str, latency_ms: f64) -> Self {
        self.answer(target, &[Some(latency_ms); 8])
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn calls_to(&self, target: &str) -> usize {
        self.calls.iter().filter(|call| *call == target).count()
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&mut self, target: &Target) -> Result<f64, ProbeError> {
        self.calls.push(target.to_string());
        self.script
            .get_mut(target.as_str())
            .and_then(VecDeque::pop_front)
            .flatten()
            .ok_or(ProbeError::Timeout(Duration::from_secs(3)))
    }
}

/// Renders every phase as plain text lines, the way a terminal observer would see them.
#[derive(Default)]
pub struct TranscriptObserver {
    pub lines: Vec<String>,
}

impl SurveyObserver for TranscriptObserver {
    fn on_phase(&mut self, phase: Phase<'_>) {
        match phase {
            Phase::FirstScan(extremes) => {
                if let Some((target, ms)) = extremes.fastest() {
                    self.lines.push(format!("fastest {target} {ms}"));
                }
                if let Some((target, ms)) = extremes.slowest() {
                    self.lines.push(format!("slowest {target} {ms}"));
                }
            }
            Phase::SecondScan(second) => self.lines.push(format!("second {second:?}")),
            Phase::Ranking(samples) => {
                for sample in samples {
                    self.lines.push(format!("ranked {} {:?}", sample.target, sample.latency_ms));
                }
            }
            Phase::Average(average) => self.lines.push(format!("average {average:?}")),
        }
    }
}

pub fn targets(names: &[&str]) -> TargetList {
    names.iter().filter_map(|name| Target::new(name)).collect()
}
