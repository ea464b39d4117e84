use std::io::Cursor;
use std::net::{IpAddr, Ipv4Addr};

use surveyor_common::network::target::TargetList;
use surveyor_core::scanner::NoProgress;
use surveyor_core::survey::{self, SecondScan, SkipReason, SurveyError};
use surveyor_integration_tests::{ScriptedProber, TranscriptObserver, targets};

const LOCAL: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 0, 32));

#[tokio::test]
async fn full_survey_reports_every_phase() {
    let mut prober = ScriptedProber::new()
        .steady("1.1.1.1", 12.0)
        .steady("8.8.8.8", 20.0)
        .steady("9.9.9.9", 45.0)
        .answer("203.0.113.9", &[None, None, None, None]);
    let mut observer = TranscriptObserver::default();

    let report = survey::run(
        targets(&["1.1.1.1", "8.8.8.8", "9.9.9.9", "203.0.113.9"]),
        LOCAL,
        &mut prober,
        &mut NoProgress,
        &mut observer,
    )
    .await
    .unwrap();

    assert_eq!(report.first.fastest().map(|(t, ms)| (t.as_str(), ms)), Some(("1.1.1.1", 12.0)));
    assert_eq!(report.first.slowest().map(|(t, ms)| (t.as_str(), ms)), Some(("9.9.9.9", 45.0)));
    assert_eq!(report.average, Some(32.5));

    assert_eq!(
        observer.lines,
        vec![
            "fastest 1.1.1.1 12",
            "slowest 9.9.9.9 45",
            "second Completed { excluded: Target(\"1.1.1.1\"), extremes: Extremes { fastest: Some(Target(\"8.8.8.8\")), fastest_ms: 20.0, slowest: Some(Target(\"9.9.9.9\")), slowest_ms: 45.0 } }",
            "ranked 8.8.8.8 Some(20.0)",
            "ranked 9.9.9.9 Some(45.0)",
            "ranked 203.0.113.9 None",
            "average Some(32.5)",
        ]
    );

    // The excluded fastest is not probed again after the first pass.
    assert_eq!(prober.calls_to("1.1.1.1"), 1);
    assert_eq!(prober.calls_to("8.8.8.8"), 4);
}

#[tokio::test]
async fn every_pass_measures_afresh() {
    // b is fastest in the first pass only; later passes see it slow down.
    let mut prober = ScriptedProber::new()
        .answer("a", &[5.0, 9.0, 9.0, 9.0].map(Some))
        .answer("b", &[30.0, 1.0, 100.0, 100.0].map(Some))
        .answer("c", &[40.0, 50.0, 2.0, 2.0].map(Some));

    let report = survey::run(
        targets(&["a", "b", "c"]),
        LOCAL,
        &mut prober,
        &mut NoProgress,
        &mut TranscriptObserver::default(),
    )
    .await
    .unwrap();

    let SecondScan::Completed { excluded, extremes } = &report.second else {
        panic!("second scan should have run");
    };
    assert_eq!(excluded.as_str(), "a");
    assert_eq!(extremes.fastest().map(|(t, ms)| (t.as_str(), ms)), Some(("b", 1.0)));

    let ranked: Vec<(&str, Option<f64>)> = report
        .ranking
        .iter()
        .map(|s| (s.target.as_str(), s.latency_ms))
        .collect();
    assert_eq!(ranked, vec![("c", Some(2.0)), ("b", Some(100.0))]);
    assert_eq!(report.average, Some(51.0));
}

#[tokio::test]
async fn local_address_never_reaches_the_prober_or_the_report() {
    let file = "192.168.0.32\n1.1.1.1\n\n192.168.0.32\n8.8.8.8\n";
    let list = TargetList::parse(Cursor::new(file)).unwrap();
    let mut prober = ScriptedProber::new()
        .steady("192.168.0.32", 0.01)
        .steady("1.1.1.1", 10.0)
        .steady("8.8.8.8", 11.0);
    let mut observer = TranscriptObserver::default();

    survey::run(list, LOCAL, &mut prober, &mut NoProgress, &mut observer)
        .await
        .unwrap();

    assert_eq!(prober.calls_to("192.168.0.32"), 0);
    assert!(observer.lines.iter().all(|line| !line.contains("192.168.0.32")));
}

#[tokio::test]
async fn single_failing_target_skips_the_second_scan() {
    let mut prober = ScriptedProber::new();

    let report = survey::run(
        targets(&["unreachable.invalid"]),
        LOCAL,
        &mut prober,
        &mut NoProgress,
        &mut TranscriptObserver::default(),
    )
    .await
    .unwrap();

    assert!(report.first.fastest.is_none());
    assert_eq!(report.first.fastest_ms, f64::INFINITY);
    assert_eq!(report.first.slowest_ms, 0.0);
    assert_eq!(report.second, SecondScan::Skipped(SkipReason::TooFewTargets));
    assert_eq!(report.average, None);
}

#[tokio::test]
async fn all_failures_skip_the_second_scan_and_print_no_sentinels() {
    let mut prober = ScriptedProber::new();
    let mut observer = TranscriptObserver::default();

    let report = survey::run(
        targets(&["a", "b", "c"]),
        LOCAL,
        &mut prober,
        &mut NoProgress,
        &mut observer,
    )
    .await
    .unwrap();

    assert_eq!(report.second, SecondScan::Skipped(SkipReason::NoFastest));
    assert!(observer.lines.iter().all(|line| !line.contains("inf")));
    assert_eq!(observer.lines.last().map(String::as_str), Some("average None"));
    assert_eq!(prober.calls().len(), 9);
}

#[tokio::test]
async fn blank_file_is_a_soft_abort_with_zero_probes() {
    let list = TargetList::parse(Cursor::new("\n   \n\t\n")).unwrap();
    let mut prober = ScriptedProber::new();
    let mut observer = TranscriptObserver::default();

    let result = survey::run(list, LOCAL, &mut prober, &mut NoProgress, &mut observer).await;

    assert!(matches!(result, Err(SurveyError::NoTargets)));
    assert!(prober.calls().is_empty());
    assert!(observer.lines.is_empty());
}
