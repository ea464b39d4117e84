use std::net::IpAddr;

use surveyor_common::network::target::TargetList;

use super::{Sample, ScanProgress, collect_samples};
use crate::probe::Prober;

/// Arithmetic mean over successful samples, `None` when there are none.
pub fn mean<'a, I>(samples: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Sample>,
{
    let (total, count) = samples
        .into_iter()
        .filter_map(|sample| sample.latency_ms)
        .fold((0.0_f64, 0_usize), |(total, count), ms| (total + ms, count + 1));

    (count > 0).then(|| total / count as f64)
}

/// Probes every target once more and averages the successful round trips.
pub async fn average_latency<P>(
    label: &str,
    targets: &TargetList,
    local: IpAddr,
    prober: &mut P,
    progress: &mut dyn ScanProgress,
) -> Option<f64>
where
    P: Prober + ?Sized,
{
    let samples = collect_samples(label, targets, local, prober, progress).await;
    mean(&samples)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::NoProgress;
    use crate::scanner::testing::{FixedProber, list};
    use std::net::Ipv4Addr;
    use surveyor_common::network::target::Target;

    fn sample(name: &str, latency_ms: Option<f64>) -> Sample {
        Sample::new(Target::new(name).unwrap(), latency_ms)
    }

    #[test]
    fn mean_of_ten_twenty_thirty_is_twenty() {
        let samples = vec![sample("a", Some(10.0)), sample("b", Some(20.0)), sample("c", Some(30.0))];
        assert_eq!(mean(&samples), Some(20.0));
    }

    #[test]
    fn mean_ignores_failed_samples() {
        let samples = vec![sample("a", Some(10.0)), sample("b", None), sample("c", Some(30.0))];
        assert_eq!(mean(&samples), Some(20.0));
    }

    #[test]
    fn mean_of_all_failures_is_none() {
        let samples = vec![sample("a", None), sample("b", None)];
        assert_eq!(mean(&samples), None);
        assert_eq!(mean(&Vec::<Sample>::new()), None);
    }

    #[tokio::test]
    async fn average_latency_runs_its_own_pass() {
        let mut prober = FixedProber::new(&[("a", Some(10.0)), ("b", Some(20.0)), ("c", Some(30.0))]);
        let targets = list(&["a", "b", "c", "d"]);
        let local = IpAddr::V4(Ipv4Addr::new(10, 1, 1, 1));

        let average = average_latency("pass", &targets, local, &mut prober, &mut NoProgress).await;

        assert_eq!(average, Some(20.0));
        assert_eq!(prober.calls, vec!["a", "b", "c", "d"]);
    }
}
