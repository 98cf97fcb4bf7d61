use super::Recording;
use crate::net::ProbeMode;
use crate::sim::{PhaseTimings, RunConfig, RunControl, RunController, RunStatus};
use crate::topo::{RouterHop, Topology};

const EPS: f64 = 1e-9;

fn run(max_hops: u32, mode: ProbeMode, seed: u64) -> (crate::sim::RunReport, Recording, RunControl) {
    let config = RunConfig {
        max_hops,
        mode,
        step_mode: false,
    };
    let control = RunControl::new(&config);
    let mut recording = Recording::default();
    let mut controller = RunController::new(Topology::classic(), PhaseTimings::ZERO).with_seed(seed);
    let report = controller.run(&config, &control, &mut recording);
    (report, recording, control)
}

#[test]
fn reaches_destination_on_fifth_hop() {
    let (report, recording, _) = run(8, ProbeMode::Udp, 1);

    assert_eq!(report.status, RunStatus::Complete);
    assert!(report.reached_destination());
    assert_eq!(report.outcomes.len(), 5);
    let hops: Vec<u32> = report.outcomes.iter().map(|o| o.hop).collect();
    assert_eq!(hops, vec![1, 2, 3, 4, 5]);
    assert!(
        report.outcomes[..4]
            .iter()
            .all(|o| !o.responder.is_destination())
    );

    // 首行 + 5 跳 + 空行 + 结束行
    assert_eq!(report.lines.len(), 8);
    assert_eq!(
        report.lines[0],
        "traceroute to google.com (8.8.8.8), 8 hops max, 60 byte packets"
    );
    assert!(report.lines[5].starts_with(" 5  8.8.8.8 (Google DNS)  "));
    assert_eq!(report.lines[6], "");
    assert_eq!(report.lines[7], "Traceroute complete!");

    assert_eq!(recording.lines, report.lines);
    assert_eq!(recording.phases, super::expected_phases(5));
    assert_eq!(recording.finished, Some(RunStatus::Complete));
    assert_eq!(recording.outcomes, report.outcomes);
}

#[test]
fn stops_at_max_hops_before_destination() {
    let (report, recording, _) = run(3, ProbeMode::Udp, 2);

    assert_eq!(report.status, RunStatus::MaxHopsReached);
    assert!(!report.reached_destination());
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.lines.last().map(String::as_str), Some("*** Maximum hops reached ***"));
    assert_eq!(recording.phases, super::expected_phases(3));
}

#[test]
fn destination_on_last_allowed_hop_is_complete() {
    let (report, _, _) = run(5, ProbeMode::Udp, 3);
    assert_eq!(report.status, RunStatus::Complete);
    assert_eq!(report.outcomes.len(), 5);

    let (report, _, _) = run(4, ProbeMode::Udp, 3);
    assert_eq!(report.status, RunStatus::MaxHopsReached);
    assert_eq!(report.outcomes.len(), 4);
}

#[test]
fn destination_latencies_follow_baseline() {
    for seed in 0..20 {
        let (report, _, _) = run(8, ProbeMode::Udp, seed);
        let last = report.outcomes.last().expect("destination outcome");
        assert_eq!(last.responder.node().address, "8.8.8.8");
        for ms in last.latencies_ms {
            assert!((36.0 - EPS..=54.0 + EPS).contains(&ms), "seed {seed}: {ms}");
        }
    }
}

#[test]
fn cancelled_before_start_produces_no_hops() {
    let config = RunConfig::default();
    let control = RunControl::new(&config);
    control.cancel();
    let mut recording = Recording::default();
    let report = RunController::new(Topology::classic(), PhaseTimings::ZERO).run(
        &config,
        &control,
        &mut recording,
    );

    assert_eq!(report.status, RunStatus::Cancelled);
    assert!(report.outcomes.is_empty());
    assert!(recording.phases.is_empty());
    assert_eq!(report.lines.last().map(String::as_str), Some("*** Traceroute cancelled ***"));
    assert_eq!(recording.finished, Some(RunStatus::Cancelled));
}

#[test]
fn finished_run_leaves_control_idle() {
    let (_, _, control) = run(8, ProbeMode::Icmp, 4);
    let state = control.snapshot();
    assert!(!state.running);
    assert!(!state.paused);
    assert!(!state.awaiting_advance);
    assert_eq!(state.current_hop, 5);
    assert_eq!(state.phase, crate::sim::Phase::Idle);
}

#[test]
fn same_seed_same_latencies() {
    let (a, _, _) = run(8, ProbeMode::Udp, 42);
    let (b, _, _) = run(8, ProbeMode::Udp, 42);
    assert_eq!(a.outcomes, b.outcomes);
    assert_eq!(a.lines, b.lines);
}

#[test]
fn icmp_mode_follows_same_path() {
    let (report, recording, _) = run(8, ProbeMode::Icmp, 5);
    assert_eq!(report.status, RunStatus::Complete);
    assert_eq!(report.outcomes.len(), 5);
    assert_eq!(recording.started.map(|c| c.mode), Some(ProbeMode::Icmp));
}

#[test]
fn direct_destination_without_routers() {
    let classic = Topology::classic();
    let topology = Topology::new(
        classic.source.clone(),
        Vec::new(),
        RouterHop::new("198.51.100.7", "Lab Host", "00:00:00:00:00:01", 2.0),
        "lab.example",
    );
    let config = RunConfig::default();
    let control = RunControl::new(&config);
    let report = RunController::new(topology, PhaseTimings::ZERO)
        .with_seed(9)
        .run(&config, &control, &mut ());

    assert_eq!(report.status, RunStatus::Complete);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(
        report.lines[0],
        "traceroute to lab.example (198.51.100.7), 8 hops max, 60 byte packets"
    );
    assert!(report.lines[1].starts_with(" 1  198.51.100.7 (Lab Host)  "));
}
