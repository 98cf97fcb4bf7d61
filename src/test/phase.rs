use crate::net::ProbeMode;
use crate::sim::Phase;

#[test]
fn step_numbers_follow_sequence() {
    let numbers: Vec<_> = Phase::HOP_SEQUENCE
        .iter()
        .map(|p| p.step_number())
        .collect();
    assert_eq!(numbers, vec![Some(1), Some(2), Some(3), Some(4)]);
    assert_eq!(Phase::Idle.step_number(), None);
}

#[test]
fn send_title_depends_on_mode() {
    assert_eq!(Phase::Send.title(ProbeMode::Udp), "UDP Probe Packet Sent");
    assert_eq!(Phase::Send.title(ProbeMode::Icmp), "ICMP Echo Request Sent");
    assert_eq!(Phase::Respond.title(ProbeMode::Icmp), "ICMP Time Exceeded");
}

#[test]
fn step_line_includes_ttl() {
    assert_eq!(
        Phase::Send.step_line(ProbeMode::Udp, 3),
        "Step 1: Sending UDP probe with TTL=3"
    );
    assert_eq!(
        Phase::Discard.step_line(ProbeMode::Icmp, 3),
        "Step 3: TTL reaches 0, packet discarded"
    );
    assert_eq!(
        Phase::Send.explanation(ProbeMode::Udp),
        "Sending UDP packet to port 33434 with TTL=1"
    );
}
