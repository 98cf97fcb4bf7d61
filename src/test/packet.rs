use crate::net::{
    BASE_UDP_PORT, ICMP_TIME_EXCEEDED, IPPROTO_ICMP, IPPROTO_UDP, Packet, ProbeMode,
    RESPONSE_TTL, UnknownProbeMode,
};

#[test]
fn udp_probe_port_tracks_hop() {
    let first = Packet::probe(ProbeMode::Udp, 1);
    assert_eq!(first.ttl(), 1);
    assert_eq!(first.dst_port(), Some(BASE_UDP_PORT));
    assert_eq!(first.protocol(), IPPROTO_UDP);
    assert_eq!(first.icmp(), None);

    let fifth = Packet::probe(ProbeMode::Udp, 5);
    assert_eq!(fifth.ttl(), 5);
    assert_eq!(fifth.dst_port(), Some(33438));
}

#[test]
fn icmp_probe_is_echo_request_without_port() {
    let pkt = Packet::probe(ProbeMode::Icmp, 3);
    assert!(pkt.is_probe());
    assert_eq!(pkt.protocol(), IPPROTO_ICMP);
    assert_eq!(pkt.dst_port(), None);
    assert_eq!(pkt.icmp(), Some((8, 0)));
}

#[test]
fn response_is_always_time_exceeded() {
    let pkt = Packet::time_exceeded("10.0.1.1");
    assert!(!pkt.is_probe());
    assert_eq!(pkt.icmp(), Some((ICMP_TIME_EXCEEDED, 0)));
    assert_eq!(pkt.protocol(), IPPROTO_ICMP);
    assert_eq!(pkt.ttl(), RESPONSE_TTL);
    assert_eq!(pkt.dst_port(), None);
    assert_eq!(
        pkt.describe(),
        "ICMP Time Exceeded (Type 11) response from 10.0.1.1"
    );
}

#[test]
fn probe_ttl_saturates_at_255() {
    assert_eq!(Packet::probe(ProbeMode::Udp, 300).ttl(), 255);
}

#[test]
fn probe_mode_parses_case_insensitively() {
    assert_eq!("UDP".parse::<ProbeMode>(), Ok(ProbeMode::Udp));
    assert_eq!(" icmp ".parse::<ProbeMode>(), Ok(ProbeMode::Icmp));
    assert_eq!(
        "tcp".parse::<ProbeMode>(),
        Err(UnknownProbeMode("tcp".to_string()))
    );
    assert_eq!(ProbeMode::Icmp.to_string(), "ICMP");
}

#[test]
fn describe_udp_probe_mentions_port() {
    assert_eq!(
        Packet::probe(ProbeMode::Udp, 1).describe(),
        "UDP probe packet with TTL=1 to port 33434"
    );
}
