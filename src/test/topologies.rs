use crate::topo::{Responder, RouterHop, SourceHost, Topology};

#[test]
fn classic_topology_has_four_routers_and_destination() {
    let topo = Topology::classic();
    assert_eq!(topo.router_count(), 4);
    assert_eq!(topo.path_len(), 5);
    assert_eq!(topo.destination.address, "8.8.8.8");
    assert_eq!(topo.destination.baseline_ms, 45.0);
    assert_eq!(topo.destination_label, "google.com");
}

#[test]
fn responder_switches_to_destination_after_routers() {
    let topo = Topology::classic();
    match topo.responder(1) {
        Responder::Router(r) => assert_eq!(r.name, "Gateway Router"),
        other => panic!("expected router, got {other:?}"),
    }
    assert_eq!(topo.responder(4).node().address, "203.0.113.1");
    assert!(!topo.responder(4).is_destination());
    assert!(topo.responder(5).is_destination());
    assert!(topo.responder(9).is_destination());
}

#[test]
fn empty_router_list_reaches_destination_at_hop_one() {
    let topo = Topology::new(
        SourceHost {
            address: "10.0.0.2",
            name: "src",
            mac: "00:00:00:00:00:01",
        },
        Vec::new(),
        RouterHop::new("10.0.0.1", "dst", "00:00:00:00:00:02", 3.0),
        "dst.example",
    );
    assert_eq!(topo.path_len(), 1);
    assert!(topo.responder(1).is_destination());
}
