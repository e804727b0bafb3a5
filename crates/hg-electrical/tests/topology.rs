use hg_core::{Id, Position};
use hg_core::SimulationElement;
use hg_electrical::{
    BusType, CpsElement, ElectricalBus, ElectricalError, ElectricalNetwork, GenTransformer,
    TransmissionLine,
};
use num_complex::Complex64;
use proptest::prelude::*;

/// Five-bus reference grid: slack, one generator, three loads, with a
/// generator transformer feeding bus 1.
fn five_bus() -> ElectricalNetwork {
    let mut net = ElectricalNetwork::new();
    let b1 = net.add_bus(ElectricalBus::slack("Bus1").unwrap()).unwrap();
    let b2 = net.add_bus(ElectricalBus::pq("Bus2").unwrap()).unwrap();
    let b3 = net.add_bus(ElectricalBus::pq("Bus3").unwrap()).unwrap();
    let b4 = net
        .add_bus(
            ElectricalBus::pv("Bus4")
                .unwrap()
                .with_position(Position::new(46.24, 7.36, 500.0)),
        )
        .unwrap();
    let b5 = net.add_bus(ElectricalBus::pq("Bus5").unwrap()).unwrap();

    let line = |x: f64, r: f64, b: f64| TransmissionLine::new(1.0, x, r, b).unwrap();
    net.connect("Line1", b2, b3, line(0.6, 0.06, 0.05)).unwrap();
    net.connect("Line2", b3, b5, line(0.3, 0.04, 0.04)).unwrap();
    net.connect("Line3", b2, b5, line(0.4, 0.08, 0.06)).unwrap();
    net.connect("TRA1", b2, b1, GenTransformer::with_ratio(1.05, 0.015, 0.0).unwrap())
        .unwrap();
    net.connect("TRA2", b5, b4, GenTransformer::with_ratio(1.05, 0.03, 0.0).unwrap())
        .unwrap();
    net
}

#[test]
fn five_bus_topology() {
    let net = five_bus();
    let topo = net.topology().unwrap();

    assert_eq!(topo.bus_count(), 5);
    assert_eq!(topo.slack_index(), Some(0));
    assert_eq!(topo.pv_mask(), vec![false, false, false, true, false]);
    assert_eq!(
        topo.branch_pairs(),
        vec![(1, 2), (2, 4), (1, 4), (1, 0), (4, 3)]
    );
    assert_eq!(topo.islands().len(), 1);
    assert_eq!(topo.adjacency().degree(Id::from_index(1)), 3);
}

#[test]
fn line_stamps_sum_to_shunt() {
    // Row sums of a line stamp leave only the charging susceptance
    let topo = five_bus().topology().unwrap();
    let s = topo.branches[0].stamp;
    let row = s.ff + s.ft;
    assert!((row - Complex64::new(0.0, 0.025)).norm() < 1e-12);
}

#[test]
fn islands_need_their_own_slack() {
    let mut net = five_bus();
    let lonely = net.add_bus(ElectricalBus::pq("Island").unwrap()).unwrap();
    let topo = net.topology().unwrap();
    let islands = topo.islands();
    assert_eq!(islands.len(), 2);
    assert_eq!(islands[1], vec![lonely]);
    assert!(
        !islands[1]
            .iter()
            .any(|b| topo.bus_types[b.slot()] == BusType::Slack)
    );
}

#[test]
fn lookup_by_name() {
    let net = five_bus();
    assert_eq!(net.bus_by_name("Bus4").unwrap().bus_type(), BusType::PV);
    assert!(net.branch_by_name("TRA2").is_some());
    assert!(net.bus_by_name("Bus9").is_none());
}

#[test]
fn duplicate_branch_name_rejected() {
    let mut net = five_bus();
    let line = TransmissionLine::new(1.0, 0.1, 0.0, 0.0).unwrap();
    assert!(matches!(
        net.connect("Line1", Id::from_index(0), Id::from_index(2), line),
        Err(ElectricalError::Graph(_))
    ));
}

#[test]
fn loads_attach_everywhere_but_the_slack() {
    let mut net = five_bus();
    let slack = net.slack().unwrap();
    let bus4 = net.bus_by_name("Bus4").unwrap().id().unwrap();
    let bus5 = net.bus_by_name("Bus5").unwrap().id().unwrap();
    let plant = net
        .add_element(CpsElement::producer("Plant", 40.0e6).unwrap())
        .unwrap();
    let city = net
        .add_element(CpsElement::consumer("City", 25.0e6).unwrap())
        .unwrap();

    assert!(matches!(
        net.attach(slack, city),
        Err(ElectricalError::AttachedToSlack { .. })
    ));
    net.attach(bus4, plant).unwrap();
    net.attach(bus5, city).unwrap();
    assert_eq!(
        net.element_by_name("Plant").unwrap().position(),
        net.bus(bus4).unwrap().position()
    );

    net.reset().unwrap();
    net.calculate(0.0, 900.0);
    net.update(0.0, 900.0);
    assert_eq!(net.bus(bus4).unwrap().state().p, Some(40.0e6));
    assert_eq!(net.bus(bus5).unwrap().state().p, Some(-25.0e6));
    assert_eq!(net.bus_by_name("Bus2").unwrap().state().p, Some(0.0));
    assert_eq!(net.bus(slack).unwrap().state().p, None);

    let topo = net.topology().unwrap();
    assert_eq!(topo.element_buses, vec![Some(3), Some(4)]);
}

proptest! {
    #[test]
    fn injections_balance_attached_demand(
        demands in prop::collection::vec((0_usize..4, -1.0e4_f64..1.0e4), 0..12),
    ) {
        let mut net = five_bus();
        for (i, (bus, demand)) in demands.iter().enumerate() {
            let el = net.add_element(CpsElement::new(format!("el{i}"), *demand).unwrap()).unwrap();
            net.attach(Id::from_index(*bus as u32 + 1), el).unwrap();
        }
        let topo = net.topology().unwrap();
        let power: Vec<f64> = demands.iter().map(|(_, d)| *d).collect();
        let injected: f64 = topo.bus_power(&power).iter().sum();
        let demanded: f64 = power.iter().sum();
        prop_assert!((injected + demanded).abs() < 1e-6);
    }

    #[test]
    fn line_construction_matches_rules(
        length in -10.0_f64..10.0,
        x in -1.0_f64..1.0,
        r in -1.0_f64..1.0,
        b in -1.0_f64..1.0,
    ) {
        let ok = length > 0.0 && x > 0.0 && r >= 0.0 && b >= 0.0;
        prop_assert_eq!(TransmissionLine::new(length, x, r, b).is_ok(), ok);
    }

    #[test]
    fn transformer_construction_matches_rules(
        re in -2.0_f64..2.0,
        im in -2.0_f64..2.0,
        x in -1.0_f64..1.0,
    ) {
        let k = Complex64::new(re, im);
        let ok = k.norm_sqr() > 0.0 && x > 0.0;
        prop_assert_eq!(GenTransformer::new(k, x, 0.0).is_ok(), ok);
    }
}
