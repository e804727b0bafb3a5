//! Network-level properties of the thermal step.

use hg_core::units::{k, m, m2};
use hg_core::{Id, Tolerances, nearly_equal};
use hg_thermal::{ThermalCoupling, ThermalNetwork, ThermalProcess};
use proptest::prelude::*;

fn two_rooms() -> (ThermalNetwork, Id, Id, Id) {
    let mut net = ThermalNetwork::new();
    let a = net
        .add_process(ThermalProcess::room("room_a", m2(50.0), m(2.5), k(333.15)).unwrap())
        .unwrap();
    let b = net
        .add_process(ThermalProcess::room("room_b", m2(50.0), m(2.5), k(293.15)).unwrap())
        .unwrap();
    let c = net
        .add_coupling(ThermalCoupling::new("wall", 100.0, a, b).unwrap())
        .unwrap();
    net.reset().unwrap();
    (net, a, b, c)
}

#[test]
fn two_rooms_equilibrate() {
    let (mut net, a, b, c) = two_rooms();
    let dt = 300.0;
    assert_eq!(net.process(a).unwrap().temperature(), 333.15);
    assert_eq!(net.process(b).unwrap().temperature(), 293.15);

    net.step(0.0, dt).unwrap();
    assert!((net.process(a).unwrap().temperature() - 325.1898).abs() < 1e-3);
    assert!((net.process(b).unwrap().temperature() - 301.1102).abs() < 1e-3);
    let first_power = net.coupling(c).unwrap().power().unwrap();
    assert!((first_power - 4000.0).abs() < 1e-6);

    let mut last_power = first_power;
    for i in 1..12 {
        net.step(i as f64 * dt, dt).unwrap();
        let power = net.coupling(c).unwrap().power().unwrap();
        assert!(power < last_power);
        assert!(power > 0.0);
        last_power = power;
    }
    assert!((net.process(a).unwrap().temperature() - 313.1953).abs() < 1e-3);
    assert!((net.process(b).unwrap().temperature() - 313.1047).abs() < 1e-3);
    assert!(last_power < 20.0);
}

#[test]
fn reset_is_bitwise_idempotent() {
    let (mut net, a, b, _) = two_rooms();
    let snapshot = |net: &ThermalNetwork| {
        [a, b]
            .map(|id| net.process(id).unwrap())
            .map(|p| (p.temperature().to_bits(), p.thermal_energy().to_bits()))
    };
    let fresh = snapshot(&net);

    for i in 0..5 {
        net.step(i as f64, 60.0).unwrap();
    }
    net.reset().unwrap();
    assert_eq!(snapshot(&net), fresh);
    net.reset().unwrap();
    assert_eq!(snapshot(&net), fresh);
}

#[test]
fn converges_to_capacity_weighted_mean() {
    let mut net = ThermalNetwork::new();
    let a = net
        .add_process(ThermalProcess::new("a", 4190.0, 360.0, 2.0).unwrap())
        .unwrap();
    let b = net
        .add_process(ThermalProcess::new("b", 900.0, 280.0, 5.0).unwrap())
        .unwrap();
    net.add_coupling(ThermalCoupling::new("ab", 5.0, a, b).unwrap())
        .unwrap();
    net.reset().unwrap();

    let (ea, eb) = (360.0 * 4190.0 * 2.0, 280.0 * 900.0 * 5.0);
    let target = (ea + eb) / (4190.0 * 2.0 + 900.0 * 5.0);

    let mut gap = f64::INFINITY;
    for i in 0..800 {
        net.step(i as f64 * 10.0, 10.0).unwrap();
        let ta = net.process(a).unwrap().temperature();
        let tb = net.process(b).unwrap().temperature();
        assert!(ta >= tb);
        let next = ta - tb;
        assert!(next <= gap);
        gap = next;
    }
    let ta = net.process(a).unwrap().temperature();
    assert!((ta - target).abs() < 1e-3);
}

/// Build a ring-plus-chords network with couplings inserted in `order`.
fn build(temps: &[f64], links: &[(usize, usize, f64)], order: &[usize]) -> ThermalNetwork {
    let mut net = ThermalNetwork::new();
    for (i, t) in temps.iter().enumerate() {
        net.add_process(ThermalProcess::new(format!("p{i}"), 1000.0, *t, 100.0 + i as f64).unwrap())
            .unwrap();
    }
    for &j in order {
        let (from, to, g) = links[j];
        net.add_coupling(
            ThermalCoupling::new(
                format!("c{j}"),
                g,
                Id::from_index(from as u32),
                Id::from_index(to as u32),
            )
            .unwrap(),
        )
        .unwrap();
    }
    net.reset().unwrap();
    net
}

fn network_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<(usize, usize, f64)>)> {
    (2_usize..7).prop_flat_map(|n| {
        let temps = prop::collection::vec(250.0_f64..400.0, n);
        let links = prop::collection::vec((0..n, 0..n, 0.0_f64..50.0), 1..12).prop_map(|raw| {
            raw.into_iter()
                .filter(|(a, b, _)| a != b)
                .collect::<Vec<_>>()
        });
        (temps, links)
    })
}

proptest! {
    #[test]
    fn total_energy_is_conserved(
        (temps, links) in network_strategy(),
        steps in 1_usize..40,
        dt in 0.0_f64..120.0,
    ) {
        let order: Vec<usize> = (0..links.len()).collect();
        let mut net = build(&temps, &links, &order);
        let before = net.total_energy();

        for i in 0..steps {
            net.step(i as f64 * dt, dt).unwrap();
        }
        let tol = Tolerances { abs: 1e-6, rel: 1e-12 };
        prop_assert!(nearly_equal(net.total_energy(), before, tol));
    }

    #[test]
    fn coupling_order_does_not_matter(
        (temps, links) in network_strategy(),
        seed in any::<u64>(),
    ) {
        let forward: Vec<usize> = (0..links.len()).collect();
        let mut shuffled = forward.clone();
        // Deterministic Fisher-Yates driven by the seed
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            shuffled.swap(i, (state % (i as u64 + 1)) as usize);
        }

        let mut a = build(&temps, &links, &forward);
        let mut b = build(&temps, &links, &shuffled);
        for i in 0..5 {
            a.step(i as f64 * 30.0, 30.0).unwrap();
            b.step(i as f64 * 30.0, 30.0).unwrap();
        }

        let tol = Tolerances { abs: 1e-9, rel: 1e-12 };
        for (pa, pb) in a.processes().iter().zip(b.processes().iter()) {
            prop_assert!(nearly_equal(pa.temperature(), pb.temperature(), tol));
        }
    }
}
