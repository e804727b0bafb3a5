use clap::{Parser, Subcommand};
use hg_controls::Thermostat;
use hg_core::units::{k, m, m2, w};
use hg_core::{SimulationElement, Unit};
use hg_electrical::{
    CpsElement, ElectricalBus, ElectricalNetwork, GenTransformer, TransmissionLine,
};
use hg_sim::{
    ElementKind, ElementRef, HistogramRecorder, PlotRecorder, Query, RealTime, SimError,
    SimOptions, SimResult, Simulator,
};
use hg_thermal::{HeaterCooler, ThermalCoupling, ThermalProcess};

#[derive(Parser)]
#[command(name = "hg-cli")]
#[command(about = "heatgrid CLI - Coupled thermal and electrical network simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Two rooms exchanging heat through a wall
    Equilibrate {
        /// Time step (s)
        #[arg(long, default_value_t = 300.0)]
        dt: f64,
        /// End time (s)
        #[arg(long, default_value_t = 3600.0)]
        t_end: f64,
        /// Wall conductance (W/K)
        #[arg(long, default_value_t = 100.0)]
        conductivity: f64,
        /// Print every n-th sample
        #[arg(long, default_value_t = 1)]
        every: usize,
    },
    /// Heated room against a cold outside, switched by a thermostat
    Thermostat {
        /// Target temperature (K)
        #[arg(long, default_value_t = 293.15)]
        target: f64,
        /// Width of the switching band (K)
        #[arg(long, default_value_t = 1.0)]
        hysteresis: f64,
        /// Outside temperature (K)
        #[arg(long, default_value_t = 268.15)]
        outside: f64,
        /// Heater rated power (W)
        #[arg(long, default_value_t = 1500.0)]
        power: f64,
        /// Simulated hours
        #[arg(long, default_value_t = 6.0)]
        hours: f64,
        /// Time step (s)
        #[arg(long, default_value_t = 30.0)]
        dt: f64,
        /// Pace the run at this many simulated seconds per wall second
        #[arg(long)]
        speedup: Option<f64>,
    },
    /// Print buses, branch stamps and bus injections of a demo grid
    Grid,
}

fn main() -> SimResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Equilibrate {
            dt,
            t_end,
            conductivity,
            every,
        } => cmd_equilibrate(dt, t_end, conductivity, every),
        Commands::Thermostat {
            target,
            hysteresis,
            outside,
            power,
            hours,
            dt,
            speedup,
        } => cmd_thermostat(target, hysteresis, outside, power, hours, dt, speedup),
        Commands::Grid => cmd_grid(),
    }
}

fn cmd_equilibrate(dt: f64, t_end: f64, conductivity: f64, every: usize) -> SimResult<()> {
    println!("Equilibrating two rooms");
    println!("  dt = {:.3} s, t_end = {:.3} s, G = {:.3} W/K", dt, t_end, conductivity);

    let mut sim = Simulator::new();
    let hot = sim.add_process(ThermalProcess::room("hot_room", m2(50.0), m(2.5), k(333.15))?)?;
    let cold = sim.add_process(ThermalProcess::room("cold_room", m2(50.0), m(2.5), k(293.15))?)?;
    let wall = sim.add_coupling(ThermalCoupling::new("wall", conductivity, hot, cold)?)?;

    let rooms = sim.find(&Query::new().kind(ElementKind::Process));
    let temps = sim.record(PlotRecorder::new("temperature"), &rooms)?;
    let power = sim.record(
        PlotRecorder::new("power"),
        &[ElementRef::new(ElementKind::Coupling, wall)],
    )?;

    let steps = sim.run_with(&SimOptions {
        dt,
        t_end,
        record_every: every.max(1),
        ..SimOptions::default()
    })?;

    let (Some(temps), Some(power)) = (sim.recorder(temps), sim.recorder(power)) else {
        return Ok(());
    };
    let hot = temps.y_values("hot_room").unwrap_or_default();
    let cold = temps.y_values("cold_room").unwrap_or_default();
    let wall = power.y_values("wall").unwrap_or_default();

    let kelvin = Unit::Kelvin.symbol();
    println!(
        "{:>10} {:>12} {:>12} {:>12}",
        "t [s]",
        format!("hot [{}]", kelvin),
        format!("cold [{}]", kelvin),
        format!("wall [{}]", Unit::Watt.symbol()),
    );
    for (i, t) in temps.x_values().iter().enumerate() {
        println!(
            "{:>10.1} {:>12.4} {:>12.4} {:>12.3}",
            t,
            hot.get(i).copied().unwrap_or(f64::NAN),
            cold.get(i).copied().unwrap_or(f64::NAN),
            wall.get(i).copied().unwrap_or(f64::NAN),
        );
    }
    println!("✓ {} steps, t = {:.1} s", steps, sim.time());
    Ok(())
}

fn cmd_thermostat(
    target: f64,
    hysteresis: f64,
    outside: f64,
    power: f64,
    hours: f64,
    dt: f64,
    speedup: Option<f64>,
) -> SimResult<()> {
    println!("Running thermostat loop for {:.1} h", hours);

    let mut sim = match speedup {
        Some(s) => Simulator::new().with_executor(RealTime::new(s).ok_or(SimError::InvalidArg {
            what: "speedup must be finite and positive",
        })?),
        None => Simulator::new(),
    };
    let room = sim.add_process(ThermalProcess::room("room", m2(20.0), m(2.5), k(target - 2.0))?)?;
    let out = sim.add_process(ThermalProcess::constant("outside", outside)?)?;
    sim.add_coupling(ThermalCoupling::new("facade", 30.0, room, out)?)?;
    let heater = sim.add_heater(HeaterCooler::new("radiator", room, power)?)?;
    sim.add_thermostat(Thermostat::new("thermostat", target, hysteresis, room, heater)?)?;

    let room_ref = ElementRef::new(ElementKind::Process, room);
    let band = (target - 1.5 * hysteresis, target + 1.5 * hysteresis);
    let hist = sim.record(
        HistogramRecorder::new("temperature", band.0, band.1, 8)?,
        &[room_ref],
    )?;
    let on = sim.record(
        PlotRecorder::new("on"),
        &[ElementRef::new(ElementKind::Heater, heater)],
    )?;

    sim.reset()?;
    sim.run(hours * 3600.0, dt)?;

    if let Some(hist) = sim.recorder(hist) {
        let width = hist.bin_width();
        println!("Room temperature distribution:");
        for (i, count) in hist.counts("room").unwrap_or_default().iter().enumerate() {
            let label = match i {
                0 => format!("      < {:.2}", band.0),
                7 => format!("     >= {:.2}", band.1),
                i => format!("{:.2}..{:.2}", band.0 + (i - 1) as f64 * width, band.0 + i as f64 * width),
            };
            println!("  {:>16} K: {}", label, count);
        }
    }
    if let Some(on) = sim.recorder(on) {
        let states = on.y_values("radiator").unwrap_or_default();
        let switches = states.windows(2).filter(|w| w[0] != w[1]).count();
        let duty = states.iter().filter(|v| **v > 0.5).count() as f64 / states.len().max(1) as f64;
        println!("  heater switches: {}", switches);
        println!("  duty cycle: {:.1} %", 100.0 * duty);
    }
    if let Some(t) = sim.observe(room_ref, "temperature") {
        println!("✓ Final room temperature: {:.3} K", t);
    }
    Ok(())
}

fn cmd_grid() -> SimResult<()> {
    let mut net = ElectricalNetwork::new();
    let grid = net.add_bus(ElectricalBus::slack("grid")?)?;
    let plant = net.add_bus(ElectricalBus::pv("plant")?)?;
    let town = net.add_bus(ElectricalBus::pq("town")?)?;
    let village = net.add_bus(ElectricalBus::pq("village")?)?;
    net.connect("step_up", grid, plant, GenTransformer::with_ratio(1.05, 0.1, 0.0)?)?;
    net.connect("grid_town", grid, town, TransmissionLine::new(12.0, 0.4, 0.12, 0.02)?)?;
    net.connect("town_village", town, village, TransmissionLine::new(4.0, 0.35, 0.2, 0.0)?)?;

    let turbine = net.add_element(CpsElement::producer("turbine", 1.2e6)?)?;
    let homes = net.add_element(CpsElement::from_power("homes", w(650.0e3))?)?;
    let farms = net.add_element(CpsElement::from_power("farms", w(180.0e3))?)?;
    net.attach(plant, turbine)?;
    net.attach(town, homes)?;
    net.attach(village, farms)?;

    // One hour of constant demand
    net.reset()?;
    net.calculate(0.0, 3600.0);
    net.update(0.0, 3600.0);

    let topo = net.topology()?;
    println!("Buses:");
    for (i, bus) in net.buses().iter().enumerate() {
        let p = match bus.state().p {
            Some(p) => format!("P = {:.1} k{}", p / 1.0e3, Unit::Watt.symbol()),
            None => "P from solver".to_string(),
        };
        println!("  [{}] {} ({}): {}", i, bus.name(), topo.bus_types[i].as_str(), p);
    }
    println!("Elements:");
    for el in net.elements().iter() {
        let bus = el
            .bus()
            .and_then(|b| net.bus(b))
            .map(|b| b.name())
            .unwrap_or("-");
        println!(
            "  {} @ {}: {:.1} k{}h",
            el.name(),
            bus,
            el.delta_energy() / 3.6e6,
            Unit::Watt.symbol()
        );
    }
    println!("Branches:");
    for entry in &topo.branches {
        let name = net.branch(entry.branch).map(|b| b.name()).unwrap_or("?");
        let s = entry.stamp;
        println!("  {} {} -> {}", name, entry.from, entry.to);
        println!("    Yff = {:.4}  Yft = {:.4}", s.ff, s.ft);
        println!("    Ytf = {:.4}  Ytt = {:.4}", s.tf, s.tt);
    }
    println!("Islands: {}", topo.islands().len());
    Ok(())
}
