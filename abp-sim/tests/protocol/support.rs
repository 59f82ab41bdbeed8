use abp_sim::{Entity, Event, Packet, Simulation, SimulationConfig};

/// Single message, clean channel, runs until nothing is in flight.
pub fn single_message() -> Simulation {
    Simulation::new(SimulationConfig::default().with_messages(1).with_drain(true))
        .expect("valid config")
}

/// Steps until `condition` holds. Panics if the run ends first.
pub fn step_until<F>(sim: &mut Simulation, mut condition: F)
where
    F: FnMut(&Simulation) -> bool,
{
    for _ in 0..10_000 {
        if condition(sim) {
            return;
        }
        assert!(sim.step(), "simulation ended before the condition held");
    }
    panic!("condition never held");
}

/// Packets currently in flight toward `entity`.
pub fn in_flight(sim: &Simulation, entity: Entity) -> Vec<Packet> {
    sim.world()
        .pending_events()
        .iter()
        .filter_map(|scheduled| match scheduled.event() {
            Event::ChannelArrival { entity: e, packet } if *e == entity => Some(*packet),
            _ => None,
        })
        .collect()
}
