//! The driver loop: pops events and routes them to the protocol entities.

use tracing::instrument;

use crate::{
    error::SimulationResult,
    protocol::{DeliveryLog, Message, Packet, Payload, Receiver, Sender},
    runner::{SimulationConfig, SimulationReport},
    sim::{Entity, Event, SimWorld},
};

/// A complete simulation: context, both entities and the receiving application.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    world: SimWorld,
    sender: Sender,
    receiver: Receiver,
    application: DeliveryLog,
    messages_generated: u64,
    finished: bool,
}

impl Simulation {
    /// Validates `config`, checks the random source and schedules the first message.
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let mut world = SimWorld::new_with_channel_config(config.channel_config(), config.seed);
        world.rng().self_test()?;

        let mut simulation = Self {
            sender: Sender::new(config.timeout),
            receiver: Receiver::new(),
            application: DeliveryLog::new(),
            config,
            world,
            messages_generated: 0,
            finished: false,
        };
        simulation.generate_next_arrival();
        Ok(simulation)
    }

    /// Returns the configuration of this run.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the simulation context.
    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    /// Returns the simulation context mutably, for injecting faults by hand.
    pub fn world_mut(&mut self) -> &mut SimWorld {
        &mut self.world
    }

    /// Returns entity A.
    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    /// Returns entity B.
    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    /// Returns everything delivered to the application at B.
    pub fn application(&self) -> &DeliveryLog {
        &self.application
    }

    /// Returns how many application messages have been generated.
    pub fn messages_generated(&self) -> u64 {
        self.messages_generated
    }

    /// Returns `true` once the run has ended.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn budget_reached(&self) -> bool {
        self.messages_generated >= self.config.messages
    }

    /// Schedules the next application message at A.
    ///
    /// Interarrival times are uniform on `[0, 2 * mean)`.
    pub fn generate_next_arrival(&mut self) {
        let gap = self.config.mean_interarrival * 2.0 * self.world.rng().random01();
        tracing::trace!(gap, "GENERATE NEXT ARRIVAL: creating new arrival");
        if let Err(e) = self
            .world
            .schedule_event(Event::ApplicationArrival { entity: Entity::A }, gap)
        {
            tracing::error!("GENERATE NEXT ARRIVAL: {e}");
        }
    }

    /// The `n`-th message is twenty copies of the letter `'a' + n mod 26`.
    pub fn message_for(n: u64) -> Message {
        // n % 26 always fits in a u8.
        let letter = b'a' + (n % 26) as u8;
        Message::new(Payload::filled(letter))
    }

    /// Routes an application message into the entity's send path.
    pub fn deliver_outbound(&mut self, entity: Entity, message: Message) {
        match entity {
            Entity::A => {
                self.sender.output(&mut self.world, message);
            }
            Entity::B => {
                tracing::debug!(data = %message.data, "B does not originate data; message ignored");
            }
        }
    }

    /// Routes a packet popped out of the channel to its destination entity.
    pub fn deliver_inbound(&mut self, entity: Entity, packet: Packet) {
        match entity {
            Entity::A => self.sender.input(&mut self.world, packet),
            Entity::B => self
                .receiver
                .input(&mut self.world, packet, &mut self.application),
        }
    }

    /// Routes a timer expiry to its entity.
    pub fn fire_timeout(&mut self, entity: Entity) {
        match entity {
            Entity::A => self.sender.timer_interrupt(&mut self.world),
            Entity::B => tracing::debug!("B has no timer handler; timeout ignored"),
        }
    }

    /// Processes the next event.
    ///
    /// Returns `false` once the run has ended: the queue ran dry, or the
    /// message budget was reached (after in-flight traffic settles when
    /// draining).
    #[instrument(skip(self), level = "trace")]
    pub fn step(&mut self) -> bool {
        if self.finished {
            return false;
        }

        let Ok(scheduled) = self.world.pop_event() else {
            self.finished = true;
            return false;
        };
        if tracing::enabled!(tracing::Level::TRACE) {
            self.world.trace_event_list();
        }

        if self.budget_reached() && !self.config.drain {
            self.finished = true;
            return false;
        }

        match scheduled.into_event() {
            Event::ApplicationArrival { entity } => {
                if self.budget_reached() {
                    tracing::trace!("message budget reached; no further arrivals");
                } else {
                    self.generate_next_arrival();
                    let message = Self::message_for(self.messages_generated);
                    tracing::trace!(data = %message.data, "MAINLOOP: data given to entity");
                    self.messages_generated += 1;
                    self.deliver_outbound(entity, message);
                }
            }
            Event::ChannelArrival { entity, packet } => self.deliver_inbound(entity, packet),
            Event::Timeout { entity } => self.fire_timeout(entity),
        }
        true
    }

    /// Runs until the simulation ends and returns the report.
    #[instrument(skip(self), fields(seed = self.config.seed))]
    pub fn run(mut self) -> SimulationReport {
        while self.step() {}
        tracing::info!(
            time = %self.world.current_time(),
            messages = self.messages_generated,
            "Simulator terminated"
        );
        self.report()
    }

    /// Builds a report from the current state.
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            seed: self.config.seed,
            end_time: self.world.current_time(),
            messages_generated: self.messages_generated,
            events_processed: self.world.events_processed(),
            channel: *self.world.channel_stats(),
            sender: *self.sender.stats(),
            receiver: *self.receiver.stats(),
            delivered: self.application.payloads(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EventKind;

    #[test]
    fn new_schedules_first_arrival() {
        let sim = Simulation::new(SimulationConfig::default()).unwrap();
        let pending = sim.world().pending_events();
        assert_eq!(pending.len(), 1);
        assert!(pending[0]
            .event()
            .is(EventKind::ApplicationArrival, Entity::A));
        assert!(pending[0].time().as_f64() < 2000.0);
    }

    #[test]
    fn messages_cycle_through_alphabet() {
        assert_eq!(Simulation::message_for(0).data, Payload::filled(b'a'));
        assert_eq!(Simulation::message_for(25).data, Payload::filled(b'z'));
        assert_eq!(Simulation::message_for(26).data, Payload::filled(b'a'));
    }

    #[test]
    fn zero_message_budget_stops_on_first_event() {
        let mut sim = Simulation::new(SimulationConfig::default().with_messages(0)).unwrap();
        assert!(!sim.step());
        assert!(sim.is_finished());
        assert_eq!(sim.messages_generated(), 0);
        assert!(!sim.step());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = Simulation::new(SimulationConfig::default().with_faults(3.0, 0.0));
        assert!(result.is_err());
    }

    #[test]
    fn report_keeps_delivered_bytes_verbatim() {
        let mut sim = Simulation::new(SimulationConfig::default().with_messages(1)).unwrap();
        let raw = Payload::new([0xC3; 20]);
        sim.world_mut()
            .schedule_event_at(
                Event::ChannelArrival {
                    entity: Entity::B,
                    packet: Packet::new(0, 0, raw),
                },
                crate::sim::SimTime::ZERO,
            )
            .unwrap();

        assert!(sim.step());
        let report = sim.report();
        assert_eq!(report.delivered, vec![raw]);
        assert_eq!(report.delivered, sim.application().payloads());
    }
}
