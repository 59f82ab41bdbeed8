use abp_sim::{Entity, Payload, SenderState, Simulation, SimulationConfig};
use proptest::prelude::*;

use crate::support::in_flight;

fn lossy_config(seed: u64, messages: u64, loss: f64, corrupt: f64) -> SimulationConfig {
    SimulationConfig {
        messages,
        mean_interarrival: 200.0,
        ..SimulationConfig::default()
    }
    .with_seed(seed)
    .with_faults(loss, corrupt)
    .with_drain(true)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn one_packet_in_flight_and_timer_tracks_state(
        seed in any::<u64>(),
        messages in 1u64..20,
        loss in 0.0f64..0.4,
        corrupt in 0.0f64..0.4,
    ) {
        let mut sim = Simulation::new(lossy_config(seed, messages, loss, corrupt)).unwrap();

        while sim.step() {
            let awaiting = sim.sender().state() == SenderState::AwaitingAck;
            prop_assert_eq!(awaiting, sim.world().is_timer_running(Entity::A));
            prop_assert!(!sim.world().is_timer_running(Entity::B));

            let stats = sim.sender().stats();
            prop_assert_eq!(
                stats.messages_sent - stats.acks_accepted,
                u64::from(awaiting)
            );

            let mut intact: Vec<_> = in_flight(&sim, Entity::B)
                .into_iter()
                .filter(|p| p.is_intact())
                .map(|p| p.payload)
                .collect();
            intact.dedup();
            prop_assert!(intact.len() <= 1);
            if let Some(payload) = intact.first() {
                prop_assert!(awaiting);
                prop_assert_eq!(*payload, sim.sender().last_sent_packet().payload);
            }
        }
    }

    #[test]
    fn every_sent_message_is_delivered_once_in_order(
        seed in any::<u64>(),
        messages in 1u64..=26,
        loss in 0.0f64..0.5,
        corrupt in 0.0f64..0.5,
    ) {
        let report = Simulation::new(lossy_config(seed, messages, loss, corrupt))
            .unwrap()
            .run();

        prop_assert_eq!(report.messages_generated, messages);
        prop_assert_eq!(
            report.sender.messages_sent + report.sender.messages_dropped,
            messages
        );
        prop_assert_eq!(report.delivered.len() as u64, report.sender.messages_sent);

        // With at most 26 messages every payload letter is distinct, so a
        // strictly increasing letter sequence rules out duplicates and reordering.
        let letters: Vec<u8> = report.delivered.iter().map(|d| d.as_bytes()[0]).collect();
        for pair in letters.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for delivered in &report.delivered {
            let letter = delivered.as_bytes()[0];
            prop_assert!(letter.is_ascii_lowercase());
            prop_assert_eq!(*delivered, Payload::filled(letter));
        }
    }
}
