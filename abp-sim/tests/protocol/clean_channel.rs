use abp_sim::{Entity, Packet, Payload, SenderState, Simulation, SimulationConfig};

use crate::support::{in_flight, single_message, step_until};

#[test]
fn one_message_round_trip() {
    let mut sim = single_message();

    step_until(&mut sim, |s| s.sender().state() == SenderState::AwaitingAck);
    let data = in_flight(&sim, Entity::B);
    assert_eq!(data, vec![Packet::new(0, 0, Payload::filled(b'a'))]);
    assert!(sim.world().is_timer_running(Entity::A));

    step_until(&mut sim, |s| s.application().len() == 1);
    assert_eq!(in_flight(&sim, Entity::A), vec![Packet::ack(0, 0)]);

    let report = sim.run();
    assert_eq!(report.delivered, vec![Payload::filled(b'a')]);
    assert_eq!(report.sender.acks_accepted, 1);
    assert_eq!(report.sender.retransmissions, 0);
    assert_eq!(report.receiver.duplicate_acks_sent, 0);
}

#[test]
fn sequence_numbers_alternate_across_messages() {
    let config = SimulationConfig {
        messages: 6,
        mean_interarrival: 1000.0,
        drain: true,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    let mut seqnums = Vec::new();

    while sim.step() {
        // At most one new packet goes out per step.
        if sim.sender().stats().messages_sent as usize > seqnums.len() {
            seqnums.push(sim.sender().last_sent_packet().seqnum);
        }
    }

    let sent = sim.sender().stats().messages_sent as usize;
    assert_eq!(seqnums.len(), sent);
    for (i, seq) in seqnums.iter().enumerate() {
        assert_eq!(*seq, (i % 2) as u32);
    }
    assert_eq!(sim.receiver().stats().delivered as usize, sent);
    assert_eq!(sim.sender().state(), SenderState::Ready);
    assert!(!sim.world().has_pending_events());
}
