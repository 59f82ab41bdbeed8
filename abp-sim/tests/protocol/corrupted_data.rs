use abp_sim::{Corruption, Entity, Event, EventKind, Packet, Payload, SenderState};

use crate::support::{in_flight, single_message, step_until};

#[test]
fn corrupted_data_is_reacked_with_previous_ack_then_retransmitted() {
    let mut sim = single_message();

    step_until(&mut sim, |s| s.sender().state() == SenderState::AwaitingAck);
    let original = *sim.sender().last_sent_packet();

    let scheduled = sim
        .world_mut()
        .cancel_event_if(|e| e.event().is(EventKind::ChannelArrival, Entity::B))
        .expect("data in flight");
    let arrival = scheduled.time();
    let mut packet = *scheduled.event().packet().expect("channel arrival carries a packet");
    packet.corrupt(Corruption::Payload);
    sim.world_mut()
        .schedule_event_at(
            Event::ChannelArrival {
                entity: Entity::B,
                packet,
            },
            arrival,
        )
        .unwrap();

    step_until(&mut sim, |s| s.receiver().stats().corrupt_received == 1);
    assert!(sim.application().is_empty());
    assert_eq!(in_flight(&sim, Entity::A), vec![Packet::ack(1, 1)]);

    // The stale ack does not match seq 0 and is ignored.
    step_until(&mut sim, |s| s.sender().stats().acks_discarded == 1);
    assert_eq!(sim.sender().state(), SenderState::AwaitingAck);

    step_until(&mut sim, |s| s.sender().stats().retransmissions == 1);
    assert_eq!(in_flight(&sim, Entity::B), vec![original]);

    let report = sim.run();
    assert_eq!(report.delivered, vec![Payload::filled(b'a')]);
}

#[test]
fn corrupted_ack_is_ignored_until_timeout() {
    let mut sim = single_message();

    step_until(&mut sim, |s| s.application().len() == 1);
    let scheduled = sim
        .world_mut()
        .cancel_event_if(|e| e.event().is(EventKind::ChannelArrival, Entity::A))
        .expect("ack in flight");
    let mut ack = *scheduled.event().packet().expect("channel arrival carries a packet");
    ack.corrupt(Corruption::SeqNum);
    sim.world_mut()
        .schedule_event_at(
            Event::ChannelArrival {
                entity: Entity::A,
                packet: ack,
            },
            scheduled.time(),
        )
        .unwrap();

    step_until(&mut sim, |s| s.sender().stats().acks_discarded == 1);
    assert!(sim.world().is_timer_running(Entity::A));

    let report = sim.run();
    assert_eq!(report.sender.retransmissions, 1);
    assert_eq!(report.delivered.len(), 1);
}
