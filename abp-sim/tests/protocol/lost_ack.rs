use abp_sim::{Entity, EventKind, Packet, SenderState};

use crate::support::{in_flight, single_message, step_until};

#[test]
fn lost_ack_triggers_retransmission_and_duplicate_is_suppressed() {
    let mut sim = single_message();

    step_until(&mut sim, |s| s.application().len() == 1);
    let ack = sim
        .world_mut()
        .cancel_event_if(|e| e.event().is(EventKind::ChannelArrival, Entity::A))
        .expect("ack in flight");
    assert_eq!(ack.event().packet(), Some(&Packet::ack(0, 0)));
    let original = *sim.sender().last_sent_packet();

    step_until(&mut sim, |s| s.sender().stats().retransmissions == 1);
    assert_eq!(in_flight(&sim, Entity::B), vec![original]);

    step_until(&mut sim, |s| s.receiver().stats().duplicate_acks_sent == 1);
    assert_eq!(sim.application().len(), 1);
    assert_eq!(in_flight(&sim, Entity::A), vec![Packet::ack(0, 0)]);

    let report = sim.run();
    assert_eq!(report.delivered.len(), 1);
    assert_eq!(report.sender.acks_accepted, 1);
    assert_eq!(report.receiver.out_of_order_received, 1);
}

#[test]
fn timeout_fires_after_configured_interval() {
    let mut sim = single_message();

    step_until(&mut sim, |s| s.sender().state() == SenderState::AwaitingAck);
    let sent_at = sim.world().current_time().as_f64();
    let deadline = sim.world().timer_deadline(Entity::A).expect("timer running");
    assert_eq!(deadline.as_f64(), sent_at + sim.sender().timeout());

    sim.world_mut()
        .cancel_event_if(|e| e.event().is(EventKind::ChannelArrival, Entity::B))
        .expect("data in flight");
    step_until(&mut sim, |s| s.sender().stats().retransmissions == 1);
    assert_eq!(sim.world().current_time(), deadline);
}
