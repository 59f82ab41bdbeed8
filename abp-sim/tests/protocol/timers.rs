use abp_sim::{Entity, SimTime, SimWorld, TimerError};

#[test]
fn double_start_is_rejected_and_deadline_kept() {
    let mut world = SimWorld::new(7);
    world.start_timer(Entity::A, 20.0).unwrap();

    assert!(matches!(
        world.start_timer(Entity::A, 5.0),
        Err(TimerError::AlreadyRunning { entity: Entity::A, .. })
    ));

    let fired = world.pop_event().unwrap();
    assert_eq!(fired.time(), SimTime::new(20.0));
    assert!(!world.has_pending_events());
}

#[test]
fn stop_then_start_rearms() {
    let mut world = SimWorld::new(7);
    world.start_timer(Entity::A, 20.0).unwrap();
    world.stop_timer(Entity::A).unwrap();
    assert_eq!(
        world.stop_timer(Entity::A),
        Err(TimerError::NotRunning { entity: Entity::A })
    );

    world.start_timer(Entity::A, 8.0).unwrap();
    assert_eq!(world.timer_deadline(Entity::A), Some(SimTime::new(8.0)));
}
