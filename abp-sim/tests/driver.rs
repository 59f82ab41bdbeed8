use abp_sim::{SenderState, Simulation, SimulationConfig, SimulationError};

#[test]
fn default_run_stops_at_message_budget() {
    let report = Simulation::new(SimulationConfig::default()).unwrap().run();

    assert_eq!(report.seed, 9999);
    assert_eq!(report.messages_generated, 10);
    assert!(report.delivered.len() <= 10);
    assert_eq!(report.channel.lost, 0);
    assert_eq!(report.channel.corrupted, 0);
    assert!(report.events_processed > 0);
    assert!(report
        .to_string()
        .contains("after sending 10 msgs from layer5"));
}

#[test]
fn same_seed_same_report() {
    let config = SimulationConfig::default()
        .with_messages(15)
        .with_faults(0.2, 0.2)
        .with_seed(1234);

    let first = Simulation::new(config.clone()).unwrap().run();
    let second = Simulation::new(config).unwrap().run();
    assert_eq!(first, second);
}

#[test]
fn different_seeds_diverge() {
    let base = SimulationConfig::default().with_messages(15).with_faults(0.3, 0.3);
    let first = Simulation::new(base.clone().with_seed(1)).unwrap().run();
    let second = Simulation::new(base.with_seed(2)).unwrap().run();
    assert_ne!(first.end_time, second.end_time);
}

#[test]
fn draining_settles_all_traffic() {
    let mut sim = Simulation::new(
        SimulationConfig::default()
            .with_messages(8)
            .with_faults(0.25, 0.25)
            .with_seed(77)
            .with_drain(true),
    )
    .unwrap();
    while sim.step() {}

    assert!(sim.is_finished());
    assert!(!sim.world().has_pending_events());
    assert_eq!(sim.sender().state(), SenderState::Ready);
    assert_eq!(
        sim.application().len() as u64,
        sim.sender().stats().messages_sent
    );
    assert_eq!(sim.messages_generated(), 8);
}

#[test]
fn config_loads_from_json_file() {
    let path = std::env::temp_dir().join(format!("abp-sim-config-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{ "messages": 4, "corrupt_probability": 0.1, "seed": 5, "drain": true }"#,
    )
    .unwrap();

    let config = SimulationConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.messages, 4);
    assert_eq!(config.corrupt_probability, 0.1);
    assert_eq!(config.loss_probability, 0.0);
    assert!(config.drain);

    let report = Simulation::new(config).unwrap().run();
    assert_eq!(report.messages_generated, 4);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let result = SimulationConfig::from_json_file("/nonexistent/abp-sim.json");
    assert!(matches!(result, Err(SimulationError::Io(_))));
}

#[test]
fn report_serializes_to_json() {
    let report = Simulation::new(SimulationConfig::default().with_messages(2))
        .unwrap()
        .run();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["seed"], 9999);
    assert_eq!(value["messages_generated"], 2);
    assert!(value["channel"]["transmitted"].is_u64());
    assert!(value["delivered"].is_array());
}
