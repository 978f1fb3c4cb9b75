use cpm_params::data::BANKS;
use cpm_params::sim::SimulatedDrive;
use cpm_params::{Cpm, NodeId, ParameterSnapshot};

const NODE: NodeId = NodeId::new(2, 7);

fn setup() -> Cpm<SimulatedDrive> {
    let mut cpm = Cpm::new(SimulatedDrive::clearpath(NODE));
    cpm.setup_node(NODE).unwrap();
    cpm
}

#[test]
fn test_read_all_skips_placeholders() {
    let mut cpm = setup();
    let values = cpm.read_all_parameters(NODE).unwrap();

    let expected = BANKS
        .iter()
        .flat_map(|bank| bank.iter())
        .filter(|d| !d.is_placeholder())
        .count();
    assert_eq!(values.len(), expected);
    assert!(values.iter().all(|(id, _)| *id != 44 && *id != 547));
    assert!(values.iter().any(|&(id, v)| id == 257 && v == 20.0));
}

#[test]
fn test_read_all_honours_firmware_gate() {
    let mut sim = SimulatedDrive::clearpath(NODE);
    sim.set_bits(NODE, 1, 0x1300, 2);
    let mut cpm = Cpm::new(sim);
    cpm.setup_node(NODE).unwrap();

    let values = cpm.read_all_parameters(NODE).unwrap();
    assert!(values.iter().all(|(id, _)| *id != 275 && *id != 778));
    assert!(values.iter().all(|(id, _)| *id < 768));
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut cpm = setup();
    let snapshot = cpm.snapshot(NODE).unwrap();
    assert_eq!(snapshot.node, NODE);
    assert_eq!(snapshot.info.fw_version, 0x2000);

    let json = serde_json::to_string(&snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["node"]["controller"], 2);
    assert_eq!(value["node"]["address"], 7);
    let max_current = value["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == 257)
        .unwrap();
    assert_eq!(max_current["name"], "Drive max current");
    assert_eq!(max_current["value"], 20.0);

    let back: ParameterSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.parameters.len(), snapshot.parameters.len());
    assert_eq!(back.timestamp, snapshot.timestamp);
}
