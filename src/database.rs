//! Per-node parameter storage.
//!
//! A [`ParameterBank`] pairs one static descriptor table with a cache of the
//! last values seen on the wire. A [`NodeParameterDatabase`] owns the banks of
//! one physical node together with its identity and monitor record, and the
//! [`NodeRegistry`] maps node ids to their databases.

use crate::data::BANKS;
use crate::error::{ParamError, Result};
use crate::types::{MonitorState, MonitorStateUpdate, NodeId, NodeInfo, ParamDesc, ParamValue};
use std::collections::BTreeMap;

/// One contiguous id range with its value cache
#[derive(Debug, Clone)]
pub struct ParameterBank {
    descriptors: &'static [ParamDesc],
    values: Vec<ParamValue>,
    dirty: bool,
}

impl ParameterBank {
    /// Empty cache over `descriptors`
    pub fn new(descriptors: &'static [ParamDesc]) -> Self {
        Self {
            descriptors,
            values: vec![ParamValue::default(); descriptors.len()],
            dirty: false,
        }
    }

    /// First id of the bank
    pub fn base(&self) -> u16 {
        self.descriptors.first().map_or(0, |d| d.id)
    }

    /// Number of descriptors, placeholders included
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Bank has no descriptors
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// `id` falls inside the bank's range
    pub fn contains(&self, id: u16) -> bool {
        self.index(id).is_some()
    }

    fn index(&self, id: u16) -> Option<usize> {
        let offset = id.checked_sub(self.base())? as usize;
        (offset < self.descriptors.len()).then_some(offset)
    }

    /// Descriptor table in id order
    pub fn descriptors(&self) -> &'static [ParamDesc] {
        self.descriptors
    }

    /// Descriptor of `id`, if inside the bank
    pub fn descriptor(&self, id: u16) -> Option<&'static ParamDesc> {
        self.index(id).map(|i| &self.descriptors[i])
    }

    /// Last value seen for `id`
    pub fn value(&self, id: u16) -> Option<&ParamValue> {
        self.index(id).map(|i| &self.values[i])
    }

    /// Replace the cached value; returns false when `id` is outside the bank
    pub fn store(&mut self, id: u16, value: ParamValue) -> bool {
        match self.index(id) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    /// Force the next read of `id` to go to the node
    pub fn invalidate(&mut self, id: u16) {
        if let Some(i) = self.index(id) {
            self.values[i].valid = false;
        }
    }

    /// A nonvolatile write has not been committed yet
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record a nonvolatile write
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Forget recorded nonvolatile writes
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

/// All parameter state for one set-up node
#[derive(Debug, Clone)]
pub struct NodeParameterDatabase {
    node: NodeId,
    info: NodeInfo,
    banks: Vec<ParameterBank>,
    monitor: MonitorState,
}

impl NodeParameterDatabase {
    /// Fresh database with empty caches for every bank of the node class
    pub fn new(node: NodeId, info: NodeInfo) -> Self {
        Self {
            node,
            info,
            banks: BANKS.iter().map(|b| ParameterBank::new(*b)).collect(),
            monitor: MonitorState::default(),
        }
    }

    /// Address of the node this database belongs to
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Identity read during setup
    pub fn info(&self) -> &NodeInfo {
        &self.info
    }

    /// Banks in id order
    pub fn banks(&self) -> &[ParameterBank] {
        &self.banks
    }

    fn bank_for(&self, id: u16) -> Option<&ParameterBank> {
        self.banks.iter().find(|b| b.contains(id))
    }

    fn bank_for_mut(&mut self, id: u16) -> Option<&mut ParameterBank> {
        self.banks.iter_mut().find(|b| b.contains(id))
    }

    /// Descriptor lookup; ids outside every bank are unknown parameters
    pub fn descriptor(&self, id: u16) -> Result<&'static ParamDesc> {
        self.bank_for(id)
            .and_then(|b| b.descriptor(id))
            .ok_or(ParamError::UnknownParameter { id })
    }

    /// Whether the node's firmware exposes `desc`
    pub fn firmware_supports(&self, desc: &ParamDesc) -> bool {
        self.info.fw_version >= desc.min_firmware
    }

    /// Cached value of `id`, valid or not
    pub fn cached(&self, id: u16) -> Option<&ParamValue> {
        self.bank_for(id).and_then(|b| b.value(id))
    }

    /// Replace the cached value of `id`; false when no bank holds it
    pub fn store(&mut self, id: u16, value: ParamValue) -> bool {
        self.bank_for_mut(id).map_or(false, |b| b.store(id, value))
    }

    /// Force the next read of `id` to go to the node
    pub fn invalidate(&mut self, id: u16) {
        if let Some(bank) = self.bank_for_mut(id) {
            bank.invalidate(id);
        }
    }

    /// Record an uncommitted nonvolatile write to `id`
    pub fn mark_dirty(&mut self, id: u16) {
        if let Some(bank) = self.bank_for_mut(id) {
            bank.mark_dirty();
        }
    }

    /// Any bank holds an uncommitted nonvolatile write
    pub fn is_dirty(&self) -> bool {
        self.banks.iter().any(ParameterBank::is_dirty)
    }

    /// Forget nonvolatile writes in every bank
    pub fn clear_dirty(&mut self) {
        self.banks.iter_mut().for_each(ParameterBank::clear_dirty);
    }

    /// Monitor port record
    pub fn monitor(&self) -> &MonitorState {
        &self.monitor
    }

    /// Fold a monitor gain conversion result into the monitor record
    pub fn apply_monitor_update(&mut self, update: &MonitorStateUpdate) {
        self.monitor.apply(update);
    }
}

/// Explicit map of every node that has been set up
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<NodeId, NodeParameterDatabase>,
}

impl NodeRegistry {
    /// Registry with no nodes
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a database, returning the one it replaced
    pub fn insert(&mut self, db: NodeParameterDatabase) -> Option<NodeParameterDatabase> {
        self.nodes.insert(db.node(), db)
    }

    /// Drop the database of `node`, returning it
    pub fn remove(&mut self, node: NodeId) -> Option<NodeParameterDatabase> {
        self.nodes.remove(&node)
    }

    /// Database of a set-up node
    pub fn get(&self, node: NodeId) -> Result<&NodeParameterDatabase> {
        self.nodes.get(&node).ok_or(ParamError::UnknownNode(node))
    }

    /// Mutable database of a set-up node
    pub fn get_mut(&mut self, node: NodeId) -> Result<&mut NodeParameterDatabase> {
        self.nodes.get_mut(&node).ok_or(ParamError::UnknownNode(node))
    }

    /// `node` has been set up
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Number of set-up nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// No node has been set up
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Set-up nodes in address order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::data::{APP_PARAMS, DRIVE_PARAMS};
    use crate::types::TestPoint;

    fn info(fw: u16) -> NodeInfo {
        NodeInfo {
            device_type: DEVICE_TYPE_CS,
            device_model: 1,
            fw_version: fw,
            hw_version: 0,
        }
    }

    fn cached_value(bits: i64) -> ParamValue {
        ParamValue {
            bits,
            value: bits as f64,
            raw: bits.to_le_bytes()[..2].to_vec(),
            valid: true,
        }
    }

    #[test]
    fn test_bank_offset_lookup() {
        let bank = ParameterBank::new(DRIVE_PARAMS);
        assert_eq!(bank.base(), 256);
        assert_eq!(bank.len(), 128);
        assert!(bank.contains(383));
        assert!(!bank.contains(384));
        assert!(!bank.contains(255));
        assert_eq!(bank.descriptor(P_I_MAX).map(|d| d.id), Some(P_I_MAX));
    }

    #[test]
    fn test_bank_store_and_invalidate() {
        let mut bank = ParameterBank::new(APP_PARAMS);
        assert!(!bank.value(512).unwrap().valid);
        assert!(bank.store(512, cached_value(7)));
        assert_eq!(bank.value(512).unwrap().bits, 7);
        bank.invalidate(512);
        assert!(!bank.value(512).unwrap().valid);
        // Bits survive invalidation
        assert_eq!(bank.value(512).unwrap().bits, 7);
        assert!(!bank.store(600, cached_value(1)));
    }

    #[test]
    fn test_database_routes_ids_to_banks() {
        let db = NodeParameterDatabase::new(NodeId::new(0, 1), info(FW_MILESTONE_2R0));
        assert_eq!(db.banks().len(), 4);
        assert_eq!(db.descriptor(0).unwrap().id, 0);
        assert_eq!(db.descriptor(540).unwrap().id, 540);
        assert!(matches!(
            db.descriptor(200),
            Err(ParamError::UnknownParameter { id: 200 })
        ));
    }

    #[test]
    fn test_firmware_gating() {
        let old = NodeParameterDatabase::new(NodeId::new(0, 0), info(0x1300));
        let desc = old.descriptor(P_RMS_SLOW_LIM).unwrap();
        assert!(!old.firmware_supports(desc));
        let new = NodeParameterDatabase::new(NodeId::new(0, 0), info(FW_MILESTONE_DUAL_RMS));
        assert!(new.firmware_supports(desc));
    }

    #[test]
    fn test_dirty_tracking_is_per_bank() {
        let mut db = NodeParameterDatabase::new(NodeId::new(0, 0), info(FW_MILESTONE_2R0));
        assert!(!db.is_dirty());
        db.mark_dirty(61);
        assert!(db.is_dirty());
        assert!(db.banks()[0].is_dirty());
        assert!(!db.banks()[1].is_dirty());
        db.clear_dirty();
        assert!(!db.is_dirty());
    }

    #[test]
    fn test_monitor_update_is_recorded() {
        let mut db = NodeParameterDatabase::new(NodeId::new(0, 0), info(FW_MILESTONE_2R0));
        assert!(!db.monitor().valid);
        db.apply_monitor_update(&MonitorStateUpdate {
            test_point: TestPoint::VEL_MEAS,
            full_scale: 1000.0,
            valid: true,
        });
        assert_eq!(db.monitor().test_point, TestPoint::VEL_MEAS);
        assert!(db.monitor().valid);
    }

    #[test]
    fn test_registry_replaces_and_removes() {
        let mut registry = NodeRegistry::new();
        let node = NodeId::new(1, 3);
        assert!(registry.insert(NodeParameterDatabase::new(node, info(0x1500))).is_none());
        let replaced = registry.insert(NodeParameterDatabase::new(node, info(0x2000)));
        assert_eq!(replaced.unwrap().info().fw_version, 0x1500);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(node).unwrap().info().fw_version, 0x2000);
        assert!(registry.remove(node).is_some());
        assert!(matches!(registry.get(node), Err(ParamError::UnknownNode(n)) if n == node));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_iterates_in_address_order() {
        let mut registry = NodeRegistry::new();
        for (c, a) in [(1, 0), (0, 2), (0, 1)] {
            registry.insert(NodeParameterDatabase::new(NodeId::new(c, a), info(0x2000)));
        }
        let order: Vec<NodeId> = registry.nodes().collect();
        assert_eq!(
            order,
            vec![NodeId::new(0, 1), NodeId::new(0, 2), NodeId::new(1, 0)]
        );
    }
}
