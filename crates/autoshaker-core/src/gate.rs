//! Per-agent position-change gate.
//!
//! A scan is only worth running when the agent moved to another tile or
//! its radius changed. The gate remembers the last `(tile, radius)` pair
//! seen for each agent and answers whether the current pair differs.
//! Memos are keyed by [`AgentId`] so split-screen agents never suppress
//! each other's scans.

use std::collections::BTreeMap;

use autoshaker_types::{AgentId, TilePoint};

/// The last scan parameters seen for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanMemo {
    /// Tile the agent stood on.
    pub tile: TilePoint,
    /// Effective radius in tiles.
    pub radius: i32,
}

/// Remembers the last scan parameters per agent.
#[derive(Debug, Clone, Default)]
pub struct PositionChangeGate {
    memos: BTreeMap<AgentId, ScanMemo>,
}

impl PositionChangeGate {
    /// Create an empty gate; the first query for any agent rescans.
    pub const fn new() -> Self {
        Self {
            memos: BTreeMap::new(),
        }
    }

    /// Whether `agent` needs a rescan. Returns `false` only when both the
    /// tile and the radius equal the previous call's; otherwise records
    /// the new pair and returns `true`.
    pub fn should_rescan(&mut self, agent: AgentId, tile: TilePoint, radius: i32) -> bool {
        let memo = ScanMemo { tile, radius };
        if self.memos.get(&agent) == Some(&memo) {
            return false;
        }
        self.memos.insert(agent, memo);
        true
    }

    /// The memo held for `agent`.
    pub fn memo(&self, agent: AgentId) -> Option<ScanMemo> {
        self.memos.get(&agent).copied()
    }

    /// Drop the memo for an agent that left.
    pub fn forget(&mut self, agent: AgentId) {
        self.memos.remove(&agent);
    }

    /// Drop all memos so every agent rescans on its next tick.
    pub fn reset(&mut self) {
        self.memos.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_identical_call_is_suppressed() {
        let mut gate = PositionChangeGate::new();
        let agent = AgentId::new();
        let tile = TilePoint::new(4, 4);
        assert!(gate.should_rescan(agent, tile, 2));
        assert!(!gate.should_rescan(agent, tile, 2));
        assert!(!gate.should_rescan(agent, tile, 2));
    }

    #[test]
    fn moving_or_resizing_triggers_rescan() {
        let mut gate = PositionChangeGate::new();
        let agent = AgentId::new();
        assert!(gate.should_rescan(agent, TilePoint::new(0, 0), 2));
        assert!(gate.should_rescan(agent, TilePoint::new(0, 1), 2));
        assert!(gate.should_rescan(agent, TilePoint::new(0, 1), 3));
        assert_eq!(
            gate.memo(agent),
            Some(ScanMemo {
                tile: TilePoint::new(0, 1),
                radius: 3
            })
        );
    }

    #[test]
    fn agents_do_not_share_memos() {
        let mut gate = PositionChangeGate::new();
        let a = AgentId::new();
        let b = AgentId::new();
        let tile = TilePoint::new(1, 1);
        assert!(gate.should_rescan(a, tile, 1));
        assert!(gate.should_rescan(b, tile, 1));
        assert!(!gate.should_rescan(a, tile, 1));
        assert!(!gate.should_rescan(b, tile, 1));
    }

    #[test]
    fn forget_and_reset_clear_memos() {
        let mut gate = PositionChangeGate::new();
        let a = AgentId::new();
        let b = AgentId::new();
        let tile = TilePoint::new(1, 1);
        gate.should_rescan(a, tile, 1);
        gate.should_rescan(b, tile, 1);

        gate.forget(a);
        assert!(gate.should_rescan(a, tile, 1));
        assert!(!gate.should_rescan(b, tile, 1));

        gate.reset();
        assert!(gate.should_rescan(b, tile, 1));
    }
}
