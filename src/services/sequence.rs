use serde::{Deserialize, Serialize};

const WO_PREFIX: &str = "WO-";

/// Counter behind the `WO-NNNNN` work-order numbers.
///
/// Persisted as a bare integer. Numbers are never handed out twice, even when
/// the work order carrying one is later deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberingSequence {
    next: u64,
}

impl Default for NumberingSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl NumberingSequence {
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    pub fn current(&self) -> u64 {
        self.next
    }

    /// The number the next created work order will carry. Does not advance.
    pub fn peek_next(&self) -> String {
        format_wo_number(self.next)
    }

    pub fn advance(&mut self) {
        self.next += 1;
    }
}

pub fn format_wo_number(value: u64) -> String {
    format!("{WO_PREFIX}{value:05}")
}

/// Numeric part of a `WO-NNNNN` label.
pub fn parse_wo_number(label: &str) -> Option<u64> {
    label.strip_prefix(WO_PREFIX)?.parse().ok()
}
