use crate::shared::NUM_SLOTS;

/// Which grid slots receive an extracted waveform
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution {
    pub anchors: Vec<usize>, // ascending slot indices
    pub truncated: usize,    // waveforms that didn't fit in the grid
}

impl Distribution {
    pub fn is_anchor(&self, slot: usize) -> bool {
        self.anchors.contains(&slot)
    }

    // slot index -> "a waveform lands here"
    pub fn slot_map(&self) -> [bool; NUM_SLOTS] {
        std::array::from_fn(|i| self.is_anchor(i))
    }
}

/// Spread `item_count` waveforms over `slot_count` slots as evenly as possible,
/// always anchoring the first and (for two or more items) the last slot.
///
/// The walk keeps a running target of how many items should have been placed
/// by each slot and rounds the half-step-shifted difference up, which settles
/// ties on the earlier slot:
///
/// ```text
///  items  slots 0..15
///      1  X---------------
///      2  X--------------X
///      3  X-------X------X
///      8  X-X-X-X--X-X-X-X
///     16  XXXXXXXXXXXXXXXX
/// ```
///
/// More items than slots are cut down to the first `slot_count`; the excess is
/// reported in `truncated`. Zero items still yields the placeholder anchor at 0.
pub fn distribute(item_count: usize, slot_count: usize) -> Distribution {
    let placed_items = item_count.min(slot_count);
    let truncated = item_count - placed_items;

    if slot_count == 0 {
        return Distribution { anchors: Vec::new(), truncated };
    }
    if placed_items <= 1 || slot_count == 1 {
        return Distribution { anchors: vec![0], truncated };
    }

    // the walk counts gaps, so it runs on the zero-based item count
    let step = (placed_items - 1) as f64 / (slot_count - 1) as f64;
    let mut running = 0.0f64;
    let mut placed = 0i64;
    let mut anchors = Vec::with_capacity(placed_items);

    for slot in 0..slot_count {
        running += step;
        let increment = (running - placed as f64 - step / 2.0).ceil() as i64;
        placed += increment;
        if increment >= 1 {
            anchors.push(slot);
        }
    }

    // float drift must never change the shape
    debug_assert_eq!(anchors.len(), placed_items);
    Distribution { anchors, truncated }
}
