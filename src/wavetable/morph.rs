use super::grid::{Slot, WavetableGrid};
use crate::error::{ConvertError, Result};
use crate::shared::NUM_SLOTS;

/// Fill every empty slot of `grid` from its enabled neighbours.
///
/// Slots between two anchors cross-fade linearly from the left anchor to the
/// right one; slots before the first or after the last anchor repeat the
/// nearest anchor. Anchors are copied untouched and every slot of the result
/// is enabled. A grid without a single enabled slot means the distributor and
/// the caller disagree, which is reported as a contract violation.
pub fn try_morph(grid: &WavetableGrid) -> Result<WavetableGrid> {
    let anchors: Vec<usize> = grid
        .enabled_indices()
        .into_iter()
        .filter(|&i| grid.slots[i].waveform.is_some())
        .collect();

    if anchors.is_empty() {
        return Err(ConvertError::ContractViolation(
            "morph needs at least one enabled slot, grid has none".to_string(),
        ));
    }
    if anchors.len() != grid.enabled_count() {
        return Err(ConvertError::ContractViolation(
            "enabled slot without waveform data".to_string(),
        ));
    }

    let mut morphed = grid.clone();
    let first = anchors[0];
    let last = anchors[anchors.len() - 1];

    // hold the edges
    for slot in 0..first {
        morphed.slots[slot] = grid.slots[first].clone();
    }
    for slot in last + 1..NUM_SLOTS {
        morphed.slots[slot] = grid.slots[last].clone();
    }

    // cross-fade the gaps
    for pair in anchors.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        let (Some(a), Some(b)) = (&grid.slots[left].waveform, &grid.slots[right].waveform) else {
            continue; // anchors were checked above
        };
        let span = (right - left) as f32;
        for slot in left + 1..right {
            let t = (slot - left) as f32 / span;
            morphed.slots[slot] = Slot::filled(a.blend(b, t));
        }
    }

    debug_assert!(morphed.is_fully_enabled());
    Ok(morphed)
}

// Same as `try_morph`, but a contract violation is fatal.
pub fn morph(grid: &WavetableGrid) -> WavetableGrid {
    match try_morph(grid) {
        Ok(morphed) => morphed,
        Err(e) => panic!("{e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::WAVEFORM_LEN;
    use crate::wavetable::{distribute, Waveform};

    fn constant(v: f32) -> Waveform {
        Waveform::new([v; WAVEFORM_LEN])
    }

    fn ramp_wave(offset: f32) -> Waveform {
        Waveform::new(std::array::from_fn(|i| offset + i as f32 / WAVEFORM_LEN as f32))
    }

    #[test]
    fn anchors_are_preserved_bit_for_bit() {
        let mut grid = WavetableGrid::new();
        for (n, &slot) in distribute(8, NUM_SLOTS).anchors.iter().enumerate() {
            grid.set(slot, ramp_wave(n as f32 * 0.1 - 0.4));
        }
        let morphed = morph(&grid);
        for slot in grid.enabled_indices() {
            let before = grid.slots[slot].samples();
            let after = morphed.slots[slot].samples();
            let same_bits = before.iter().zip(after.iter()).all(|(a, b)| a.to_bits() == b.to_bits());
            assert!(same_bits, "slot {slot} changed");
        }
    }

    #[test]
    fn result_is_fully_enabled_for_every_anchor_count() {
        for items in 1..=NUM_SLOTS {
            let mut grid = WavetableGrid::new();
            for &slot in &distribute(items, NUM_SLOTS).anchors {
                grid.set(slot, constant(slot as f32));
            }
            let morphed = morph(&grid);
            assert!(morphed.is_fully_enabled(), "items = {items}");
            assert_eq!(morphed.enabled_mask(), 0xFFFF);
        }
    }

    #[test]
    fn gaps_are_linear_cross_fades() {
        let mut grid = WavetableGrid::new();
        grid.set(0, constant(0.0));
        grid.set(4, constant(1.0));
        grid.set(15, constant(1.0));
        let morphed = morph(&grid);

        let expected = [0.0, 0.25, 0.5, 0.75, 1.0];
        for (slot, want) in expected.iter().enumerate() {
            assert_eq!(morphed.slots[slot].samples()[7], *want, "slot {slot}");
        }
        // equal neighbours stay flat
        assert!((5..15).all(|s| (morphed.slots[s].samples()[0] - 1.0).abs() < 1e-6));
    }

    #[test]
    fn edges_hold_the_nearest_anchor() {
        let mut grid = WavetableGrid::new();
        grid.set(3, constant(0.5));
        grid.set(10, constant(-0.5));
        let morphed = morph(&grid);

        for slot in 0..3 {
            assert_eq!(morphed.slots[slot], grid.slots[3]);
        }
        for slot in 11..NUM_SLOTS {
            assert_eq!(morphed.slots[slot], grid.slots[10]);
        }
    }

    #[test]
    fn single_anchor_fills_the_whole_grid() {
        let mut grid = WavetableGrid::new();
        grid.set(0, Waveform::sine());
        let morphed = morph(&grid);
        assert!(morphed.slots.iter().all(|s| s.waveform.as_ref() == Some(&Waveform::sine())));
    }

    #[test]
    fn source_grid_is_left_alone() {
        let mut grid = WavetableGrid::new();
        grid.set(0, constant(1.0));
        grid.set(15, constant(0.0));
        let snapshot = grid.clone();
        let _ = morph(&grid);
        assert_eq!(grid, snapshot);
    }

    #[test]
    #[should_panic(expected = "contract violation")]
    fn empty_grid_is_fatal() {
        morph(&WavetableGrid::new());
    }

    #[test]
    fn empty_grid_reports_contract_violation() {
        let err = try_morph(&WavetableGrid::new()).unwrap_err();
        assert!(matches!(err, ConvertError::ContractViolation(_)));
    }

    #[test]
    fn enabled_slot_without_data_is_rejected() {
        let mut grid = WavetableGrid::new();
        grid.set(0, constant(1.0));
        grid.slots[5].enabled = true;
        assert!(matches!(try_morph(&grid), Err(ConvertError::ContractViolation(_))));
    }
}
