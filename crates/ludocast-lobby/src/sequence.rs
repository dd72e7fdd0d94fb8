//! Turn-order generation.

use ludocast_protocol::{Color, TurnSequence};

use crate::{ColorRing, LobbyError};

/// Builds the cyclic turn order over `claimed`, opening with `first`.
///
/// Walks the ring from `first`, skipping colors nobody claimed, until it
/// arrives back at `first`. The result has exactly one link per claimed
/// color and visits them in ring order, whatever order they were
/// claimed in. A single claimed color links to itself.
///
/// # Errors
/// - `EmptyClaim` if `claimed` is empty
/// - `DuplicateColor` if a color is listed twice
/// - `FirstNotClaimed` if `first` is not in `claimed`
pub fn compute_sequence(
    ring: &ColorRing,
    claimed: &[Color],
    first: Color,
) -> Result<TurnSequence, LobbyError> {
    if claimed.is_empty() {
        return Err(LobbyError::EmptyClaim);
    }
    for (i, color) in claimed.iter().enumerate() {
        if claimed[..i].contains(color) {
            return Err(LobbyError::DuplicateColor(*color));
        }
    }
    if !claimed.contains(&first) {
        return Err(LobbyError::FirstNotClaimed(first));
    }

    let mut links = Vec::with_capacity(claimed.len());
    let mut color = first;
    loop {
        let mut next = ring.after(color);
        while !claimed.contains(&next) {
            next = ring.after(next);
        }
        links.push((color, next));
        color = next;
        if color == first {
            break;
        }
    }

    Ok(links.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    use Color::{Blue, Green, Red, Yellow};

    /// Every non-empty subset of the four colors, each in declaration order.
    fn subsets() -> Vec<Vec<Color>> {
        (1u8..16)
            .map(|mask| {
                Color::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, c)| c)
                    .collect()
            })
            .collect()
    }

    /// The ring restricted to `subset`, rotated to start at `first`.
    fn expected_walk(ring: &ColorRing, subset: &[Color], first: Color) -> Vec<Color> {
        let mut walk = vec![first];
        let mut color = ring.after(first);
        for _ in 0..ring.len() {
            if color == first {
                break;
            }
            if subset.contains(&color) {
                walk.push(color);
            }
            color = ring.after(color);
        }
        walk
    }

    #[test]
    fn test_two_players_link_to_each_other() {
        let seq = compute_sequence(&ColorRing::default(), &[Green, Red], Green).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.next(Green), Some(Red));
        assert_eq!(seq.next(Red), Some(Green));
    }

    #[test]
    fn test_unclaimed_colors_are_skipped() {
        // Yellow and red claimed: yellow → green(skip) → red → blue(skip) → yellow.
        let seq = compute_sequence(&ColorRing::default(), &[Yellow, Red], Yellow).unwrap();
        assert_eq!(seq.next(Yellow), Some(Red));
        assert_eq!(seq.next(Red), Some(Yellow));
        assert!(!seq.contains(Green));
    }

    #[test]
    fn test_claim_order_does_not_change_ring_order() {
        let ring = ColorRing::default();
        let a = compute_sequence(&ring, &[Blue, Green, Yellow], Blue).unwrap();
        let b = compute_sequence(&ring, &[Yellow, Blue, Green], Blue).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.order_from(Blue), vec![Blue, Yellow, Green]);
    }

    #[test]
    fn test_single_color_is_a_self_loop() {
        let seq = compute_sequence(&ColorRing::default(), &[Blue], Blue).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.next(Blue), Some(Blue));
    }

    #[test]
    fn test_every_subset_and_first_forms_one_ring_ordered_cycle() {
        let rings = [
            ColorRing::default(),
            ColorRing::new(vec![Yellow, Red, Green, Blue]).unwrap(),
        ];
        for ring in &rings {
            for subset in subsets() {
                for &first in &subset {
                    let seq = compute_sequence(ring, &subset, first).unwrap();
                    assert_eq!(seq.len(), subset.len());

                    let walk = seq.order_from(first);
                    assert_eq!(walk, expected_walk(ring, &subset, first), "{subset:?} from {first}");

                    // Closing the walk returns to the start.
                    let last = walk[walk.len() - 1];
                    assert_eq!(seq.next(last), Some(first));
                    for color in &subset {
                        assert!(seq.contains(*color));
                    }
                }
            }
        }
    }

    #[test]
    fn test_rejects_empty_claim() {
        let err = compute_sequence(&ColorRing::default(), &[], Green).unwrap_err();
        assert!(matches!(err, LobbyError::EmptyClaim));
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = compute_sequence(&ColorRing::default(), &[Red, Green, Red], Red).unwrap_err();
        assert!(matches!(err, LobbyError::DuplicateColor(Red)));
    }

    #[test]
    fn test_rejects_unclaimed_first() {
        let err = compute_sequence(&ColorRing::default(), &[Red, Green], Blue).unwrap_err();
        assert!(matches!(err, LobbyError::FirstNotClaimed(Blue)));
    }
}
