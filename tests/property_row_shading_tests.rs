use forestplot_rs::api::{DecorationTargets, ForestPlotConfig, draw_alternating_row_colors};
use forestplot_rs::core::GroupSet;
use forestplot_rs::render::{RecordingSurface, RenderSurface};
use proptest::prelude::*;

fn labels_for(group_flags: &[bool]) -> Vec<String> {
    group_flags
        .iter()
        .enumerate()
        .map(|(index, is_group)| {
            if *is_group {
                format!("Group {index}")
            } else {
                format!("row {index}")
            }
        })
        .collect()
}

/// Shades rows given in reading order (top first); returns reading positions.
///
/// Ticks run bottom-up, so position `p` sits on tick `len - 1 - p`.
fn shade(labels: &[String], targets: &DecorationTargets) -> Vec<usize> {
    let ticks: Vec<String> = labels.iter().rev().cloned().collect();
    let mut surface = RecordingSurface::new();
    surface.set_row_categories(&ticks).expect("categories");
    let mut positions: Vec<usize> =
        draw_alternating_row_colors(&mut surface, targets, &ForestPlotConfig::default())
            .expect("shade")
            .into_iter()
            .map(|tick| labels.len() - 1 - tick)
            .collect();
    positions.sort_unstable();
    positions
}

proptest! {
    #[test]
    fn ungrouped_rows_shade_odd_indices(count in 1usize..80) {
        let flags = vec![false; count];
        let shaded = shade(&labels_for(&flags), &DecorationTargets::default());

        let expected: Vec<usize> = (0..count).filter(|index| index % 2 == 1).collect();
        prop_assert_eq!(shaded, expected);
    }

    #[test]
    fn rows_after_group_boundaries_start_unshaded(
        flags in proptest::collection::vec(any::<bool>(), 1..80)
    ) {
        let labels = labels_for(&flags);
        let groups: GroupSet = labels
            .iter()
            .zip(&flags)
            .filter(|(_, is_group)| **is_group)
            .map(|(label, _)| label.as_str())
            .collect();
        let targets = DecorationTargets { groups, table_header: None };
        let shaded = shade(&labels, &targets);

        // Parity within each block depends only on the position in the block.
        let mut position_in_block = 0usize;
        for (index, is_group) in flags.iter().enumerate() {
            if *is_group {
                prop_assert!(!shaded.contains(&index));
                position_in_block = 0;
                continue;
            }
            prop_assert_eq!(shaded.contains(&index), position_in_block % 2 == 1);
            position_in_block += 1;
        }
    }

    #[test]
    fn table_header_is_never_shaded(count in 1usize..80) {
        let flags = vec![false; count];
        // The header is the top tick, reading position 0.
        let targets = DecorationTargets {
            groups: GroupSet::new(),
            table_header: Some(count - 1),
        };
        let shaded = shade(&labels_for(&flags), &targets);

        let expected: Vec<usize> = (1..count).filter(|position| position % 2 == 0).collect();
        prop_assert_eq!(shaded, expected);
    }
}
