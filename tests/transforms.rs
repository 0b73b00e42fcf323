//! Validates transformation closure and the algebraic identities the
//! operators are built on

use rand::SeedableRng;
use rand::rngs::StdRng;
use ringgrid::{Grid, GridError, GridGenerator, SeedKind};

fn sample_grid(seed: u64) -> Grid {
    let mut generator = GridGenerator::seeded(seed);
    let Ok(grid) = generator.generate(&SeedKind::RootBox) else {
        unreachable!("generation converges within the configured attempts");
    };
    grid
}

#[test]
fn every_operator_preserves_validity() {
    let mut grid = sample_grid(1);

    let Ok(()) = grid.band_swap(0, 2) else {
        unreachable!("indices in range");
    };
    assert!(grid.validate(), "band swap");

    let Ok(()) = grid.stack_swap(1, 2) else {
        unreachable!("indices in range");
    };
    assert!(grid.validate(), "stack swap");

    let Ok(()) = grid.band_row_swap(1, 0, 2) else {
        unreachable!("indices in range");
    };
    assert!(grid.validate(), "band row swap");

    let Ok(()) = grid.stack_col_swap(2, 0, 1) else {
        unreachable!("indices in range");
    };
    assert!(grid.validate(), "stack col swap");

    let Ok(()) = grid.torus_shift(1, 2) else {
        unreachable!("offsets in range");
    };
    assert!(grid.validate(), "torus shift");

    grid.mirror_rows();
    assert!(grid.validate(), "row mirror");
    grid.mirror_cols();
    assert!(grid.validate(), "column mirror");
    grid.transpose();
    assert!(grid.validate(), "transpose");
    grid.anti_transpose();
    assert!(grid.validate(), "anti-transpose");
    grid.rotate();
    assert!(grid.validate(), "rotation");
    grid.counter_rotate();
    assert!(grid.validate(), "counter-rotation");

    let mut rng = StdRng::seed_from_u64(2);
    let Ok(_) = grid.relabel_digits(9, 9, &mut rng) else {
        unreachable!("parameters in range");
    };
    assert!(grid.validate(), "digit relabeling");
}

#[test]
fn swaps_are_involutions() {
    let original = sample_grid(3);
    let mut grid = original.clone();

    for (a, b) in [(0, 1), (0, 2), (1, 2)] {
        let Ok(()) = grid.band_swap(a, b) else {
            unreachable!("indices in range");
        };
        assert_ne!(grid, original);
        let Ok(()) = grid.band_swap(a, b) else {
            unreachable!("indices in range");
        };
        assert_eq!(grid, original);

        let Ok(()) = grid.stack_swap(a, b) else {
            unreachable!("indices in range");
        };
        let Ok(()) = grid.stack_swap(a, b) else {
            unreachable!("indices in range");
        };
        assert_eq!(grid, original);
    }
}

#[test]
fn equal_indices_leave_the_grid_byte_identical() {
    let original = sample_grid(4);
    let mut grid = original.clone();

    for idx in 0..3 {
        let Ok(()) = grid.band_swap(idx, idx) else {
            unreachable!("indices in range");
        };
        let Ok(()) = grid.stack_swap(idx, idx) else {
            unreachable!("indices in range");
        };
        let Ok(()) = grid.band_row_swap(1, idx, idx) else {
            unreachable!("indices in range");
        };
        let Ok(()) = grid.stack_col_swap(2, idx, idx) else {
            unreachable!("indices in range");
        };
    }
    assert_eq!(grid.to_line_string(), original.to_line_string());
}

#[test]
fn four_rotations_restore_the_grid() {
    let original = sample_grid(5);

    let mut grid = original.clone();
    for turn in 0..4 {
        if turn > 0 {
            assert_ne!(grid, original, "turn {turn}");
        }
        grid.rotate();
    }
    assert_eq!(grid, original);

    let mut grid = original.clone();
    for _ in 0..4 {
        grid.counter_rotate();
    }
    assert_eq!(grid, original);
}

#[test]
fn rotation_pairs_cancel() {
    let original = sample_grid(6);
    let mut grid = original.clone();
    grid.rotate();
    grid.counter_rotate();
    assert_eq!(grid, original);
}

#[test]
fn both_transposes_are_involutions() {
    let original = sample_grid(7);

    let mut grid = original.clone();
    grid.transpose();
    grid.transpose();
    assert_eq!(grid, original);

    grid.anti_transpose();
    grid.anti_transpose();
    assert_eq!(grid, original);

    grid.mirror_rows();
    grid.mirror_rows();
    assert_eq!(grid, original);

    grid.mirror_cols();
    grid.mirror_cols();
    assert_eq!(grid, original);
}

#[test]
fn torus_shifts_compose_modulo_three() {
    let original = sample_grid(8);
    let mut grid = original.clone();

    let Ok(()) = grid.torus_shift(1, 2) else {
        unreachable!("offsets in range");
    };
    assert_ne!(grid, original);
    let Ok(()) = grid.torus_shift(2, 1) else {
        unreachable!("offsets in range");
    };
    assert_eq!(grid, original);
}

#[test]
fn fixed_frame_grids_ignore_the_torus_shift() {
    let mut generator = GridGenerator::seeded(9);
    let mut grid = Grid::fixed_frame();
    let Ok(()) = generator.generate_into(&mut grid, &SeedKind::RootBox) else {
        unreachable!("generation converges within the configured attempts");
    };

    let before = grid.clone();
    let Ok(()) = grid.torus_shift(1, 1) else {
        unreachable!("offsets in range");
    };
    assert_eq!(grid, before);

    // The capability survives the conversion of a regular grid too
    let converted = sample_grid(10).into_fixed_frame();
    let mut shifted = converted.clone();
    let Ok(()) = shifted.torus_shift(2, 0) else {
        unreachable!("offsets in range");
    };
    assert_eq!(shifted, converted);
}

#[test]
fn out_of_range_transform_indices_fail_fast() {
    let original = sample_grid(11);
    let mut grid = original.clone();

    assert!(matches!(
        grid.band_swap(0, 3),
        Err(GridError::OutOfRange { .. })
    ));
    assert!(matches!(
        grid.stack_col_swap(3, 0, 1),
        Err(GridError::OutOfRange { .. })
    ));
    assert!(matches!(
        grid.torus_shift(4, 0),
        Err(GridError::OutOfRange { .. })
    ));
    assert_eq!(grid, original);
}

#[test]
fn relabeling_is_a_bijection_with_a_working_inverse() {
    let original = sample_grid(12);
    let mut grid = original.clone();
    let mut rng = StdRng::seed_from_u64(13);

    let Ok(mapping) = grid.relabel_digits(6, 9, &mut rng) else {
        unreachable!("parameters in range");
    };
    assert!(grid.validate());

    // A relabeling renames digits, it never changes how many of each exist
    for digit in 1..=9u8 {
        let count = grid
            .to_line_string()
            .chars()
            .filter(|&c| c == char::from(b'0' + digit))
            .count();
        assert_eq!(count, 9, "digit {digit}");
    }

    grid.apply_mapping(&mapping.inverse());
    assert_eq!(grid, original);
}

#[test]
fn small_relabel_domains_stay_closed() {
    let original = sample_grid(14);
    let mut rng = StdRng::seed_from_u64(15);

    for splits in [0, 1, 18] {
        for init_part in [2, 5, 9] {
            let mut grid = original.clone();
            let Ok(mapping) = grid.relabel_digits(splits, init_part, &mut rng) else {
                unreachable!("parameters in range");
            };
            assert!(grid.validate(), "splits {splits} part {init_part}");
            grid.apply_mapping(&mapping.inverse());
            assert_eq!(grid, original);
        }
    }
}
