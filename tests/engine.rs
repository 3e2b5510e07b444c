use game_of_life::driver::{Command, Runner, ScriptedDriver, StopReason};
use game_of_life::game_of_life::{io, GameOfLifeRules};
use game_of_life::{Engine, EngineError, Grid, MaxGenerations};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::tempdir;

fn load(content: &str) -> Result<Engine, EngineError> {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("grid.txt");
    std::fs::write(&path, content).unwrap();
    Engine::from_file(&path)
}

#[test]
fn glider_keeps_its_shape_while_moving() {
    let mut engine = load("0100000\n0010000\n1110000\n0000000\n0000000\n0000000\n").unwrap();
    let start = engine.current_generation().living_cells();

    for _ in 0..4 {
        engine.step();
    }

    let shifted: Vec<(usize, usize)> = start.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
    assert_eq!(engine.current_generation().living_cells(), shifted);
    assert_eq!(engine.generation_count(), 5);
}

#[test]
fn corner_cell_never_wraps() {
    let mut engine = Engine::empty(6, 6, MaxGenerations::Unbounded).unwrap();
    engine.set_cell(0, 0, true).unwrap();

    assert_eq!(engine.neighbor_count(5, 5), 0);
    assert_eq!(engine.neighbor_count(0, 5), 0);
    assert_eq!(engine.neighbor_count(5, 0), 0);

    for (row, col) in [(0, 1), (1, 0), (1, 1)] {
        engine.set_cell(row, col, true).unwrap();
    }
    assert_eq!(engine.neighbor_count(0, 0), 3);
}

#[test]
fn malformed_sources_are_rejected() {
    for content in ["", "\n\n", "0101\n010\n", "01\n0111\n"] {
        assert!(
            matches!(load(content), Err(EngineError::MalformedGridFile(_))),
            "accepted {content:?}"
        );
    }
}

#[test]
fn non_utf8_source_is_malformed_not_io() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("grid.txt");
    std::fs::write(&path, b"01\xff\n10\n").unwrap();

    assert!(matches!(
        Engine::from_file(&path),
        Err(EngineError::MalformedGridFile(_))
    ));
}

#[test]
fn final_row_without_newline_loads() {
    let engine = load("010\n101").unwrap();
    assert_eq!(engine.rows(), 2);
    assert_eq!(engine.cols(), 3);
    assert_eq!(engine.current_generation().living_cells(), vec![(0, 1), (1, 0), (1, 2)]);
}

#[test]
fn next_generation_matches_rule_on_random_soup() {
    let engine = Engine::new(
        12,
        9,
        true,
        MaxGenerations::Unbounded,
        &mut ChaCha8Rng::seed_from_u64(11),
    )
    .unwrap();

    let next = engine.next_generation();
    for row in 0..engine.rows() {
        for col in 0..engine.cols() {
            let expected = GameOfLifeRules::should_be_alive(
                engine.cell(row, col).unwrap(),
                engine.neighbor_count(row, col),
            );
            assert_eq!(next.get(row, col), expected, "cell ({row}, {col})");
        }
    }
}

#[test]
fn interactive_session_edits_and_saves() {
    let temp_dir = tempdir().unwrap();
    let save_path = temp_dir.path().join("session.txt");

    let mut engine = Engine::empty(5, 5, MaxGenerations::Bounded(100)).unwrap();
    let mut driver = ScriptedDriver::new([
        Command::TogglePause,
        Command::Toggle { row: 2, col: 1 },
        Command::Toggle { row: 2, col: 2 },
        Command::Toggle { row: 2, col: 3 },
        Command::Save,
        Command::TogglePause,
        Command::Continue,
        Command::Continue,
        Command::Quit,
    ]);

    let summary = Runner::new(&save_path).run(&mut engine, &mut driver).unwrap();

    assert_eq!(summary.reason, StopReason::Quit);
    assert_eq!(summary.saves, 1);
    assert_eq!(
        std::fs::read_to_string(&save_path).unwrap(),
        "00000\n00000\n01110\n00000\n00000\n"
    );
    // Two ticks after resuming bring the blinker back to horizontal
    assert_eq!(engine.generation_count(), 3);
    assert_eq!(
        engine.current_generation().living_cells(),
        vec![(2, 1), (2, 2), (2, 3)]
    );
}

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..12).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(any::<bool>(), rows * cols)
            .prop_map(move |cells| Grid { rows, cols, cells })
    })
}

proptest! {
    #[test]
    fn save_then_load_reproduces_grid(grid in grid_strategy()) {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("grid.txt");

        let engine = Engine::from_grid(grid.clone(), MaxGenerations::Unbounded).unwrap();
        engine.save(&path).unwrap();
        let loaded = Engine::from_file(&path).unwrap();

        prop_assert_eq!(loaded.rows(), grid.rows);
        prop_assert_eq!(loaded.cols(), grid.cols);
        prop_assert_eq!(loaded.current_generation(), &grid);
        prop_assert_eq!(io::grid_to_string(&grid).lines().count(), grid.rows);
    }
}
