use std::collections::{HashMap, VecDeque};

use npuzzle::{PuzzleState, Solver};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Distances from the goal to every state within `depth` moves.
fn distances_from_goal(size: usize, depth: usize) -> HashMap<PuzzleState, usize> {
    let goal = PuzzleState::goal(size);
    let mut dist = HashMap::from([(goal.clone(), 0)]);
    let mut queue = VecDeque::from([goal]);

    while let Some(state) = queue.pop_front() {
        let d = dist[&state];
        if d == depth {
            continue;
        }
        for next in state.neighbors() {
            if !dist.contains_key(&next) {
                dist.insert(next.clone(), d + 1);
                queue.push_back(next);
            }
        }
    }

    dist
}

fn permutations(items: &[u32]) -> Vec<Vec<u32>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            result.push(tail);
        }
    }
    result
}

fn assert_valid_solution(solver: &Solver) {
    let path = solver.solution().unwrap();
    assert_eq!(&path[0], solver.initial());
    assert!(path.last().unwrap().is_goal());
    for pair in path.windows(2) {
        assert!(pair[0].move_between(&pair[1]).is_some());
    }
}

#[test]
fn every_two_by_two_board_matches_bfs() {
    let reachable = distances_from_goal(2, usize::MAX);
    assert_eq!(reachable.len(), 12);

    for tiles in permutations(&[0, 1, 2, 3]) {
        let state = PuzzleState::from_tiles(2, tiles);
        let solver = Solver::new(state.clone());

        match reachable.get(&state) {
            Some(&distance) => {
                assert_eq!(solver.moves(), Some(distance), "{}", state);
                assert_valid_solution(&solver);
            }
            None => {
                assert!(!solver.is_solvable(), "{}", state);
                assert_eq!(solver.moves(), None);
            }
        }
        assert_eq!(solver.is_solvable(), state.has_solvable_parity());
    }
}

#[test]
fn three_by_three_walks_match_bfs() {
    let depth = 16;
    let dist = distances_from_goal(3, depth);
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..40 {
        let state = PuzzleState::scrambled(3, depth, &mut rng);
        let solver = Solver::new(state.clone());
        assert_eq!(solver.moves(), dist.get(&state).copied(), "{}", state);
        assert_valid_solution(&solver);
    }
}

#[test]
fn exactly_one_of_board_and_twin_is_solvable() {
    let mut rng = StdRng::seed_from_u64(99);

    for size in 2..=4 {
        for _ in 0..10 {
            let state = PuzzleState::scrambled(size, 12, &mut rng);
            let twin = state.twin().unwrap();

            let solver = Solver::new(state.clone());
            let twin_solver = Solver::new(twin.clone());
            assert!(solver.is_solvable(), "{}", state);
            assert!(!twin_solver.is_solvable(), "{}", twin);
            assert!(twin_solver.solution().is_none());
        }
    }
}

#[test]
fn goal_iff_heuristics_vanish() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut tiles: Vec<u32> = (0..9).collect();

    for _ in 0..200 {
        tiles.shuffle(&mut rng);
        let state = PuzzleState::from_tiles(3, tiles.clone());
        assert_eq!(
            state.is_goal(),
            state.hamming() == 0 && state.manhattan() == 0
        );
    }
    let goal = PuzzleState::goal(3);
    assert!(goal.is_goal() && goal.hamming() == 0 && goal.manhattan() == 0);
}
