// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! End-to-end enumeration scenarios.
//!
//! The heart of this suite is a naive generate-and-filter enumerator that
//! walks the full `bays^(aircraft x slots)` assignment space and keeps what
//! the constraint predicates accept. The engine must produce exactly that
//! set on every instance small enough to cross-check: no missing solutions
//! (completeness) and no extras (soundness).

use apron_model::{
    index::{AircraftIndex, BayIndex, SlotIndex, VariableIndex},
    layout::{AircraftKind, BayCategory, Restriction},
    loading::ProblemLoader,
    model::{Model, ModelBuilder},
    solution::{Solution, SolutionSet},
};
use apron_solver::{
    branching::{aircraft_major::AircraftMajorOrder, slot_major::SlotMajorOrder, VariableOrder},
    constraints::ConstraintSet,
    dfs::ExhaustiveSolver,
    monitor::no_op::NoOperationMonitor,
    parallel::ParallelSolver,
    state::SearchState,
};

fn enumerate<O: VariableOrder>(model: &Model, order: &O) -> SolutionSet {
    let constraints = ConstraintSet::standard(model);
    let mut solver = ExhaustiveSolver::new();
    solver
        .solve(model, &constraints, order, NoOperationMonitor::new())
        .into_solutions()
}

/// Walks every total assignment and keeps the ones all constraints accept.
fn brute_force(model: &Model) -> SolutionSet {
    let constraints = ConstraintSet::standard(model);
    let num_variables = model.num_variables();
    let num_bays = model.num_bays();

    let mut set = SolutionSet::new();
    let mut odometer = vec![0usize; num_variables];

    'outer: loop {
        let mut state = SearchState::new(model.num_aircraft(), model.num_slots());
        for (variable, &bay) in odometer.iter().enumerate() {
            state.bind(VariableIndex::new(variable), BayIndex::new(bay));
        }

        if constraints
            .iter()
            .all(|constraint| constraint.is_satisfied(model, &state))
        {
            set.push(Solution::try_from(&state).expect("state is complete"));
        }

        if num_variables == 0 {
            break;
        }
        for position in (0..num_variables).rev() {
            odometer[position] += 1;
            if odometer[position] < num_bays {
                continue 'outer;
            }
            odometer[position] = 0;
        }
        break;
    }

    set
}

/// Checks every published invariant of an accepted solution.
fn assert_solution_invariants(model: &Model, solution: &Solution) {
    let layout = model.layout();

    for slot in 0..model.num_slots() {
        let slot_index = SlotIndex::new(slot);

        // Capacity: at most two aircraft per bay, at most one Jumbo.
        for bay in layout.bays() {
            let occupants: Vec<AircraftIndex> = (0..model.num_aircraft())
                .map(AircraftIndex::new)
                .filter(|&aircraft| solution.bay_for(aircraft, slot_index) == bay)
                .collect();
            assert!(occupants.len() <= 2, "bay {} overfull in slot {}", bay, slot);
            let jumbos = occupants
                .iter()
                .filter(|&&aircraft| model.is_jumbo(aircraft))
                .count();
            assert!(jumbos <= 1, "two jumbos share bay {} in slot {}", bay, slot);
        }

        // Maneuverability and Jumbo separation over the occupancy grid.
        let occupied: Vec<BayIndex> = (0..model.num_aircraft())
            .map(|aircraft| solution.bay_for(AircraftIndex::new(aircraft), slot_index))
            .collect();
        for &bay in &occupied {
            let free_neighbors = layout.in_bounds_neighbor_count(bay)
                - layout
                    .neighbor_bays(bay)
                    .iter()
                    .filter(|neighbor| occupied.contains(neighbor))
                    .count();
            assert!(
                free_neighbors > 0,
                "bay {} has no free neighbor in slot {}",
                bay,
                slot
            );
        }
        for aircraft in 0..model.num_aircraft() {
            let aircraft = AircraftIndex::new(aircraft);
            if !model.is_jumbo(aircraft) {
                continue;
            }
            let bay = solution.bay_for(aircraft, slot_index);
            for other in 0..model.num_aircraft() {
                let other = AircraftIndex::new(other);
                if other == aircraft || !model.is_jumbo(other) {
                    continue;
                }
                let other_bay = solution.bay_for(other, slot_index);
                assert!(
                    !layout.neighbor_bays(bay).contains(&other_bay),
                    "jumbos adjacent in slot {}",
                    slot
                );
            }
        }
    }

    // Per-aircraft task accounting and ordering.
    for aircraft in 0..model.num_aircraft() {
        let aircraft = AircraftIndex::new(aircraft);
        let type1 = model.type1_count(aircraft) as usize;
        let type2 = model.type2_count(aircraft) as usize;

        let mut specialized = 0usize;
        let mut workshop = 0usize;
        let mut remaining_type2 = type2;

        for slot in 0..model.num_slots() {
            let bay = solution.bay_for(aircraft, SlotIndex::new(slot));
            match model.bay_category(bay) {
                BayCategory::Specialized => {
                    specialized += 1;
                    workshop += 1;
                    remaining_type2 = remaining_type2.saturating_sub(1);
                }
                BayCategory::Standard => {
                    assert!(
                        model.restriction(aircraft) != Restriction::Ordered
                            || remaining_type2 == 0,
                        "ordered aircraft in a standard bay before type-2 work is done"
                    );
                    workshop += 1;
                }
                BayCategory::Parking => {
                    assert!(
                        model.restriction(aircraft) != Restriction::Ordered
                            || remaining_type2 == 0,
                        "ordered aircraft parked before type-2 work is done"
                    );
                }
            }
        }

        assert!(specialized >= type2, "not enough specialized visits");
        assert!(workshop >= type1 + type2, "not enough workshop visits");
    }
}

fn assert_matches_brute_force(model: &Model) {
    let expected = brute_force(model);

    let mut by_aircraft = enumerate(model, &AircraftMajorOrder);
    by_aircraft.sort_canonical();
    let mut by_slot = enumerate(model, &SlotMajorOrder);
    by_slot.sort_canonical();
    let mut reference = expected.clone();
    reference.sort_canonical();

    assert_eq!(by_aircraft, reference, "aircraft-major misses or invents solutions");
    assert_eq!(by_slot, reference, "slot-major misses or invents solutions");

    let constraints = ConstraintSet::standard(model);
    let parallel = ParallelSolver::new().solve(model, &constraints, &AircraftMajorOrder);
    assert!(parallel.is_exhaustive());
    assert_eq!(parallel.solutions(), &reference);

    for solution in reference.iter() {
        assert_solution_invariants(model, solution);
    }
}

#[test]
fn test_engine_matches_brute_force_on_mixed_fleet() {
    // 1x3 strip (STD, SPC, PRK), two slots, an ordered jumbo with one
    // type-2 task and a standard aircraft with one type-1 task: 81 total
    // assignments to cross-check.
    let mut builder = ModelBuilder::new(2, 1, 3);
    builder
        .add_bay(0, 0, BayCategory::Standard)
        .add_bay(0, 1, BayCategory::Specialized)
        .add_bay(0, 2, BayCategory::Parking)
        .add_aircraft(AircraftKind::Jumbo, Restriction::Ordered, 0, 1)
        .add_aircraft(AircraftKind::Standard, Restriction::None, 1, 0);
    let model = builder.build().unwrap();

    assert_matches_brute_force(&model);
}

#[test]
fn test_engine_matches_brute_force_on_square_grid() {
    // 2x2 grid, all four cells declared, two jumbos, one slot: 16 total
    // assignments of which only the four diagonal placements survive
    // (shared bays violate capacity, adjacent bays violate separation).
    let mut builder = ModelBuilder::new(1, 2, 2);
    builder
        .add_bay(0, 0, BayCategory::Specialized)
        .add_bay(0, 1, BayCategory::Specialized)
        .add_bay(1, 0, BayCategory::Specialized)
        .add_bay(1, 1, BayCategory::Specialized)
        .add_aircraft(AircraftKind::Jumbo, Restriction::None, 0, 0)
        .add_aircraft(AircraftKind::Jumbo, Restriction::None, 0, 0);
    let model = builder.build().unwrap();

    let expected = brute_force(&model);
    assert_eq!(expected.len(), 4);
    assert_matches_brute_force(&model);
}

#[test]
fn test_engine_matches_brute_force_with_undeclared_cells() {
    // 2x3 grid with one undeclared cell acting as a permanent escape
    // lane; three standard aircraft over one slot.
    let mut builder = ModelBuilder::new(1, 2, 3);
    builder
        .add_bay(0, 0, BayCategory::Standard)
        .add_bay(0, 1, BayCategory::Standard)
        .add_bay(0, 2, BayCategory::Standard)
        .add_bay(1, 0, BayCategory::Parking)
        .add_bay(1, 1, BayCategory::Parking)
        .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0)
        .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0)
        .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
    let model = builder.build().unwrap();

    assert_matches_brute_force(&model);
}

#[test]
fn test_loaded_instance_end_to_end() {
    let input = "\
2
1x3
STD: (0,0)
SPC: (0,1)
PRK: (0,2)
1-JMB-T-0-1
2-STD-F-1-0
";
    let model = ProblemLoader::new().load_from_str(input).unwrap();
    assert_matches_brute_force(&model);
}

#[test]
fn test_lone_workshop_forces_a_unique_plan() {
    // T=1, 1x2 grid, (0,0) standard, (0,1) parking, one aircraft with one
    // type-1 task: exactly one solution, the aircraft in the workshop.
    let mut builder = ModelBuilder::new(1, 1, 2);
    builder
        .add_bay(0, 0, BayCategory::Standard)
        .add_bay(0, 1, BayCategory::Parking)
        .add_aircraft(AircraftKind::Standard, Restriction::None, 1, 0);
    let model = builder.build().unwrap();

    let solutions = enumerate(&model, &AircraftMajorOrder);
    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions
            .get(0)
            .unwrap()
            .bay_for(AircraftIndex::new(0), SlotIndex::new(0)),
        BayIndex::new(0)
    );
    assert_matches_brute_force(&model);
}

#[test]
fn test_ordering_property_when_specialized_visits_equal_type2() {
    // Every solution in which the ordered aircraft's specialized visits
    // exactly cover its type-2 work must place the last specialized slot
    // strictly before the first standard slot.
    let mut builder = ModelBuilder::new(3, 1, 3);
    builder
        .add_bay(0, 0, BayCategory::Standard)
        .add_bay(0, 1, BayCategory::Specialized)
        .add_bay(0, 2, BayCategory::Parking)
        .add_aircraft(AircraftKind::Standard, Restriction::Ordered, 1, 1);
    let model = builder.build().unwrap();

    let solutions = enumerate(&model, &AircraftMajorOrder);
    assert!(!solutions.is_empty());

    let aircraft = AircraftIndex::new(0);
    for solution in solutions.iter() {
        let categories: Vec<BayCategory> = (0..3)
            .map(|slot| model.bay_category(solution.bay_for(aircraft, SlotIndex::new(slot))))
            .collect();

        let specialized_visits = categories
            .iter()
            .filter(|&&category| category == BayCategory::Specialized)
            .count();
        if specialized_visits != model.type2_count(aircraft) as usize {
            continue;
        }

        let last_specialized = categories
            .iter()
            .rposition(|&category| category == BayCategory::Specialized);
        let first_standard = categories
            .iter()
            .position(|&category| category == BayCategory::Standard);
        if let (Some(last_specialized), Some(first_standard)) = (last_specialized, first_standard)
        {
            assert!(
                last_specialized < first_standard,
                "type-2 work must finish before standard-bay work starts"
            );
        }
    }
}

#[test]
fn test_idempotence_across_runs() {
    let mut builder = ModelBuilder::new(2, 1, 3);
    builder
        .add_bay(0, 0, BayCategory::Standard)
        .add_bay(0, 1, BayCategory::Specialized)
        .add_bay(0, 2, BayCategory::Parking)
        .add_aircraft(AircraftKind::Standard, Restriction::None, 1, 1);
    let model = builder.build().unwrap();

    let first = enumerate(&model, &AircraftMajorOrder);
    let second = enumerate(&model, &AircraftMajorOrder);
    assert_eq!(first, second);
}
