use layerlp::formulation::Relation;
use layerlp::{Graph, Var, order};
use std::collections::HashMap;

fn one_layer(width: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..width {
        g.add_node(&format!("n{i}"), 0, i as i64).unwrap();
    }
    g
}

#[test]
fn order_emits_antisymmetry_transitivity_and_positions() {
    let g = one_layer(4);
    let block = order::build(&g);
    // 6 pairs, 4 triples with two inequalities each, 4 positions
    assert_eq!(block.constraints.len(), 6 + 8 + 4);
    assert_eq!(block.binary.len(), 12);
    assert_eq!(block.general.len(), 4);

    let first = &block.constraints[0];
    assert_eq!(first.relation, Relation::Eq);
    assert_eq!(first.rhs, 1.0);
    assert!(first.mentions(Var::order(0, 1)) && first.mentions(Var::order(1, 0)));

    let position = block.constraints.last().unwrap();
    assert_eq!(position.terms[0].var, Var::Position(3));
    assert_eq!(position.terms.len(), 4);
    assert!(position.terms[1..].iter().all(|t| t.coeff == -1.0));
}

#[test]
fn nodes_on_different_layers_are_never_ordered() {
    let g = Graph::parse("n a 0 0\nn b 1 0\nn c 1 1\n").unwrap();
    let block = order::build(&g);
    assert!(!block.binary.contains(&Var::order(0, 1)));
    assert!(block.binary.contains(&Var::order(1, 2)));
    // a has no peers: p_a = 0
    let pa = block
        .constraints
        .iter()
        .find(|c| c.mentions(Var::Position(0)))
        .unwrap();
    assert_eq!(pa.terms.len(), 1);
}

/// Enumerates every 0/1 assignment of the order variables of a layer and checks that the
/// feasible ones are exactly the total orders, with positions forming a permutation.
fn feasible_orders(width: usize) -> usize {
    let g = one_layer(width);
    let block = order::build(&g);
    let xs: Vec<Var> = block.binary.iter().copied().collect();
    let (order_rows, position_rows): (Vec<_>, Vec<_>) = block
        .constraints
        .iter()
        .partition(|c| c.terms.iter().all(|t| matches!(t.var, Var::Order { .. })));

    let mut feasible = 0;
    for mask in 0u32..(1 << xs.len()) {
        let mut values: HashMap<Var, f64> = xs
            .iter()
            .enumerate()
            .map(|(bit, &v)| (v, ((mask >> bit) & 1) as f64))
            .collect();
        if !order_rows
            .iter()
            .all(|c| c.is_satisfied_by(|v| values[&v]))
        {
            continue;
        }
        feasible += 1;

        let mut positions: Vec<usize> = (0..width)
            .map(|i| {
                (0..width)
                    .filter(|&j| j != i && values[&Var::order(j, i)] == 1.0)
                    .count()
            })
            .collect();
        for (i, &p) in positions.iter().enumerate() {
            values.insert(Var::Position(i), p as f64);
        }
        assert!(position_rows.iter().all(|c| c.is_satisfied_by(|v| values[&v])));
        positions.sort_unstable();
        assert_eq!(positions, (0..width).collect::<Vec<_>>());
    }
    feasible
}

#[test]
fn two_transitivity_rotations_suffice_to_exclude_cycles() {
    assert_eq!(feasible_orders(2), 2);
    assert_eq!(feasible_orders(3), 6);
    assert_eq!(feasible_orders(4), 24);
}

#[test]
fn three_cycle_is_infeasible() {
    let g = one_layer(3);
    let block = order::build(&g);
    let cycle = |v: Var| match v {
        Var::Order {
            before: 0,
            after: 1,
        }
        | Var::Order {
            before: 1,
            after: 2,
        }
        | Var::Order {
            before: 2,
            after: 0,
        } => 1.0,
        _ => 0.0,
    };
    assert!(
        block
            .constraints
            .iter()
            .filter(|c| c.terms.iter().all(|t| matches!(t.var, Var::Order { .. })))
            .any(|c| !c.is_satisfied_by(cycle))
    );
}
