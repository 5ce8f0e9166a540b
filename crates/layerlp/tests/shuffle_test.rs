use layerlp::formulation::Constraint;
use layerlp::shuffle;
use layerlp::{Var, order};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rows() -> Vec<Constraint> {
    let mut g = layerlp::Graph::new();
    for i in 0..5 {
        g.add_node(&format!("n{i}"), 0, i).unwrap();
    }
    order::build(&g).constraints
}

fn sorted(rows: &[Constraint]) -> Vec<String> {
    let mut out: Vec<String> = rows
        .iter()
        .map(|c| {
            let mut terms: Vec<String> = c.terms.iter().map(|t| format!("{t:?}")).collect();
            terms.sort();
            format!("{terms:?} {} {}", c.relation, c.rhs)
        })
        .collect();
    out.sort();
    out
}

#[test]
fn same_seed_same_permutation() {
    let mut a = rows();
    let mut b = rows();
    shuffle::permute_seeded(&mut a, 42);
    shuffle::permute_seeded(&mut b, 42);
    assert_eq!(a, b);
}

#[test]
fn permutation_keeps_every_row_and_term() {
    let original = rows();
    let mut shuffled = original.clone();
    shuffle::permute_seeded(&mut shuffled, 3);
    assert_ne!(shuffled, original);
    assert_eq!(sorted(&shuffled), sorted(&original));
}

#[test]
fn permute_accepts_any_rng() {
    let mut rows = rows();
    let mut rng = StdRng::seed_from_u64(9);
    shuffle::permute(&mut rows, &mut rng);
    assert!(rows.iter().any(|c| c.mentions(Var::Position(4))));
}
