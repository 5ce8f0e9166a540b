use layerlp::{Error, GeneratorConfig, Graph, Metric, Solution, generate};

#[test]
fn parse_reads_only_the_solution_block() {
    let text = "\
Solver log line
BeginSolution
 p_a_0 0
 p_b_1 2.0000001

 d_a_b_a_b 0
EndSolution
trailing noise
";
    let solution = Solution::parse(text).unwrap();
    assert_eq!(solution.len(), 3);
    assert_eq!(solution.get("p_b_1"), Some(2.0000001));
    assert_eq!(solution.get("missing"), None);
}

#[test]
fn parse_without_markers_reads_everything() {
    let solution = Solution::parse("total 3\nx_a_b 1\n").unwrap();
    assert_eq!(solution.len(), 2);
    assert!(Solution::parse("").unwrap().is_empty());
}

#[test]
fn parse_rejects_malformed_rows() {
    assert!(matches!(
        Solution::parse("p_a_0 1\np_b_0\n"),
        Err(Error::MalformedSolution { line: 2, .. })
    ));
    assert!(matches!(
        Solution::parse("p_a_0 one\n"),
        Err(Error::MalformedSolution { line: 1, .. })
    ));
    assert!(matches!(
        Solution::parse("p_a_0 1 2\n"),
        Err(Error::MalformedSolution { line: 1, .. })
    ));
}

#[test]
fn decoded_graph_follows_solved_positions() {
    let text = "\
BeginSolution
x_A_B 0
x_B_A 1
p_A_0 0.9999998
p_B_0 0
p_C_1 1
p_D_1 -0.0000003
d_A_C_A_C 0
d_B_D_B_D 0
d_A_D_A_D 0
d_A_C_B_D 0
total 0
EndSolution
";
    let g = Solution::parse(text).unwrap().to_graph(Some("solved")).unwrap();
    assert_eq!(g.name.as_deref(), Some("solved"));
    let nodes: Vec<(&str, usize, i64)> = g
        .nodes()
        .map(|(_, id, n)| (id, n.layer, n.position))
        .collect();
    assert_eq!(
        nodes,
        vec![("B", 0, 0), ("A", 0, 1), ("D", 1, 0), ("C", 1, 1)]
    );

    let edges: Vec<(&str, &str)> = g
        .edges()
        .iter()
        .map(|e| (g.id(e.source), g.id(e.target)))
        .collect();
    assert_eq!(edges, vec![("A", "C"), ("B", "D"), ("A", "D")]);
}

#[test]
fn every_generated_program_can_be_decoded() {
    let source = Graph::parse("n A 0 0\nn B 0 1\nn C 1 0\nn D 1 1\ne A C\ne D B\ne A D\n").unwrap();
    for metric in [Metric::Bottleneck, Metric::Quadratic] {
        let f = generate(&source, &GeneratorConfig::new(metric)).unwrap();
        let text: String = f
            .variable_names()
            .iter()
            .map(|name| format!("{name} 0\n"))
            .collect();
        let g = Solution::parse(&text).unwrap().to_graph(None).unwrap();
        assert_eq!(g.node_count(), source.node_count());
        assert_eq!(g.edge_count(), source.edge_count());
        // edge direction survives the round trip
        assert!(g.edges().iter().any(|e| g.id(e.source) == "D" && g.id(e.target) == "B"));
    }
}

#[test]
fn decoding_rejects_edges_to_unplaced_nodes() {
    let err = Solution::parse("p_a_0 0\nd_a_b_a_b 0\n")
        .unwrap()
        .to_graph(None)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownNode { .. }), "{err}");
}
