use layerlp::emit::{self, MAX_TERMS_IN_LINE};
use layerlp::{Error, GeneratorConfig, Graph, Header, Metric, compile, generate};

const EXAMPLE: &str = "c two layers\nn A 0 0\nn B 0 1\nn C 1 0\nn D 1 1\ne A C\ne B D\ne A D\n";

fn header() -> Header {
    Header::new("layerlp --objective total", "2024/01/02 03:04:05")
}

fn lp(sgf: &str, metric: Metric) -> String {
    compile(sgf, &GeneratorConfig::new(metric), &header()).unwrap()
}

fn section<'a>(text: &'a str, title: &str) -> Vec<&'a str> {
    text.lines()
        .skip_while(|l| *l != title)
        .skip(1)
        .take_while(|l| l.starts_with(' '))
        .collect()
}

#[test]
fn program_layout_for_total_crossings() {
    let text = lp(EXAMPLE, Metric::Total);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "\\ layerlp --objective total");
    assert_eq!(lines[1], "\\ 2024/01/02 03:04:05");
    assert_eq!(lines[2], "\\ two layers");
    assert_eq!(&lines[3..6], &["Min", "  obj: total", "st"]);
    assert_eq!(lines[6], "  +x_A_B +x_B_A = 1");
    assert_eq!(*lines.last().unwrap(), "End");

    assert!(lines.contains(&"  +p_A_0 -x_B_A = 0"));
    assert!(lines.contains(&"  +d_A_C_A_C = 0"));
    assert!(lines.contains(&"  +d_A_C_B_D -x_B_A -x_C_D >= -1"));
    assert!(lines.contains(&"  +total -d_A_C_B_D >= 0"));

    assert!(!text.contains("Bounds"));
    assert!(!text.contains("Semi"));
    assert_eq!(
        section(&text, "Binary"),
        vec!["  x_A_B x_B_A x_C_D x_D_C d_A_C_A_C d_B_D_B_D d_A_D_A_D d_A_C_B_D"]
    );
    assert_eq!(
        section(&text, "General"),
        vec!["  p_A_0 p_B_0 p_C_1 p_D_1 total"]
    );
}

#[test]
fn fractional_coefficients_are_written_explicitly() {
    let text = lp(EXAMPLE, Metric::Stretch);
    // both layers hold two nodes, so every factor is 1
    assert!(text.contains("  +s_A_C -p_A_0 +p_C_1 >= 0"));

    let text = lp("n a 0 0\nn b 1 0\nn c 1 1\nn d 1 2\ne a d\n", Metric::Stretch);
    assert!(text.contains("  +s_a_d -0.5 p_a_0 +0.5 p_d_1 >= 0"));
    assert!(text.contains("  +s_a_d +0.5 p_a_0 -0.5 p_d_1 >= 0"));
    assert_eq!(section(&text, "Semi"), vec!["  s_a_d stretch"]);
    assert!(text.contains("  obj: stretch\n"));
}

#[test]
fn quadratic_objective_and_bounds() {
    let text = lp(EXAMPLE, Metric::Quadratic);
    assert!(text.contains("  obj: [ z_A_C ^2 + z_B_D ^2 + z_A_D ^2 ] / 2\n"));
    assert_eq!(
        section(&text, "Bounds"),
        vec![
            "  -1 <= z_A_C <= 1",
            "  -1 <= z_B_D <= 1",
            "  -1 <= z_A_D <= 1"
        ]
    );
    assert!(!text.contains("Semi"));
}

#[test]
fn quadratic_objective_without_edges_is_empty() {
    let text = lp("n a 0 0\nn b 0 1\n", Metric::Quadratic);
    assert!(text.contains("Min\n  obj:\nst\n"));
}

#[test]
fn long_rows_wrap_onto_continuation_lines() {
    // a perfect matching between two layers: every pair of edges may cross
    let width = 16;
    let mut sgf = String::new();
    for i in 0..width {
        sgf.push_str(&format!("n u{i} 0 {i}\nn v{i} 1 {i}\n"));
    }
    for i in 0..width {
        sgf.push_str(&format!("e u{i} v{i}\n"));
    }
    let g = Graph::parse(&sgf).unwrap();
    let f = generate(&g, &GeneratorConfig::new(Metric::Total)).unwrap();
    let pairs = width * (width - 1) / 2;
    assert_eq!(f.crossing_pairs, pairs);
    let text = emit::render(&f, &header());

    let start = text.find("  +total ").unwrap();
    let row: Vec<&str> = text[start..].lines().take(2).collect();
    assert_eq!(row[0].split_whitespace().count(), MAX_TERMS_IN_LINE);
    assert!(row[1].starts_with("    -d_"));
    assert!(row[1].ends_with(" >= 0"));
    assert_eq!(
        row[1].split_whitespace().count(),
        pairs + 1 - MAX_TERMS_IN_LINE + 2
    );

    let binary = section(&text, "Binary");
    assert!(binary.len() > 1);
    assert!(binary[1..].iter().all(|l| l.starts_with("    ")));
    assert!(
        binary
            .iter()
            .all(|l| l.split_whitespace().count() <= MAX_TERMS_IN_LINE)
    );
}

#[test]
fn rendering_is_deterministic() {
    let a = lp(EXAMPLE, Metric::Bottleneck);
    let b = lp(EXAMPLE, Metric::Bottleneck);
    assert_eq!(a, b);

    let config = GeneratorConfig::new(Metric::Bottleneck).with_seed(Some(11));
    let a = compile(EXAMPLE, &config, &header()).unwrap();
    let b = compile(EXAMPLE, &config, &header()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn header_now_joins_arguments() {
    let h = Header::now(&["layerlp".to_string(), "-o".to_string(), "total".to_string()]);
    assert_eq!(h.invocation, "layerlp -o total");
    assert_eq!(h.timestamp.len(), "2024/01/02 03:04:05".len());
}

#[test]
fn header_fields_stay_on_their_comment_lines() {
    let h = Header::now(&[
        "layerlp".to_string(),
        "--out".to_string(),
        "a\nMax\r\n  obj: x".to_string(),
    ]);
    assert!(!h.invocation.contains(['\n', '\r']));

    let text = compile(EXAMPLE, &GeneratorConfig::new(Metric::Total), &h).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("\\ layerlp --out a Max"));
    assert_eq!(lines[2], "\\ two layers");
    assert_eq!(text.matches("Min\n").count(), 1);
    assert!(!text.contains("\nMax"));
}

#[test]
fn operator_characters_in_ids_never_reach_the_program() {
    let err = compile(
        "n a-b 0 0\nn c 0 1\nn d 1 0\ne a-b d\ne c d\n",
        &GeneratorConfig::new(Metric::Total),
        &header(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidNodeId { .. }), "{err}");
}

#[test]
fn repeated_edges_never_duplicate_a_variable() {
    let err = compile(
        "n A 0 0\nn B 0 1\nn C 1 0\nn D 1 1\ne A C\ne B D\ne A C\n",
        &GeneratorConfig::new(Metric::Total),
        &header(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateEdge { .. }), "{err}");
}
