//! LP-format rendering.
//!
//! Pure rendering: the program text is built in memory and returned, so callers never write a
//! partial program.

use crate::formulation::{Formulation, Objective, Term};
use crate::graph::Graph;
use crate::var::Var;
use indexmap::IndexSet;
use std::fmt::Write as _;

/// Solvers reject overly long lines; constraints and declarations wrap after this many terms.
pub const MAX_TERMS_IN_LINE: usize = 100;

const INDENT: &str = "  ";

/// Comment lines written at the top of the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub invocation: String,
    pub timestamp: String,
}

impl Header {
    /// Line breaks are replaced with spaces so each field stays on its `\ ` comment line.
    pub fn new(invocation: impl Into<String>, timestamp: impl Into<String>) -> Self {
        let one_line = |text: String| text.replace(['\r', '\n'], " ");
        Self {
            invocation: one_line(invocation.into()),
            timestamp: one_line(timestamp.into()),
        }
    }

    /// Header for `args`, stamped with the current UTC time.
    pub fn now(args: &[String]) -> Self {
        let timestamp = chrono::Utc::now().format("%Y/%m/%d %H:%M:%S").to_string();
        Self::new(args.join(" "), timestamp)
    }
}

pub fn render(formulation: &Formulation<'_>, header: &Header) -> String {
    let g = formulation.graph;
    let body = &formulation.body;
    let mut out = String::new();

    let _ = writeln!(out, "\\ {}", header.invocation);
    let _ = writeln!(out, "\\ {}", header.timestamp);
    for comment in &g.comments {
        let _ = writeln!(out, "\\ {comment}");
    }

    out.push_str("Min\n");
    out.push_str(INDENT);
    out.push_str("obj:");
    match &formulation.objective {
        Objective::Linear(var) => {
            let _ = write!(out, " {}", var.display(g));
        }
        Objective::HalfSumOfSquares(vars) if vars.is_empty() => {}
        Objective::HalfSumOfSquares(vars) => {
            let squares: Vec<String> = vars
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let sep = if i == 0 { "" } else { "+ " };
                    format!("{sep}{} ^2", v.display(g))
                })
                .collect();
            out.push_str(" [ ");
            out.push_str(&wrap(&squares));
            out.push_str(" ] / 2");
        }
    }
    out.push('\n');

    out.push_str("st\n");
    for constraint in &body.constraints {
        let terms: Vec<String> = constraint.terms.iter().map(|t| term(t, g)).collect();
        let _ = writeln!(
            out,
            "{INDENT}{} {} {}",
            wrap(&terms),
            constraint.relation,
            constraint.rhs
        );
    }

    if !body.bounds.is_empty() {
        out.push_str("Bounds\n");
        for bound in &body.bounds {
            let _ = writeln!(
                out,
                "{INDENT}{} <= {} <= {}",
                bound.lower,
                bound.var.display(g),
                bound.upper
            );
        }
    }

    section(&mut out, "Binary", &body.binary, g);
    section(&mut out, "General", &body.general, g);
    section(&mut out, "Semi", &body.semi, g);
    out.push_str("End\n");
    out
}

fn term(t: &Term, g: &Graph) -> String {
    let sign = if t.coeff < 0.0 { '-' } else { '+' };
    let magnitude = t.coeff.abs();
    if magnitude == 1.0 {
        format!("{sign}{}", t.var.display(g))
    } else {
        format!("{sign}{magnitude} {}", t.var.display(g))
    }
}

fn section(out: &mut String, title: &str, vars: &IndexSet<Var>, g: &Graph) {
    if vars.is_empty() {
        return;
    }
    let names: Vec<String> = vars.iter().map(|v| v.name(g)).collect();
    let _ = writeln!(out, "{title}\n{INDENT}{}", wrap(&names));
}

/// Joins tokens with spaces, breaking onto an indented continuation line every
/// [`MAX_TERMS_IN_LINE`] tokens.
fn wrap(tokens: &[String]) -> String {
    tokens
        .chunks(MAX_TERMS_IN_LINE)
        .map(|chunk| chunk.join(" "))
        .collect::<Vec<_>>()
        .join(&format!("\n{INDENT}{INDENT}"))
}
