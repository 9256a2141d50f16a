//! The `dot` module contains the conversion from an automaton to a graphviz dot format.
//! The functions in this module are used for debugging purposes.

use std::io::Write;

use dot_writer::{Attributes, Color, DotWriter, RankDirection, Shape};

use crate::graph::AutomatonGraph;

/// Render the automaton to a graphviz dot format.
/// The start state is drawn blue, accepting states are drawn red.
pub fn render_to<W: Write>(graph: &AutomatonGraph, label: &str, output: &mut W) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    for state in graph.states() {
        let mut node = digraph.node_named(node_name(state.as_usize()));
        node.set_label(&state.as_usize().to_string());
        if graph.start() == Some(*state) {
            node.set_shape(Shape::Circle)
                .set_color(Color::Blue)
                .set_pen_width(3.0);
        }
        if graph.is_final(*state) {
            node.set_shape(Shape::Circle)
                .set_color(Color::Red)
                .set_pen_width(3.0);
        }
    }
    for (from, symbol, to) in graph.transitions() {
        digraph
            .edge(node_name(from.as_usize()), node_name(to.as_usize()))
            .attributes()
            .set_label(&symbol.to_string());
    }
}

fn node_name(state: usize) -> String {
    format!("node_{}", state)
}
