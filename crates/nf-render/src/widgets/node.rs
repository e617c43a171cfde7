//! Node frame and connection views.
//!
//! The frame holds a [`View::Slot`] for every control instead of the
//! control's output, so frames and controls are rendered independently.

use nf_graph::{Connection, Node, NodeEditor};

use crate::view::{Element, View};

fn socket(side: &str, key: &str, name: &str) -> Element {
    Element::new("div")
        .class("socket")
        .attr("data-side", side)
        .attr("data-socket", key)
        .attr("title", name)
}

/// Render the frame of `node`: title, outputs, controls, inputs.
///
/// An input's embedded control is shown only while nothing is connected to
/// it.
pub fn render(editor: &NodeEditor, node: &Node) -> View {
    let outputs = node.outputs.iter().map(|(key, output)| -> View {
        let label = output.label.as_deref().unwrap_or(key);
        Element::new("div")
            .class("output")
            .attr("data-key", key.as_str())
            .child(Element::new("div").class("output-title").child(View::text(label)))
            .child(socket("output", key, &output.socket.name))
            .into()
    });

    let controls = node.controls.iter().map(|(name, &control)| -> View {
        Element::new("div")
            .class("control")
            .attr("data-control-name", name.as_str())
            .child(View::Slot { control })
            .into()
    });

    let inputs = node.inputs.iter().map(|(key, input)| -> View {
        let label = input.label.as_deref().unwrap_or(key);
        let mut row = Element::new("div")
            .class("input")
            .attr("data-key", key.as_str())
            .child(socket("input", key, &input.socket.name))
            .child(Element::new("div").class("input-title").child(View::text(label)));
        if let Some(control) = input.control
            && !editor.is_input_connected(node.id, key)
        {
            row = row.child(
                Element::new("div")
                    .class("input-control")
                    .child(View::Slot { control }),
            );
        }
        row.into()
    });

    Element::new("div")
        .class("node")
        .attr("data-node", node.id.to_string())
        .child(Element::new("div").class("title").child(View::text(&node.label)))
        .children(outputs)
        .children(controls)
        .children(inputs)
        .into()
}

/// Render a connection as an endpoint record. No path geometry is produced.
pub fn render_connection(connection: &Connection) -> View {
    Element::new("connection")
        .attr("data-connection", connection.id.to_string())
        .attr("source", connection.source.to_string())
        .attr("source-output", connection.source_output.as_str())
        .attr("target", connection.target.to_string())
        .attr("target-input", connection.target_input.as_str())
        .into()
}
