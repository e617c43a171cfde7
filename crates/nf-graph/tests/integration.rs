//! Integration tests for nf-graph.

use nf_controls::{ControlStore, InputControl, ProgressControl};
use nf_graph::{GraphError, Input, NodeDef, NodeEditor, Output, Socket};

fn source_and_sink(editor: &mut NodeEditor, multiple: bool) -> (nf_core::NodeId, nf_core::NodeId) {
    let socket = Socket::new("socket");
    let a = editor
        .add_node(NodeDef::new("A").with_output("a", Output::new(socket.clone())))
        .unwrap();
    let b = editor
        .add_node(NodeDef::new("B").with_input("b", Input::new(socket).multiple(multiple)))
        .unwrap();
    (a, b)
}

#[test]
fn connect_two_nodes() {
    let mut editor = NodeEditor::new();
    let (a, b) = source_and_sink(&mut editor, false);

    let c = editor.add_connection(a, "a", b, "b").unwrap();

    let conn = editor.connection(c).unwrap();
    assert_eq!(conn.source, a);
    assert_eq!(conn.target, b);
    assert!(editor.is_input_connected(b, "b"));
    assert_eq!(editor.node_connections(a).len(), 1);
    assert!(editor.validate().is_ok());
}

#[test]
fn single_input_accepts_one_connection() {
    let mut editor = NodeEditor::new();
    let (a, b) = source_and_sink(&mut editor, false);

    editor.add_connection(a, "a", b, "b").unwrap();
    let err = editor.add_connection(a, "a", b, "b").unwrap_err();
    assert!(matches!(err, GraphError::InputOccupied { .. }));
    assert_eq!(editor.connections().count(), 1);
}

#[test]
fn multiple_input_accepts_many_connections() {
    let mut editor = NodeEditor::new();
    let (a, b) = source_and_sink(&mut editor, true);

    editor.add_connection(a, "a", b, "b").unwrap();
    editor.add_connection(a, "a", b, "b").unwrap();
    assert_eq!(editor.connections().count(), 2);
}

#[test]
fn remove_connection_frees_input() {
    let mut editor = NodeEditor::new();
    let (a, b) = source_and_sink(&mut editor, false);
    let c = editor.add_connection(a, "a", b, "b").unwrap();

    editor.remove_connection(c).unwrap();
    assert!(!editor.is_input_connected(b, "b"));
    assert_eq!(
        editor.remove_connection(c).unwrap_err(),
        GraphError::UnknownConnection { connection: c }
    );
}

#[test]
fn remove_node_cascades() {
    let mut editor = NodeEditor::new();
    let (a, b) = source_and_sink(&mut editor, false);
    let p = editor.add_control(a, "progress", ProgressControl::new(5.0)).unwrap();
    let i = editor.set_input_control(b, "b", InputControl::number(0.0)).unwrap();
    let c = editor.add_connection(a, "a", b, "b").unwrap();

    let removed = editor.remove_node(a).unwrap();

    assert_eq!(removed.controls, vec![p]);
    assert_eq!(removed.connections, vec![c]);
    assert!(editor.node(a).is_none());
    assert!(editor.control(p).is_none());
    assert!(editor.control(i).is_some());
    assert!(editor.connection(c).is_none());
    assert!(editor.validate().is_ok());
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut editor = NodeEditor::new();
    let a = editor.add_node(NodeDef::new("A")).unwrap();
    editor.remove_node(a).unwrap();
    let b = editor.add_node(NodeDef::new("B")).unwrap();
    assert_ne!(a, b);
    assert_eq!(editor.node_ids(), vec![b]);
}

#[test]
fn clear_empties_editor() {
    let mut editor = NodeEditor::new();
    let (a, b) = source_and_sink(&mut editor, false);
    editor.add_control(a, "p", ProgressControl::unset()).unwrap();
    editor.add_connection(a, "a", b, "b").unwrap();

    editor.clear();
    assert_eq!(editor.nodes().count(), 0);
    assert_eq!(editor.connections().count(), 0);
    assert!(editor.controls().is_empty());
}
