//! The demo scene: node "A" with a number input driving a radial progress,
//! and a "Randomize" button that sets both.

use std::cell::RefCell;
use std::rc::Rc;

use nf_area::{Area, AreaConfig, Target};
use nf_controls::{
    ActionControl, ControlHost, ControlHostExt, InputControl, InputValue, ProgressControl,
};
use nf_core::{ControlId, NodeId};
use nf_graph::{NodeDef, Output, Socket};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::CliResult;

/// What to do to the scene after building it.
#[derive(Debug, Clone, Default)]
pub struct DemoOptions {
    /// Value set programmatically on the input
    pub set: Option<f64>,
    /// Text typed into the input, as a user would
    pub edit: Option<String>,
    /// Number of Randomize clicks
    pub clicks: u32,
    pub seed: u64,
}

pub struct Demo {
    pub area: Area,
    pub node: NodeId,
    pub input: ControlId,
    pub progress: ControlId,
    pub button: ControlId,
}

pub fn build(config: AreaConfig, seed: u64) -> CliResult<Demo> {
    let mut area = Area::new(config)?;
    let node = area.add_node(NodeDef::new("A").with_output("a", Output::new(Socket::new("socket"))))?;

    let progress = area.add_control(node, "progress", ProgressControl::new(0.0))?;
    let input = area.add_control(
        node,
        "input",
        InputControl::number(0.0).with_change(move |host, value| {
            host.set_percent(progress, value.as_number())?;
            host.update_control(progress);
            Ok(())
        }),
    )?;

    let rng = Rc::new(RefCell::new(StdRng::seed_from_u64(seed)));
    let button = area.add_control(
        node,
        "button",
        ActionControl::new("Randomize", move |host| {
            let percent = f64::from(rng.borrow_mut().random_range(0..=100_u32));
            host.set_input_value(input, InputValue::Number(percent))?;
            host.update_control(input);
            host.set_percent(progress, Some(percent))?;
            host.update_control(progress);
            tracing::info!(percent, "randomized");
            Ok(())
        }),
    )?;

    area.zoom_at(&[node]);

    Ok(Demo {
        area,
        node,
        input,
        progress,
        button,
    })
}

pub fn run(demo: &mut Demo, options: &DemoOptions) -> CliResult<()> {
    if let Some(value) = options.set {
        demo.area.set_input_value(demo.input, InputValue::Number(value))?;
        demo.area.update_control(demo.input);
    }
    if let Some(raw) = &options.edit {
        demo.area.input(demo.input, raw)?;
    }
    for _ in 0..options.clicks {
        demo.area.click(Target::Control(demo.button))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_controls::ControlStore;

    fn percent(demo: &Demo) -> Option<f64> {
        demo.area.control(demo.progress)?.as_progress()?.percent
    }

    #[test]
    fn set_moves_progress() {
        let mut demo = build(AreaConfig::default(), 1).unwrap();
        run(
            &mut demo,
            &DemoOptions {
                set: Some(42.0),
                ..DemoOptions::default()
            },
        )
        .unwrap();
        assert_eq!(percent(&demo), Some(42.0));
        let view = demo.area.node_view(demo.node).unwrap();
        assert!(view.text_content().contains("42%"));
    }

    #[test]
    fn clicks_are_reproducible_per_seed() {
        let options = DemoOptions {
            clicks: 3,
            seed: 7,
            ..DemoOptions::default()
        };
        let mut first = build(AreaConfig::default(), options.seed).unwrap();
        let mut second = build(AreaConfig::default(), options.seed).unwrap();
        run(&mut first, &options).unwrap();
        run(&mut second, &options).unwrap();

        let p = percent(&first).unwrap();
        assert_eq!(percent(&second), Some(p));
        assert!((0.0..=100.0).contains(&p));

        let input = first.area.control(first.input).unwrap().as_input().unwrap();
        assert_eq!(input.value().as_number(), Some(p));
    }

    #[test]
    fn typed_edit_goes_through_handler() {
        let mut demo = build(AreaConfig::default(), 0).unwrap();
        run(
            &mut demo,
            &DemoOptions {
                edit: Some("12.5".into()),
                ..DemoOptions::default()
            },
        )
        .unwrap();
        assert_eq!(percent(&demo), Some(12.5));
    }
}
