//! Registry of control rendering strategies.
//!
//! Entries are kept in priority order. Lookup goes through an index keyed by
//! [`ControlKind`] that keeps the earliest entry for each kind, so a later
//! registration for a kind that is already covered is shadowed.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use nf_controls::{Control, ControlKind, ControlStore};
use nf_core::ControlId;

use crate::view::View;
use crate::widgets;

/// Rendering strategy: current control state in, view out.
pub type Strategy = Rc<dyn Fn(ControlId, &Control) -> View>;

/// Maps control kinds to rendering strategies.
#[derive(Clone)]
pub struct ControlRegistry {
    entries: Vec<(ControlKind, Strategy)>,
    index: HashMap<ControlKind, usize>,
}

impl ControlRegistry {
    /// A registry with no strategies; every control renders empty.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The built-in table: button, radial progress, generic input.
    pub fn classic() -> Self {
        let mut registry = Self::empty();
        registry.register(ControlKind::Action, widgets::button::render);
        registry.register(ControlKind::Progress, widgets::progress::render);
        registry.register(ControlKind::Input, widgets::input::render);
        registry
    }

    /// Append a strategy at the lowest priority.
    pub fn register<F>(&mut self, kind: ControlKind, strategy: F)
    where
        F: Fn(ControlId, &Control) -> View + 'static,
    {
        tracing::debug!(%kind, "strategy registered");
        let strategy: Strategy = Rc::new(strategy);
        self.entries.push((kind, strategy));
        self.reindex();
    }

    /// Insert a strategy at the highest priority, ahead of every existing
    /// entry.
    pub fn prepend<F>(&mut self, kind: ControlKind, strategy: F)
    where
        F: Fn(ControlId, &Control) -> View + 'static,
    {
        tracing::debug!(%kind, "strategy prepended");
        let strategy: Strategy = Rc::new(strategy);
        self.entries.insert(0, (kind, strategy));
        self.reindex();
    }

    /// Kinds of every entry, in priority order. Shadowed entries are listed
    /// too.
    pub fn strategy_kinds(&self) -> Vec<ControlKind> {
        self.entries.iter().map(|(kind, _)| kind.clone()).collect()
    }

    pub fn has_strategy(&self, kind: &ControlKind) -> bool {
        self.index.contains_key(kind)
    }

    /// Bind a renderer to `id`. Controls with no matching strategy get a
    /// renderer that always produces [`View::Empty`].
    pub fn resolve(&self, id: ControlId, control: &Control) -> Renderer {
        let kind = control.kind();
        let strategy = self.strategy(&kind);
        if strategy.is_none() {
            tracing::debug!(control = %id, %kind, "no strategy for control");
        }
        Renderer {
            control: id,
            kind,
            strategy,
        }
    }

    fn strategy(&self, kind: &ControlKind) -> Option<Strategy> {
        self.index
            .get(kind)
            .and_then(|&i| self.entries.get(i))
            .map(|(_, strategy)| Rc::clone(strategy))
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, (kind, _)) in self.entries.iter().enumerate() {
            self.index.entry(kind.clone()).or_insert(i);
        }
    }
}

impl Default for ControlRegistry {
    fn default() -> Self {
        Self::classic()
    }
}

impl fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlRegistry")
            .field("kinds", &self.strategy_kinds())
            .finish()
    }
}

/// A strategy bound to one control id.
///
/// The control is looked up again on every [`Renderer::render`], so the
/// output always reflects its current state.
#[derive(Clone)]
pub struct Renderer {
    control: ControlId,
    kind: ControlKind,
    strategy: Option<Strategy>,
}

impl Renderer {
    pub fn control(&self) -> ControlId {
        self.control
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    /// Whether a strategy matched when this renderer was resolved.
    pub fn is_bound(&self) -> bool {
        self.strategy.is_some()
    }

    /// Render the control's current state. Empty when unbound or when the
    /// control no longer exists.
    pub fn render(&self, store: &dyn ControlStore) -> View {
        let (Some(strategy), Some(control)) = (&self.strategy, store.control(self.control)) else {
            return View::Empty;
        };
        if control.kind() != self.kind {
            return View::Empty;
        }
        strategy(self.control, control)
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("control", &self.control)
            .field("kind", &self.kind)
            .field("bound", &self.is_bound())
            .finish()
    }
}
