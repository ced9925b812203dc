use crate::action::Action;

/// A named, immutable sequence of actions.
///
/// A macro is stored as a list of steps, each step being a slice of actions.
/// Steps are produced by the builders in [`crate::steps`] and joined with
/// [`crate::host_macro!`], so a macro is a plain `const` with no allocation.
/// Execution order is the steps in order, and the actions of each step in order.
#[derive(Debug, Copy, Clone)]
pub struct Macro<'a> {
    name: &'a str,
    steps: &'a [&'a [Action<'a>]],
}

impl<'a> Macro<'a> {
    pub const fn new(name: &'a str, steps: &'a [&'a [Action<'a>]]) -> Self {
        Self { name, steps }
    }

    pub const fn name(&self) -> &'a str {
        self.name
    }

    pub const fn steps(&self) -> &'a [&'a [Action<'a>]] {
        self.steps
    }

    /// All actions of the macro, in execution order
    pub fn actions(self) -> impl Iterator<Item = &'a Action<'a>> + 'a {
        self.steps.iter().flat_map(|step| step.iter())
    }

    /// Number of actions in the macro
    pub fn len(&self) -> usize {
        self.steps.iter().map(|step| step.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
