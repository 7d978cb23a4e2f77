// Handshake with the narrative script advancer

/// The component that moves the narrative script forward.
///
/// The stage calls `next_node` exactly once per enter/exit request: right
/// away for ignored requests and fire-and-forget fades, or when the fade
/// finishes for requests that wait.
pub trait Sequencer {
    fn next_node(&mut self);
}

/// Sequencer that only counts advance requests
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceCounter {
    count: usize,
}

impl AdvanceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total `next_node` calls so far
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Sequencer for AdvanceCounter {
    fn next_node(&mut self) {
        self.count += 1;
    }
}

impl<S: Sequencer + ?Sized> Sequencer for &mut S {
    fn next_node(&mut self) {
        (**self).next_node();
    }
}

impl<S: Sequencer + ?Sized> Sequencer for Box<S> {
    fn next_node(&mut self) {
        (**self).next_node();
    }
}
