//! Scope state machine
//!
//! States: top level, in a container, in a function, or in a function inside
//! a container. Anonymous classes and enums open no frame; they only mask
//! the functions declared inside them.

use super::frame::ScopeFrame;

#[derive(Debug, Default)]
pub struct ScopeTracker {
    container: Option<ScopeFrame>,
    function: Option<ScopeFrame>,
    /// End index of the outermost masked body
    masked_until: Option<usize>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(&self) -> Option<&ScopeFrame> {
        self.container.as_ref()
    }

    /// Open a container scope unless one is already active.
    ///
    /// Returns whether the frame was opened.
    pub fn open_container(&mut self, frame: ScopeFrame) -> bool {
        if self.container.is_some() {
            return false;
        }
        self.container = Some(frame);
        true
    }

    /// Open a function scope unless one is already active
    pub fn open_function(&mut self, frame: ScopeFrame) -> bool {
        if self.function.is_some() {
            return false;
        }
        self.function = Some(frame);
        true
    }

    /// Mask everything up to `end_index` as a body whose functions are not
    /// filed (anonymous classes, enums)
    pub fn mask_until(&mut self, end_index: usize) {
        let until = self.masked_until.map_or(end_index, |u| u.max(end_index));
        self.masked_until = Some(until);
    }

    /// Whether the token at `index` is inside a masked body
    pub fn is_masked(&self, index: usize) -> bool {
        self.masked_until.is_some_and(|until| index <= until)
    }

    /// Close every scope whose end token is at `index`, function first.
    pub fn close_at(&mut self, index: usize) -> [Option<ScopeFrame>; 2] {
        let function = self.function.take_if(|f| f.end_index == index);
        let container = self.container.take_if(|c| c.end_index == index);
        if self.masked_until == Some(index) {
            self.masked_until = None;
        }

        [function, container]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::FrameKind;
    use crate::symbols::ContainerKind;

    #[test]
    fn test_first_container_wins() {
        let mut tracker = ScopeTracker::new();
        assert!(tracker.open_container(ScopeFrame::container(ContainerKind::Class, "A", 1, 9, 40)));
        assert!(!tracker.open_container(ScopeFrame::container(ContainerKind::Class, "B", 3, 5, 20)));

        assert_eq!(tracker.container().map(|c| c.name.as_str()), Some("A"));
    }

    #[test]
    fn test_close_function_before_container() {
        let mut tracker = ScopeTracker::new();
        tracker.open_container(ScopeFrame::container(ContainerKind::Trait, "T", 1, 1, 10));
        tracker.open_function(ScopeFrame::function("f", 1, 1, 10));

        assert_eq!(tracker.close_at(9), [None, None]);

        let [function, container] = tracker.close_at(10);
        assert_eq!(function.map(|f| f.kind), Some(FrameKind::Function));
        assert_eq!(
            container.map(|c| c.kind),
            Some(FrameKind::Container(ContainerKind::Trait))
        );
        assert!(tracker.container().is_none());
        assert!(tracker.open_function(ScopeFrame::function("g", 2, 2, 20)));
    }

    #[test]
    fn test_masked_body() {
        let mut tracker = ScopeTracker::new();
        tracker.mask_until(30);
        tracker.mask_until(20);

        assert!(tracker.is_masked(25));
        tracker.close_at(20);
        assert!(tracker.is_masked(25));
        tracker.close_at(30);
        assert!(!tracker.is_masked(25));
    }
}
