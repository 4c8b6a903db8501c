use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::ChartResult;
use crate::render::{ContainerId, PlotEngine, RenderFrame};

/// Headless engine used by tests and static exports.
///
/// It still validates every frame so invalid descriptors surface before a
/// real engine is involved, and it records what a real engine would show.
#[derive(Debug, Default)]
pub struct NullEngine {
    drawn: RefCell<BTreeMap<ContainerId, RenderFrame>>,
    draw_log: RefCell<Vec<ContainerId>>,
    purged: RefCell<Vec<ContainerId>>,
}

impl NullEngine {
    /// Frame currently shown in `container`, if any.
    #[must_use]
    pub fn frame(&self, container: &ContainerId) -> Option<RenderFrame> {
        self.drawn.borrow().get(container).cloned()
    }

    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_log.borrow().len()
    }

    /// Containers in the order draws reached the engine.
    #[must_use]
    pub fn draw_log(&self) -> Vec<ContainerId> {
        self.draw_log.borrow().clone()
    }

    #[must_use]
    pub fn purged(&self) -> Vec<ContainerId> {
        self.purged.borrow().clone()
    }

    #[must_use]
    pub fn live_containers(&self) -> usize {
        self.drawn.borrow().len()
    }
}

impl PlotEngine for NullEngine {
    fn draw(&self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.draw_log.borrow_mut().push(frame.container.clone());
        self.drawn
            .borrow_mut()
            .insert(frame.container.clone(), frame.clone());
        Ok(())
    }

    fn purge(&self, container: &ContainerId) {
        self.drawn.borrow_mut().remove(container);
        self.purged.borrow_mut().push(container.clone());
    }
}
