use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::{ChartDescriptor, ContainerId, RenderFrame};

use super::{EngineCache, EngineLoader, EngineState, RendererConfig};

type PendingDraws = SmallVec<[(u64, ChartDescriptor); 2]>;
type SettledDraws = SmallVec<[(u64, ChartResult<()>); 2]>;

/// Result of one `mount` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// This call flushed the queue and `frames` of its draws succeeded.
    Drawn { frames: usize },
    /// A mount that resumed first already drew this descriptor.
    AlreadyDrawn,
    /// The container was gone before the engine became ready.
    Abandoned,
}

struct ContainerSlot {
    /// First ticket issued during this attachment.
    opened_at: u64,
    pending: PendingDraws,
    /// Draw results waiting for the mount that queued them to resume.
    settled: SettledDraws,
    drawn: bool,
}

/// Bridges descriptors to the page's single plotting engine.
///
/// Containers are attached through [`MountGuard`]s; the guard releases the
/// engine's drawing surface when it goes out of scope, whichever way the host
/// tears the component down.
pub struct RendererAdapter {
    engine: EngineCache,
    config: RendererConfig,
    containers: RefCell<HashMap<ContainerId, ContainerSlot>>,
    next_ticket: Cell<u64>,
}

impl fmt::Debug for RendererAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererAdapter")
            .field("engine", &self.engine)
            .field("attached", &self.attached_count())
            .finish_non_exhaustive()
    }
}

impl RendererAdapter {
    pub fn new(loader: Rc<dyn EngineLoader>, config: RendererConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            engine: EngineCache::new(loader, config.engine_url.clone()),
            config,
            containers: RefCell::new(HashMap::new()),
            next_ticket: Cell::new(0),
        })
    }

    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[must_use]
    pub fn engine_state(&self) -> EngineState {
        self.engine.state()
    }

    #[must_use]
    pub fn engine_cache(&self) -> &EngineCache {
        &self.engine
    }

    #[must_use]
    pub fn is_attached(&self, container: &ContainerId) -> bool {
        self.containers.borrow().contains_key(container)
    }

    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.containers.borrow().len()
    }

    /// Number of draws queued for `container` while the engine loads.
    #[must_use]
    pub fn pending_count(&self, container: &ContainerId) -> usize {
        self.containers
            .borrow()
            .get(container)
            .map_or(0, |slot| slot.pending.len())
    }

    /// Claims `container` for one component instance.
    pub fn attach(&self, container: ContainerId) -> ChartResult<MountGuard<'_>> {
        let mut containers = self.containers.borrow_mut();
        if containers.contains_key(&container) {
            return Err(ChartError::InvalidData(format!(
                "container `{container}` is already attached"
            )));
        }
        containers.insert(
            container.clone(),
            ContainerSlot {
                opened_at: self.next_ticket.get(),
                pending: SmallVec::new(),
                settled: SmallVec::new(),
                drawn: false,
            },
        );
        debug!(%container, "attached chart container");
        Ok(MountGuard {
            adapter: self,
            container,
        })
    }

    /// Draws `descriptor` into `container` once the engine is ready.
    ///
    /// Draws requested before the engine resolves are queued per container and
    /// flushed in request order by whichever waiting call resumes first. A
    /// failed draw does not stop the flush; its error goes to the mount that
    /// queued it.
    pub async fn mount(
        &self,
        container: &ContainerId,
        mut descriptor: ChartDescriptor,
    ) -> ChartResult<MountOutcome> {
        let ticket = self.issue_ticket();
        {
            let mut containers = self.containers.borrow_mut();
            let Some(slot) = containers.get_mut(container) else {
                warn!(%container, "mount on detached container ignored");
                return Ok(MountOutcome::Abandoned);
            };
            self.config.host_defaults.apply(&mut descriptor.layout);
            slot.pending.push((ticket, descriptor));
        }

        let _queued = QueuedDraw {
            adapter: self,
            container,
            ticket,
        };
        let engine = self.engine.ensure_engine_loaded().await?;

        let frames = {
            let mut containers = self.containers.borrow_mut();
            let Some(slot) = containers.get_mut(container) else {
                debug!(%container, "container unmounted while engine was loading");
                return Ok(MountOutcome::Abandoned);
            };
            if ticket < slot.opened_at {
                debug!(%container, "container re-attached while engine was loading");
                return Ok(MountOutcome::Abandoned);
            }
            if let Some(index) = slot.settled.iter().position(|(queued, _)| *queued == ticket) {
                let (_, result) = slot.settled.remove(index);
                return result.map(|()| MountOutcome::AlreadyDrawn);
            }
            if !slot.pending.iter().any(|(queued, _)| *queued == ticket) {
                return Ok(MountOutcome::AlreadyDrawn);
            }
            std::mem::take(&mut slot.pending)
        };

        let mut own = Ok(());
        let mut settled = SettledDraws::new();
        let mut drawn = 0;
        for (queued, descriptor) in frames {
            let frame = RenderFrame::new(container.clone(), descriptor, self.config.draw);
            let result = engine.draw(&frame);
            match &result {
                Ok(()) => drawn += 1,
                Err(err) => {
                    warn!(%container, ticket = queued, error = %err, "queued draw failed");
                }
            }
            if queued == ticket {
                own = result;
            } else {
                settled.push((queued, result));
            }
        }
        if let Some(slot) = self.containers.borrow_mut().get_mut(container) {
            slot.drawn |= drawn > 0;
            slot.settled.extend(settled);
        }

        trace!(%container, frames = drawn, "flushed chart draws");
        own.map(|()| MountOutcome::Drawn { frames: drawn })
    }

    /// Detaches `container`, dropping queued draws and releasing engine resources.
    ///
    /// Safe on containers that were never attached or never drawn. Returns
    /// `true` when the engine purged a drawing.
    pub fn unmount(&self, container: &ContainerId) -> bool {
        let Some(slot) = self.containers.borrow_mut().remove(container) else {
            return false;
        };
        if !slot.pending.is_empty() {
            debug!(
                %container,
                dropped = slot.pending.len(),
                "dropping queued draws on unmount"
            );
        }
        if !slot.drawn {
            return false;
        }
        match self.engine.engine() {
            Some(engine) => {
                engine.purge(container);
                debug!(%container, "purged chart container");
                true
            }
            None => false,
        }
    }

    fn issue_ticket(&self) -> u64 {
        let ticket = self.next_ticket.get();
        self.next_ticket.set(ticket + 1);
        ticket
    }
}

/// Forgets a mount's queued draw, or its settled result, when the `mount`
/// future finishes or is dropped early.
struct QueuedDraw<'a> {
    adapter: &'a RendererAdapter,
    container: &'a ContainerId,
    ticket: u64,
}

impl Drop for QueuedDraw<'_> {
    fn drop(&mut self) {
        if let Ok(mut containers) = self.adapter.containers.try_borrow_mut() {
            if let Some(slot) = containers.get_mut(self.container) {
                slot.pending.retain(|(queued, _)| *queued != self.ticket);
                slot.settled.retain(|(queued, _)| *queued != self.ticket);
            }
        }
    }
}

/// Exclusive claim on one container; unmounts it on drop.
pub struct MountGuard<'a> {
    adapter: &'a RendererAdapter,
    container: ContainerId,
}

impl fmt::Debug for MountGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountGuard")
            .field("container", &self.container)
            .finish()
    }
}

impl MountGuard<'_> {
    #[must_use]
    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    pub async fn mount(&self, descriptor: ChartDescriptor) -> ChartResult<MountOutcome> {
        self.adapter.mount(&self.container, descriptor).await
    }
}

impl Drop for MountGuard<'_> {
    fn drop(&mut self) {
        self.adapter.unmount(&self.container);
    }
}
