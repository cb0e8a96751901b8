//! Vertical scroll synchronization between the label column and the bars pane.
//!
//! The host event loop owns two scrollable surfaces and a [`ScrollBus`]. After
//! a user scroll it calls [`ScrollBus::notify`] for the pane that moved.
//! [`ScrollSync::bind`] subscribes to the driving pane only and copies its
//! offset onto the follower. Programmatic offset changes never notify the bus,
//! and the follower has no listener, so the copy cannot echo back.
//!
//! The subscription lives in a [`ScrollBinding`]; dropping it detaches the
//! listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

/// A vertically scrollable surface.
pub trait ScrollSurface {
    /// Current vertical offset.
    fn scroll_top(&self) -> u32;

    /// Move to `offset`. Must not notify the bus.
    fn set_scroll_top(&mut self, offset: u32);
}

/// One of the two synchronized panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    /// Lane name column.
    Labels,
    /// Epic bars area.
    Bars,
}

/// Which pane drives and which follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncDirection {
    /// The bars pane scrolls; labels follow.
    #[default]
    BarsDriveLabels,
    /// The label column scrolls; bars follow.
    LabelsDriveBars,
}

impl SyncDirection {
    /// Pane whose scroll events are observed.
    pub fn driver(self) -> Pane {
        match self {
            Self::BarsDriveLabels => Pane::Bars,
            Self::LabelsDriveBars => Pane::Labels,
        }
    }

    /// Pane whose offset is written.
    pub fn follower(self) -> Pane {
        match self {
            Self::BarsDriveLabels => Pane::Labels,
            Self::LabelsDriveBars => Pane::Bars,
        }
    }
}

type Listener = Rc<RefCell<dyn FnMut()>>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Pane, Listener)>,
}

/// Single-threaded registry of scroll listeners, keyed by pane.
#[derive(Clone, Default)]
pub struct ScrollBus {
    inner: Rc<RefCell<BusInner>>,
}

impl std::fmt::Debug for ScrollBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollBus")
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl ScrollBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for scroll events on `pane`.
    pub fn subscribe(&self, pane: Pane, listener: impl FnMut() + 'static) -> Subscription {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, pane, listener));
        Subscription {
            bus: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver a scroll event for `pane`. Returns how many listeners ran.
    ///
    /// A listener that is already running (re-entrant notify) is skipped.
    pub fn notify(&self, pane: Pane) -> usize {
        // Snapshot first so listeners may subscribe or unsubscribe while running.
        let targets: Vec<(u64, Listener)> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, p, _)| *p == pane)
            .map(|(id, _, l)| (*id, Rc::clone(l)))
            .collect();

        let mut ran = 0;
        for (id, listener) in targets {
            // An earlier listener may have dropped this one's subscription.
            if !self.is_subscribed(id) {
                trace!(?pane, id, "skipping detached scroll listener");
                continue;
            }
            if let Ok(mut call) = listener.try_borrow_mut() {
                (&mut *call)();
                ran += 1;
            } else {
                trace!(?pane, "skipping re-entrant scroll listener");
            }
        }
        ran
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.inner
            .borrow()
            .listeners
            .iter()
            .any(|(listener_id, _, _)| *listener_id == id)
    }

    /// Number of listeners attached to `pane`.
    pub fn listener_count(&self, pane: Pane) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, p, _)| *p == pane)
            .count()
    }
}

/// Handle for a registered listener. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    bus: Weak<RefCell<BusInner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner
                .borrow_mut()
                .listeners
                .retain(|(id, _, _)| *id != self.id);
        }
    }
}

/// Copy the driver's offset onto the follower if they differ.
///
/// Returns true when the follower moved.
pub fn sync_offsets(driver: &dyn ScrollSurface, follower: &mut dyn ScrollSurface) -> bool {
    let offset = driver.scroll_top();
    if follower.scroll_top() == offset {
        return false;
    }
    follower.set_scroll_top(offset);
    true
}

/// Keeps the follower pane's offset equal to the driver's.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollSync {
    direction: SyncDirection,
}

impl ScrollSync {
    /// Create a sync with the given direction.
    pub fn new(direction: SyncDirection) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> SyncDirection {
        self.direction
    }

    /// Attach to the driving pane.
    ///
    /// Returns `None` without error when either surface is missing; the view
    /// still works, just unsynchronized.
    pub fn bind<L, B>(
        &self,
        bus: &ScrollBus,
        labels: Option<Rc<RefCell<L>>>,
        bars: Option<Rc<RefCell<B>>>,
    ) -> Option<ScrollBinding>
    where
        L: ScrollSurface + 'static,
        B: ScrollSurface + 'static,
    {
        let (Some(labels), Some(bars)) = (labels, bars) else {
            debug!(direction = ?self.direction, "scroll surface missing, sync not bound");
            return None;
        };

        let labels: Rc<RefCell<dyn ScrollSurface>> = labels;
        let bars: Rc<RefCell<dyn ScrollSurface>> = bars;
        let (driver, follower) = match self.direction {
            SyncDirection::BarsDriveLabels => (bars, labels),
            SyncDirection::LabelsDriveBars => (labels, bars),
        };

        let subscription = bus.subscribe(self.direction.driver(), move || {
            let (Ok(driver), Ok(mut follower)) = (driver.try_borrow(), follower.try_borrow_mut())
            else {
                trace!("scroll surface busy, skipping sync");
                return;
            };
            if sync_offsets(&*driver, &mut *follower) {
                trace!(offset = driver.scroll_top(), "synced follower pane");
            }
        });

        debug!(direction = ?self.direction, "scroll sync bound");
        Some(ScrollBinding {
            direction: self.direction,
            _subscription: subscription,
        })
    }
}

/// Live scroll synchronization. Dropping it detaches the listener.
#[derive(Debug)]
pub struct ScrollBinding {
    direction: SyncDirection,
    _subscription: Subscription,
}

impl ScrollBinding {
    pub fn direction(&self) -> SyncDirection {
        self.direction
    }

    /// Detach explicitly. Same as dropping.
    pub fn unbind(self) {}
}
