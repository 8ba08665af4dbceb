use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::foundation::core::{ElementId, Point, Rect};
use crate::foundation::error::UnveilResult;
use crate::observe::backend::{IntersectionBackend, IntersectionEntry};
use crate::observe::config::ObservationConfig;
use crate::observe::geometry::measure;

#[derive(Debug)]
struct Registration {
    config: ObservationConfig,
    last_reported: Option<bool>,
}

#[derive(Debug)]
struct Inner {
    viewport: Rect,
    layout: BTreeMap<ElementId, Rect>,
    observed: BTreeMap<ElementId, Registration>,
}

/// Deterministic stand-in for a host viewport.
///
/// Element rects and the viewport share document coordinates. Like a real platform, a
/// registration reports its initial state on the next flush and afterwards only reports
/// when the target crosses its threshold.
#[derive(Clone, Debug)]
pub struct SimulatedViewport {
    inner: Rc<RefCell<Inner>>,
}

/// [`IntersectionBackend`] handle registering targets with a [`SimulatedViewport`].
#[derive(Clone, Debug)]
pub struct SimulatedBackend {
    inner: Rc<RefCell<Inner>>,
}

impl SimulatedViewport {
    /// Viewport covering `viewport` in document coordinates.
    pub fn new(viewport: Rect) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                viewport: viewport.abs(),
                layout: BTreeMap::new(),
                observed: BTreeMap::new(),
            })),
        }
    }

    /// New backend handle for one observer.
    pub fn backend(&self) -> SimulatedBackend {
        SimulatedBackend {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Boxed backend handle, ready for [`ViewportObserver::attach`](crate::ViewportObserver::attach).
    pub fn boxed_backend(&self) -> Box<dyn IntersectionBackend> {
        Box::new(self.backend())
    }

    /// Current viewport rect.
    pub fn viewport(&self) -> Rect {
        self.inner.borrow().viewport
    }

    /// Lay out (or move) `target` at `rect`.
    pub fn place(&self, target: ElementId, rect: Rect) {
        self.inner.borrow_mut().layout.insert(target, rect.abs());
    }

    /// Remove `target` from layout.
    ///
    /// A registration that last reported intersecting gets one final not-intersecting
    /// entry on the next flush, then stops reporting until the target is placed again.
    pub fn remove(&self, target: ElementId) {
        self.inner.borrow_mut().layout.remove(&target);
    }

    /// Return `true` while some observer is registered for `target`.
    pub fn is_observed(&self, target: ElementId) -> bool {
        self.inner.borrow().observed.contains_key(&target)
    }

    /// Number of live registrations.
    pub fn observed_count(&self) -> usize {
        self.inner.borrow().observed.len()
    }

    /// Move the viewport's top-left corner to `origin` and report the resulting crossings.
    pub fn scroll_to(&self, origin: Point, time_secs: f64) -> Vec<IntersectionEntry> {
        {
            let mut inner = self.inner.borrow_mut();
            let size = inner.viewport.size();
            inner.viewport = Rect::from_origin_size(origin, size);
        }
        self.flush(time_secs)
    }

    /// Report entries for registrations whose state differs from what they last reported.
    ///
    /// Entries are ordered by element id.
    pub fn flush(&self, time_secs: f64) -> Vec<IntersectionEntry> {
        let mut inner = self.inner.borrow_mut();
        let Inner {
            viewport,
            layout,
            observed,
        } = &mut *inner;

        let mut out = Vec::new();
        for (&id, reg) in observed.iter_mut() {
            let entry = match layout.get(&id) {
                Some(&rect) => measure(id, rect, *viewport, &reg.config, time_secs),
                // Out of layout: a visible target reports leaving, an unseen one stays silent.
                None if reg.last_reported == Some(true) => IntersectionEntry {
                    target: id,
                    is_intersecting: false,
                    intersection_ratio: 0.0,
                    time_secs,
                },
                None => continue,
            };
            if reg.last_reported != Some(entry.is_intersecting) {
                reg.last_reported = Some(entry.is_intersecting);
                out.push(entry);
            }
        }
        out
    }
}

impl IntersectionBackend for SimulatedBackend {
    fn observe(&mut self, target: ElementId, config: &ObservationConfig) -> UnveilResult<()> {
        self.inner.borrow_mut().observed.insert(
            target,
            Registration {
                config: *config,
                last_reported: None,
            },
        );
        Ok(())
    }

    fn unobserve(&mut self, target: ElementId) {
        self.inner.borrow_mut().observed.remove(&target);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/sim.rs"]
mod tests;
