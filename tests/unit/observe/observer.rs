use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::foundation::error::UnveilError;
use crate::observe::backend::UnavailableBackend;

#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<String>>>,
}

impl IntersectionBackend for Recorder {
    fn observe(&mut self, target: ElementId, _config: &ObservationConfig) -> UnveilResult<()> {
        self.calls.borrow_mut().push(format!("observe {target}"));
        Ok(())
    }

    fn unobserve(&mut self, target: ElementId) {
        self.calls.borrow_mut().push(format!("unobserve {target}"));
    }
}

fn entry(target: u64, is_intersecting: bool) -> IntersectionEntry {
    IntersectionEntry {
        target: ElementId(target),
        is_intersecting,
        intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
        time_secs: 0.0,
    }
}

fn observer() -> ViewportObserver {
    ViewportObserver::new(ObservationConfig::default()).unwrap()
}

#[test]
fn new_rejects_invalid_threshold() {
    let err = ViewportObserver::new(ObservationConfig::with_threshold(2.0)).unwrap_err();
    assert!(matches!(err, UnveilError::InvalidObservationConfig(_)));
}

#[test]
fn missing_element_is_a_silent_noop() {
    let rec = Recorder::default();
    let mut obs = observer();
    assert!(obs.attach(None, Box::new(rec.clone())).is_none());
    assert!(!obs.is_attached());
    assert_eq!(obs.state(), ObservationState::default());
    assert!(rec.calls.borrow().is_empty());
    assert!(obs.deliver(&[entry(1, true)]).is_none());
}

#[test]
fn seen_flag_is_monotonic() {
    let mut obs = observer();
    obs.attach(Some(ElementId(1)), Box::new(Recorder::default()));

    let s = obs.deliver(&[entry(1, true)]).unwrap();
    assert!(s.is_intersecting && s.has_ever_intersected);

    let s = obs.deliver(&[entry(1, false)]).unwrap();
    assert!(!s.is_intersecting);
    assert!(s.has_ever_intersected);
}

#[test]
fn batches_coalesce_into_one_notification() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut obs = observer();
    let sink = Rc::clone(&seen);
    obs.on_update(move |s| sink.borrow_mut().push(s));
    obs.attach(Some(ElementId(1)), Box::new(Recorder::default()));

    let s = obs
        .deliver(&[entry(1, true), entry(2, true), entry(1, false)])
        .unwrap();
    assert_eq!(
        s,
        ObservationState {
            is_intersecting: false,
            has_ever_intersected: true
        }
    );
    assert_eq!(seen.borrow().as_slice(), &[s]);

    // Same state again: no callback.
    assert!(obs.deliver(&[entry(1, false)]).is_none());
    // Other targets only: no callback.
    assert!(obs.deliver(&[entry(2, true)]).is_none());
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn detach_is_idempotent_and_releases_once() {
    let rec = Recorder::default();
    let mut obs = observer();
    let handle = obs.attach(Some(ElementId(5)), Box::new(rec.clone())).unwrap();
    assert_eq!(handle.target(), ElementId(5));

    assert!(obs.detach(handle));
    assert!(!obs.detach(handle));
    assert!(!obs.release());
    assert_eq!(
        rec.calls.borrow().as_slice(),
        &["observe #5".to_owned(), "unobserve #5".to_owned()]
    );
    assert!(obs.deliver(&[entry(5, true)]).is_none());
}

#[test]
fn reattach_releases_previous_and_stales_old_handle() {
    let rec = Recorder::default();
    let mut obs = observer();
    let first = obs.attach(Some(ElementId(1)), Box::new(rec.clone())).unwrap();
    obs.deliver(&[entry(1, true)]);

    let second = obs.attach(Some(ElementId(2)), Box::new(rec.clone())).unwrap();
    assert_eq!(obs.state(), ObservationState::default());
    assert!(!obs.detach(first));
    assert_eq!(obs.target(), Some(ElementId(2)));
    assert!(obs.detach(second));

    assert_eq!(
        rec.calls.borrow().as_slice(),
        &[
            "observe #1".to_owned(),
            "unobserve #1".to_owned(),
            "observe #2".to_owned(),
            "unobserve #2".to_owned()
        ]
    );
}

#[test]
fn drop_releases_registration() {
    let rec = Recorder::default();
    {
        let mut obs = observer();
        obs.attach(Some(ElementId(8)), Box::new(rec.clone()));
    }
    assert_eq!(rec.calls.borrow().last().unwrap(), "unobserve #8");
}

#[test]
fn unavailable_backend_fails_open() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut obs = observer();
    let sink = Rc::clone(&seen);
    obs.on_update(move |s| sink.borrow_mut().push(s));

    assert!(obs.attach(Some(ElementId(3)), Box::new(UnavailableBackend)).is_some());
    assert!(obs.is_failed_open());
    assert_eq!(obs.state(), ObservationState::FAIL_OPEN);
    assert_eq!(seen.borrow().as_slice(), &[ObservationState::FAIL_OPEN]);

    // Stays visible regardless of what arrives later.
    assert!(obs.deliver(&[entry(3, false)]).is_none());
    assert_eq!(obs.state(), ObservationState::FAIL_OPEN);
}
