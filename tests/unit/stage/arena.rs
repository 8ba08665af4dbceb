use super::*;
use crate::foundation::core::{ElementId, Point, Rect};
use crate::observe::config::ObservationConfig;
use crate::observe::sim::SimulatedViewport;
use crate::reveal::config::{RevealConfig, RevealPolicy};
use crate::reveal::preset::PresetKind;

fn animator(policy: RevealPolicy) -> RevealAnimator {
    RevealAnimator::new(
        RevealConfig::new(PresetKind::FadeUp, policy),
        ObservationConfig::with_threshold(0.5),
        2,
    )
    .unwrap()
}

#[test]
fn routes_entries_to_owning_region() {
    let vp = SimulatedViewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    vp.place(ElementId(10), Rect::new(0.0, 0.0, 100.0, 50.0));
    vp.place(ElementId(20), Rect::new(0.0, 1000.0, 100.0, 1050.0));

    let mut stage = RevealStage::new();
    let top = stage.insert(animator(RevealPolicy::Once));
    let below = stage.insert(animator(RevealPolicy::Once));
    stage
        .get_mut(top)
        .unwrap()
        .attach(Some(ElementId(10)), vp.boxed_backend())
        .unwrap();
    stage
        .get_mut(below)
        .unwrap()
        .attach(Some(ElementId(20)), vp.boxed_backend())
        .unwrap();

    let first = stage.deliver(&vp.flush(0.0)).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].0, top);
    assert!(first[0].1.is_reveal());

    let later = stage
        .deliver(&vp.scroll_to(Point::new(0.0, 990.0), 1.0))
        .unwrap();
    assert_eq!(later.len(), 1);
    assert_eq!(later[0].0, below);

    assert!(stage.get(top).unwrap().schedule().region_visible);
}

#[test]
fn remove_releases_and_keeps_ids_stable() {
    let vp = SimulatedViewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    vp.place(ElementId(1), Rect::new(0.0, 0.0, 10.0, 10.0));

    let mut stage = RevealStage::new();
    let a = stage.insert(animator(RevealPolicy::WhileVisible));
    stage
        .get_mut(a)
        .unwrap()
        .attach(Some(ElementId(1)), vp.boxed_backend())
        .unwrap();
    assert_eq!(vp.observed_count(), 1);

    assert!(stage.remove(a).is_some());
    assert_eq!(vp.observed_count(), 0);
    assert!(stage.remove(a).is_none());
    assert!(stage.is_empty());

    let b = stage.insert(animator(RevealPolicy::Once));
    assert_ne!(a, b);
    assert_eq!(stage.len(), 1);
    assert_eq!(stage.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![b]);
}

#[test]
fn unattached_regions_are_skipped() {
    let mut stage = RevealStage::new();
    stage.insert(animator(RevealPolicy::Once));
    let entry = IntersectionEntry {
        target: ElementId(3),
        is_intersecting: true,
        intersection_ratio: 1.0,
        time_secs: 0.0,
    };
    assert!(stage.deliver(&[entry]).unwrap().is_empty());
}

#[test]
fn ids_index_slots_directly() {
    let mut stage = RevealStage::new();
    let ids: Vec<_> = (0..3)
        .map(|_| stage.insert(animator(RevealPolicy::Once)))
        .collect();
    assert_eq!(ids, vec![RegionId(0), RegionId(1), RegionId(2)]);
    assert!(stage.get(RegionId(usize::MAX)).is_none());
    assert!(stage.remove(RegionId(usize::MAX)).is_none());
    assert_eq!(stage.len(), 3);
}
