//! Drag gestures and hover preview driving a real session

use mtg_playmat_rs::{
    game::ActionOutcome,
    input::{DragGesture, DragOutcome, DropTarget, HoverPreview},
    CardRef, DeckDefinition, DeckEntry, GameAction, InstanceId, Playmat, PlaymatConfig, Position,
    StartZone, Zone,
};
use std::time::Duration;
use tokio::time::Instant;

fn playmat() -> Playmat {
    let deck = DeckDefinition::new(
        "drag",
        vec![DeckEntry::new(CardRef::new("Plains"), StartZone::Library).with_count(6)],
    );
    let mut playmat = Playmat::with_seed(deck, PlaymatConfig::default(), 3);
    playmat.logger_mut().enable_capture();
    playmat
}

fn finish_drag(playmat: &mut Playmat, gesture: DragGesture, target: DropTarget) -> Option<ActionOutcome> {
    match gesture.drag_end(target) {
        DragOutcome::Resolved(action) => Some(playmat.apply(action).unwrap()),
        DragOutcome::Cancelled { .. } => None,
    }
}

fn draw(playmat: &mut Playmat) -> InstanceId {
    match playmat.apply(GameAction::Draw).unwrap() {
        ActionOutcome::Drew(id) => id,
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_drag_cycle_through_zones() {
    let mut playmat = playmat();
    let a = draw(&mut playmat);
    let b = draw(&mut playmat);

    let hand_slot = Position::new(600.0, 700.0);
    let mut gesture = DragGesture::drag_start(a, Zone::Hand, hand_slot, hand_slot);
    let before = playmat.state().clone();
    assert!(gesture.drag_over(DropTarget::Battlefield(Position::new(1.0, 1.0))));
    assert_eq!(playmat.state(), &before);
    finish_drag(&mut playmat, gesture, DropTarget::Battlefield(Position::new(200.0, 150.0)));
    assert_eq!(
        playmat.state().zones.battlefield().entry(a).unwrap().position,
        Position::new(200.0, 150.0)
    );

    // Grabbed 20px right of and 10px below the corner
    let gesture = DragGesture::drag_start(
        a,
        Zone::Battlefield,
        Position::new(200.0, 150.0),
        Position::new(220.0, 160.0),
    );
    finish_drag(&mut playmat, gesture, DropTarget::Battlefield(Position::new(320.0, 260.0)));
    assert_eq!(
        playmat.state().zones.battlefield().entry(a).unwrap().position,
        Position::new(300.0, 250.0)
    );

    let hand_slot = Position::new(640.0, 700.0);
    let gesture = DragGesture::drag_start(b, Zone::Hand, hand_slot, hand_slot);
    finish_drag(&mut playmat, gesture, DropTarget::Card(a));
    assert_eq!(playmat.state().zones.battlefield().host_of(b), Some(a));

    let corner = Position::new(300.0, 250.0);
    let gesture = DragGesture::drag_start(a, Zone::Battlefield, corner, corner);
    finish_drag(&mut playmat, gesture, DropTarget::Zone(Zone::Exile));
    let exile: Vec<_> = playmat.state().zones.exile().ids().collect();
    assert_eq!(exile, vec![a, b]);
    playmat.check_conservation().unwrap();
}

#[test]
fn test_cancelled_drag_restores_origin() {
    let mut playmat = playmat();
    let a = draw(&mut playmat);
    let origin = Position::new(600.0, 700.0);
    let before = playmat.state().clone();

    let gesture = DragGesture::drag_start(a, Zone::Hand, origin, Position::new(630.0, 740.0));
    match gesture.drag_end(DropTarget::Outside) {
        DragOutcome::Cancelled { card, restore } => {
            assert_eq!(card, a);
            assert_eq!(restore, origin);
        }
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert_eq!(playmat.state(), &before);
}

#[tokio::test(start_paused = true)]
async fn test_hover_debounce_publishes_last_card() {
    let mut preview = HoverPreview::new(Duration::from_millis(500));
    let mut rx = preview.subscribe();
    let start = Instant::now();

    preview.hover(InstanceId::new(1));
    tokio::time::sleep(Duration::from_millis(300)).await;
    preview.hover(InstanceId::new(2));

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), Some(InstanceId::new(2)));
    assert!(start.elapsed() >= Duration::from_millis(800));

    preview.clear();
    assert_eq!(preview.current(), None);
    assert!(rx.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_hover_preview_uses_configured_delay() {
    let config = PlaymatConfig {
        preview_delay_ms: 250,
        ..PlaymatConfig::default()
    };
    let mut preview = HoverPreview::new(config.preview_delay());
    let mut rx = preview.subscribe();
    let start = Instant::now();

    preview.hover(InstanceId::new(9));
    rx.changed().await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(250));
    assert!(elapsed < Duration::from_millis(500));
    assert_eq!(preview.current(), Some(InstanceId::new(9)));
}
