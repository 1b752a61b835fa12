//! Geometry invariants under resize and drag
//!
//! Widths never drop below the configured minimum, height fitting keeps the
//! vertical center, and drags never push a node into negative coordinates.

use proptest::prelude::*;
use xpdl_editor::prelude::*;

fn session_with_selected_activity() -> (EditorSession, EntityId) {
    let mut session = EditorSession::new();
    let id = session
        .add_activity(ActivityType::ManualActivity, 500.0, 500.0)
        .unwrap()
        .id;
    session.change_select_nodes(SelectMode::Select, &[id]);
    (session, id)
}

fn rect(session: &EditorSession, id: EntityId) -> xpdl_editor::Rect {
    session.diagram().nodes().get_activity_node(id).unwrap().rect
}

proptest! {
    #[test]
    fn width_never_below_minimum(deltas in prop::collection::vec((any::<bool>(), -200.0f64..200.0), 1..30)) {
        let (mut session, id) = session_with_selected_activity();
        let min_width = session.config().activity_min_width;
        for (left, dx) in deltas {
            let before = rect(&session, id);
            let resized = if left { session.resize_left(dx) } else { session.resize_right(dx) };
            let after = rect(&session, id);
            prop_assert!(after.width >= min_width);
            prop_assert!(after.x >= 0.0);
            if resized == 0 {
                prop_assert_eq!(before, after);
            } else if left {
                // the right edge stays put
                prop_assert!((before.x + before.width - (after.x + after.width)).abs() < 1e-9);
            } else {
                prop_assert_eq!(before.x, after.x);
            }
        }
    }

    #[test]
    fn height_fit_keeps_center(heights in prop::collection::vec(40.0f64..400.0, 1..10)) {
        let (mut session, id) = session_with_selected_activity();
        session.resize_activity_height(id, 40.0).unwrap();
        let center = rect(&session, id).center_y();
        for height in heights {
            let before = rect(&session, id);
            prop_assert!(session.resize_activity_height(id, height).unwrap());
            let after = rect(&session, id);
            prop_assert!((after.y - (before.y - (height - before.height) / 2.0)).abs() < 1e-9);
            prop_assert!((after.center_y() - center).abs() < 1e-9);
        }
    }

    #[test]
    fn drag_stays_non_negative(moves in prop::collection::vec((-300.0f64..300.0, -300.0f64..300.0), 1..20)) {
        let (mut session, _) = session_with_selected_activity();
        let comment = session.add_comment_node(20.0, 30.0).unwrap();
        session.change_select_nodes(SelectMode::Toggle, &[comment]);
        for (dx, dy) in moves {
            session.move_selected_nodes(dx, dy);
            for node in session.diagram().nodes().iter() {
                prop_assert!(node.rect().x >= 0.0);
                prop_assert!(node.rect().y >= 0.0);
            }
        }
    }
}

#[test]
fn test_height_below_minimum_is_dropped() {
    let (mut session, id) = session_with_selected_activity();
    let before = rect(&session, id);
    assert!(!session.resize_activity_height(id, 12.0).unwrap());
    assert_eq!(rect(&session, id), before);
}

#[test]
fn test_resize_of_unknown_node_is_not_found() {
    let (mut session, _) = session_with_selected_activity();
    let err = session.resize_activity_height(99, 60.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
