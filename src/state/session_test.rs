use super::*;

use crate::net::types::TilePlaced;

fn tile(user_id: &str, user_name: Option<&str>) -> TilePlaced {
    TilePlaced {
        x: 1.0,
        y: 2.0,
        color: "#123456".to_owned(),
        user_id: user_id.to_owned(),
        user_name: user_name.map(str::to_owned),
    }
}

#[test]
fn session_defaults_are_empty_and_disconnected() {
    let session = SessionState::default();
    assert!(session.canvas_id.is_none());
    assert_eq!(session.connection_status, ConnectionStatus::Disconnected);
    assert!(session.extent.is_none());
    assert_eq!(session.total_tiles, 0);
    assert!(session.tile_counts.is_empty());
}

#[test]
fn record_tile_tallies_per_user_and_total() {
    let mut session = SessionState::default();
    session.record_tile(&tile("u-1", None));
    session.record_tile(&tile("u-1", None));
    session.record_tile(&tile("u-2", None));

    assert_eq!(session.total_tiles, 3);
    assert_eq!(session.tiles_by("u-1"), 2);
    assert_eq!(session.tiles_by("u-2"), 1);
}

#[test]
fn record_tile_registers_display_names() {
    let mut session = SessionState::default();
    session.record_tile(&tile("u-1", Some("ada")));
    session.record_tile(&tile("u-1", Some("ada l.")));

    assert_eq!(session.user_names.get("u-1").map(String::as_str), Some("ada l."));
}

#[test]
fn tiles_by_unseen_user_is_zero() {
    let session = SessionState::default();
    assert_eq!(session.tiles_by("ghost"), 0);
}

#[test]
fn top_placers_sorts_by_count_then_id() {
    let mut session = SessionState::default();
    session.record_tile(&tile("u-b", None));
    session.record_tile(&tile("u-a", Some("ada")));
    session.record_tile(&tile("u-a", Some("ada")));
    session.record_tile(&tile("u-c", None));

    let placers = session.top_placers(2);

    assert_eq!(placers, vec![("ada".to_owned(), 2), ("u-b".to_owned(), 1)]);
}

#[test]
fn top_placers_of_empty_session_is_empty() {
    assert!(SessionState::default().top_placers(3).is_empty());
}

#[test]
fn reset_for_canvas_clears_prior_canvas_data() {
    let mut session = SessionState::default();
    session.canvas_name = Some("Old".to_owned());
    session.extent = Some(viewport::camera::CanvasExtent::new(64.0, 64.0));
    session.connection_status = ConnectionStatus::Connected;
    session.record_tile(&tile("u-1", Some("ada")));

    session.reset_for_canvas(Some("c-2".to_owned()));

    assert_eq!(session.canvas_id.as_deref(), Some("c-2"));
    assert!(session.canvas_name.is_none());
    assert!(session.extent.is_none());
    assert_eq!(session.total_tiles, 0);
    assert!(session.tile_counts.is_empty());
    assert!(session.user_names.is_empty());
    // The socket lifecycle owns connection status; a route change must not
    // fake a disconnect.
    assert_eq!(session.connection_status, ConnectionStatus::Connected);
}

#[test]
fn apply_welcome_adopts_known_fields() {
    let mut session = SessionState::default();
    let welcome = CanvasWelcome {
        name: Some("Starfield".to_owned()),
        extent: Some(viewport::camera::CanvasExtent::new(512.0, 256.0)),
        tile_count: 40,
        user_tile_counts: std::collections::HashMap::from([("u-1".to_owned(), 40)]),
    };

    session.apply_welcome(&welcome);

    assert_eq!(session.canvas_name.as_deref(), Some("Starfield"));
    assert_eq!(session.extent, Some(viewport::camera::CanvasExtent::new(512.0, 256.0)));
    assert_eq!(session.total_tiles, 40);
    assert_eq!(session.tiles_by("u-1"), 40);
}

#[test]
fn partial_welcome_keeps_existing_values() {
    let mut session = SessionState::default();
    session.canvas_name = Some("From metadata".to_owned());
    session.extent = Some(viewport::camera::CanvasExtent::new(128.0, 128.0));

    session.apply_welcome(&CanvasWelcome::default());

    assert_eq!(session.canvas_name.as_deref(), Some("From metadata"));
    assert_eq!(session.extent, Some(viewport::camera::CanvasExtent::new(128.0, 128.0)));
}
