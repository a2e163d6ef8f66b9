use frame_geom::config::{defaults, Roles};
use frame_geom::data::output::{FlatPrimitive, ScenePrimitive};
use frame_geom::player::{load_frames, FramePlayer, FRAME_INTERVAL};
use frame_geom::svg::to_svg;
use frame_geom::{compose_flat, compose_scene, Frame, FrameError, Keypoint, RenderConfig, Side};
use std::time::Duration;

mod fixtures;

use fixtures::{approx_eq, knee_on_belly};

fn bone_colors(primitives: &[FlatPrimitive]) -> Vec<&str> {
    primitives
        .iter()
        .filter_map(|p| match p {
            FlatPrimitive::Bone { color, .. } => Some(color.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn flat_scene_defender_first() -> () {
    let frame = knee_on_belly();
    let scene = compose_flat(&frame, defaults());
    // two full rigs of 14 bones and 14 joints, then 14 overlay marks
    assert_eq!(scene.primitives.len(), 70);
    assert_eq!(scene.mat, frame.mat);
    assert_eq!(scene.background, "#fafafa");

    let colors = bone_colors(&scene.primitives);
    assert_eq!(colors.len(), 28);
    assert!(colors[..14].iter().all(|&c| c == "#1E88E5"));
    assert!(colors[14..].iter().all(|&c| c == "#E53935"));

    assert!(scene.primitives[..56].iter().all(|p| !matches!(p, FlatPrimitive::Overlay(_))));
    assert!(scene.primitives[56..].iter().all(|p| matches!(p, FlatPrimitive::Overlay(_))));
}

#[test]
fn swapped_roles_swap_draw_order() -> () {
    let frame = knee_on_belly();
    let config = RenderConfig {
        roles: Roles { attacker: Side::Blue, defender: Side::Red },
        ..RenderConfig::default()
    };
    let scene = compose_flat(&frame, &config);
    let colors = bone_colors(&scene.primitives);
    assert_eq!(colors[0], "#E53935");
    assert_eq!(colors[27], "#1E88E5");
}

#[test]
fn missing_keypoint_drops_its_bones_only() -> () {
    let mut frame = knee_on_belly();
    frame.fighters.red.remove(Keypoint::LElbow);
    let scene = compose_flat(&frame, defaults());
    // shoulder-elbow and elbow-wrist go, one joint goes
    assert_eq!(scene.primitives.len(), 70 - 3);
    assert_eq!(bone_colors(&scene.primitives).len(), 26);
}

#[test]
fn empty_frame_composes_to_nothing() -> () {
    let frame = Frame::default();
    assert!(compose_flat(&frame, defaults()).primitives.is_empty());
    let scene = compose_scene(&frame, defaults());
    assert!(scene.primitives.is_empty());
    assert!(scene.mapped.red.is_empty());
}

#[test]
fn scene_applies_contacts_before_drawing() -> () {
    let frame = knee_on_belly();
    let scene = compose_scene(&frame, defaults());
    // 2 proxy boxes per side, two rigs, 14 overlay marks
    assert_eq!(scene.primitives.len(), 74);

    let knee = scene.mapped.red.get(Keypoint::RKnee).unwrap();
    // blue shoulders at elevation 20 beat its hips at 15; plus clearance
    assert!(approx_eq(knee.y, 26.0));
    assert!(approx_eq(knee.x, -50.0));
    assert!(approx_eq(knee.z, 0.0));

    // the pin overlay is drawn where the knee ended up
    let pinned = scene.primitives.iter().any(|p| match p {
        ScenePrimitive::Overlay(frame_geom::data::output::SceneMark::Polyline { points, dash: None, .. }) => {
            points.len() == 2 && points.iter().all(|q| approx_eq(q.y, 26.0))
        }
        _ => false,
    });
    assert!(pinned);

    // the parsed frame is untouched
    assert_eq!(frame, knee_on_belly());
}

#[test]
fn scene_proxies_follow_config() -> () {
    let frame = knee_on_belly();
    let config = RenderConfig { show_proxies: false, ..RenderConfig::default() };
    let scene = compose_scene(&frame, &config);
    assert_eq!(scene.primitives.len(), 70);
    assert!(!scene.primitives.iter().any(|p| matches!(p, ScenePrimitive::Proxy { .. })));

    let scene = compose_scene(&frame, defaults());
    let opacities: Vec<f32> = scene
        .primitives
        .iter()
        .filter_map(|p| match p {
            ScenePrimitive::Proxy { opacity, .. } => Some(*opacity),
            _ => None,
        })
        .collect();
    assert_eq!(opacities, vec![0.18, 0.18, 0.28, 0.28]);
}

#[test]
fn svg_document() -> () {
    let frame = knee_on_belly();
    let svg = to_svg(&compose_flat(&frame, defaults()));
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains("viewBox=\"0 0 1000 600\""));
    assert!(svg.contains("background:#fafafa"));
    assert!(svg.contains("stroke-dasharray=\"6 6\""));
    assert!(svg.contains("stroke-dasharray=\"4 4\""));
    assert!(svg.contains(">squeeze</text>"));
    assert_eq!(svg.matches("<circle").count(), 28 + 2);
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn svg_escapes_text() -> () {
    let frame = Frame::from_json_str(
        r#"{"overlays": [{"type": "label", "at": [1, 2], "text": "<hook & \"pull\">"}]}"#,
    )
    .unwrap();
    let svg = to_svg(&compose_flat(&frame, defaults()));
    assert!(svg.contains("&lt;hook &amp; &quot;pull&quot;&gt;"));
}

#[test]
fn svg_escapes_colors() -> () {
    let frame = Frame::from_json_str(
        r##"{"overlays": [{"type": "pin", "at": [1, 2], "color": "#f00\"/><script>alert(1)</script><x a=\""}]}"##,
    )
    .unwrap();
    let config = RenderConfig { background: "red\" onload=\"x".to_string(), ..RenderConfig::default() };
    let svg = to_svg(&compose_flat(&frame, &config));
    assert!(!svg.contains("<script>"));
    assert!(!svg.contains("onload=\""));
    assert!(svg.contains("stroke=\"#f00&quot;/&gt;&lt;script&gt;"));
    assert_eq!(svg.matches("<line").count(), 2);
}

#[test]
fn player_wraps_and_ticks() -> () {
    let frames = vec![Frame::default(), knee_on_belly(), Frame::default()];
    let mut player = FramePlayer::new(frames);
    assert_eq!(player.len(), 3);
    assert_eq!(player.index(), 0);

    player.prev();
    assert_eq!(player.index(), 2);
    player.next();
    assert_eq!(player.index(), 0);

    assert!(!player.tick());
    assert_eq!(player.index(), 0);
    assert!(player.toggle_play());
    assert!(player.tick());
    assert_eq!(player.index(), 1);
    assert_eq!(player.current(), Some(&knee_on_belly()));
    player.pause();
    assert!(!player.is_playing());
    assert!(!player.tick());

    assert!(player.select(2));
    assert!(!player.select(3));
    assert_eq!(player.index(), 2);

    assert_eq!(FRAME_INTERVAL, Duration::from_millis(500));
}

#[test]
fn empty_player_stays_put() -> () {
    let mut player = FramePlayer::new(Vec::new());
    assert!(player.is_empty());
    player.next();
    player.prev();
    player.toggle_play();
    assert!(!player.tick());
    assert_eq!(player.index(), 0);
    assert_eq!(player.current(), None);
}

#[test]
fn load_frames_in_numeric_order() -> () {
    fixtures::init_logging();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("10.json"), r#"{"mat": {"size": [10, 10]}}"#).unwrap();
    std::fs::write(dir.path().join("2.json"), r#"{"mat": {"size": [2, 2]}}"#).unwrap();
    std::fs::write(dir.path().join("1.json"), r#"{"mat": {"size": [1, 1]}}"#).unwrap();
    std::fs::write(dir.path().join("3.json"), "{ broken").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

    let frames = load_frames(dir.path()).unwrap();
    let widths: Vec<f32> = frames.iter().map(|f| f.mat.width).collect();
    assert_eq!(widths, vec![1.0, 2.0, 10.0]);

    assert!(load_frames(dir.path().join("missing")).is_err());
}

#[test]
fn config_defaults_and_overrides() -> () {
    assert_eq!(&RenderConfig::from_json_str("{}").unwrap(), defaults());
    assert_eq!(defaults().contact.torso_clearance, 6.0);
    assert_eq!(defaults().contact.chest_separation, 10.0);
    assert_eq!(defaults().style(Side::Blue).opacity, 0.5);

    let config = RenderConfig::from_json_str(
        r##"{"show_proxies": false, "contact": {"torso_clearance": 2}, "overlay": {"flat_color": "#123"}}"##,
    )
    .unwrap();
    assert!(!config.show_proxies);
    assert_eq!(config.contact.torso_clearance, 2.0);
    assert_eq!(config.contact.chest_separation, 10.0);
    assert_eq!(config.overlay.flat_color, "#123");
    assert_eq!(config.overlay.scene_color, "#666");
}

#[test]
fn config_rejects_bad_input() -> () {
    match RenderConfig::from_json_str(r#"{"roles": {"attacker": "blue"}}"#) {
        Err(e @ FrameError::Config(_)) => {
            assert_eq!(e.to_string(), "Config error: attacker and defender are both 'blue'")
        }
        other => panic!("expected a config error, got {:?}", other),
    }
    assert!(matches!(
        RenderConfig::from_json_str(r##"{"red": {"color": "#000"}}"##),
        Err(FrameError::Json(_))
    ));
    assert!(matches!(
        RenderConfig::from_path("/definitely/not/here.json"),
        Err(FrameError::Io(_))
    ));
}

#[test]
fn config_from_file() -> () {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("render.json");
    std::fs::write(&path, r#"{"roles": {"attacker": "blue", "defender": "red"}}"#).unwrap();
    let config = RenderConfig::from_path(&path).unwrap();
    assert_eq!(config.roles.draw_order(), [Side::Red, Side::Blue]);
}
