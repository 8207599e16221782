//! Scene files end to end: text on disk through parsing and validation.

use std::io::Write;
use std::path::Path;

use gridcaster::validate::validate;
use gridcaster::{Cell, Facing, Observer, SceneError, load_scene, parser};

const HEADER: &str = "\
NO ./textures/north.xpm
SO ./textures/south.xpm
WE ./textures/west.xpm
EA ./textures/east.xpm
F 220,100,0
C 225,30,0
";

/// Writes `text` to a temporary `.cub` file and loads it.
fn load_text(text: &str) -> Result<gridcaster::Scene, SceneError> {
    let mut file = tempfile::Builder::new().suffix(".cub").tempfile().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    load_scene(file.path())
}

#[test]
fn scenario_a_minimal_room() {
    let scene = load_text(&format!("{HEADER}\n1111\n1N01\n1111\n")).unwrap();
    let obs = Observer::spawn(scene.start);
    assert_eq!(obs.pos, [1.5, 1.5]);
    assert_eq!(obs.dir, [0.0, -1.0]);
    assert_eq!(obs.plane, [0.66, 0.0]);
    assert_eq!(scene.start.facing, Facing::North);
    assert_eq!(scene.grid.get(1, 1), Some(Cell::Floor));
}

#[test]
fn scenario_b_no_start() {
    let err = load_text(&format!("{HEADER}\n1111\n1001\n1111\n")).unwrap_err();
    assert!(matches!(err, SceneError::NoStart));
    assert_eq!(err.to_string(), "no start position found");
}

#[test]
fn scenario_c_open_right_wall() {
    let err = load_text(&format!("{HEADER}\n1111\n1N01\n1001\n1 11\n")).unwrap_err();
    assert!(matches!(err, SceneError::NotEnclosed { .. }), "{err}");
}

#[test]
fn scenario_d_color_out_of_range() {
    let text = HEADER.replace("F 220,100,0", "F 256,0,0");
    let err = load_text(&format!("{text}\n1111\n1N01\n1111\n")).unwrap_err();
    assert!(matches!(err, SceneError::ColorOutOfRange { id: "F", .. }));
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn scenario_e_duplicate_identifier() {
    let text = format!("NO ./a.xpm\n{HEADER}\n1111\n1N01\n1111\n");
    let err = load_text(&text).unwrap_err();
    assert!(matches!(err, SceneError::DuplicateIdentifier { id: "NO", .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_scene("/no/such/dir/level.cub").unwrap_err();
    let SceneError::Io { path, .. } = &err else {
        panic!("expected an I/O error, got {err}");
    };
    assert_eq!(path, Path::new("/no/such/dir/level.cub"));
}

#[test]
fn header_interleaved_with_map_fails() {
    let text = "NO n\nSO s\nWE w\nEA e\nF 1,2,3\n1111\nC 1,2,3\n";
    let err = load_text(text).unwrap_err();
    assert!(matches!(err, SceneError::GridBeforeHeader { line: 6 }));
}

#[test]
fn marker_count_before_and_after_validation() {
    let text = format!("{HEADER}\n111111\n100001\n10W001\n111111\n");
    let draft = parser::parse_str(&text).unwrap();
    let markers = |g: &gridcaster::Grid| {
        g.iter()
            .filter(|(_, _, c)| matches!(c, Cell::Start(_)))
            .count()
    };
    assert_eq!(markers(&draft.grid), 1);

    let scene = validate(draft).unwrap();
    assert_eq!(markers(&scene.grid), 0);
    assert_eq!(scene.start.facing, Facing::West);
    assert_eq!(Observer::spawn(scene.start).plane, [0.0, -0.66]);
}

#[test]
fn rows_are_rectangular() {
    let text = format!("{HEADER}\n  111\n111N1111\n1000001\n1111111\n");
    let scene = load_text(&text).unwrap();
    assert_eq!(scene.grid.get(7, 2), Some(Cell::Void));
    let draft = parser::parse_str(&text).unwrap();
    assert_eq!(draft.grid.width(), 8);
    assert!(draft.grid.rows().all(|r| r.len() == 8));
}

#[test]
fn demo_map_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("maps/demo.cub");
    let scene = load_scene(&path).unwrap();
    assert_eq!(scene.start.facing, Facing::North);
    assert_eq!((scene.start.col, scene.start.row), (26, 11));
}

#[test]
fn indented_file_loads() {
    let text = "  NO n\n\tSO s\nWE w\n   EA e\nF 1,2,3\n C 4,5,6\n\n\t1111\n\t1N01\n\t1111\n";
    let scene = load_text(text).unwrap();
    assert_eq!(scene.ceiling, gridcaster::Rgb::new(4, 5, 6));
    assert_eq!((scene.start.col, scene.start.row), (1, 1));
}

#[test]
fn non_utf8_file_is_an_encoding_error() {
    let mut file = tempfile::Builder::new().suffix(".cub").tempfile().unwrap();
    file.write_all(b"NO n\nSO s\nWE \xc3\x28\n").unwrap();
    let err = load_scene(file.path()).unwrap_err();
    assert!(matches!(err, SceneError::InvalidEncoding { line: 3 }), "{err}");
}
