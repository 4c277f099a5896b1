//! # Template Page Tests
//!
//! Builds complete template pages through the public API and checks the
//! geometry a renderer would receive.

use inkplan::error::InkplanError;
use inkplan::fit::FitMode;
use inkplan::geometry::{GeometryNode, Stroke};
use inkplan::params::TemplateParams;
use inkplan::profile::{DeviceProfile, LayoutProfile, ProfileRegistry};
use inkplan::template::{TemplateKind, TemplatePage, build_template, build_template_page};
use pretty_assertions::assert_eq;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn build(kind: TemplateKind, device: &str, pairs: &[(&str, &str)]) -> TemplatePage {
    let params = TemplateParams::from_pairs(pairs.iter().copied()).unwrap();
    build_template(ProfileRegistry::builtin(), kind, device, None, &params, FitMode::Fallback)
        .unwrap()
}

fn vertical_xs(group: &GeometryNode) -> Vec<f64> {
    group
        .children()
        .iter()
        .filter_map(|n| match n {
            GeometryNode::Line { from, to, .. } if from.x == to.x => Some(from.x),
            _ => None,
        })
        .collect()
}

// ============================================================================
// MILLIMETER PAPER
// ============================================================================

#[test]
fn test_notes_millimeter_has_two_families() {
    let page = build(TemplateKind::Notes, "remarkable", &[("notes_fill", "millimeter")]);
    let fill = page.geometry.find_group("millimeter").unwrap();
    let minor = fill.find_group("minor").unwrap();
    let major = fill.find_group("major").unwrap();

    let units = DeviceProfile::REMARKABLE.units();
    let one_mm = units.mm(1.0).unwrap();
    let five_mm = units.mm(5.0).unwrap();

    let minor_xs = vertical_xs(minor);
    let major_xs = vertical_xs(major);
    assert!(!major_xs.is_empty());
    assert!(minor_xs.len() >= 4 * major_xs.len());
    for pair in major_xs.windows(2) {
        assert!((pair[1] - pair[0] - five_mm).abs() < 1e-6);
    }
    // the first minor pair sits one millimeter apart
    assert!((minor_xs[1] - minor_xs[0] - one_mm).abs() < 1e-6);
    let stroked = |group: &GeometryNode, stroke: Stroke| {
        group
            .children()
            .iter()
            .all(|n| matches!(n, GeometryNode::Line { stroke: s, .. } if *s == stroke))
    };
    assert!(stroked(major, Stroke::Major));
    assert!(stroked(minor, Stroke::Minor));
}

#[test]
fn test_millimeter_families_do_not_share_lines() {
    let page = build(TemplateKind::Millimeter, "scribe", &[]);
    let minor = vertical_xs(page.geometry.find_group("minor").unwrap());
    let major = vertical_xs(page.geometry.find_group("major").unwrap());
    assert!(major.iter().all(|x| minor.iter().all(|m| (m - x).abs() > 1e-6)));
}

// ============================================================================
// SCHEDULE
// ============================================================================

#[test]
fn test_schedule_same_start_and_end_is_one_row() {
    let page = build(
        TemplateKind::Schedule,
        "remarkable",
        &[("schedule_start_hour", "9"), ("schedule_end_hour", "9")],
    );
    let schedule = page.geometry.find_group("schedule").unwrap();
    let rows: Vec<&str> = schedule.child_groups().filter_map(|g| g.label()).collect();
    assert_eq!(rows, vec!["09:00"]);
}

#[test]
fn test_schedule_end_before_start_is_invalid() {
    let err =
        TemplateParams::from_pairs([("schedule_start_hour", "18"), ("schedule_end_hour", "9")])
            .unwrap_err();
    assert!(matches!(err, InkplanError::InvalidParam { .. }), "{err}");
}

#[test]
fn test_schedule_rows_stack_without_overlap() {
    let page = build(TemplateKind::Schedule, "scribe", &[]);
    let schedule = page.geometry.find_group("schedule").unwrap();
    let frames: Vec<_> = schedule.child_groups().filter_map(|g| g.frame()).collect();
    for pair in frames.windows(2) {
        assert!(!pair[0].intersects(&pair[1]));
        assert!((pair[0].bottom() - pair[1].y).abs() < 1e-6);
    }
}

// ============================================================================
// PARAMETERS
// ============================================================================

#[test]
fn test_unknown_param_key_fails() {
    let err = TemplateParams::from_cli_pairs(&["colour=blue".to_string()]).unwrap_err();
    assert!(err.to_string().contains("colour"));
}

#[test]
fn test_malformed_param_pair_fails() {
    assert!(TemplateParams::from_cli_pairs(&["line_spacing_mm".to_string()]).is_err());
    assert!(TemplateParams::from_cli_pairs(&["line_spacing_mm=wide".to_string()]).is_err());
    assert!(TemplateParams::from_cli_pairs(&["line_spacing_mm=-3".to_string()]).is_err());
}

#[test]
fn test_explicit_params_override_layout_defaults() {
    let page = build(TemplateKind::Lines, "scribe", &[("line_spacing_mm", "10")]);
    assert_eq!(page.params.line_spacing_mm, 10.0);
    let lines = page.geometry.find_group("lines").unwrap();
    let ys: Vec<f64> = lines
        .children()
        .iter()
        .filter_map(|n| match n {
            GeometryNode::Line { from, .. } => Some(from.y),
            _ => None,
        })
        .collect();
    let ten_mm = DeviceProfile::SCRIBE.units().mm(10.0).unwrap();
    assert!((ys[1] - ys[0] - ten_mm).abs() < 1e-6);
}

// ============================================================================
// PAGES
// ============================================================================

#[test]
fn test_builders_are_idempotent() {
    let device = DeviceProfile::PALMA;
    let params = TemplateParams::EMPTY.resolve(&device, &LayoutProfile::COMPACT).unwrap();
    for kind in TemplateKind::ALL {
        let first = build_template_page(kind, &device, &params).unwrap();
        let second = build_template_page(kind, &device, &params).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_page_regions_do_not_overlap() {
    for kind in TemplateKind::ALL {
        let page = build(kind, "remarkable", &[]);
        let frames: Vec<_> = page.geometry.children().iter().filter_map(|c| c.frame()).collect();
        assert_eq!(frames.len(), 3, "{kind}");
        for (i, a) in frames.iter().enumerate() {
            for b in &frames[i + 1..] {
                assert!(!a.intersects(b), "{kind}");
            }
        }
    }
}

#[test]
fn test_geometry_json_reads_back() {
    let page = build(TemplateKind::DottedGrid, "palma", &[]);
    let json = serde_json::to_string(&page.geometry).unwrap();
    assert!(json.contains("\"type\":\"dot\""));
    let back: GeometryNode = serde_json::from_str(&json).unwrap();
    let is_dot = |n: &GeometryNode| matches!(n, GeometryNode::Dot { .. });
    assert_eq!(back.count(is_dot), page.geometry.count(is_dot));
    let dots = |node: &GeometryNode| node.find_group("dotted-grid").map(|g| g.children().len());
    assert_eq!(dots(&back), dots(&page.geometry));
}
