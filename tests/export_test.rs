//! End-to-end tests for the DOT exporter

use std::path::Path;

use cfgviz::dot::{DotExporter, ExportOptions, PlainCodegen};
use cfgviz::model::{Method, parse_method};
use pretty_assertions::assert_eq;

fn method(json: &str) -> Method {
    parse_method(json, Path::new("test.json")).unwrap()
}

/// A diamond: B0 branches to B1 (true path) and B2 (false path), both join
/// into B3.
fn diamond() -> Method {
    method(
        r#"{
            "class_name": "com.example.Foo",
            "name": "bar",
            "short_id": "bar(I)V",
            "return_type": "void",
            "args": ["int a"],
            "access_flags": "public",
            "blocks": [
                {"id": 0, "offset": 0, "successors": [1, 2],
                 "instructions": [{"text": "if (a == 0) goto B2", "alternate": 2}]},
                {"id": 1, "offset": 4, "successors": [3],
                 "instructions": [{"text": "const v0, 1"}]},
                {"id": 2, "offset": 8, "successors": [3],
                 "instructions": [{"text": "const v0, 2"}]},
                {"id": 3, "offset": 12,
                 "instructions": [{"text": "return v0"}]}
            ],
            "entry": 0
        }"#,
    )
}

fn render(m: &Method, options: ExportOptions) -> String {
    let codegen = PlainCodegen;
    DotExporter::new(options, &codegen)
        .render_document(m)
        .unwrap()
        .expect("method should not be skipped")
}

#[test]
fn test_flat_raw_mode_end_to_end() {
    let doc = render(&diamond(), ExportOptions::new("out").raw_instructions(true));

    for id in 0..4 {
        assert!(doc.contains(&format!("Node_{id} [shape=record,")), "missing node {id}");
    }
    assert!(doc.contains("MethodNode[shape=record,"));

    // True path unmarked, false path dotted.
    assert!(doc.contains("Node_0 -> Node_1;"));
    assert!(doc.contains("Node_0 -> Node_2 [style=dotted];"));
    assert!(doc.contains("MethodNode -> Node_0;"));

    // Raw instructions end up escaped in the labels.
    assert!(doc.contains("if (a == 0) goto B2"));
    assert!(doc.contains("return v0\\l"));
}

#[test]
fn test_edge_count_matches_successor_count() {
    let m = diamond();
    let doc = render(&m, ExportOptions::new("out"));

    let count = |needle: &str| doc.matches(needle).count();
    assert_eq!(count("Node_0 -> "), 2);
    assert_eq!(count("Node_1 -> "), 1);
    assert_eq!(count("Node_2 -> "), 1);
    assert_eq!(count("Node_3 -> "), 0);
    assert_eq!(count(" -> "), 5); // 4 block edges + the summary edge
}

#[test]
fn test_exactly_one_alternate_styled_edge() {
    let doc = render(&diamond(), ExportOptions::new("out"));

    assert_eq!(doc.matches("[style=dotted]").count(), 1);
    assert!(doc.contains("Node_0 -> Node_2 [style=dotted];"));
}

#[test]
fn test_nodes_listed_before_edges() {
    let doc = render(&diamond(), ExportOptions::new("out"));

    let last_node = doc.rfind("[shape=record,").unwrap();
    let first_edge = doc.find(" -> ").unwrap();
    assert!(
        last_node < first_edge,
        "every node declaration must precede every edge declaration"
    );
}

fn clustered() -> Method {
    // Region tree covers B0-B2; B3 is orphaned by region reconstruction.
    method(
        r#"{
            "class_name": "com.example.Foo",
            "name": "looped",
            "short_id": "looped()V",
            "return_type": "void",
            "access_flags": "private",
            "blocks": [
                {"id": 0, "offset": 0, "successors": [1]},
                {"id": 1, "offset": 4, "successors": [2, 1],
                 "instructions": [{"text": "if (v0 < 10) goto B1", "alternate": 1}]},
                {"id": 2, "offset": 8, "successors": [3]},
                {"id": 3, "offset": 12}
            ],
            "entry": 0,
            "region": {
                "description": "Region: looped",
                "attributes": ["SYNTHETIC"],
                "children": [
                    {"block": 0},
                    {"region": {
                        "description": "LoopRegion: B1",
                        "children": [{"block": 1}]
                    }},
                    {"block": 2}
                ]
            }
        }"#,
    )
}

#[test]
fn test_cluster_count_matches_region_count() {
    let doc = render(&clustered(), ExportOptions::new("out").use_regions(true));

    assert_eq!(doc.matches("subgraph cluster_").count(), 2);
    assert!(doc.contains("subgraph cluster_0 {"));
    assert!(doc.contains("subgraph cluster_1 {"));
    assert!(doc.contains("label = \"Region: looped | SYNTHETIC\\l\";"));
    assert!(doc.contains("label = \"LoopRegion: B1\";"));
    assert!(doc.contains("node [shape=record,color=blue];"));
}

#[test]
fn test_orphaned_blocks_partition_the_block_set() {
    let doc = render(&clustered(), ExportOptions::new("out").use_regions(true));

    // B3 is the only orphan: error-styled, and still rendered exactly once.
    assert_eq!(doc.matches("color=red,").count(), 1);
    assert!(doc.contains("Node_3 [shape=record,color=red,"));
    for id in 0..3 {
        assert!(!doc.contains(&format!("Node_{id} [shape=record,color=red,")));
        assert_eq!(doc.matches(&format!("Node_{id} [shape=record,")).count(), 1);
    }

    // Orphan edges still land in the shared edge buffer.
    assert!(doc.contains("Node_2 -> Node_3;"));
}

#[test]
fn test_orphan_rendered_outside_clusters() {
    let doc = render(&clustered(), ExportOptions::new("out").use_regions(true));

    // Track cluster nesting line by line; node declarations close their
    // braces on the same line, so only subgraph opens and bare closes count.
    let mut depth = 0usize;
    let mut depth_at_b0 = None;
    let mut depth_at_b3 = None;
    for line in doc.lines() {
        if line.starts_with("Node_0 ") {
            depth_at_b0 = Some(depth);
        }
        if line.starts_with("Node_3 ") {
            depth_at_b3 = Some(depth);
        }
        if line.starts_with("subgraph cluster_") {
            depth += 1;
        } else if line == "}" {
            depth = depth.saturating_sub(1);
        }
    }

    assert_eq!(depth_at_b0, Some(1), "B0 belongs inside the root cluster");
    assert_eq!(depth_at_b3, Some(0), "the orphan must sit outside all clusters");
}

#[test]
fn test_handler_region_contributes_blocks() {
    let m = method(
        r#"{
            "class_name": "com.example.Foo",
            "name": "guarded",
            "short_id": "guarded()V",
            "blocks": [
                {"id": 0, "successors": [1]},
                {"id": 1},
                {"id": 2}
            ],
            "entry": 0,
            "region": {
                "description": "Region: body",
                "children": [{"block": 0}, {"block": 1}]
            },
            "handlers": [
                {"region": {"description": "Region: catch", "children": [{"block": 2}]}},
                {}
            ]
        }"#,
    );
    let doc = render(&m, ExportOptions::new("out").use_regions(true));

    // Handler blocks are reachable, so nothing is orphaned.
    assert_eq!(doc.matches("subgraph cluster_").count(), 2);
    assert_eq!(doc.matches("color=red,").count(), 0);
}

#[test]
fn test_pretty_mode_uses_fallback_codegen() {
    let m = diamond();
    let doc = render(&m, ExportOptions::new("out"));

    // PlainCodegen joins instruction texts; the newline becomes \l and the
    // label never starts with a line break.
    assert!(doc.contains("const v0, 1\\l"));
    assert!(!doc.contains("|\\lconst"));
}

#[test]
fn test_no_code_method_produces_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let m = method(
        r#"{"class_name": "com.example.Foo", "name": "native0",
            "short_id": "native0()V", "no_code": true}"#,
    );
    let codegen = PlainCodegen;
    let exporter = DotExporter::new(ExportOptions::new(dir.path()), &codegen);

    assert!(exporter.export(&m).unwrap().is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_export_writes_file_at_computed_path() {
    let dir = tempfile::tempdir().unwrap();
    let codegen = PlainCodegen;
    let exporter = DotExporter::new(
        ExportOptions::new(dir.path()).use_regions(true).raw_instructions(true),
        &codegen,
    );

    let path = exporter.export(&clustered()).unwrap().unwrap();
    assert_eq!(
        path,
        dir.path()
            .join("com/example/Foo_graphs")
            .join("looped__V.regions.raw.dot")
    );

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("digraph \"CFG for com.example.Foo.looped()V\" {"));
    assert!(written.ends_with("}\n"));
}

#[test]
fn test_escaped_diagnostics_stay_label_safe() {
    let m = method(
        r#"{
            "class_name": "com.example.Foo",
            "name": "gen",
            "short_id": "gen()V",
            "attributes": ["List<String> -> {}"],
            "blocks": [
                {"id": 0, "attributes": ["try: B0-B1 | catch"],
                 "instructions": [{"text": "invoke a/b \"x\""}]}
            ],
            "entry": 0
        }"#,
    );
    let doc = render(&m, ExportOptions::new("out").raw_instructions(true));

    assert!(doc.contains("try: B0\\-B1 \\| catch\\l"));
    assert!(doc.contains("invoke a\\/b \\\"x\\\"\\l"));
    assert!(doc.contains("List\\<String\\> \\-\\> \\{\\}\\l"));
}
