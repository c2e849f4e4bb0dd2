use std::str::FromStr;

use strum::IntoEnumIterator;
use treewalk_core::{
    DEFAULT_MAX_NAME_LEN, Node, NodeId, NodeKind, Strategy, WalkConfig, WalkError, WalkStats,
    WalkWarning, WarningKind,
};

#[test]
fn test_node_id_operations() {
    let id1 = NodeId::new(42);
    let id2 = NodeId::new(42);

    assert_eq!(id1, id2);
    assert_eq!(id1.0, 42);
}

#[test]
fn test_every_kind_has_a_distinct_tag() {
    let tags: Vec<String> = NodeKind::iter().map(|k| k.to_string()).collect();
    assert_eq!(
        tags,
        vec!["REG", "DIR", "CHR", "BLK", "FIO", "LNK", "SCK", "UNK"]
    );

    // Tags parse back to the same kind
    for kind in NodeKind::iter() {
        assert_eq!(NodeKind::from_str(&kind.to_string()).unwrap(), kind);
    }
}

#[test]
fn test_node_kind_discrimination() {
    assert!(NodeKind::Directory.is_dir());
    assert!(!NodeKind::Directory.is_symlink());

    assert!(NodeKind::Symlink.is_symlink());
    assert!(!NodeKind::Symlink.is_dir());

    assert!(NodeKind::Unknown.is_unknown());
    assert!(!NodeKind::Regular.is_unknown());
}

#[test]
fn test_unknown_node_needs_resolution() {
    let hint = Node::new("mystery", NodeId::new(3), NodeKind::Unknown);
    assert!(hint.needs_resolution());

    let hint = Node::new("plain.txt", NodeId::new(4), NodeKind::Regular);
    assert!(!hint.needs_resolution());
}

#[test]
fn test_root_node_has_empty_name() {
    let node = Node::new("", NodeId::new(2), NodeKind::Directory);
    assert!(node.name.is_empty());
    assert!(node.is_dir());
}

#[test]
fn test_node_name_bound() {
    let long = "n".repeat(1000);
    let node = Node::new(&long, NodeId::new(1), NodeKind::Regular);
    assert_eq!(node.name.len(), DEFAULT_MAX_NAME_LEN);

    let node = Node::with_max_name_len("abcdef", NodeId::new(1), NodeKind::Regular, 4);
    assert_eq!(node.name.as_str(), "abcd");
}

#[test]
fn test_node_serialization() {
    let node = Node::new("f.txt", NodeId::new(99), NodeKind::Regular);
    let json = serde_json::to_value(&node).unwrap();

    assert_eq!(json["name"], "f.txt");
    assert_eq!(json["id"], 99);
    assert_eq!(json["kind"], "REG");

    let back: Node = serde_json::from_value(json).unwrap();
    assert_eq!(back, node);
}

#[test]
fn test_walk_config_from_json() {
    let config: WalkConfig = serde_json::from_str(r#"{"strategy":"work-list"}"#).unwrap();
    assert_eq!(config.strategy, Strategy::WorkList);
    assert_eq!(config.max_name_len, DEFAULT_MAX_NAME_LEN);

    let config: WalkConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.strategy, Strategy::Recursive);
}

#[test]
fn test_walk_config_builder_validation() {
    let result = WalkConfig::builder().max_name_len(0usize).build();
    match result {
        Err(WalkError::InvalidConfig { message }) => assert!(message.contains("max_name_len")),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_walk_stats() {
    let mut stats = WalkStats::new();
    for _ in 0..4 {
        stats.record_node();
    }
    stats.record_dir();
    stats.record_dir();

    assert_eq!(stats.nodes, 4);
    assert_eq!(stats.directories, 2);
    assert_eq!(stats.others(), 2);
}

#[test]
fn test_warning_kinds_follow_errors() {
    let io = || std::io::Error::new(std::io::ErrorKind::Other, "boom");
    let cases = [
        (
            WalkError::MetadataUnavailable {
                path: "/a".into(),
                source: io(),
            },
            WarningKind::MetadataUnavailable,
        ),
        (
            WalkError::DirectoryUnreadable {
                path: "/b".into(),
                source: io(),
            },
            WarningKind::DirectoryUnreadable,
        ),
        (
            WalkError::EnumerationError {
                path: "/c".into(),
                source: io(),
            },
            WarningKind::EnumerationError,
        ),
    ];

    for (error, kind) in cases {
        let warning = WalkWarning::from_error(&error).unwrap();
        assert_eq!(warning.kind, kind);
        assert!(warning.to_string().contains("boom"));
    }
}
