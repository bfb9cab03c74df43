mod common;

use anyhow::Result;
use serde_json::json;

use admin_menu_rust::anomaly::Anomaly;
use admin_menu_rust::normalize::Normalizer;

// These tests cover the schema-tolerance boundary: every accepted input
// shape funnels through the normalizer into the same canonical records.

#[test]
fn flat_batch_resolves_aliased_fields() -> Result<()> {
    // Payload as it arrives off the wire, field names per the legacy backend.
    let raw: serde_json::Value = serde_json::from_str(
        r#"[
            {"menuid": 7, "menuLabel": "Wards", "parentmenuid": 0, "menuPath": "/wards", "recstatus": "A"},
            {"pk_id": "8", "title": "Agencies", "parentid": "7"}
        ]"#,
    )?;

    let outcome = Normalizer::normalize(&raw);
    assert!(outcome.anomalies.is_empty(), "unexpected anomalies: {:?}", outcome.anomalies);
    assert_eq!(outcome.records.len(), 2);

    let wards = &outcome.records[0];
    assert_eq!(wards.id, "7");
    assert_eq!(wards.name, "Wards");
    assert_eq!(wards.parent_id, None, "parentmenuid 0 means root");
    assert_eq!(wards.href.as_deref(), Some("/wards"));
    assert_eq!(wards.recstatus, Some(json!("A")));

    let agencies = &outcome.records[1];
    assert_eq!(agencies.id, "8");
    assert_eq!(agencies.parent_id.as_deref(), Some("7"));
    Ok(())
}

#[test]
fn parent_sentinels_all_mean_root() {
    let raw = json!([
        {"id": 1, "label": "A", "parentId": 0},
        {"id": 2, "label": "B", "parentId": ""},
        {"id": 3, "label": "C", "parentId": "null"},
        {"id": 4, "label": "D", "parentId": "undefined"},
        {"id": 5, "label": "E"},
    ]);
    let outcome = Normalizer::normalize(&raw);
    assert!(outcome.records.iter().all(|r| r.parent_id.is_none()));
}

#[test]
fn malformed_records_are_skipped_not_fatal() {
    let raw = json!([
        {"id": 1, "label": "Admin"},
        {"id": 2},
        {"label": "No id at all"},
        42,
    ]);
    let outcome = Normalizer::normalize(&raw);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(
        outcome
            .anomalies
            .iter()
            .filter(|a| matches!(a, Anomaly::MalformedRecord { .. }))
            .count(),
        3
    );
}

#[test]
fn duplicate_ids_are_disambiguated_and_both_kept() {
    let raw = json!([
        {"id": 5, "label": "First"},
        {"id": 5, "label": "Second"},
    ]);
    let outcome = Normalizer::normalize(&raw);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].id, "5");
    assert_eq!(outcome.records[1].id, "5::1");
    assert_eq!(
        outcome.anomalies,
        vec![Anomaly::IdCollision { id: "5".into(), assigned: "5::1".into() }]
    );
}

#[test]
fn legacy_tuples_become_parented_records() {
    let outcome = Normalizer::normalize(&common::legacy_batch());
    let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Admin", "Users", "Roles", "Permissions", "Reports"]);

    let roles = outcome.records.iter().find(|r| r.name == "Roles").unwrap();
    assert_eq!(roles.parent_id.as_deref(), Some("Admin"));
    assert_eq!(roles.id, "Admin/Roles", "synthesized ids are label paths");

    let permissions = outcome.records.iter().find(|r| r.name == "Permissions").unwrap();
    assert_eq!(permissions.parent_id.as_deref(), Some("Admin/Roles"));
}

#[test]
fn object_graph_children_containers_are_aliased() {
    let outcome = Normalizer::normalize(&common::object_graph_batch());
    assert!(outcome.anomalies.is_empty(), "unexpected anomalies: {:?}", outcome.anomalies);

    let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Admin", "Users", "Roles", "Permissions", "Reports"]);

    let users = outcome.records.iter().find(|r| r.name == "Users").unwrap();
    assert_eq!(users.parent_id.as_deref(), Some("Admin"));
    assert_eq!(users.href.as_deref(), Some("/admin/users"));

    // Children derive their order from container position when unspecified.
    let roles = outcome.records.iter().find(|r| r.name == "Roles").unwrap();
    assert_eq!(roles.order, 1);
}

#[test]
fn nested_descent_is_depth_bounded() {
    // Chain 20 tuples deep; the development bound keeps the first 16.
    let mut value = json!("Bottom");
    for i in (0..20).rev() {
        value = json!([format!("L{}", i), value]);
    }
    let raw = json!([value]);

    let outcome = Normalizer::normalize(&raw);
    assert_eq!(outcome.records.len(), 16);
    assert!(outcome.anomalies.iter().any(|a| matches!(a, Anomaly::DepthExceeded { .. })));
}

#[test]
fn scalar_input_is_an_unrecognized_shape() {
    let outcome = Normalizer::normalize(&json!("not a batch"));
    assert!(outcome.records.is_empty());
    assert_eq!(
        outcome.anomalies.len(),
        1,
        "expected a single shape anomaly: {:?}",
        outcome.anomalies
    );
    assert!(matches!(outcome.anomalies[0], Anomaly::UnrecognizedShape { .. }));
}
