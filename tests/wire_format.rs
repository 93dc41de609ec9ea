//! Wire format tests
//!
//! These tests check that records use the agent's PascalCase field names and
//! that unset registration fields stay out of request bodies.

use std::collections::HashMap;

use serde_json::json;
use tower_consul::protocol::{
    AgentCheck, AgentCheckRegistration, AgentMember, AgentService, AgentServiceCheck,
    AgentServiceRegistration,
};

#[test]
fn test_check_round_trip() {
    let original = AgentCheck {
        node: "node1".to_string(),
        check_id: "service:redis".to_string(),
        name: "Service 'redis' check".to_string(),
        status: "warning".to_string(),
        notes: "Checks redis latency".to_string(),
        output: "latency 120ms".to_string(),
        service_id: "redis".to_string(),
        service_name: "redis".to_string(),
    };

    let json = serde_json::to_string(&original).unwrap();
    let decoded: AgentCheck = serde_json::from_str(&json).unwrap();

    assert_eq!(original, decoded);
}

#[test]
fn test_service_round_trip() {
    let original = AgentService {
        id: "web1".to_string(),
        service: "web".to_string(),
        tags: vec!["primary".to_string(), "v2".to_string()],
        port: 8080,
    };

    let json = serde_json::to_string(&original).unwrap();
    let decoded: AgentService = serde_json::from_str(&json).unwrap();

    assert_eq!(original, decoded);
}

#[test]
fn test_service_map_scenario() {
    let body = r#"{"web":{"ID":"web","Service":"web","Tags":["primary"],"Port":8080}}"#;
    let services: HashMap<String, AgentService> = serde_json::from_str(body).unwrap();

    assert_eq!(services.len(), 1);
    let web = &services["web"];
    assert_eq!(web.port, 8080);
    assert_eq!(web.tags, vec!["primary".to_string()]);
}

#[test]
fn test_check_decodes_agent_document() {
    let check: AgentCheck = serde_json::from_value(json!({
        "Node": "foobar",
        "CheckID": "serfHealth",
        "Name": "Serf Health Status",
        "Status": "passing",
        "Notes": "",
        "Output": "",
        "ServiceID": "",
        "ServiceName": ""
    }))
    .unwrap();

    assert_eq!(check.check_id, "serfHealth");
    assert!(check.is_passing());
    assert!(check.service_id.is_empty());
}

#[test]
fn test_member_keeps_tags_and_versions() {
    let member: AgentMember = serde_json::from_value(json!({
        "Name": "foobar",
        "Addr": "10.1.10.12",
        "Port": 8301,
        "Tags": {"bootstrap": "1", "dc": "dc1", "port": "8300", "role": "consul"},
        "Status": 1,
        "ProtocolMin": 1,
        "ProtocolMax": 2,
        "ProtocolCur": 2,
        "DelegateMin": 1,
        "DelegateMax": 3,
        "DelegateCur": 3
    }))
    .unwrap();

    assert_eq!(member.tags.len(), 4);
    assert_eq!(member.tags["role"], "consul");
    assert_eq!(member.protocol_cur, 2);
    assert_eq!(member.delegate_cur, 3);

    let reencoded = serde_json::to_value(&member).unwrap();
    assert_eq!(reencoded["ProtocolMin"], 1);
    assert_eq!(reencoded["DelegateMax"], 3);
}

#[test]
fn test_registration_with_id_and_name_only() {
    let registration = AgentServiceRegistration::new("web").with_id("web");
    let json = serde_json::to_value(&registration).unwrap();

    assert_eq!(json["ID"], "web");
    assert_eq!(json["Name"], "web");
    assert!(json.get("Tags").is_none());
    assert!(json.get("Port").is_none());
    assert!(json.get("Check").is_none());
}

#[test]
fn test_registration_full_body() {
    let registration = AgentServiceRegistration::new("redis")
        .with_id("redis1")
        .with_tag("master")
        .with_port(8000)
        .with_check(AgentServiceCheck::script("/usr/local/bin/check_redis.py", "10s"));

    let json = serde_json::to_value(&registration).unwrap();

    assert_eq!(
        json,
        json!({
            "ID": "redis1",
            "Name": "redis",
            "Tags": ["master"],
            "Port": 8000,
            "Check": {
                "Script": "/usr/local/bin/check_redis.py",
                "Interval": "10s"
            }
        })
    );
}

#[test]
fn test_check_registration_body() {
    let registration = AgentCheckRegistration::new("Memory utilization", AgentServiceCheck::ttl("15s"))
        .with_id("mem")
        .with_notes("Ensure we don't oversubscribe memory");

    let json = serde_json::to_value(&registration).unwrap();

    assert_eq!(
        json,
        json!({
            "ID": "mem",
            "Name": "Memory utilization",
            "Notes": "Ensure we don't oversubscribe memory",
            "TTL": "15s"
        })
    );
}
