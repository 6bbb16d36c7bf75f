use serde_json::Value;

use crate::domain::model::{ServiceDefinition, SocketDefinition};
use crate::utils::error::ValidationError;

/// Checks the structural invariants of a parsed record and lifts it into
/// a typed definition. Pure function, no store access.
///
/// Fail-fast, in field-then-socket order: top-level `name`, top-level
/// `sockets`, then per socket `name`, `type`, `bind`/`connect`. An empty
/// sockets array is valid; only a totally absent key is rejected.
pub fn validate(record: &Value) -> Result<ServiceDefinition, ValidationError> {
    let name = match record.get("name") {
        None => return Err(ValidationError::MissingField("name")),
        Some(value) => value
            .as_str()
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::InvalidField("name"))?,
    };

    let entries = match record.get("sockets") {
        None => return Err(ValidationError::MissingField("sockets")),
        Some(value) => value
            .as_array()
            .ok_or(ValidationError::InvalidField("sockets"))?,
    };

    let mut sockets = Vec::with_capacity(entries.len());
    for entry in entries {
        let socket_name = match entry.get("name") {
            None => return Err(ValidationError::MissingField("socket.name")),
            Some(value) => value
                .as_str()
                .ok_or(ValidationError::InvalidField("socket.name"))?,
        };

        let kind = match entry.get("type") {
            None => return Err(ValidationError::MissingField("socket.type")),
            Some(value) => value
                .as_str()
                .ok_or(ValidationError::InvalidField("socket.type"))?,
        };

        // Presence is what matters: both are allowed, no exclusivity check.
        if entry.get("bind").is_none() && entry.get("connect").is_none() {
            return Err(ValidationError::MissingField("socket.bind|connect"));
        }

        sockets.push(SocketDefinition {
            name: socket_name.to_string(),
            kind: kind.to_string(),
            bind: entry
                .get("bind")
                .and_then(Value::as_str)
                .map(str::to_string),
            connect: entry
                .get("connect")
                .and_then(Value::as_str)
                .map(str::to_string),
        });
    }

    Ok(ServiceDefinition {
        name: name.to_string(),
        sockets,
        document: record.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_definition() {
        let record = json!({
            "name": "web",
            "sockets": [
                {"name": "http", "type": "tcp", "bind": "0.0.0.0:80"},
                {"name": "upstream", "type": "tcp", "connect": "10.0.0.1:9000"}
            ]
        });

        let def = validate(&record).unwrap();
        assert_eq!(def.name, "web");
        assert_eq!(def.sockets.len(), 2);
        assert_eq!(def.sockets[0].name, "http");
        assert_eq!(def.sockets[0].kind, "tcp");
        assert_eq!(def.sockets[0].bind.as_deref(), Some("0.0.0.0:80"));
        assert_eq!(def.sockets[1].connect.as_deref(), Some("10.0.0.1:9000"));
    }

    #[test]
    fn test_missing_name() {
        let record = json!({"sockets": []});
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_missing_sockets() {
        let record = json!({"name": "cache"});
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField("sockets"))
        );
    }

    #[test]
    fn test_missing_both_is_reported_as_name_first() {
        // Fail-fast in field order: name is checked before sockets.
        let record = json!({});
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_empty_sockets_is_valid() {
        let record = json!({"name": "idle", "sockets": []});
        let def = validate(&record).unwrap();
        assert!(def.sockets.is_empty());
    }

    #[test]
    fn test_socket_missing_name() {
        let record = json!({"name": "web", "sockets": [{"type": "tcp", "bind": "x"}]});
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField("socket.name"))
        );
    }

    #[test]
    fn test_socket_missing_type() {
        let record = json!({"name": "web", "sockets": [{"name": "http", "bind": "x"}]});
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField("socket.type"))
        );
    }

    #[test]
    fn test_socket_missing_bind_and_connect() {
        let record = json!({"name": "web", "sockets": [{"name": "http", "type": "tcp"}]});
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField("socket.bind|connect"))
        );
    }

    #[test]
    fn test_socket_with_both_bind_and_connect() {
        let record = json!({
            "name": "relay",
            "sockets": [{"name": "pipe", "type": "tcp", "bind": "a", "connect": "b"}]
        });
        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_fail_fast_stops_at_first_bad_socket() {
        // Second socket is fine; first one wins.
        let record = json!({
            "name": "web",
            "sockets": [
                {"name": "http", "type": "tcp"},
                {"name": "ok", "type": "tcp", "bind": "x"}
            ]
        });
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField("socket.bind|connect"))
        );
    }

    #[test]
    fn test_socket_order_name_before_type() {
        let record = json!({"name": "web", "sockets": [{}]});
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField("socket.name"))
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let record = json!({"name": "", "sockets": []});
        assert_eq!(validate(&record), Err(ValidationError::InvalidField("name")));
    }

    #[test]
    fn test_non_string_name_rejected() {
        let record = json!({"name": 42, "sockets": []});
        assert_eq!(validate(&record), Err(ValidationError::InvalidField("name")));
    }

    #[test]
    fn test_non_array_sockets_rejected() {
        let record = json!({"name": "web", "sockets": "tcp"});
        assert_eq!(
            validate(&record),
            Err(ValidationError::InvalidField("sockets"))
        );
    }

    #[test]
    fn test_extra_keys_survive_in_document() {
        let record = json!({
            "name": "web",
            "sockets": [],
            "owner": "platform-team",
            "replicas": 3
        });
        let def = validate(&record).unwrap();
        assert_eq!(def.document["owner"], "platform-team");
        assert_eq!(def.document["replicas"], 3);
    }
}
