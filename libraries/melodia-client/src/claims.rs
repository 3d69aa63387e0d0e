//! Role claims carried in the bearer token.
//!
//! The payload is read without verifying the signature: the backend is the
//! authority on what the token allows, the client only uses the roles to
//! decide what to show. Decoding never fails; anything malformed yields an
//! empty role list.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use tracing::debug;

/// Claim shapes that can carry roles, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleClaim {
    /// `"role": "ADMIN"`
    Role,
    /// `"roles": ["ADMIN", "USER"]`
    Roles,
    /// `"authorities": ["ROLE_ADMIN"]` or `[{"authority": "ROLE_ADMIN"}]`
    Authorities,
}

impl RoleClaim {
    const PRECEDENCE: [RoleClaim; 3] = [RoleClaim::Role, RoleClaim::Roles, RoleClaim::Authorities];

    fn key(self) -> &'static str {
        match self {
            RoleClaim::Role => "role",
            RoleClaim::Roles => "roles",
            RoleClaim::Authorities => "authorities",
        }
    }
}

/// Decode the roles carried by `token`.
///
/// The first claim with a set value (see [`RoleClaim`]) wins. Blank
/// scalars (`""`, `false`, `0`, `null`) count as unset and fall through to
/// the next claim; an empty list does not.
pub fn decode_roles(token: &str) -> Vec<String> {
    let Some(payload) = decode_payload(token) else {
        debug!("Token payload could not be decoded; no roles merged");
        return Vec::new();
    };

    RoleClaim::PRECEDENCE
        .iter()
        .find_map(|claim| {
            payload
                .get(claim.key())
                .filter(|v| is_set(v))
                .map(role_strings)
        })
        .unwrap_or_default()
}

/// Decode the JSON payload segment of a JWT.
pub fn decode_payload(token: &str) -> Option<Value> {
    let mut parts = token.trim().split('.');
    let (_header, payload) = (parts.next()?, parts.next()?);
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    match serde_json::from_slice(&bytes).ok()? {
        Value::Object(map) => Some(Value::Object(map)),
        _ => None,
    }
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn role_strings(value: &Value) -> Vec<String> {
    let mut roles: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(role_string).collect(),
        other => role_string(other).into_iter().collect(),
    };
    let mut seen = std::collections::HashSet::new();
    roles.retain(|r| seen.insert(r.clone()));
    roles
}

fn role_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("authority")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_with(payload: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn single_role_claim() {
        let token = token_with(json!({"sub": "alice", "role": "ADMIN"}));
        assert_eq!(decode_roles(&token), vec!["ADMIN"]);
    }

    #[test]
    fn role_wins_over_roles_and_authorities() {
        let token = token_with(json!({
            "role": "USER",
            "roles": ["ADMIN"],
            "authorities": ["ROLE_ADMIN"]
        }));
        assert_eq!(decode_roles(&token), vec!["USER"]);
    }

    #[test]
    fn roles_list_wins_over_authorities() {
        let token = token_with(json!({"roles": ["USER", "ADMIN"], "authorities": ["X"]}));
        assert_eq!(decode_roles(&token), vec!["USER", "ADMIN"]);
    }

    #[test]
    fn scalar_roles_claim_is_accepted() {
        let token = token_with(json!({"roles": "ADMIN"}));
        assert_eq!(decode_roles(&token), vec!["ADMIN"]);
    }

    #[test]
    fn spring_authorities_objects() {
        let token = token_with(json!({
            "authorities": [{"authority": "ROLE_USER"}, {"authority": "ROLE_ADMIN"}]
        }));
        assert_eq!(decode_roles(&token), vec!["ROLE_USER", "ROLE_ADMIN"]);
    }

    #[test]
    fn duplicates_are_dropped() {
        let token = token_with(json!({"roles": ["ADMIN", "ADMIN", "USER"]}));
        assert_eq!(decode_roles(&token), vec!["ADMIN", "USER"]);
    }

    #[test]
    fn blank_role_falls_through() {
        let token = token_with(json!({"role": "", "authorities": ["ROLE_ADMIN"]}));
        assert_eq!(decode_roles(&token), vec!["ROLE_ADMIN"]);

        let token = token_with(json!({"role": false, "roles": 0, "authorities": ["ROLE_USER"]}));
        assert_eq!(decode_roles(&token), vec!["ROLE_USER"]);
    }

    #[test]
    fn empty_roles_list_still_wins() {
        let token = token_with(json!({"roles": [], "authorities": ["ROLE_ADMIN"]}));
        assert!(decode_roles(&token).is_empty());
    }

    #[test]
    fn no_role_claims() {
        let token = token_with(json!({"sub": "alice"}));
        assert!(decode_roles(&token).is_empty());
    }

    #[test]
    fn malformed_tokens_yield_no_roles() {
        assert!(decode_roles("").is_empty());
        assert!(decode_roles("not-a-jwt").is_empty());
        assert!(decode_roles("a.%%%%.c").is_empty());
        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(decode_roles(&not_json).is_empty());
        let array_payload = format!("h.{}.s", URL_SAFE_NO_PAD.encode("[1,2]"));
        assert!(decode_roles(&array_payload).is_empty());
    }

    #[test]
    fn padded_payload_is_tolerated() {
        let body = base64::engine::general_purpose::URL_SAFE.encode(r#"{"role":"ADMIN"}"#);
        let token = format!("h.{body}.s");
        assert_eq!(decode_roles(&token), vec!["ADMIN"]);
    }
}
