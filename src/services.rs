//! # Services Module
//!
//! Links externally declared service annotations (a name plus an ordered
//! method list) to inferred HTTP verbs and route paths, so that non-model API
//! integrations can be scaffolded next to the model CRUD surface.
//!
//! The mapping is total and deterministic: every method name resolves to
//! exactly one verb and one path, and identical names always resolve
//! identically.
//!
//! ## Inference rules
//!
//! | Method prefix          | Verb   |
//! |------------------------|--------|
//! | `send*` / `create*`    | POST   |
//! | `get*` / `list*`       | GET    |
//! | `update*` / `set*`     | PUT    |
//! | `delete*` / `remove*`  | DELETE |
//! | anything else          | GET    |
//!
//! The route path is `/{service-name}/{segment}` where the segment is the
//! method name minus its recognized verb prefix, hyphenated and lowercased:
//! `sendMessage` on service `ai-agent` becomes `POST /ai-agent/message`.

use serde::{Deserialize, Serialize};


/// Inferred HTTP verb for a service method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One callable method declared on a service annotation
///
/// A closed struct rather than an open metadata map, so renderers can be
/// statically checked against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMethod {
    pub name: String,
}

impl ServiceMethod {
    pub fn new(name: impl Into<String>) -> Self {
        ServiceMethod { name: name.into() }
    }
}

/// Externally declared integration metadata: a name plus an ordered method
/// list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAnnotation {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<ServiceMethod>,
}

impl ServiceAnnotation {
    pub fn new<I, S>(name: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ServiceAnnotation {
            name: name.into(),
            methods: methods.into_iter().map(ServiceMethod::new).collect(),
        }
    }
}

/// A service method with its verb and route path resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMethod {
    pub name: String,
    pub verb: HttpVerb,
    pub path: String,
}

/// A fully resolved service annotation, handed to the service renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedService {
    pub name: String,
    pub methods: Vec<ResolvedMethod>,
}

/// Verb prefixes checked in order against the raw method name
const VERB_PREFIXES: [(&str, HttpVerb); 8] = [
    ("send", HttpVerb::Post),
    ("create", HttpVerb::Post),
    ("get", HttpVerb::Get),
    ("list", HttpVerb::Get),
    ("update", HttpVerb::Put),
    ("set", HttpVerb::Put),
    ("delete", HttpVerb::Delete),
    ("remove", HttpVerb::Delete),
];

/// Infer the HTTP verb for a method name from its prefix
///
/// Names with no recognized prefix default to GET.
pub fn infer_verb(method: &str) -> HttpVerb {
    VERB_PREFIXES
        .iter()
        .find(|(prefix, _)| method.starts_with(prefix))
        .map(|(_, verb)| *verb)
        .unwrap_or(HttpVerb::Get)
}

/// Derive the route path for a method on a service
///
/// The recognized verb prefix is stripped before hyphenation; a method that
/// is nothing but its prefix routes to the service root.
pub fn route_path(service: &str, method: &str) -> String {
    let remainder = VERB_PREFIXES
        .iter()
        .find(|(prefix, _)| method.starts_with(prefix))
        .map(|(prefix, _)| &method[prefix.len()..])
        .unwrap_or(method);
    let segment = to_kebab_case(remainder);
    let base = to_kebab_case(service);
    if segment.is_empty() {
        format!("/{base}")
    } else {
        format!("/{base}/{segment}")
    }
}

/// Resolve every method on an annotation, preserving method order
pub fn resolve_service(annotation: &ServiceAnnotation) -> ResolvedService {
    ResolvedService {
        name: annotation.name.clone(),
        methods: annotation
            .methods
            .iter()
            .map(|m| ResolvedMethod {
                name: m.name.clone(),
                verb: infer_verb(&m.name),
                path: route_path(&annotation.name, &m.name),
            })
            .collect(),
    }
}

/// Convert a camelCase / snake_case name to hyphenated lowercase
fn to_kebab_case(s: &str) -> String {
    let mut result = String::new();
    for ch in s.chars() {
        if ch.is_uppercase() {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
            for lower in ch.to_lowercase() {
                result.push(lower);
            }
        } else if ch == '_' || ch == ' ' {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
        } else {
            result.push(ch);
        }
    }
    result.trim_matches('-').to_string()
}
