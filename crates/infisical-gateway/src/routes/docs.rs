//! OpenAPI document and Swagger UI.
//!
//! The document is generated from [`OPERATIONS`], a static table kept next
//! to the routers it describes. Served at `/openapi.json`; the UI at
//! `/swagger` (and `/`) loads it from there.

use std::sync::Arc;

use axum::Router;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use serde_json::{Map, Value, json};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/swagger", get(swagger_ui))
        .route("/", get(swagger_ui))
}

async fn openapi_json() -> impl IntoResponse {
    axum::Json(openapi_document())
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_HTML)
}

/// Where a parameter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum In {
    Path,
    Query,
}

#[derive(Debug, Clone, Copy)]
struct Param {
    name: &'static str,
    location: In,
    kind: &'static str,
    description: &'static str,
}

#[derive(Debug)]
struct Field {
    name: &'static str,
    kind: &'static str,
    required: bool,
}

#[derive(Debug)]
struct Operation {
    method: &'static str,
    path: &'static str,
    tag: &'static str,
    summary: &'static str,
    params: &'static [Param],
    /// Empty when the route takes no body.
    body: &'static [Field],
    status: u16,
}

const fn path(name: &'static str, description: &'static str) -> Param {
    Param {
        name,
        location: In::Path,
        kind: "string",
        description,
    }
}

const fn query(name: &'static str, kind: &'static str, description: &'static str) -> Param {
    Param {
        name,
        location: In::Query,
        kind,
        description,
    }
}

const fn field(name: &'static str, kind: &'static str, required: bool) -> Field {
    Field {
        name,
        kind,
        required,
    }
}

const SECRET_SCOPE: [Param; 3] = [
    query("environment", "string", "Environment slug (default from config)"),
    query("secretPath", "string", "Folder path (default from config)"),
    query("projectId", "string", "Project id (default from config)"),
];

const DYNAMIC_SCOPE: [Param; 3] = [
    query("projectSlug", "string", "Project slug (default from config)"),
    query("environment", "string", "Environment slug (default from config)"),
    query("path", "string", "Folder path (default from config)"),
];

const SECRET_NAME: Param = path("secretName", "Secret key");
const KEY_ID: Param = path("keyId", "KMS key id");
const LEASE_ID: Param = path("leaseId", "Lease id");

const OPERATIONS: &[Operation] = &[
    // Secrets
    Operation {
        method: "get",
        path: "/secret/{secretName}",
        tag: "secrets",
        summary: "Read a secret",
        params: &[
            SECRET_NAME,
            SECRET_SCOPE[0],
            SECRET_SCOPE[1],
            SECRET_SCOPE[2],
            query("version", "integer", "Secret version"),
            query("type", "string", "shared or personal"),
            query("expandSecretReferences", "boolean", "Resolve ${...} references"),
            query("includeImports", "boolean", "Search imported secrets too"),
        ],
        body: &[],
        status: 200,
    },
    Operation {
        method: "post",
        path: "/secret",
        tag: "secrets",
        summary: "Create a secret",
        params: &SECRET_SCOPE,
        body: &[
            field("secretName", "string", true),
            field("secretValue", "string", true),
            field("secretComment", "string", false),
            field("skipMultilineEncoding", "boolean", false),
            field("type", "string", false),
            field("tagIds", "array", false),
        ],
        status: 201,
    },
    Operation {
        method: "put",
        path: "/secret/{secretName}",
        tag: "secrets",
        summary: "Update a secret",
        params: &[SECRET_NAME, SECRET_SCOPE[0], SECRET_SCOPE[1], SECRET_SCOPE[2]],
        body: &[
            field("secretValue", "string", false),
            field("newSecretName", "string", false),
            field("secretComment", "string", false),
            field("skipMultilineEncoding", "boolean", false),
            field("type", "string", false),
            field("tagIds", "array", false),
        ],
        status: 200,
    },
    Operation {
        method: "delete",
        path: "/secret/{secretName}",
        tag: "secrets",
        summary: "Delete a secret",
        params: &[
            SECRET_NAME,
            SECRET_SCOPE[0],
            SECRET_SCOPE[1],
            SECRET_SCOPE[2],
            query("type", "string", "shared or personal"),
        ],
        body: &[],
        status: 200,
    },
    Operation {
        method: "get",
        path: "/secrets",
        tag: "secrets",
        summary: "List secrets",
        params: &[
            SECRET_SCOPE[0],
            SECRET_SCOPE[1],
            SECRET_SCOPE[2],
            query("recursive", "boolean", "Include sub-folders"),
            query("includeImports", "boolean", "Include imported secrets"),
            query("expandSecretReferences", "boolean", "Resolve ${...} references"),
            query("tagSlugs", "string", "Comma-separated tag slugs"),
        ],
        body: &[],
        status: 200,
    },
    // Dynamic secrets
    Operation {
        method: "post",
        path: "/dynamic-secret",
        tag: "dynamic-secrets",
        summary: "Create a dynamic secret",
        params: &DYNAMIC_SCOPE,
        body: &[
            field("name", "string", true),
            field("provider", "object", true),
            field("defaultTTL", "string", true),
            field("maxTTL", "string", false),
        ],
        status: 201,
    },
    Operation {
        method: "delete",
        path: "/dynamic-secret/{name}",
        tag: "dynamic-secrets",
        summary: "Delete a dynamic secret",
        params: &[
            path("name", "Dynamic secret name"),
            DYNAMIC_SCOPE[0],
            DYNAMIC_SCOPE[1],
            DYNAMIC_SCOPE[2],
            query("isForced", "boolean", "Delete even if revocation fails"),
        ],
        body: &[],
        status: 200,
    },
    Operation {
        method: "post",
        path: "/dynamic-secret/{name}/leases",
        tag: "dynamic-secrets",
        summary: "Issue a lease",
        params: &[
            path("name", "Dynamic secret name"),
            DYNAMIC_SCOPE[0],
            DYNAMIC_SCOPE[1],
            DYNAMIC_SCOPE[2],
        ],
        body: &[field("ttl", "string", false)],
        status: 201,
    },
    Operation {
        method: "post",
        path: "/dynamic-secret-leases/{leaseId}/renew",
        tag: "dynamic-secrets",
        summary: "Renew a lease",
        params: &[LEASE_ID, DYNAMIC_SCOPE[0], DYNAMIC_SCOPE[1], DYNAMIC_SCOPE[2]],
        body: &[field("ttl", "string", false)],
        status: 200,
    },
    Operation {
        method: "delete",
        path: "/dynamic-secret-leases/{leaseId}",
        tag: "dynamic-secrets",
        summary: "Revoke a lease",
        params: &[
            LEASE_ID,
            DYNAMIC_SCOPE[0],
            DYNAMIC_SCOPE[1],
            DYNAMIC_SCOPE[2],
            query("isForced", "boolean", "Delete even if revocation fails"),
        ],
        body: &[],
        status: 200,
    },
    // Projects, environments, folders
    Operation {
        method: "post",
        path: "/projects",
        tag: "projects",
        summary: "Create a project",
        params: &[],
        body: &[
            field("projectName", "string", true),
            field("slug", "string", false),
            field("projectDescription", "string", false),
            field("kmsKeyId", "string", false),
            field("template", "string", false),
            field("type", "string", false),
        ],
        status: 201,
    },
    Operation {
        method: "post",
        path: "/projects/{projectId}/memberships",
        tag: "projects",
        summary: "Invite members to a project",
        params: &[path("projectId", "Project id")],
        body: &[
            field("emails", "array", false),
            field("usernames", "array", false),
            field("roleSlugs", "array", false),
        ],
        status: 201,
    },
    Operation {
        method: "post",
        path: "/projects/{projectId}/environments",
        tag: "projects",
        summary: "Create an environment",
        params: &[path("projectId", "Project id")],
        body: &[
            field("name", "string", true),
            field("slug", "string", true),
            field("position", "integer", false),
        ],
        status: 201,
    },
    Operation {
        method: "post",
        path: "/folders",
        tag: "folders",
        summary: "Create a folder",
        params: &[],
        body: &[
            field("name", "string", true),
            field("path", "string", false),
            field("description", "string", false),
            field("environment", "string", false),
            field("projectId", "string", false),
        ],
        status: 201,
    },
    Operation {
        method: "get",
        path: "/folders",
        tag: "folders",
        summary: "List folders",
        params: &[
            query("path", "string", "Parent path (default /)"),
            query("recursive", "boolean", "Whole subtree"),
            query("environment", "string", "Environment slug (default from config)"),
            query("projectId", "string", "Project id (default from config)"),
        ],
        body: &[],
        status: 200,
    },
    // KMS
    Operation {
        method: "post",
        path: "/kms/keys",
        tag: "kms",
        summary: "Create a KMS key",
        params: &[],
        body: &[
            field("name", "string", true),
            field("description", "string", false),
            field("encryptionAlgorithm", "string", false),
            field("keyUsage", "string", false),
            field("projectId", "string", false),
        ],
        status: 201,
    },
    Operation {
        method: "get",
        path: "/kms/keys/{keyId}",
        tag: "kms",
        summary: "Read a KMS key",
        params: &[KEY_ID],
        body: &[],
        status: 200,
    },
    Operation {
        method: "delete",
        path: "/kms/keys/{keyId}",
        tag: "kms",
        summary: "Delete a KMS key",
        params: &[KEY_ID],
        body: &[],
        status: 200,
    },
    Operation {
        method: "get",
        path: "/kms/keys/name/{keyName}",
        tag: "kms",
        summary: "Read a KMS key by name",
        params: &[
            path("keyName", "KMS key name"),
            query("projectId", "string", "Project id (default from config)"),
        ],
        body: &[],
        status: 200,
    },
    Operation {
        method: "post",
        path: "/kms/keys/{keyId}/encrypt",
        tag: "kms",
        summary: "Encrypt base64 plaintext",
        params: &[KEY_ID],
        body: &[field("plaintext", "string", true)],
        status: 200,
    },
    Operation {
        method: "post",
        path: "/kms/keys/{keyId}/decrypt",
        tag: "kms",
        summary: "Decrypt to base64 plaintext",
        params: &[KEY_ID],
        body: &[field("ciphertext", "string", true)],
        status: 200,
    },
    Operation {
        method: "post",
        path: "/kms/keys/{keyId}/sign",
        tag: "kms",
        summary: "Sign base64 data",
        params: &[KEY_ID],
        body: &[
            field("data", "string", true),
            field("signingAlgorithm", "string", true),
            field("isDigest", "boolean", false),
        ],
        status: 200,
    },
    Operation {
        method: "post",
        path: "/kms/keys/{keyId}/verify",
        tag: "kms",
        summary: "Verify a signature",
        params: &[KEY_ID],
        body: &[
            field("data", "string", true),
            field("signature", "string", true),
            field("signingAlgorithm", "string", true),
            field("isDigest", "boolean", false),
        ],
        status: 200,
    },
    Operation {
        method: "get",
        path: "/kms/keys/{keyId}/public-key",
        tag: "kms",
        summary: "Public key of an asymmetric key",
        params: &[KEY_ID],
        body: &[],
        status: 200,
    },
    Operation {
        method: "get",
        path: "/kms/keys/{keyId}/signing-algorithms",
        tag: "kms",
        summary: "Signing algorithms a key supports",
        params: &[KEY_ID],
        body: &[],
        status: 200,
    },
    // Health
    Operation {
        method: "get",
        path: "/health",
        tag: "health",
        summary: "Liveness check",
        params: &[],
        body: &[],
        status: 200,
    },
    Operation {
        method: "get",
        path: "/health/ready",
        tag: "health",
        summary: "Readiness check (authenticates against Infisical)",
        params: &[],
        body: &[],
        status: 200,
    },
];

fn operation_json(op: &Operation) -> Value {
    let parameters: Vec<Value> = op
        .params
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "in": if p.location == In::Path { "path" } else { "query" },
                "required": p.location == In::Path,
                "description": p.description,
                "schema": { "type": p.kind },
            })
        })
        .collect();

    let mut responses = Map::new();
    responses.insert(op.status.to_string(), json!({ "description": "Success" }));
    for (status, description) in [
        ("400", "Invalid input"),
        ("404", "Not found upstream"),
        ("502", "Upstream unreachable"),
    ] {
        responses.insert(
            status.to_owned(),
            json!({
                "description": description,
                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } },
            }),
        );
    }

    let mut operation = json!({
        "tags": [op.tag],
        "summary": op.summary,
        "parameters": parameters,
        "responses": responses,
    });

    if !op.body.is_empty() {
        let fields = op.body;
        let properties: Map<String, Value> = fields
            .iter()
            .map(|f| (f.name.to_owned(), json!({ "type": f.kind })))
            .collect();
        let required: Vec<&str> = fields.iter().filter(|f| f.required).map(|f| f.name).collect();
        operation["requestBody"] = json!({
            "required": !required.is_empty(),
            "content": {
                "application/json": {
                    "schema": { "type": "object", "properties": properties, "required": required }
                }
            }
        });
    }

    operation
}

/// The OpenAPI 3.0 document for every gateway route.
pub fn openapi_document() -> Value {
    let mut paths = Map::new();
    for op in OPERATIONS {
        let entry = paths
            .entry(op.path.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(methods) = entry {
            methods.insert(op.method.to_owned(), operation_json(op));
        }
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Infisical Gateway",
            "description": "Plain HTTP routes over the Infisical API: secrets, dynamic secrets, projects, folders and KMS.",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "tags": [
            { "name": "secrets" },
            { "name": "dynamic-secrets" },
            { "name": "projects" },
            { "name": "folders" },
            { "name": "kms" },
            { "name": "health" },
        ],
        "paths": paths,
        "components": {
            "schemas": {
                "Error": {
                    "type": "object",
                    "properties": {
                        "error": { "type": "string" },
                        "message": { "type": "string" },
                    },
                    "required": ["error", "message"],
                }
            }
        }
    })
}

const SWAGGER_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Infisical Gateway API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: '/openapi.json', dom_id: '#swagger-ui' });
    };
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_is_documented_once() {
        let doc = openapi_document();
        let paths = doc["paths"].as_object().map_or(0, |p| {
            p.values()
                .filter_map(Value::as_object)
                .map(Map::len)
                .sum::<usize>()
        });
        assert_eq!(paths, OPERATIONS.len());
    }

    #[test]
    fn path_parameters_match_templates() {
        for op in OPERATIONS {
            for param in op.params.iter().filter(|p| p.location == In::Path) {
                assert!(
                    op.path.contains(&format!("{{{}}}", param.name)),
                    "{} {} documents unknown path parameter {}",
                    op.method,
                    op.path,
                    param.name
                );
            }
        }
    }

    #[test]
    fn request_bodies_list_required_fields() {
        let doc = openapi_document();
        let schema = &doc["paths"]["/secret"]["post"]["requestBody"]["content"]["application/json"]["schema"];
        assert_eq!(schema["required"], json!(["secretName", "secretValue"]));
        assert_eq!(doc["paths"]["/secret"]["post"]["responses"]["201"]["description"], "Success");
    }
}
