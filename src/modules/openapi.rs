//! OpenAPI fragments for resource modules.
//!
//! Paths are relative to the module mount point; the HTTP layer prefixes
//! them with `/v1/{module}` when merging.

use serde_json::{json, Value};

use crate::api::Resource;

fn envelope(data: Value) -> Value {
    json!({
        "type": "object",
        "properties": {
            "code": { "type": "integer" },
            "message": { "type": "string" },
            "data": data
        },
        "required": ["code", "message", "data"]
    })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(json!({ "$ref": "#/components/schemas/ErrorResponse" }))
    })
}

fn ok_response(description: &str, data: Value) -> Value {
    json!({
        "description": description,
        "content": json_content(envelope(data))
    })
}

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int32" }
    })
}

fn query_parameter(name: &str, schema: Value) -> Value {
    json!({ "name": name, "in": "query", "required": false, "schema": schema })
}

/// Paths and schemas for the five operations of `R`.
pub fn resource_fragment<R: Resource>(tag: &str, schema_name: &str, schema: Value) -> Value {
    let entity_ref = json!({ "$ref": format!("#/components/schemas/{schema_name}") });
    let body = json!({ "required": true, "content": json_content(entity_ref.clone()) });
    let singular = R::SINGULAR;
    let plural = R::PLURAL;

    json!({
        "paths": {
            "": {
                "get": {
                    "summary": format!("List {plural}"),
                    "operationId": format!("list-{plural}"),
                    "tags": [tag],
                    "parameters": [
                        query_parameter("search", json!({ "type": "string" })),
                        query_parameter("limit", json!({ "type": "integer", "format": "int32", "default": 10 })),
                        query_parameter("offset", json!({ "type": "integer", "format": "int32", "default": 0 }))
                    ],
                    "responses": {
                        "200": ok_response(&format!("Page of {plural}"), json!({ "type": "array", "items": entity_ref.clone() })),
                        "500": error_response("Malformed query parameter or catalog service failure")
                    }
                },
                "post": {
                    "summary": format!("Create {singular}"),
                    "operationId": format!("create-{singular}"),
                    "tags": [tag],
                    "requestBody": body,
                    "responses": {
                        "200": ok_response(&format!("Created {singular}"), entity_ref.clone()),
                        "400": error_response("Body is not valid JSON for this entity"),
                        "500": error_response("Catalog service failure")
                    }
                },
                "put": {
                    "summary": format!("Update {singular}"),
                    "operationId": format!("update-{singular}"),
                    "tags": [tag],
                    "requestBody": body,
                    "responses": {
                        "200": ok_response(&format!("Updated {singular}"), entity_ref.clone()),
                        "400": error_response("Body is not valid JSON for this entity"),
                        "500": error_response("Catalog service failure")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": format!("Get {singular} by id"),
                    "operationId": format!("get-{singular}"),
                    "tags": [tag],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": ok_response(&format!("The {singular}"), entity_ref.clone()),
                        "500": error_response("Malformed id or catalog service failure")
                    }
                },
                "delete": {
                    "summary": format!("Delete {singular}"),
                    "operationId": format!("delete-{singular}"),
                    "tags": [tag],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": ok_response("Identifier of the deleted entity", json!({ "$ref": "#/components/schemas/Id" })),
                        "500": error_response("Malformed id or catalog service failure")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                schema_name: schema,
                "Id": {
                    "type": "object",
                    "properties": { "id": { "type": "integer", "format": "int32" } },
                    "required": ["id"]
                }
            }
        }
    })
}
