//! OpenAPI 3.0 description of the HTTP surface, served at `/api-docs`.

use axum::response::Json;
use serde_json::{json, Value};

pub async fn api_docs() -> Json<Value> {
    Json(openapi_document())
}

pub fn openapi_document() -> Value {
    let unauthorized = json!({ "description": "No bearer token supplied" });
    let forbidden = json!({ "description": "Token invalid or expired" });
    let saved = json!({
        "description": "Data saved",
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Message" } } }
    });
    let bearer = json!([{ "bearerAuth": [] }]);

    let paths = json!({
        "/login": {
            "post": {
                "summary": "Authenticate a username and return a JWT",
                "requestBody": {
                    "required": true,
                    "content": { "application/json": { "schema": {
                        "type": "object",
                        "required": ["username"],
                        "properties": { "username": { "type": "string" } }
                    } } }
                },
                "responses": {
                    "200": {
                        "description": "Token issued",
                        "content": { "application/json": { "schema": {
                            "type": "object",
                            "properties": { "token": { "type": "string" } }
                        } } }
                    },
                    "400": { "description": "Username missing" }
                }
            }
        },
        "/saveData": {
            "post": {
                "summary": "Save data for the authenticated user",
                "security": bearer,
                "requestBody": {
                    "required": false,
                    "content": { "application/json": { "schema": {
                        "type": "object",
                        "properties": { "data": {} }
                    } } }
                },
                "responses": { "200": saved, "401": unauthorized, "403": forbidden }
            }
        },
        "/getData": {
            "get": {
                "summary": "List data saved by the authenticated user",
                "security": bearer,
                "responses": {
                    "200": {
                        "description": "Saved values in insertion order",
                        "content": { "application/json": { "schema": { "type": "array", "items": {} } } }
                    },
                    "401": unauthorized,
                    "403": forbidden
                }
            }
        },
        "/identified/saveData": {
            "post": {
                "summary": "Save the request body as a record with a sequential id",
                "security": bearer,
                "requestBody": {
                    "required": false,
                    "content": { "application/json": { "schema": {} } }
                },
                "responses": { "200": saved, "401": unauthorized, "403": forbidden }
            }
        },
        "/identified/getData": {
            "get": {
                "summary": "List identified records of the authenticated user",
                "security": bearer,
                "responses": {
                    "200": {
                        "description": "Records in insertion order",
                        "content": { "application/json": { "schema": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/IdentifiedRecord" }
                        } } }
                    },
                    "401": unauthorized,
                    "403": forbidden
                }
            }
        },
        "/identified/getData/{dataId}": {
            "get": {
                "summary": "Fetch one identified record by id",
                "security": bearer,
                "parameters": [{
                    "in": "path",
                    "name": "dataId",
                    "required": true,
                    "schema": { "type": "integer", "minimum": 1 }
                }],
                "responses": {
                    "200": {
                        "description": "The record",
                        "content": { "application/json": { "schema": {
                            "$ref": "#/components/schemas/IdentifiedRecord"
                        } } }
                    },
                    "401": unauthorized,
                    "403": forbidden,
                    "404": { "description": "No record with that id" }
                }
            }
        }
    });

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Per-user data API with authentication",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Stores and returns JSON data in memory per logged-in user, authenticated with bearer tokens."
        },
        "paths": paths,
        "components": {
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
            },
            "schemas": {
                "Message": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } }
                },
                "IdentifiedRecord": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "data": {}
                    }
                }
            }
        }
    })
}
