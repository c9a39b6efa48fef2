use oat_core::parse;
use oat_core::visit;

const USERS: &str = r#"
openapi: 3.0.0
servers:
  - url: https://api.example.com
paths:
  /users/{id}:
    get:
      operationId: getUser
      description: Fetch a user
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: integer
        - name: fields
          in: query
          schema:
            type: array
            items:
              type: string
              enum: [name, email]
    patch:
      operationId: updateUser
      summary: Update a user
      requestBody:
        content:
          application/json:
            schema:
              type: object
              required: [email]
              properties:
                email:
                  type: string
                  format: email
                nickname:
                  anyOf:
                    - type: string
                    - not:
                        type: integer
"#;

#[test]
fn tools_serialize_as_json_schema() {
    let spec = parse::from_yaml(USERS).unwrap();
    let api = visit::visit(&spec).unwrap();

    insta::assert_json_snapshot!(api, @r#"
    {
      "serviceUrl": "https://api.example.com",
      "tools": [
        {
          "name": "getUser",
          "description": "Fetch a user",
          "path": "/users/{id}",
          "method": "GET",
          "pathParameters": {
            "properties": {
              "id": {
                "type": "integer"
              }
            },
            "required": [
              "id"
            ]
          },
          "queryParameters": {
            "properties": {
              "fields": {
                "type": "array",
                "items": {
                  "type": "string",
                  "enum": [
                    "name",
                    "email"
                  ]
                }
              }
            }
          }
        },
        {
          "name": "updateUser",
          "description": "Update a user",
          "path": "/users/{id}",
          "method": "PATCH",
          "requestBody": {
            "type": "object",
            "properties": {
              "email": {
                "type": "string",
                "format": "email"
              },
              "nickname": {
                "anyOf": [
                  {
                    "type": "string"
                  },
                  {
                    "not": {
                      "type": "integer"
                    }
                  }
                ]
              }
            },
            "required": [
              "email"
            ]
          }
        }
      ]
    }
    "#);
}

#[test]
fn number_serializes_as_float() {
    let yaml = r#"
openapi: 3.0.0
paths:
  /price:
    get:
      operationId: getPrice
      summary: Price
      parameters:
        - name: max
          in: query
          schema:
            type: number
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let api = visit::visit(&spec).unwrap();
    let value = serde_json::to_value(&api).unwrap();
    assert_eq!(
        value["tools"][0]["queryParameters"]["properties"]["max"],
        serde_json::json!({ "type": "float" })
    );
    assert!(value.get("serviceUrl").is_none());
}
