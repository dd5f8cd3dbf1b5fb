//! JSON-RPC request handling
//!
//! One [`Server`] serves one client over stdio, so it owns the client's
//! [`Session`] directly and handles requests in order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};
use unitwise::{Session, ShellError, Theme, FAILURE_MESSAGE, DEFAULT_FILE_NAME};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "unitwise";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const EXPORT_URI: &str = "unitwise://export/conversion_results.csv";

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    /// `None` only when the member is absent; `"id": null` is `Some(Null)`
    #[serde(default, deserialize_with = "deserialize_present")]
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    jsonrpc: String,
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.into(),
            data: None,
        }
    }
}

impl McpResponse {
    fn from_result(id: Option<JsonValue>, result: Result<JsonValue, McpError>) -> Self {
        let (result, error) = match result {
            Ok(r) => (Some(r), None),
            Err(e) => (None, Some(e)),
        };
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
            error,
        }
    }

    pub fn parse_error(details: impl std::fmt::Display) -> Self {
        Self::from_result(
            None,
            Err(McpError {
                code: PARSE_ERROR,
                message: format!("Parse error: {}", details),
                data: None,
            }),
        )
    }
}

pub struct Server {
    session: Session,
}

impl Server {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handle one protocol line. Notifications yield no response.
    pub fn dispatch(&mut self, line: &str) -> Option<McpResponse> {
        let request: McpRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!("Error parsing request: {}", e);
                return Some(McpResponse::parse_error(e));
            }
        };

        debug!("Processing: {}", request.method);
        let response = self.handle(&request);

        if request.id.is_none() {
            debug!("Notification processed (no response): {}", request.method);
            return None;
        }
        Some(response)
    }

    pub fn handle(&mut self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => handle_tools_list(),
            "tools/call" => self.handle_tool_call(&request.params),

            // Resources
            "resources/list" => self.handle_resources_list(),
            "resources/read" => self.handle_resources_read(&request.params),

            _ => Err(McpError {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {}", request.method),
                data: None,
            }),
        };

        McpResponse::from_result(request.id.clone(), result)
    }

    fn handle_tool_call(&mut self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params
            .as_ref()
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));

        match name {
            "convert" => self.tool_convert(&args),
            "list_categories" => Ok(self.tool_list_categories()),
            "list_units" => self.tool_list_units(&args),
            "export_csv" => Ok(self.tool_export_csv(&args)),
            "set_theme" => self.tool_set_theme(&args),
            "toggle_theme" => {
                let theme = self.session.toggle_theme();
                Ok(theme_result(theme))
            }
            "session" => Ok(json!({
                "content": [{ "type": "text", "text": self.session_text() }],
                "data": self.session.snapshot()
            })),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    fn tool_convert(&mut self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let value = number_arg(args, "value")?;
        let category = str_arg(args, "category")?;
        let from = str_arg(args, "from")?;
        let to = str_arg(args, "to")?;

        let outcome = self.session.convert(value, category, from, to).map(|conversion| {
            json!({
                "content": [{ "type": "text", "text": conversion.summary() }],
                "value": conversion.value,
                "from": conversion.from,
                "to": conversion.to,
                "category": conversion.category,
                "result": conversion.result,
                "isError": false
            })
        });

        match outcome {
            Ok(result) => Ok(result),
            Err(e) => {
                let mut result = tool_error(FAILURE_MESSAGE, &e);
                let suggestions = self.session.suggestions(category, from);
                if matches!(e, ShellError::Conversion(_)) && !suggestions.is_empty() {
                    result["suggestions"] = json!(suggestions);
                }
                Ok(result)
            }
        }
    }

    fn tool_list_categories(&self) -> JsonValue {
        let names = self.session.engine().category_names();
        json!({
            "content": [{ "type": "text", "text": names.join(", ") }],
            "data": names
        })
    }

    fn tool_list_units(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = str_arg(args, "category")?;
        match self.session.engine().list_units(category) {
            Ok(units) => Ok(json!({
                "content": [{ "type": "text", "text": units.join(", ") }],
                "data": units
            })),
            Err(e) => Ok(tool_error("Cannot list units", &ShellError::from(e))),
        }
    }

    fn tool_export_csv(&self, args: &JsonValue) -> JsonValue {
        let write = args.get("write").and_then(|v| v.as_bool()).unwrap_or(false);

        let csv = match self.session.export_csv() {
            Ok(csv) => csv,
            Err(e) => return tool_error("Nothing to export", &e),
        };

        let path = if write {
            match self.session.write_export() {
                Ok(path) => Some(path.to_string_lossy().to_string()),
                Err(e) => return tool_error("Export failed", &e),
            }
        } else {
            None
        };

        json!({
            "content": [{ "type": "text", "text": csv }],
            "fileName": DEFAULT_FILE_NAME,
            "mimeType": "text/csv",
            "path": path,
            "isError": false
        })
    }

    fn tool_set_theme(&mut self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let theme: Theme = str_arg(args, "theme")?
            .parse()
            .map_err(McpError::invalid_params)?;
        Ok(theme_result(self.session.set_theme(theme)))
    }

    fn session_text(&self) -> String {
        match self.session.last() {
            Some(conversion) => format!("Theme: {}\nLast: {}", self.session.theme(), conversion),
            None => format!("Theme: {}\nLast: none", self.session.theme()),
        }
    }

    fn handle_resources_list(&self) -> Result<JsonValue, McpError> {
        let resources: Vec<JsonValue> = self
            .session
            .last()
            .map(|conversion| {
                json!({
                    "uri": EXPORT_URI,
                    "name": DEFAULT_FILE_NAME,
                    "description": format!("Last conversion: {}", conversion),
                    "mimeType": "text/csv"
                })
            })
            .into_iter()
            .collect();

        Ok(json!({ "resources": resources }))
    }

    fn handle_resources_read(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let uri = params
            .as_ref()
            .and_then(|p| p.get("uri"))
            .and_then(|u| u.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing uri parameter"))?;

        if uri != EXPORT_URI {
            return Err(McpError::invalid_params(format!(
                "Invalid URI: {}. Expected {}",
                uri, EXPORT_URI
            )));
        }

        let csv = self.session.export_csv().map_err(|e| McpError {
            code: INVALID_PARAMS,
            message: e.to_string(),
            data: Some(json!(e.report())),
        })?;

        Ok(json!({
            "contents": [{
                "uri": uri,
                "mimeType": "text/csv",
                "text": csv
            }]
        }))
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!("Client connected: {} (protocol: {})", client_info, client_protocol);

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit converter for length, weight and temperature"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            },
            "resources": {
                "subscribe": false,
                "listChanged": false
            }
        },
        "instructions": "Use list_categories and list_units to discover units, then convert. Only direct conversions are supported. export_csv returns the last successful conversion as CSV."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a non-negative value between two units of the same category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": "number",
                            "description": "Value to convert (rounded to 2 decimals)",
                            "minimum": 0
                        },
                        "category": {
                            "type": "string",
                            "enum": ["Length", "Weight", "Temperature"]
                        },
                        "from": {
                            "type": "string",
                            "description": "Source unit, e.g. Meters"
                        },
                        "to": {
                            "type": "string",
                            "description": "Target unit, e.g. Feet"
                        }
                    },
                    "required": ["value", "category", "from", "to"]
                }
            },
            {
                "name": "list_categories",
                "description": "List unit categories.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": ["Length", "Weight", "Temperature"]
                        }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "export_csv",
                "description": "Export the last successful conversion as CSV.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "write": {
                            "type": "boolean",
                            "description": "Also write conversion_results.csv to the export directory",
                            "default": false
                        }
                    }
                }
            },
            {
                "name": "set_theme",
                "description": "Select the UI theme.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "theme": {
                            "type": "string",
                            "enum": ["Light", "Dark"]
                        }
                    },
                    "required": ["theme"]
                }
            },
            {
                "name": "toggle_theme",
                "description": "Switch between Light and Dark themes.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "session",
                "description": "Show the current theme and last conversion.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    }))
}

fn tool_error(headline: &str, err: &ShellError) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": format!("{}\n\n{}", headline, err) }],
        "error": err.report(),
        "isError": true
    })
}

fn theme_result(theme: Theme) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": format!("Theme: {}", theme) }],
        "theme": theme,
        "css": theme.css()
    })
}

fn str_arg<'a>(args: &'a JsonValue, name: &str) -> Result<&'a str, McpError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", name)))
}

/// Numbers may arrive as JSON numbers or numeric strings
fn number_arg(args: &JsonValue, name: &str) -> Result<f64, McpError> {
    match args.get(name) {
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .ok_or_else(|| McpError::invalid_params(format!("{} is out of range", name))),
        Some(JsonValue::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| McpError::invalid_params(format!("{} is not a number: {}", name, s))),
        Some(_) => Err(McpError::invalid_params(format!("{} must be a number", name))),
        None => Err(McpError::invalid_params(format!("Missing {} argument", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> Server {
        Server::new(Session::default())
    }

    fn call(server: &mut Server, tool: &str, arguments: JsonValue) -> JsonValue {
        let line = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": tool, "arguments": arguments }
        })
        .to_string();
        let response = server.dispatch(&line).expect("request with id gets a response");
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_notification_has_no_response() {
        let mut server = server();
        let line = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(server.dispatch(line).is_none());
    }

    #[test]
    fn test_null_id_gets_response() {
        let mut server = server();
        let line = r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#;
        let response = serde_json::to_value(server.dispatch(line).unwrap()).unwrap();
        assert!(response["id"].is_null());
        assert_eq!(response["result"], json!({}));

        let line = r#"{"jsonrpc":"2.0","method":"ping"}"#;
        assert!(server.dispatch(line).is_none());
    }

    #[test]
    fn test_parse_error() {
        let response = serde_json::to_value(server().dispatch("{not json").unwrap()).unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert!(response["id"].is_null());
    }

    #[test]
    fn test_method_not_found() {
        let mut server = server();
        let line = r#"{"jsonrpc":"2.0","id":7,"method":"prompts/list"}"#;
        let response = serde_json::to_value(server.dispatch(line).unwrap()).unwrap();
        assert_eq!(response["id"], 7);
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
    }

    #[test]
    fn test_initialize_echoes_protocol() {
        let mut server = server();
        let line = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","clientInfo":{"name":"test"}}}"#;
        let response = serde_json::to_value(server.dispatch(line).unwrap()).unwrap();
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], SERVER_NAME);
    }

    #[test]
    fn test_tools_list() {
        let tools = handle_tools_list().unwrap();
        let names: Vec<&str> = tools["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert!(names.contains(&"convert"));
        assert!(names.contains(&"export_csv"));
    }

    #[test]
    fn test_convert_tool() {
        let mut server = server();
        let response = call(
            &mut server,
            "convert",
            json!({"value": 100, "category": "Temperature", "from": "Celsius", "to": "Fahrenheit"}),
        );
        let result = &response["result"];
        assert_eq!(result["isError"], false);
        assert_eq!(result["result"], 212.0);
        assert_eq!(result["content"][0]["text"], "100.00 Celsius = 212.0000 Fahrenheit");
    }

    #[test]
    fn test_convert_accepts_numeric_string() {
        let mut server = server();
        let response = call(
            &mut server,
            "convert",
            json!({"value": "1", "category": "Length", "from": "Kilometers", "to": "Meters"}),
        );
        assert_eq!(response["result"]["result"], 1000.0);
    }

    #[test]
    fn test_convert_failure_is_tool_error() {
        let mut server = server();
        let response = call(
            &mut server,
            "convert",
            json!({"value": 1, "category": "Length", "from": "Feet", "to": "Miles"}),
        );
        assert!(response["error"].is_null());

        let result = &response["result"];
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "NO_RULE");
        assert!(result["content"][0]["text"].as_str().unwrap().starts_with(FAILURE_MESSAGE));
        assert_eq!(result["suggestions"], json!(["Meters", "Centimeters"]));
    }

    #[test]
    fn test_convert_missing_argument() {
        let mut server = server();
        let response = call(&mut server, "convert", json!({"value": 1, "category": "Length"}));
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_list_units_tool() {
        let mut server = server();
        let response = call(&mut server, "list_units", json!({"category": "Temperature"}));
        assert_eq!(response["result"]["data"], json!(["Celsius", "Fahrenheit", "Kelvin"]));

        let response = call(&mut server, "list_units", json!({"category": "Volume"}));
        assert_eq!(response["result"]["isError"], true);
        assert_eq!(response["result"]["error"]["code"], "UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_export_flow() {
        let mut server = server();
        let response = call(&mut server, "export_csv", json!({}));
        assert_eq!(response["result"]["isError"], true);

        call(
            &mut server,
            "convert",
            json!({"value": 1, "category": "Weight", "from": "Pounds", "to": "Ounces"}),
        );
        let response = call(&mut server, "export_csv", json!({}));
        assert_eq!(
            response["result"]["content"][0]["text"],
            "Value,From,Converted Value,To\n1,Pounds,16,Ounces\n"
        );
        assert!(response["result"]["path"].is_null());
    }

    #[test]
    fn test_resources_follow_last_conversion() {
        let mut server = server();
        let list = server.handle_resources_list().unwrap();
        assert_eq!(list["resources"], json!([]));

        call(
            &mut server,
            "convert",
            json!({"value": 2, "category": "Length", "from": "Meters", "to": "Centimeters"}),
        );
        let list = server.handle_resources_list().unwrap();
        assert_eq!(list["resources"][0]["uri"], EXPORT_URI);

        let read = server
            .handle_resources_read(&Some(json!({ "uri": EXPORT_URI })))
            .unwrap();
        assert_eq!(read["contents"][0]["text"], "Value,From,Converted Value,To\n2,Meters,200,Centimeters\n");
    }

    #[test]
    fn test_theme_tools() {
        let mut server = server();
        let response = call(&mut server, "toggle_theme", json!({}));
        assert_eq!(response["result"]["theme"], "Dark");

        let response = call(&mut server, "set_theme", json!({"theme": "light"}));
        assert_eq!(response["result"]["theme"], "Light");
        assert!(response["result"]["css"].is_null());

        let response = call(&mut server, "set_theme", json!({"theme": "neon"}));
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
        assert_eq!(server.session().theme(), Theme::Light);
    }
}
