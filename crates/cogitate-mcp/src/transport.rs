// cogitate-mcp/src/transport.rs
// ============================================================================
// Module: Stdio Transport
// Description: A synchronous, line-delimited JSON-RPC-like loop over
//              stdin/stdout.
// Purpose: Drive a CogitateServer from a host process over pipes.
// Dependencies: cogitate-core, serde_json
// ============================================================================

//! ## Overview
//! One JSON object per line in, one JSON object per line out — the framing
//! the spec calls out explicitly, in contrast to the teacher's own transport
//! module, which additionally frames stdio with `Content-Length` headers and
//! offers HTTP/SSE besides. Only `tools/list` and `tools/call` are
//! recognized methods; anything else is rejected as [`ErrorCode::NotFound`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::Write;
use std::time::Instant;

use cogitate_core::ErrorCode;
use cogitate_core::ToolError;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::audit::AuditEvent;
use crate::audit::now_ms;
use crate::server::CogitateServer;

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// One incoming request line.
#[derive(Debug, Deserialize)]
struct Request {
    id: Value,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

/// One outgoing response line.
#[derive(Debug, Serialize)]
struct Response {
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ToolError>,
}

impl Response {
    fn ok(id: Value, result: Value) -> Self {
        Self { id, result: Some(result), error: None }
    }

    fn err(id: Value, error: ToolError) -> Self {
        Self { id, result: None, error: Some(error) }
    }
}

/// Parameters for a `tools/call` request.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    input: Map<String, Value>,
}

// ============================================================================
// SECTION: Public Entry Point
// ============================================================================

/// Runs the stdio loop against `server` until stdin is closed.
///
/// Reads one JSON object per line from stdin and writes one JSON object per
/// line to stdout. A line that fails to parse produces an error response
/// keyed to a null id rather than terminating the loop, so one malformed
/// line does not end the session.
///
/// # Errors
///
/// Returns a [`std::io::Error`] if reading from stdin or writing to stdout
/// fails outright.
pub fn run_stdio(server: &CogitateServer) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    run_loop(server, &mut reader, &mut writer)
}

// ============================================================================
// SECTION: Loop
// ============================================================================

fn run_loop(server: &CogitateServer, reader: &mut impl BufRead, writer: &mut impl Write) -> std::io::Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let response = handle_line(server, trimmed);
        let payload = serde_json::to_string(&response).unwrap_or_else(|_| {
            serde_json::to_string(&Response::err(
                Value::Null,
                ToolError::new(ErrorCode::InvalidParameter, "failed to serialize response"),
            ))
            .unwrap_or_default()
        });
        writeln!(writer, "{payload}")?;
        writer.flush()?;
    }
}

fn handle_line(server: &CogitateServer, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => {
            return Response::err(
                Value::Null,
                ToolError::new(ErrorCode::InvalidParameter, format!("malformed request: {err}")),
            );
        }
    };
    match request.method.as_str() {
        "tools/list" => Response::ok(request.id, json_tool_list(server)),
        "tools/call" => handle_tools_call(server, request.id, request.params),
        other => Response::err(request.id, ToolError::new(ErrorCode::NotFound, format!("unknown method: {other}"))),
    }
}

fn json_tool_list(server: &CogitateServer) -> Value {
    serde_json::json!({ "tools": server.list_tools() })
}

fn handle_tools_call(server: &CogitateServer, id: Value, params: Option<Value>) -> Response {
    let Some(params) = params else {
        return Response::err(id, ToolError::new(ErrorCode::MissingRequired, "missing required parameter: params"));
    };
    let params: ToolCallParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(err) => {
            return Response::err(id, ToolError::new(ErrorCode::InvalidParameter, format!("malformed params: {err}")));
        }
    };

    let audit = server.audit();
    audit.record(&AuditEvent::ToolCallStarted { timestamp_ms: now_ms(), tool: params.name.clone() });
    let started = Instant::now();

    match server.router().handle_tool_call(&params.name, &params.input) {
        Ok(result) => {
            audit.record(&AuditEvent::ToolCallFinished {
                timestamp_ms: now_ms(),
                tool: params.name,
                success: true,
                elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            });
            Response::ok(id, result)
        }
        Err(err) => {
            audit.record(&AuditEvent::ToolCallFailed {
                timestamp_ms: now_ms(),
                tool: params.name,
                error_code: err.code.numeric(),
                error_message: err.message.clone(),
            });
            Response::err(id, err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::run_loop;
    use crate::server::CogitateServer;
    use crate::server::ServerConfig;
    use std::io::BufReader;
    use std::io::Cursor;

    fn server() -> CogitateServer {
        CogitateServer::new(ServerConfig::default()).unwrap()
    }

    fn run(input: &str) -> String {
        let server = server();
        let mut reader = BufReader::new(Cursor::new(input.as_bytes().to_vec()));
        let mut writer: Vec<u8> = Vec::new();
        run_loop(&server, &mut reader, &mut writer).unwrap();
        String::from_utf8(writer).unwrap()
    }

    #[test]
    fn tools_list_returns_every_catalog_entry() {
        let output = run("{\"id\": 1, \"method\": \"tools/list\"}\n");
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["result"]["tools"].as_array().unwrap().len(), 18);
    }

    #[test]
    fn tools_call_dispatches_to_the_named_tool() {
        let output =
            run("{\"id\": 2, \"method\": \"tools/call\", \"params\": {\"name\": \"think\", \"input\": {\"content\": \"hi\"}}}\n");
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert!(value["result"]["thought_id"].is_string());
    }

    #[test]
    fn an_unknown_method_reports_not_found_without_ending_the_session() {
        let output = run("{\"id\": 3, \"method\": \"bogus\"}\n{\"id\": 4, \"method\": \"tools/list\"}\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["error"]["code"], "not_found");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert!(second["result"].is_object());
    }

    #[test]
    fn a_malformed_line_does_not_abort_the_loop() {
        let output = run("not json\n{\"id\": 5, \"method\": \"tools/list\"}\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
    }
}
