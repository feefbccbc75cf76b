//! Summary Sidecar Binary
//!
//! Runs as a separate process so a non-Rust front end can use the summary
//! model. Communicates via JSON-RPC over stdin/stdout, one message per line.
//! Logs go to stderr so they never corrupt the protocol stream.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use notebuddy::summary::mock_summary;
use notebuddy::{ConversionError, SummaryConfig, SummaryModel, SummaryRecord, ValidationError};

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32000;
const VALIDATION_FAILED: i32 = -32001;
const CONVERSION_FAILED: i32 = -32002;

// ============================================================================
// JSON-RPC Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: u64,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl JsonRpcResponse {
    fn success(id: u64, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: u64, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message, data }),
        }
    }
}

/// Request params that could not be decoded for the method
#[derive(Debug, thiserror::Error)]
#[error("Invalid params: {0}")]
struct InvalidParams(String);

// ============================================================================
// Request Params
// ============================================================================

#[derive(Debug, Deserialize)]
struct CandidateParams {
    candidate: Value,
}

#[derive(Debug, Deserialize)]
struct RecordParams {
    record: SummaryRecord,
}

#[derive(Debug, Deserialize)]
struct AiResponseParams {
    text: String,
    #[serde(default)]
    transcript: String,
}

#[derive(Debug, Deserialize)]
struct QueryParams {
    record: SummaryRecord,
    #[serde(default)]
    query: String,
}

#[derive(Debug, Deserialize)]
struct UpdateParams {
    record: SummaryRecord,
    patch: Value,
}

fn parse_params<T: serde::de::DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| InvalidParams(e.to_string()).into())
}

// ============================================================================
// Handlers
// ============================================================================

struct SidecarState {
    model: SummaryModel,
    running: bool,
}

impl SidecarState {
    fn new(config: SummaryConfig) -> Self {
        Self {
            model: SummaryModel::new(config),
            running: true,
        }
    }
}

fn handle_create_summary(state: &SidecarState, params: CandidateParams) -> Result<Value> {
    let record = state.model.create_summary(&params.candidate)?;
    Ok(serde_json::to_value(record)?)
}

fn handle_validate(state: &SidecarState, params: CandidateParams) -> Result<Value> {
    let errors = match state.model.validate(&params.candidate) {
        Ok(()) => Vec::new(),
        Err(e) => e.errors,
    };
    Ok(json!({
        "isValid": errors.is_empty(),
        "errors": errors
    }))
}

fn handle_convert_legacy(state: &SidecarState, params: CandidateParams) -> Result<Value> {
    let record = state.model.convert_legacy_summary(&params.candidate)?;
    Ok(serde_json::to_value(record)?)
}

fn handle_parse_ai_response(state: &SidecarState, params: AiResponseParams) -> Result<Value> {
    Ok(state.model.parse_ai_response(&params.text, &params.transcript))
}

fn handle_apply_update(state: &SidecarState, params: UpdateParams) -> Result<Value> {
    let record = state.model.apply_update(&params.record, &params.patch)?;
    Ok(serde_json::to_value(record)?)
}

fn handle_shutdown(state: &mut SidecarState) -> Result<Value> {
    log::info!("Shutting down...");
    state.running = false;
    Ok(json!({
        "success": true
    }))
}

// ============================================================================
// Main Loop
// ============================================================================

fn dispatch(state: &mut SidecarState, method: &str, params: Value) -> Option<Result<Value>> {
    let result = match method {
        "create_summary" => parse_params(params).and_then(|p| handle_create_summary(state, p)),
        "validate" => parse_params(params).and_then(|p| handle_validate(state, p)),
        "convert_legacy" => parse_params(params).and_then(|p| handle_convert_legacy(state, p)),
        "parse_ai_response" => {
            parse_params(params).and_then(|p| handle_parse_ai_response(state, p))
        }
        "preview" => parse_params::<RecordParams>(params)
            .map(|p| Value::String(state.model.generate_preview(&p.record))),
        "search_text" => parse_params::<RecordParams>(params)
            .map(|p| Value::String(state.model.generate_search_text(&p.record))),
        "format_for_display" => parse_params::<RecordParams>(params)
            .and_then(|p| Ok(serde_json::to_value(state.model.format_for_display(&p.record))?)),
        "matches_query" => parse_params::<QueryParams>(params)
            .map(|p| Value::Bool(state.model.matches_query(&p.record, &p.query))),
        "apply_update" => parse_params(params).and_then(|p| handle_apply_update(state, p)),
        "storage_document" => parse_params::<RecordParams>(params)
            .map(|p| state.model.storage_document(&p.record)),
        "mock_summary" => Ok(mock_summary(chrono::Utc::now())),
        "config" => serde_json::to_value(state.model.config()).map_err(|e| anyhow!(e)),
        "shutdown" => handle_shutdown(state),
        _ => return None,
    };
    Some(result)
}

fn error_response(id: u64, err: anyhow::Error) -> JsonRpcResponse {
    if let Some(e) = err.downcast_ref::<ValidationError>() {
        return JsonRpcResponse::error(
            id,
            VALIDATION_FAILED,
            e.to_string(),
            Some(json!({ "errors": e.errors })),
        );
    }
    if let Some(e) = err.downcast_ref::<ConversionError>() {
        return JsonRpcResponse::error(
            id,
            CONVERSION_FAILED,
            e.to_string(),
            Some(json!({ "candidate": e.candidate })),
        );
    }
    if err.downcast_ref::<InvalidParams>().is_some() {
        return JsonRpcResponse::error(id, INVALID_PARAMS, err.to_string(), None);
    }
    JsonRpcResponse::error(id, INTERNAL_ERROR, err.to_string(), None)
}

fn process_request(state: &mut SidecarState, request: JsonRpcRequest) -> JsonRpcResponse {
    match dispatch(state, &request.method, request.params) {
        Some(Ok(value)) => JsonRpcResponse::success(request.id, value),
        Some(Err(e)) => error_response(request.id, e),
        None => JsonRpcResponse::error(
            request.id,
            METHOD_NOT_FOUND,
            format!("Unknown method: {}", request.method),
            None,
        ),
    }
}

/// Handle one input line; `None` for blank lines
fn process_line(state: &mut SidecarState, line: &str) -> Option<JsonRpcResponse> {
    if line.trim().is_empty() {
        return None;
    }

    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Failed to parse request: {}", e);
            let message = format!("Parse error: {}", e);
            return Some(JsonRpcResponse::error(0, PARSE_ERROR, message, None));
        }
    };

    log::debug!("Received request: {} (id={})", request.method, request.id);
    Some(process_request(state, request))
}

fn write_response(response: &JsonRpcResponse) -> Result<()> {
    let encoded = serde_json::to_string(response)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", encoded)?;
    handle.flush()?;
    Ok(())
}

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Summary Sidecar PANIC: {}", panic_info);
        if let Some(location) = panic_info.location() {
            eprintln!("  at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    notebuddy::init_logging();

    let config = match SummaryConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {:#}", e);
            SummaryConfig::default()
        }
    };
    let mut state = SidecarState::new(config);

    log::info!("Summary Sidecar starting...");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("Failed to read line: {}", e);
                continue;
            }
        };

        if let Some(response) = process_line(&mut state, &line) {
            if let Err(e) = write_response(&response) {
                log::error!("Failed to write response: {}", e);
            }
        }

        if !state.running {
            break;
        }
    }

    log::info!("Summary Sidecar shutting down");
}
