use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use visitor_counter_core::contract::{CountResponse, ErrorResponse, INTERNAL_SERVER_ERROR};
use visitor_counter_core::logging::{log_error, log_info};
use visitor_counter_core::service::CounterService;
use visitor_counter_core::store::CounterStore;

const COMPONENT: &str = "counter_handler";

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

pub fn handle_counter_event<S: CounterStore>(
    event: Value,
    service: &CounterService<S>,
) -> ApiGatewayResponse {
    log_info(COMPONENT, "request_received", json!({ "event": event.clone() }));

    let method = request_method(&event);
    if method == Some("OPTIONS") {
        log_info(COMPONENT, "preflight_handled", json!({}));
        return json_response(200, json!({}));
    }

    match service.increment() {
        Ok(count) => json_response(200, CountResponse { count }),
        Err(error) => {
            log_error(
                COMPONENT,
                "request_failed",
                json!({
                    "method": method,
                    "error": error.message(),
                }),
            );
            json_response(500, ErrorResponse::internal(error.message()))
        }
    }
}

/// REST API events carry `httpMethod`; HTTP API (v2) events nest it under
/// `requestContext.http.method`.
pub fn request_method(event: &Value) -> Option<&str> {
    event
        .get("httpMethod")
        .and_then(Value::as_str)
        .or_else(|| {
            event
                .get("requestContext")
                .and_then(|context| context.get("http"))
                .and_then(|http| http.get("method"))
                .and_then(Value::as_str)
        })
}

pub fn cors_headers() -> Value {
    json!({
        "Access-Control-Allow-Origin": ALLOW_ORIGIN,
        "Access-Control-Allow-Headers": ALLOW_HEADERS,
        "Access-Control-Allow-Methods": ALLOW_METHODS,
        "Content-Type": "application/json",
    })
}

fn json_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    let body = match serde_json::to_string(&payload) {
        Ok(value) => value,
        Err(error) => {
            return ApiGatewayResponse {
                status_code: 500,
                headers: cors_headers(),
                body: json!({
                    "error": INTERNAL_SERVER_ERROR,
                    "message": error.to_string(),
                })
                .to_string(),
            };
        }
    };

    ApiGatewayResponse {
        status_code,
        headers: cors_headers(),
        body,
    }
}
