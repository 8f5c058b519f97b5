use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use visitor_counter_core::logging::log_info;
use visitor_counter_core::service::CounterService;
use visitor_counter_lambda::adapters::dynamodb::DynamoDbCounterStore;
use visitor_counter_lambda::config::CounterConfig;
use visitor_counter_lambda::handlers::counter::{handle_counter_event, ApiGatewayResponse};

async fn handle_request(
    service: &CounterService<DynamoDbCounterStore>,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_counter_event(event.payload, service))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = CounterConfig::from_env();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let service = CounterService::new(DynamoDbCounterStore::from_sdk_config(&aws_config, &config));

    log_info(
        "visitor_counter",
        "runtime_started",
        json!({ "table_name": service.store().table_name() }),
    );

    let service = &service;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(service, event).await
    }))
    .await
}
