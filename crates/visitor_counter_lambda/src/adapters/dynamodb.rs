use std::collections::HashMap;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use visitor_counter_core::contract::{
    CounterRecord, COUNTER_KEY_ATTRIBUTE, COUNTER_VALUE_ATTRIBUTE,
};
use visitor_counter_core::store::{AddOutcome, CounterStore};

use crate::config::CounterConfig;

/// Error codes DynamoDB raises when the counter item (or its table) is absent.
const NOT_FOUND_ERROR_CODES: [&str; 2] = ["ValidationException", "ResourceNotFoundException"];

#[derive(Clone)]
pub struct DynamoDbCounterStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbCounterStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig, config: &CounterConfig) -> Self {
        Self::new(
            aws_sdk_dynamodb::Client::new(sdk_config),
            config.table_name.clone(),
        )
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl CounterStore for DynamoDbCounterStore {
    fn atomic_add(&self, key: &str, field: &str, delta: u64) -> AddOutcome {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let counter_id = key.to_string();
        let field_name = field.to_string();

        let result = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .update_item()
                    .table_name(table_name)
                    .key(COUNTER_KEY_ATTRIBUTE, AttributeValue::S(counter_id))
                    .update_expression("ADD #count :inc")
                    .expression_attribute_names("#count", field_name)
                    .expression_attribute_values(":inc", AttributeValue::N(delta.to_string()))
                    .return_values(ReturnValue::UpdatedNew)
                    .send()
                    .await
            })
        });

        match result {
            Ok(output) => added_value(output.attributes(), field),
            Err(error) => classify_add_error(
                error.code(),
                &format!("failed to update counter: {}", DisplayErrorContext(&error)),
            ),
        }
    }

    fn put(&self, record: &CounterRecord) -> Result<(), String> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let counter_id = record.id.clone();
        let value = record.value.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .item(COUNTER_KEY_ATTRIBUTE, AttributeValue::S(counter_id))
                    .item(COUNTER_VALUE_ATTRIBUTE, AttributeValue::N(value))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!("failed to create counter: {}", DisplayErrorContext(&error))
                    })
            })
        })
    }
}

/// Maps an `UpdateItem` failure onto the add outcome.
pub fn classify_add_error(code: Option<&str>, message: &str) -> AddOutcome {
    match code {
        Some(code) if NOT_FOUND_ERROR_CODES.contains(&code) => AddOutcome::NotFound,
        _ => AddOutcome::Failed(message.to_string()),
    }
}

/// Reads the post-update value out of `UPDATED_NEW` attributes. A response
/// without the attribute counts as zero.
///
/// This runs after DynamoDB has applied the `ADD`. A stored value that is not
/// a non-negative integer (negative or fractional, written outside this
/// service) still gets incremented, but comes back as `Failed`.
pub fn added_value(
    attributes: Option<&HashMap<String, AttributeValue>>,
    field: &str,
) -> AddOutcome {
    match attributes.and_then(|values| values.get(field)) {
        None => AddOutcome::Updated(0),
        Some(AttributeValue::N(number)) => parse_count(number)
            .map(AddOutcome::Updated)
            .unwrap_or_else(AddOutcome::Failed),
        Some(other) => AddOutcome::Failed(format!(
            "attribute '{field}' is not a number: {other:?}"
        )),
    }
}

// DynamoDB numbers are decimal strings; integral values may carry a ".0" tail.
fn parse_count(number: &str) -> Result<u64, String> {
    let trimmed = number.trim();
    let integral = trimmed
        .split_once('.')
        .filter(|(_, fraction)| fraction.chars().all(|digit| digit == '0'))
        .map(|(whole, _)| whole)
        .unwrap_or(trimmed);
    integral
        .parse::<u64>()
        .map_err(|error| format!("invalid counter value '{number}': {error}"))
}
