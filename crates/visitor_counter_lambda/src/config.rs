use visitor_counter_core::contract::DEFAULT_TABLE_NAME;

pub const TABLE_NAME_ENV: &str = "DYNAMODB_TABLE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    pub table_name: String,
}

impl CounterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values fall back to the default table.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let table_name = lookup(TABLE_NAME_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        Self { table_name }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}
