//! Value parsers for numeric CLI arguments

/// Validate positive integer value
pub fn validate_positive_int(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}

/// Validate a positive millisecond count
pub fn validate_positive_millis(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err("Wait must be at least 1 millisecond".to_string()),
        Ok(ms) => Ok(ms),
        Err(_) => Err(format!("'{}' is not a valid number of milliseconds", value)),
    }
}
