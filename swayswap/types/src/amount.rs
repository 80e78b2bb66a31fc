use crate::{StdError, StdResult};

/// Parse an asset amount given either in decimal or as a `0x`-prefixed hex
/// string, e.g. `2000000000000` or `0x44364C5BB`.
pub fn parse_amount(input: &str) -> StdResult<u64> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(StdError::invalid_amount(input, "empty string"));
    }

    match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex_str) => u64::from_str_radix(hex_str, 16),
        None => trimmed.parse(),
    }
    .map_err(|err| StdError::invalid_amount(input, err))
}

// ----------------------------------- tests -----------------------------------
