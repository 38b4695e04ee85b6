use crate::error::CliError;
use pager::request::PageResponse;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints one page per line so walks can be streamed into other tools.
pub fn print_line(response: &PageResponse) -> Result<(), CliError> {
    println!("{}", serde_json::to_string(response)?);
    Ok(())
}
