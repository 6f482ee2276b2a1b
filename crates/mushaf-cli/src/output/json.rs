use mushaf_core::error::MushafError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), MushafError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
