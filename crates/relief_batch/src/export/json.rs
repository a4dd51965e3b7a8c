use serde::Serialize;

pub(crate) fn write_json<T: Serialize>(
    items: &[T],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, items)?;
    Ok(())
}
