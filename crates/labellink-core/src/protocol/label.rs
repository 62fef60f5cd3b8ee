//! Label template construction.

/// Wrap raw label text in the fixed ZPL template.
///
/// Start-format, field origin, font, field data, field separator,
/// end-format. The payload goes into the field-data block as-is.
pub fn label_template(label_data: &str) -> String {
    format!("^XA^FO50,50^A0N,50,50^FD{}^FS^XZ", label_data)
}
