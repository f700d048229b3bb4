//! CSV reading and writing for lead import, export and the sample template.

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use crate::fields;
use crate::lead::{Lead, RawFields};

/// UTF-8 byte-order mark some spreadsheet tools prepend.
const UTF8_BOM: &str = "\u{feff}";

/// Header row of exported files.
pub const EXPORT_HEADERS: &[&str] = &[
    "Full Name",
    "Email",
    "Phone",
    "City",
    "Property Type",
    "BHK",
    "Purpose",
    "Budget Min",
    "Budget Max",
    "Timeline",
    "Source",
    "Status",
    "Notes",
    "Tags",
    "Created At",
    "Updated At",
];

pub const TEMPLATE_FILENAME: &str = "buyer_leads_template.csv";
pub const EXPORT_FILENAME: &str = "buyers.csv";

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("file is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse an uploaded CSV body into one [`RawFields`] per data row.
///
/// Headers are trimmed; values are kept as received for the validator.
/// Short rows simply lack the trailing columns and extra cells are dropped.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<RawFields>, CsvError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(to_raw_fields(&headers, &record?));
    }
    Ok(rows)
}

fn to_raw_fields(headers: &StringRecord, record: &StringRecord) -> RawFields {
    headers
        .iter()
        .zip(record.iter())
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Render leads with the human-readable export header.
pub fn export_leads(leads: &[Lead]) -> Result<String, CsvError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for lead in leads {
        let f = &lead.fields;
        let budget_min = f.budget_min.to_string();
        let budget_max = f.budget_max.to_string();
        let tags = f.tags.join(", ");
        let created_at = lead.created_at.to_rfc3339();
        let updated_at = lead.updated_at.to_rfc3339();
        let record: [&str; 16] = [
            &f.full_name,
            &f.email,
            &f.phone,
            f.city.code(),
            f.property_type.code(),
            f.bhk.map(|b| b.code()).unwrap_or_default(),
            f.purpose.code(),
            &budget_min,
            &budget_max,
            f.timeline.code(),
            f.source.code(),
            f.status.code(),
            f.notes.as_deref().unwrap_or_default(),
            &tags,
            &created_at,
            &updated_at,
        ];
        writer.write_record(record)?;
    }

    finish(writer)
}

/// Sample rows using the import column names.
const TEMPLATE_ROWS: &[[&str; 14]] = &[
    [
        "John Doe",
        "john.doe@example.com",
        "9876543210",
        "mumbai",
        "apartment",
        "2bhk",
        "buy",
        "5000000",
        "8000000",
        "3months",
        "website",
        "new",
        "Looking for a 2BHK apartment in Mumbai",
        "urgent, first-time-buyer",
    ],
    [
        "Jane Smith",
        "jane.smith@example.com",
        "9876543211",
        "delhi",
        "villa",
        "3bhk",
        "investment",
        "10000000",
        "15000000",
        "6months",
        "referral",
        "contacted",
        "Interested in villa for investment",
        "investor, high-budget",
    ],
];

/// The downloadable import template: import headers plus two sample rows.
pub fn template() -> Result<String, CsvError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(fields::WRITABLE)?;
    for row in TEMPLATE_ROWS {
        writer.write_record(row)?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, CsvError> {
    let bytes = writer.into_inner().map_err(|e| CsvError::Io(e.into_error()))?;
    // Only `&str` values were written.
    String::from_utf8(bytes).map_err(|e| CsvError::Encoding(e.utf8_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::test_support::apartment_fields;
    use crate::validation::validate_lead;

    #[test]
    fn rows_are_keyed_by_trimmed_header() {
        let body = b" full_name , email\nAsha, asha@example.com \n";
        let rows = parse_rows(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["full_name"], "Asha");
        assert_eq!(rows[0]["email"], " asha@example.com ");
    }

    #[test]
    fn bom_and_short_rows_are_tolerated() {
        let body = "\u{feff}full_name,email,phone\nAsha,a@example.com\n".as_bytes();
        let rows = parse_rows(body).unwrap();
        assert_eq!(rows[0]["full_name"], "Asha");
        assert!(!rows[0].contains_key("phone"));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        assert!(parse_rows(b"full_name,email\n").unwrap().is_empty());
        assert!(parse_rows(b"").unwrap().is_empty());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = parse_rows(&[0x66, 0xff, 0xfe, 0x0a]).unwrap_err();
        assert!(matches!(err, CsvError::Encoding(_)));
    }

    #[test]
    fn template_rows_pass_validation() {
        let rows = parse_rows(template().unwrap().as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert!(validate_lead(row).is_ok(), "{row:?}");
        }
        assert_eq!(rows[1]["tags"], "investor, high-budget");
    }

    #[test]
    fn export_uses_display_header_and_codes() {
        let mut fields = apartment_fields();
        fields.tags = vec!["vip".into(), "nri".into()];
        fields.notes = Some("call, then email".into());
        let lead = Lead {
            id: 1,
            fields,
            owner_id: "anonymous".into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let out = export_leads(&[lead]).unwrap();
        let mut lines = out.lines();
        assert!(lines.next().unwrap().starts_with("Full Name,Email,Phone,City"));
        let row = lines.next().unwrap();
        assert!(
            row.starts_with("John Doe,john.doe@example.com,9876543210,mumbai,apartment,2bhk,buy")
        );
        assert!(row.contains("\"call, then email\",\"vip, nri\""));
    }
}
