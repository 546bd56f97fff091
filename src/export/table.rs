use std::io::Write;

use serde::Serialize;

use crate::data::model::RegionRecord;
use crate::error::ExportError;

pub const CSV_HEADER: [&str; 5] = [
    "State",
    "AQI",
    "Hospital Admissions",
    "Income Level",
    "Product Suggestion",
];

/// Flat row written by both table exporters.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    state: &'a str,
    aqi: u16,
    hospital_admissions: u32,
    income_level: &'a str,
    product_suggestion: &'a str,
}

impl<'a> From<&'a RegionRecord> for ExportRow<'a> {
    fn from(r: &'a RegionRecord) -> Self {
        ExportRow {
            state: r.name,
            aqi: r.aqi,
            hospital_admissions: r.hospital_admissions,
            income_level: r.income_level.label(),
            product_suggestion: r.product_suggestion(),
        }
    }
}

/// Write the view as CSV, one row per record in view order. Fields are quoted
/// as needed. Returns the number of records written.
pub fn export_csv<W: Write>(view: &[&RegionRecord], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for record in view {
        let row = ExportRow::from(*record);
        csv_writer.write_record([
            row.state,
            &row.aqi.to_string(),
            &row.hospital_admissions.to_string(),
            row.income_level,
            row.product_suggestion,
        ])?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(view.len())
}

/// Write the view as a pretty-printed JSON array of objects.
pub fn export_json<W: Write>(view: &[&RegionRecord], writer: W) -> Result<usize, ExportError> {
    let rows: Vec<ExportRow<'_>> = view.iter().map(|r| ExportRow::from(*r)).collect();
    serde_json::to_writer_pretty(writer, &rows)?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::IncomeLevel;

    fn delhi() -> RegionRecord {
        RegionRecord {
            id: "DL",
            name: "Delhi",
            aqi: 290,
            hospital_admissions: 45_000,
            income_level: IncomeLevel::Medium,
        }
    }

    #[test]
    fn single_record_csv() {
        let record = delhi();
        let mut buf = Vec::new();
        let count = export_csv(&[&record], &mut buf).unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        let expected = format!(
            "State,AQI,Hospital Admissions,Income Level,Product Suggestion\n\
             Delhi,290,45000,Medium,\"{}\"\n",
            IncomeLevel::Medium.product_suggestion()
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn csv_round_trips_through_reader() {
        let record = delhi();
        let mut buf = Vec::new();
        export_csv(&[&record], &mut buf).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER);
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.len(), 5);
        assert_eq!(&row[4], record.product_suggestion());
    }

    #[test]
    fn empty_view_writes_header_only() {
        let mut buf = Vec::new();
        assert_eq!(export_csv(&[], &mut buf).unwrap(), 0);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "State,AQI,Hospital Admissions,Income Level,Product Suggestion\n"
        );
    }

    #[test]
    fn json_export() {
        let record = delhi();
        let mut buf = Vec::new();
        assert_eq!(export_json(&[&record], &mut buf).unwrap(), 1);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["state"], "Delhi");
        assert_eq!(value[0]["aqi"], 290);
        assert_eq!(value[0]["income_level"], "Medium");
    }
}
