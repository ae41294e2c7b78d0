//! Flat-file export of the parts table.

use thiserror::Error;

use atelier_inventory::Part;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv flush failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv output was not utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Full-table extract in CSV, one record per part.
///
/// Money renders as bare two-decimal values so spreadsheets treat the
/// columns as numbers.
pub fn parts_to_csv(parts: &[Part]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        "id",
        "part_number",
        "name",
        "category",
        "color",
        "qty",
        "cost",
        "price",
    ])?;

    for part in parts {
        writer.write_record([
            part.id.to_string(),
            part.part_number.clone(),
            part.name.clone(),
            part.category.label().to_string(),
            part.color.label().to_string(),
            part.qty.to_string(),
            part.cost.as_decimal(),
            part.price.as_decimal(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use atelier_core::{Money, PartId};
    use atelier_inventory::{Category, Color};

    fn part(id: i64, sku: &str) -> Part {
        Part {
            id: PartId::from_raw(id),
            part_number: sku.to_string(),
            name: "Strap, webbing".to_string(),
            category: Category::Webbing,
            color: Color::Natural,
            qty: 12,
            cost: Money::from_cents(199),
            price: Money::from_cents(450),
        }
    }

    #[test]
    fn header_row_matches_the_table_columns() {
        let csv = parts_to_csv(&[]).unwrap();
        assert_eq!(
            csv.lines().next().unwrap(),
            "id,part_number,name,category,color,qty,cost,price"
        );
    }

    #[test]
    fn records_render_labels_and_decimal_money() {
        let csv = parts_to_csv(&[part(3, "W-9")]).unwrap();
        let record = csv.lines().nth(1).unwrap();
        assert_eq!(record, "3,W-9,\"Strap, webbing\",Webbing,Natural,12,1.99,4.50");
    }

    #[test]
    fn one_record_per_part() {
        let csv = parts_to_csv(&[part(1, "A"), part(2, "B")]).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }
}
