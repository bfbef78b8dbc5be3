use std::fs::File;
use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::{ReaderBuilder, Trim};

use crate::domain::product::NewProduct;
use crate::domain::types::ProductId;

#[derive(MultipartForm)]
pub struct UploadProductsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadProductsForm {
    /// Parses the uploaded catalog sheet. Rows without an id are dropped;
    /// unparsable prices coerce to zero.
    pub fn parse(&self) -> Result<Vec<NewProduct>, csv::Error> {
        parse_products(File::open(self.csv.file.path())?)
    }
}

fn column<'a>(headers: &csv::StringRecord, row: &'a csv::StringRecord, name: &str) -> &'a str {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .and_then(|i| row.get(i))
        .unwrap_or("")
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_products<Rd: Read>(reader: Rd) -> Result<Vec<NewProduct>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();

    let mut products = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let Ok(id) = ProductId::new(column(&headers, &row, "id")) else {
            continue;
        };

        products.push(NewProduct::new(
            id,
            column(&headers, &row, "name").to_string(),
            column(&headers, &row, "brand").to_string(),
            column(&headers, &row, "description").to_string(),
            split_list(column(&headers, &row, "colors")),
            column(&headers, &row, "price1").parse().unwrap_or(0.0),
            column(&headers, &row, "price2").parse().unwrap_or(0.0),
            split_list(column(&headers, &row, "image_urls")),
        ));
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_catalog_rows() {
        let csv = "id,name,brand,colors,price1,price2\n\
                   rec1,Morral,Andino,Negro;Azul,89500,79500\n";
        let products = parse_products(Cursor::new(csv)).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "rec1");
        assert_eq!(products[0].colors, vec!["Negro", "Azul"]);
        assert_eq!(products[0].price1, 89500.0);
    }

    #[test]
    fn rows_without_id_are_dropped_and_bad_prices_coerce() {
        let csv = "id,name,brand,price1,price2\n\
                   ,Fantasma,X,1,2\n\
                   rec2,Bolso,Cumbre,abc,500\n";
        let products = parse_products(Cursor::new(csv)).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "rec2");
        assert_eq!(products[0].price1, 0.0);
        assert_eq!(products[0].price2, 500.0);
    }
}
