use std::fs::File;
use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{ClientRecord, NewClient};

#[derive(Deserialize, Validate)]
/// Form data for adding a single directory entry by hand.
pub struct AddClientForm {
    #[validate(length(min = 1))]
    pub company_name: String,
    pub identification: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub department: String,
}

impl AddClientForm {
    pub fn into_new_client(self) -> NewClient {
        NewClient::new(ClientRecord {
            company_name: self.company_name,
            identification: self.identification,
            name: self.name,
            surname: self.surname,
            phone: self.phone,
            address: self.address,
            city: self.city,
            department: self.department,
            comment: String::new(),
        })
    }
}

#[derive(MultipartForm)]
pub struct UploadClientsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadClientsForm {
    /// Parses the uploaded spreadsheet into directory entries.
    pub fn parse(&self) -> Result<Vec<NewClient>, csv::Error> {
        parse_clients(File::open(self.csv.file.path())?)
    }
}

/// Canonical field a spreadsheet column maps onto. Unknown columns are
/// ignored; both the English schema names and the Spanish headers the
/// sales sheets use are accepted.
fn canonical_field(header: &str) -> Option<&'static str> {
    let normalized = header.trim().to_lowercase().replace(' ', "_");
    match normalized.as_str() {
        "company_name" | "company" | "empresa" => Some("company_name"),
        "identification" | "identificacion" | "identificación" | "nit" => Some("identification"),
        "name" | "nombre" => Some("name"),
        "surname" | "apellido" => Some("surname"),
        "phone" | "telefono" | "teléfono" => Some("phone"),
        "address" | "direccion" | "dirección" => Some("address"),
        "city" | "ciudad" => Some("city"),
        "department" | "departamento" => Some("department"),
        "comment" | "comentario" => Some("comment"),
        _ => None,
    }
}

/// Coerces arbitrary spreadsheet rows into [`NewClient`] values. Total over
/// row shape: missing or unknown columns default to the empty string, short
/// and long rows are accepted.
fn parse_clients<Rd: Read>(reader: Rd) -> Result<Vec<NewClient>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let fields: Vec<Option<&'static str>> = headers.iter().map(canonical_field).collect();

    let mut clients = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let mut record = ClientRecord::default();

        for (i, value) in row.iter().enumerate() {
            let Some(Some(field)) = fields.get(i) else {
                continue;
            };
            let target = match *field {
                "company_name" => &mut record.company_name,
                "identification" => &mut record.identification,
                "name" => &mut record.name,
                "surname" => &mut record.surname,
                "phone" => &mut record.phone,
                "address" => &mut record.address,
                "city" => &mut record.city,
                "department" => &mut record.department,
                "comment" => &mut record.comment,
                _ => continue,
            };
            *target = value.to_string();
        }

        clients.push(NewClient::new(record));
    }

    Ok(clients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_spanish_headers() {
        let csv = "empresa,nit,nombre,apellido,telefono\nAcme,900123,Ana,Mora,555\n";
        let clients = parse_clients(Cursor::new(csv)).unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].company_name, "Acme");
        assert_eq!(clients[0].identification, "900123");
        assert_eq!(clients[0].surname, "Mora");
    }

    #[test]
    fn missing_and_unknown_columns_default_to_empty() {
        let csv = "company_name,favorite_color\nAcme,green\n";
        let clients = parse_clients(Cursor::new(csv)).unwrap();
        assert_eq!(clients[0].company_name, "Acme");
        assert_eq!(clients[0].phone, "");
        assert_eq!(clients[0].city, "");
    }

    #[test]
    fn short_rows_are_accepted() {
        let csv = "company_name,name,phone\nAcme\nBeta,Bob,42\n";
        let clients = parse_clients(Cursor::new(csv)).unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].company_name, "Acme");
        assert_eq!(clients[0].name, "");
        assert_eq!(clients[1].phone, "42");
    }

    #[test]
    fn values_are_trimmed() {
        let csv = "company_name,city\n  Acme  ,  Medellín \n";
        let clients = parse_clients(Cursor::new(csv)).unwrap();
        assert_eq!(clients[0].company_name, "Acme");
        assert_eq!(clients[0].city, "Medellín");
    }
}
