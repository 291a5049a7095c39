use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};
use ErrorMessage::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
}

#[derive(Debug)]
pub enum ErrorMessage {
    MalformedRecord,
    InvalidYear,
    InvalidPrice,
}

impl ErrorMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            MalformedRecord => "Wrong number of fields",
            InvalidYear => "Invalid year",
            InvalidPrice => "Invalid price",
        }
    }
}

impl PartialEq for ErrorMessage {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl From<ErrorMessage> for String {
    fn from(val: ErrorMessage) -> Self {
        val.as_str().to_string()
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Error for ErrorMessage {}

impl Display for Vehicle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "VIN: {} | Make: {} | Model: {} | Year: {} | Price: {:.2}",
            self.vin, self.make, self.model, self.year, self.price
        )
    }
}

#[allow(dead_code)]
impl Vehicle {
    pub fn new(vin: &str, make: &str, model: &str, year: i32, price: f64) -> Self {
        Vehicle {
            vin: vin.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year,
            price,
        }
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    pub fn to_line(&self) -> String {
        // commas inside make/model would shift the field count
        format!(
            "{},{},{},{},{:.2}",
            self.vin,
            self.make.replace(',', " "),
            self.model.replace(',', " "),
            self.year,
            self.price
        )
    }

    pub fn from_line(line: &str) -> Result<Self, ErrorMessage> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 5 {
            return Err(MalformedRecord);
        }
        let year = match fields[3].trim().parse::<i32>() {
            Ok(year) => year,
            Err(_) => return Err(InvalidYear),
        };
        let price = match fields[4].trim().parse::<f64>() {
            Ok(price) => price,
            Err(_) => return Err(InvalidPrice),
        };
        Ok(Vehicle {
            vin: fields[0].trim().to_string(),
            make: fields[1].trim().to_string(),
            model: fields[2].trim().to_string(),
            year,
            price,
        })
    }
}
