use crate::vehicle::Vehicle;
use chrono::{DateTime, Utc};
use log::{info, warn, Level as LogLevel, LevelFilter, Metadata, Record, SetLoggerError};
use serde::Serialize;
use serde_json;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};
use ErrorMessage::*;

#[derive(Debug)]
pub struct Inventory {
    pub vehicles: Vec<Vehicle>,
    pub file_path: PathBuf,
}

struct InventoryLogger;

impl log::Log for InventoryLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= LogLevel::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let time = chrono::Local::now().format("%H:%M:%S");
            println!("{} {} - {}", time, record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: InventoryLogger = InventoryLogger;

pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Info))
}

#[derive(Debug)]
pub enum ErrorMessage {
    DuplicateVin,
    VehicleNotFound,
    PersistenceFailure,
}

impl ErrorMessage {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            DuplicateVin => "A vehicle with this VIN already exists",
            VehicleNotFound => "Vehicle not found",
            PersistenceFailure => "Could not write the inventory file",
        }
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq for ErrorMessage {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

#[derive(Debug)]
pub struct InventoryError {
    pub kind: ErrorMessage,
    message: String,
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Inventory error: {}", self.message)
    }
}

impl Error for InventoryError {}

impl InventoryError {
    pub fn boxed(kind: ErrorMessage, details: Option<String>) -> Box<dyn Error> {
        let message = match &details {
            Some(details) => format!("{}: {}", kind, details),
            None => format!("{}", kind),
        };
        Box::new(InventoryError { kind, message })
    }

    pub fn duplicate(vin: &str) -> Box<dyn Error> {
        InventoryError::boxed(DuplicateVin, Some(format!("- {}", vin)))
    }

    pub fn not_found(vin: &str) -> Box<dyn Error> {
        InventoryError::boxed(VehicleNotFound, Some(format!("- {}", vin)))
    }

    pub fn persistence(cause: io::Error) -> Box<dyn Error> {
        InventoryError::boxed(PersistenceFailure, Some(cause.to_string()))
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    exported_at: DateTime<Utc>,
    vehicles: &'a [Vehicle],
}

#[allow(dead_code)]
impl Inventory {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Inventory {
            vehicles: Vec::new(),
            file_path: file_path.into(),
        }
    }

    pub fn open(file_path: impl Into<PathBuf>) -> Self {
        let mut inventory = Inventory::new(file_path);
        inventory.load();
        inventory
    }

    fn load(&mut self) {
        if !self.file_path.exists() {
            match File::create(&self.file_path) {
                Ok(_) => info!("Created inventory file {}", self.file_path.display()),
                Err(e) => warn!("Could not create {}: {}", self.file_path.display(), e),
            }
            return;
        }
        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Could not read {}: {}", self.file_path.display(), e);
                return;
            }
        };
        let reader = BufReader::new(file);
        for (number, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Could not read line {}: {}", number + 1, e);
                    continue;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Vehicle::from_line(line) {
                Ok(vehicle) => self.insert(vehicle),
                Err(e) => warn!("Skipped line {}: {}", number + 1, e),
            }
        }
        info!(
            "Loaded {} vehicles from {}",
            self.vehicles.len(),
            self.file_path.display()
        );
    }

    // later duplicate in the file replaces the earlier entry in place
    fn insert(&mut self, vehicle: Vehicle) {
        match self.position(&vehicle.vin) {
            Some(index) => self.vehicles[index] = vehicle,
            None => self.vehicles.push(vehicle),
        }
    }

    fn position(&self, vin: &str) -> Option<usize> {
        self.vehicles.iter().position(|v| v.vin == vin)
    }

    pub fn vehicle(&self, vin: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.vin == vin)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn add(&mut self, vehicle: Vehicle) -> Result<(), Box<dyn Error>> {
        if self.position(&vehicle.vin).is_some() {
            return Err(InventoryError::duplicate(&vehicle.vin));
        }
        info!("Vehicle {} {} added", vehicle.make, vehicle.model);
        self.vehicles.push(vehicle);
        self.save().map_err(InventoryError::persistence)
    }

    pub fn update(
        &mut self,
        vin: &str,
        year: Option<i32>,
        price: Option<f64>,
    ) -> Result<&Vehicle, Box<dyn Error>> {
        let index = match self.position(vin) {
            Some(index) => index,
            None => return Err(InventoryError::not_found(vin)),
        };
        if let Some(year) = year {
            self.vehicles[index].set_year(year);
        }
        if let Some(price) = price {
            self.vehicles[index].set_price(price);
        }
        info!(
            "Vehicle {} {} updated",
            self.vehicles[index].make, self.vehicles[index].model
        );
        self.save().map_err(InventoryError::persistence)?;
        Ok(&self.vehicles[index])
    }

    pub fn remove(&mut self, vin: &str) -> Result<Vehicle, Box<dyn Error>> {
        let index = match self.position(vin) {
            Some(index) => index,
            None => return Err(InventoryError::not_found(vin)),
        };
        let vehicle = self.vehicles.remove(index);
        info!("Vehicle {} {} removed", vehicle.make, vehicle.model);
        self.save().map_err(InventoryError::persistence)?;
        Ok(vehicle)
    }

    pub fn list(&self) -> Option<impl Iterator<Item = &Vehicle>> {
        if self.vehicles.is_empty() {
            None
        } else {
            Some(self.vehicles.iter())
        }
    }

    pub fn save(&self) -> io::Result<()> {
        match File::create(&self.file_path) {
            Ok(mut file) => {
                for vehicle in &self.vehicles {
                    writeln!(file, "{}", vehicle.to_line())?;
                }
                file.flush()
            }
            Err(e) => Err(e),
        }
    }

    pub fn export(&self, file_path: &str) -> io::Result<()> {
        let snapshot = Snapshot {
            exported_at: Utc::now(),
            vehicles: &self.vehicles,
        };
        match File::create(file_path) {
            Ok(mut file) => match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => file.write_all(json.as_bytes()),
                Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
            },
            Err(e) => Err(e),
        }
    }
}
