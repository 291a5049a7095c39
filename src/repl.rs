use {
    crate::{inventory::Inventory, vehicle::Vehicle},
    clap::{crate_name, Parser, Subcommand},
    std::{
        error::Error,
        fmt::{self, Display, Formatter},
        io::{stdin, stdout, Write},
    },
    ErrorMessage::*,
};

struct Prompt;

#[derive(Parser, Debug)]
struct Repl {
    #[clap(subcommand)]
    cmd: Commands,
}

#[derive(Parser, Debug)]
pub struct Cli {
    file_path: Option<String>,
    #[clap(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Add {
        vin: String,
        make: String,
        model: String,
        year: i32,
        price: f64,
    },
    Update {
        vin: String,
        #[clap(short, long)]
        year: Option<i32>,
        #[clap(short, long)]
        price: Option<f64>,
    },
    Remove {
        vin: String,
    },
    List,
    Export {
        file_path: String,
    },
    Exit,
    ForceExit,
}

#[derive(Debug)]
#[allow(dead_code)]
pub enum ErrorMessage {
    InvalidYear,
    InvalidPrice,
    CouldNotExport,
    InteractiveModeOnly,
}

impl ErrorMessage {
    pub(crate) fn as_str(&self) -> &'static str {
        match *self {
            InvalidYear => "Invalid year",
            InvalidPrice => "Invalid price",
            CouldNotExport => "Could not export the inventory",
            InteractiveModeOnly => "This command can only be used on interactive mode",
        }
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
struct ReplError {
    message: String,
}

impl Display for ReplError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "REPL Error: {}", self.message)
    }
}

impl Error for ReplError {}

impl ReplError {
    pub fn boxed(message: String) -> Box<dyn Error> {
        Box::new(ReplError { message })
    }

    pub fn base(message: ErrorMessage) -> Box<dyn Error> {
        ReplError::boxed(format!("{}", message))
    }
}

impl Prompt {
    fn optional_year() -> Result<Option<i32>, Box<dyn Error>> {
        println!("Enter the new year (leave empty to keep the current one):");
        let mut year = String::new();
        match stdin().read_line(&mut year) {
            Ok(_) => {
                let year = year.trim();
                if year.is_empty() {
                    return Ok(None);
                }
                match year.parse::<i32>() {
                    Ok(year) => Ok(Some(year)),
                    Err(_) => Err(ReplError::base(InvalidYear)),
                }
            }
            Err(_) => Err(ReplError::base(InvalidYear)),
        }
    }

    fn optional_price() -> Result<Option<f64>, Box<dyn Error>> {
        println!("Enter the new price (leave empty to keep the current one):");
        let mut price = String::new();
        match stdin().read_line(&mut price) {
            Ok(_) => {
                let price = price.trim();
                if price.is_empty() {
                    return Ok(None);
                }
                match price.parse::<f64>() {
                    Ok(price) => Ok(Some(price)),
                    Err(_) => Err(ReplError::base(InvalidPrice)),
                }
            }
            Err(_) => Err(ReplError::base(InvalidPrice)),
        }
    }
}

fn readline() -> Result<String, Box<dyn Error>> {
    print!("> ");
    stdout().flush().unwrap();
    let mut buffer = String::new();
    match stdin().read_line(&mut buffer) {
        Ok(_) => {
            let trimmed_input = buffer.trim().to_string();
            let line = format!("{} {}", crate_name!(), trimmed_input);
            Ok(line)
        }
        Err(e) => Err(Box::new(e)),
    }
}

fn resolve_cmd(cmd: Commands, inventory: &mut Inventory) -> Result<bool, Box<dyn Error>> {
    use Commands::*;
    match cmd {
        Add {
            vin,
            make,
            model,
            year,
            price,
        } => {
            inventory.add(Vehicle::new(&vin, &make, &model, year, price))?;
            println!("Vehicle '{} {}' added.", make, model);
            Ok(true)
        }
        Update { vin, year, price } => {
            let (year, price) = if year.is_none() && price.is_none() {
                (Prompt::optional_year()?, Prompt::optional_price()?)
            } else {
                (year, price)
            };
            let vehicle = inventory.update(&vin, year, price)?;
            println!("Vehicle '{} {}' updated.", vehicle.make, vehicle.model);
            Ok(true)
        }
        Remove { vin } => {
            let vehicle = inventory.remove(&vin)?;
            println!("Vehicle '{} {}' removed.", vehicle.make, vehicle.model);
            Ok(true)
        }
        List => {
            match inventory.list() {
                Some(vehicles) => {
                    println!("Registered vehicles:");
                    for vehicle in vehicles {
                        println!("- {}", vehicle);
                    }
                }
                None => println!("No vehicles registered."),
            }
            Ok(true)
        }
        Export { file_path } => match inventory.export(&file_path) {
            Ok(_) => {
                println!("Inventory exported to {}.", file_path);
                Ok(true)
            }
            Err(_) => Err(ReplError::base(CouldNotExport)),
        },
        Exit => match confirm_exit() {
            Ok(true) => Ok(false),
            Ok(false) => Ok(true),
            Err(e) => Err(e),
        },
        ForceExit => Ok(false),
    }
}

fn respond(line: &str, inventory: &mut Inventory) -> Result<bool, Box<dyn Error>> {
    let args = line
        .split_whitespace()
        .map(|s| s.to_string())
        .collect::<Vec<String>>();
    let cli = Repl::try_parse_from(args)?;
    resolve_cmd(cli.cmd, inventory)
}

fn confirm_exit() -> Result<bool, Box<dyn Error>> {
    println!("Are you sure you want to exit? (y/n)");
    let mut input = String::new();
    match stdin().read_line(&mut input) {
        Ok(_) => match input.trim() {
            "y" => Ok(true),
            "n" => Ok(false),
            _ => confirm_exit(),
        },
        Err(_) => confirm_exit(),
    }
}

fn run_repl(inventory: &mut Inventory) -> Result<(), Box<dyn Error>> {
    loop {
        let line = readline()?;
        match respond(&line, inventory) {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) => eprintln!("{}", e),
        }
    }
    Ok(())
}

pub fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let file_path = args
        .file_path
        .unwrap_or_else(|| String::from("./dealership.txt"));
    let mut inventory = Inventory::open(file_path.as_str());

    if let Some(cmd) = args.cmd {
        use Commands::*;
        match cmd {
            Exit => Err(ReplError::base(InteractiveModeOnly)),
            ForceExit => Err(ReplError::base(InteractiveModeOnly)),
            _ => {
                resolve_cmd(cmd, &mut inventory)?;
                Ok(())
            }
        }
    } else {
        run_repl(&mut inventory)
    }
}
