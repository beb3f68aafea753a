use precheck_core::emit::{emit, EmissionReport};
use precheck_core::error::{CoreError, CoreResult};
use precheck_core::registry::parser::parse_registry;
use precheck_core::registry::validate::validate;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: docgen <path/to/checks.json> <output_root>");
        std::process::exit(2);
    }
    let registry_path = Path::new(&args[1]);
    let output_root = Path::new(&args[2]);

    match run(registry_path, output_root) {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        Err(CoreError::Validation(failure)) => {
            eprintln!("{}", serde_json::to_string_pretty(&failure).unwrap());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("docgen error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(registry_path: &Path, output_root: &Path) -> CoreResult<EmissionReport> {
    let registry_json = std::fs::read_to_string(registry_path)?;
    let records = parse_registry(&registry_json)?;
    let registry = validate(records)?;
    emit(&registry, output_root)
}
