use crate::cli::args::CliArgs;
use crate::output::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    let sources = [
        args.url.is_some(),
        args.sheet_id.is_some(),
        args.file.is_some(),
    ]
    .iter()
    .filter(|set| **set)
    .count();
    if sources > 1 {
        return Err("use only one of --url, --sheet-id and --file".to_string());
    }
    if args.sheet_name.is_some() && args.url.is_some() {
        return Err("--sheet-name only applies to --sheet-id".to_string());
    }
    if args.limit == Some(0) {
        return Err("invalid limit, expected positive integer".to_string());
    }
    if args.timeout == Some(0) {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    if let Some(raw) = args.format.as_deref() {
        OutputFormat::parse(raw).ok_or_else(|| format!("invalid --format '{raw}'"))?;
    }
    if args.query.is_some() && (args.name.is_some() || args.city.is_some()) {
        return Err("use either --query or --name/--city, not both".to_string());
    }
    Ok(())
}
