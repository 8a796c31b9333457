use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "barrierfree",
    version,
    about = "searchable directory of school accessibility records",
    long_about = "Barrierfree loads school accessibility records from a JSON endpoint or a published spreadsheet, scores them, and renders the searchable directory page.\n\nExamples:\n  barrierfree --url http://localhost:8080/api/schools -o page.html\n  barrierfree --sheet-id 1AbC --name 중학교 --city 수원시 --section schools\n  barrierfree --file schools.csv --format text\n\nTip: Use --config to keep the data source out of every invocation."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored terminal output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered page to FILE instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        long = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format: html, json or text (default: from --output extension, else html)."
    )]
    pub format: Option<String>,

    #[arg(
        long = "limit",
        value_name = "N",
        help_heading = "Output",
        help = "Maximum number of cards to render (default: 50 for JSON, 100 for spreadsheets)."
    )]
    pub limit: Option<usize>,

    #[arg(
        long = "fail-on-error",
        help_heading = "Output",
        help = "Exit non-zero when the dataset cannot be loaded."
    )]
    pub fail_on_error: bool,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Source",
        help = "Path to a YAML config file."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'u',
        long = "url",
        value_name = "URL",
        help_heading = "Source",
        help = "JSON endpoint returning an array of school records."
    )]
    pub url: Option<String>,

    #[arg(
        long = "sheet-id",
        value_name = "ID",
        help_heading = "Source",
        help = "Published spreadsheet id; rows are exported as CSV."
    )]
    pub sheet_id: Option<String>,

    #[arg(
        long = "sheet-name",
        value_name = "NAME",
        help_heading = "Source",
        help = "Sheet to export (default: Sheet1)."
    )]
    pub sheet_name: Option<String>,

    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Source",
        help = "Local .json or .csv dataset."
    )]
    pub file: Option<String>,

    #[arg(
        long = "strict-csv",
        help_heading = "Source",
        help = "Parse CSV with RFC 4180 quoting instead of the compatible scanner."
    )]
    pub strict_csv: bool,

    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "Source",
        help = "HTTP timeout in seconds (default: 10)."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 's',
        long = "section",
        value_name = "FRAGMENT",
        help_heading = "View",
        help = "Section to show (home, schools, stats, report, about); accepts a #fragment."
    )]
    pub section: Option<String>,

    #[arg(
        short = 'q',
        long = "query",
        value_name = "TEXT",
        help_heading = "View",
        help = "Live search over school and region names."
    )]
    pub query: Option<String>,

    #[arg(
        long = "name",
        value_name = "TEXT",
        help_heading = "View",
        help = "School name filter (combined with --city)."
    )]
    pub name: Option<String>,

    #[arg(
        long = "city",
        value_name = "TEXT",
        help_heading = "View",
        help = "City filter (combined with --name)."
    )]
    pub city: Option<String>,

    #[arg(
        long = "hero",
        value_name = "TEXT",
        help_heading = "View",
        help = "Search from the landing section; switches to the school list."
    )]
    pub hero: Option<String>,

    #[arg(
        long = "open",
        value_name = "N",
        help_heading = "View",
        help = "Open the detail view of the Nth rendered card (0-based)."
    )]
    pub open: Option<usize>,
}
