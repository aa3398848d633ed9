use std::path::PathBuf;

use clap::Parser;

use crate::progress::ChartMode;

#[derive(Parser, Debug)]
#[command(name = "revisr", version = env!("CARGO_PKG_VERSION"))]
pub struct RevisrCli {
    #[arg(short = 'i', long = "catalog", value_name = "PATH", default_value = DEFAULT_CATALOG, help = "Catalog JSON file to practice from.", long_help = CATALOG_HELP)]
    pub catalog: PathBuf,
    #[arg(short = 'o', long = "out", value_name = "PATH", default_value = crate::export::DEFAULT_EXPORT_FILE, help = "File to export updated counters to.", long_help = OUT_HELP)]
    pub out: PathBuf,
    #[arg(short = 'c', long = "count", value_name = "COUNT", default_value_t = 1, help = "Number of questions per draw.", long_help = COUNT_HELP)]
    pub count: usize,
    #[arg(short = 'm', long = "chart", default_value_t = ChartMode::Count, value_name = "MODE", help = "Progress chart mode", long_help = CHART_HELP)]
    pub chart: ChartMode,
    #[arg(long = "log", value_name = "PATH", help = "Log file path.", long_help = LOG_HELP)]
    pub log: Option<PathBuf>,
}

const DEFAULT_CATALOG: &str = "./data/data.json";

const CATALOG_HELP: &str = r#"Catalog JSON file to practice from. Expected shape:
    { "subjects": [ { "name": "...", "subtopics": [ { "name": "...", "counter": 0 } ] } ]}"#;
const OUT_HELP: &str = r#"File to export updated counters to when pressing 's'. Written in the same shape as the catalog, so it can be loaded again with --catalog. If the catalog failed to load, an existing file at this path is never overwritten."#;
const COUNT_HELP: &str = r#"Number of distinct questions shown per draw. Must not exceed the number of subtopics in the catalog."#;
const CHART_HELP: &str = r#"Progress chart mode. Possible values:
    count   - Completed subtopics per subject, plus those left to do
    percent - Completed percentage per subject, plus the percentage left to do"#;
const LOG_HELP: &str = r#"Log file path. Defaults to revisr/revisr.log under the user data directory. Verbosity is controlled with REVISR_LOG (eg REVISR_LOG=debug)."#;
