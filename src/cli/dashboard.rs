//! Dashboard CLI command

use clap::Args;

use crate::config::settings::Settings;
use crate::error::FintrackResult;
use crate::reports::DashboardReport;
use crate::storage::Storage;

use super::parse_date_or_today;

#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    /// Compute as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Emit JSON instead of the text summary
    #[arg(long)]
    pub json: bool,
}

pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    args: DashboardArgs,
) -> FintrackResult<()> {
    let as_of = parse_date_or_today(args.as_of.as_deref())?;
    let report = DashboardReport::generate(storage, settings, as_of)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}
