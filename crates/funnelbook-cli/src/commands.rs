use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub(crate) enum OpportunityCommand {
    /// Record a brand-new opportunity; the sequence number is assigned.
    New {
        #[arg(long)]
        client_id: u64,
        #[arg(long)]
        client_name: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        value: f64,
        #[arg(long)]
        close_date: String,
        #[arg(long)]
        status: String,
    },
    /// Append a progress snapshot for an existing opportunity.
    Advance {
        #[arg(long)]
        client_id: u64,
        #[arg(long)]
        number: u64,
        #[arg(long)]
        status: String,
    },
    /// Latest snapshot per opportunity number for one client.
    List {
        #[arg(long)]
        client_id: u64,
    },
}

#[derive(Subcommand)]
pub(crate) enum PlanCommand {
    /// Append a plan revision. Omitted fields carry forward from the
    /// client's current plan.
    Save {
        #[arg(long)]
        client_id: u64,
        #[arg(long)]
        fin_analysis: Option<String>,
        #[arg(long)]
        fin_analysis_review: Option<String>,
        #[arg(long)]
        value_chain: Option<String>,
        #[arg(long)]
        value_chain_review: Option<String>,
        #[arg(long)]
        cash_flow: Option<String>,
        #[arg(long)]
        cash_flow_review: Option<String>,
        #[arg(long)]
        risks: Option<String>,
    },
    /// The client's current plan (latest recorded row).
    Show {
        #[arg(long)]
        client_id: u64,
    },
}

#[derive(Subcommand)]
pub(crate) enum VisitCommand {
    /// Append one visit-log entry.
    Log {
        #[arg(long)]
        client_id: u64,
        #[arg(long)]
        contact_date: String,
        #[arg(long)]
        contact_name: String,
        #[arg(long, default_value = "")]
        topics: String,
        #[arg(long, default_value = "")]
        outcomes: String,
        #[arg(long, default_value = "")]
        next_objective: String,
        #[arg(long)]
        next_date: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ReportCommand {
    /// Download one collection as a spreadsheet byte stream.
    Export {
        #[arg(long)]
        collection: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
