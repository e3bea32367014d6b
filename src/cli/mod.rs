//! Command-line shell for the marketplace client.
//!
//! Every subcommand opens one page: it resolves the page's route, runs the
//! route guard against the restored session and then drives that page's
//! view-model.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gigfinder",
    version,
    about = "Command-line client for the GigFinder service marketplace",
    after_help = "EXAMPLES:\n    \
                  gigfinder login --email a@b.co --password secret\n    \
                  gigfinder jobs post --title \"Fix tap\" --budget 500 --address Pune\n    \
                  gigfinder admin dashboard"
)]
pub struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Override API_BASE_URL
    #[arg(long, global = true, env = "API_BASE_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Request a login code by SMS
    SendOtp {
        #[arg(long)]
        phone: String,
    },

    /// Sign in with the code received by SMS
    VerifyOtp {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        otp: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Client and worker job pages
    #[command(subcommand)]
    Jobs(JobCommands),

    /// Admin panel
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand, Debug)]
pub enum JobCommands {
    /// Jobs posted by (client) or assigned to (worker) the current user
    Mine,

    /// Open jobs near the signed-in worker
    Nearby {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_budget: Option<Decimal>,
        #[arg(long)]
        max_budget: Option<Decimal>,
        #[arg(long, value_enum, default_value = "relevance")]
        sort: SortArg,
        #[arg(long)]
        asc: bool,
    },

    /// Job title suggestions grouped by trade
    Categories,

    /// Post a new job as a client
    Post {
        #[arg(long)]
        title: Option<String>,
        /// Title picked from the catalog
        #[arg(long)]
        catalog: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category_id: Option<i64>,
        #[arg(long)]
        budget: Option<Decimal>,
        #[arg(long)]
        address: Option<String>,
    },

    Accept { id: i64 },

    OnTheWay { id: i64 },

    Start { id: i64 },

    /// Upload proof, verify the customer's OTP and mark the job completed
    Complete {
        id: i64,
        #[arg(long)]
        proof: PathBuf,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        otp: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Relevance,
    Budget,
    Date,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    Logout,

    /// Headline numbers, pending verifications and job heatmap
    Dashboard,

    Users,

    Ban { id: i64 },

    Unban { id: i64 },

    #[command(subcommand)]
    Categories(CategoryCommands),

    Jobs,

    /// Hand a job to another verified worker
    Reassign {
        job_id: i64,
        #[arg(long)]
        worker: Option<i64>,
    },

    /// Fraud reports
    Disputes,

    #[command(subcommand)]
    Workers(WorkerCommands),
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    List,
    Add { name: String },
    Rename { id: i64, name: String },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum WorkerCommands {
    /// Workers waiting for document verification
    Pending,
    Verified,
    Leaderboard,
    Approve { id: i64 },
    Reject {
        id: i64,
        #[arg(long)]
        reason: Option<String>,
    },
}
