use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "gt-cli")]
#[command(about = "Guided onboarding tour player")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Agent(AgentArgs),
    Tui(TuiArgs),
}

#[derive(Debug, Args)]
pub(crate) struct AgentArgs {
    #[command(subcommand)]
    pub(crate) command: AgentCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AgentCommand {
    Start(StartArgs),
    Next(TransitionArgs),
    Skip(TransitionArgs),
    Cancel(TransitionArgs),
    Click(ClickArgs),
    Wait(WaitArgs),
    Status(StatusArgs),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct TourSourceArgs {
    #[arg(long = "tours-dir")]
    pub(crate) tours_dir: Option<String>,
    #[arg(long = "tour", default_value = gt_steps::DEFAULT_TOUR_ID)]
    pub(crate) tour: String,
}

#[derive(Debug, Args)]
pub(crate) struct StartArgs {
    #[command(flatten)]
    pub(crate) source: TourSourceArgs,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
}

#[derive(Debug, Args)]
pub(crate) struct TransitionArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
}

#[derive(Debug, Args)]
pub(crate) struct ClickArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
    #[arg(long = "element")]
    pub(crate) element: String,
    #[arg(long = "synthetic", default_value_t = false)]
    pub(crate) synthetic: bool,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
}

#[derive(Debug, Args)]
pub(crate) struct WaitArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
    #[arg(long = "ms")]
    pub(crate) ms: u64,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
}

#[derive(Debug, Args)]
pub(crate) struct StatusArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
}

#[derive(Debug, Args)]
pub(crate) struct TuiArgs {
    #[command(flatten)]
    pub(crate) source: TourSourceArgs,
    #[arg(long = "state-file")]
    pub(crate) state_file: Option<String>,
    #[arg(long = "line", default_value_t = false)]
    pub(crate) line: bool,
}
