use clap::Parser;
use tatoeba_audit::cli::{Args, run};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    run(Args::parse())
}
