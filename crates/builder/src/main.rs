use anyhow::Result;
use clap::Parser;
use xenbuild::build::{self, BuildContext, Flavor};

#[derive(Parser)]
#[command(name = "xenbuild", about = "Build the XenServer Windows guest agent package")]
struct Cli {
    /// Build flavor: checked (Debug) or free (Release).
    #[arg(value_enum)]
    flavor: Flavor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    build::run(&BuildContext::new(cli.flavor))
}
