// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "text-scene")]
#[command(about = "Matcap text and donuts demo", long_about = None)]
pub struct Cli {
    /// Root directory holding fonts/ and textures/
    #[arg(long = "assets", default_value = "assets")]
    pub assets: PathBuf,

    /// Disable the debug panel overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
