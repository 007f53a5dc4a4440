use clap::{Parser, ValueEnum};

/**
 * Command-line arguments for the application.
 */
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ApplicationArguments {
    /**
     * Number of clients to generate.
     */
    #[arg(short, long, default_value_t = 30)]
    pub clients: u32,
    /**
     * Seed for the random generator. When omitted the generator is seeded
     * from entropy and every run differs.
     */
    #[arg(short, long)]
    pub seed: Option<u64>,
    /**
     * Output format for the report.
     */
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/**
 * Supported output formats for the report.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}
