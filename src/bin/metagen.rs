fn main() -> anyhow::Result<()> {
    metagen::logging::init_logging()?;
    metagen::cli::run_cli()
}
