use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pkggen=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let command_line_interface = pkggen::cli::CommandLineInterface::load();
    command_line_interface.run()
}
