use std::io;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Stdout belongs to the protocol.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    checkers::print_engine_info();
    checkers::print_binary_info();

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut engine = checkers::Engine::new(&mut input, &mut output);
    engine.protocol_loop()
}
