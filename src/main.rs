use dokusai::{SimConfig, ui};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    ui::run(SimConfig::from_env())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
