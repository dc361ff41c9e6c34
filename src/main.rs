fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = smart_mart::app::run(std::env::args()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
