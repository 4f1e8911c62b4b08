use clap::Parser;

fn main() {
    let cli = profile_launcher_core::runtime::Cli::parse();

    let debug = cfg!(debug_assertions);
    let _log_guard = match profile_launcher_core::logging::init(debug) {
        Ok(guard) => Some(guard),
        Err(error) => {
            eprintln!("[profile-launcher] logging disabled: {error}");
            None
        }
    };

    if let Err(error) = profile_launcher_core::runtime::run(cli) {
        tracing::error!(%error, "runtime failed");
        eprintln!("[profile-launcher] {error}");
        std::process::exit(1);
    }
}
