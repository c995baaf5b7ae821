use std::path::Path;

use turbo_dash::{DashboardApp, DashboardConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // No arguments: read from and write to the working directory.
    let dir = Path::new(".");
    let result = DashboardConfig::load(dir)
        .and_then(|config| DashboardApp::new(config).run(dir, dir));

    if let Err(e) = result {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
