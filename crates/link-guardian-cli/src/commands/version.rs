//! Version command implementation

use colored::Colorize;
use link_guardian_core::GuardConfig;

use super::banner;

/// Run the version command
pub fn run(config: &GuardConfig) {
    banner::print_banner();

    println!("{}", "Components:".white().bold());
    println!("  CLI:     v{}", env!("CARGO_PKG_VERSION"));
    println!("  Core:    v{}", link_guardian_core::VERSION);
    println!();

    println!("{}", "Configuration:".white().bold());
    println!("  Mode:      {}", config.mode);
    println!(
        "  Backend:   {}",
        config
            .backend_origin
            .as_deref()
            .unwrap_or("(not configured)")
    );
    println!("  Timeout:   {}s", config.timeout_seconds);
    if let Some(path) = GuardConfig::default_path() {
        println!("  Config:    {}", path.display().to_string().dimmed());
    }
    println!();
}
