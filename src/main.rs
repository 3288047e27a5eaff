/*!
 * Vulcan - Main Entry Point
 *
 * Interactive allocator shell. Reads commands from stdin:
 *
 *     vulcan [UNITS]
 *
 * UNITS overrides VULCAN_MEMORY_UNITS.
 */

use anyhow::Context;
use tracing::info;
use vulcan_kernel::{init_tracing, AllocatorConfig, MemoryManager, Shell};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut config = AllocatorConfig::from_env();
    if let Some(arg) = std::env::args().nth(1) {
        config.total_units = arg
            .parse()
            .with_context(|| format!("invalid unit count '{}'", arg))?;
    }

    let manager = MemoryManager::with_config(config).context("failed to initialize memory")?;
    info!(
        units = manager.total_units(),
        policy = %manager.config().fragmentation_policy,
        "Vulcan allocator ready"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(manager)
        .run(stdin.lock(), stdout.lock())
        .context("shell session failed")?;

    info!("Vulcan shutting down");
    Ok(())
}
