use anyhow::Result;
use clap::Parser;
use glyph_atlas::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI --log-level takes precedence over RUST_LOG, which beats the config
    // level applied once the config is loaded.
    glyph_atlas::debug::init_log_bridge(cli.log_level.map(Into::into));
    log::info!("Starting glyph-atlas {}", glyph_atlas::VERSION);

    let result = cli::process_cli(cli).and_then(|outcome| match outcome {
        cli::CliResult::Exit(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        cli::CliResult::Continue(options) => {
            let summary = glyph_atlas::run(&options)?;
            println!(
                "Rendered {} glyphs ({}x{} text) into {}",
                summary.placed_glyphs,
                summary.extent.width,
                summary.extent.height,
                options.output.display()
            );
            Ok(())
        }
    });

    if let Err(ref e) = result {
        eprintln!("glyph-atlas: error: {e:#}");
    }
    result
}
