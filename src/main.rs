use clap::{Parser, Subcommand};
use locale_root::{archive, config, output, promote, prune, report, rewrite, verify};
use std::path::PathBuf;

/// Flags for the full pipeline run.
#[derive(clap::Args, Clone)]
struct RunArgs {
    /// Write a JSON report of all stage results to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "locale-root")]
#[command(about = "Root-mount a locale-prefixed static site export")]
#[command(long_about = "\
Root-mount a locale-prefixed static site export

The site builder emits one tree per locale plus a redirect stub:

  out/
  ├── index.html           # redirect stub → /ar/
  ├── favicon.ico          # shared root assets
  ├── ar/                  # default-locale site
  │   ├── index.html
  │   └── about-us/
  └── en/                  # secondary-locale site
      └── index.html

A full run restructures that in place, in five stages:

  1. Archive   copy ar/ and en/ verbatim into _locales/
  2. Promote   copy ar/'s children over the output root (allow-list aware)
  3. Rewrite   fix hrefs per tree region, inject the locale redirect script
  4. Prune     delete the top-level ar/ and en/
  5. Verify    check that the expected pages exist (diagnostic only)

Afterwards the default locale is served from /, the secondary locale from
/_locales/en/, and a pristine backup of the default tree sits in
/_locales/ar/.

Invoking with no subcommand runs the full pipeline. Each stage is also
available as its own subcommand for deploy scripts that need just one step.

Run 'locale-root gen-config' to generate a documented locale-root.toml.")]
#[command(version)]
struct Cli {
    /// Static export directory to restructure in place
    #[arg(long, default_value = "out", global = true)]
    output: PathBuf,

    /// Config file path
    #[arg(long, default_value = "locale-root.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: archive → promote → rewrite → prune → verify
    Run(RunArgs),
    /// Wipe _locales/, then copy both locale trees verbatim into it
    Archive,
    /// Copy the default-locale tree over the output root
    Promote,
    /// Fix hrefs and inject the locale redirect script
    Rewrite,
    /// Delete the top-level locale directories
    Prune,
    /// Check that the expected pages exist
    Verify,
    /// Print a stock locale-root.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Run(RunArgs { report: None }));

    match command {
        Command::Run(args) => {
            let config = config::load_config(&cli.config)?;
            let out_root = cli.output.as_path();

            println!(
                "==> Stage 1: Archiving locale trees → {}",
                out_root.join(config::LOCALES_DIR).display()
            );
            let archive_report = archive::archive(out_root, &config)?;
            output::print_archive_output(&archive_report);

            println!(
                "==> Stage 2: Promoting {} over the root",
                config.locales.default
            );
            let promote_report = promote::promote(out_root, &config)?;
            output::print_promote_output(&promote_report, &config);

            println!("==> Stage 3: Rewriting links in {}", out_root.display());
            let rewrite_report = rewrite::rewrite(out_root, &config)?;
            output::print_rewrite_output(&rewrite_report);

            println!("==> Stage 4: Pruning locale directories");
            let prune_report = prune::prune(out_root, &config);
            output::print_prune_output(&prune_report);

            println!("==> Stage 5: Verifying expected pages");
            let verify_report = verify::verify(out_root, &config);
            output::print_verify_output(&verify_report);

            if let Some(report_path) = args.report {
                let run_report = report::RunReport {
                    archive: archive_report,
                    promote: promote_report,
                    rewrite: rewrite_report,
                    prune: prune_report,
                    verify: verify_report,
                };
                let json = serde_json::to_string_pretty(&run_report)?;
                std::fs::write(&report_path, json)?;
                println!("Report written to {}", report_path.display());
            }

            output::print_run_summary(&config, out_root);
        }
        Command::Archive => {
            let config = config::load_config(&cli.config)?;
            let report = archive::archive(&cli.output, &config)?;
            output::print_archive_output(&report);
        }
        Command::Promote => {
            let config = config::load_config(&cli.config)?;
            let report = promote::promote(&cli.output, &config)?;
            output::print_promote_output(&report, &config);
        }
        Command::Rewrite => {
            let config = config::load_config(&cli.config)?;
            let report = rewrite::rewrite(&cli.output, &config)?;
            output::print_rewrite_output(&report);
        }
        Command::Prune => {
            let config = config::load_config(&cli.config)?;
            let report = prune::prune(&cli.output, &config);
            output::print_prune_output(&report);
        }
        Command::Verify => {
            let config = config::load_config(&cli.config)?;
            let report = verify::verify(&cli.output, &config);
            output::print_verify_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
