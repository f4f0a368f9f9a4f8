mod analysis;
mod api;
mod catalog;
mod config;
mod display;
mod error;
mod game;

use anyhow::Context;
use api::client::DataDragonClient;
use catalog::Catalog;
use clap::Parser;
use config::Config;
use display::output::{
    display_card, display_categories, display_error, display_info, display_results, display_success,
    display_warning,
};
use error::AppError;
use game::filter::{filter_champions, ALL_CATEGORIES};
use game::image::{ImageLoader, UncheckedImages};
use game::presenter::{present_current, Presentation};
use game::session::{Choice, Session};
use indicatif::ProgressBar;
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Smash or Pass")]
#[command(about = "Smash or pass your way through the League of Legends roster", long_about = None)]
struct Args {
    /// Champion class to play with (e.g. Mage, Tank) or "all"
    #[arg(short, long)]
    category: Option<String>,

    /// Data Dragon locale (default: fr_FR, or DDRAGON_LOCALE)
    #[arg(short, long)]
    locale: Option<String>,

    /// Use this data version instead of the latest one
    #[arg(long)]
    version_pin: Option<String>,

    /// Seed for the champion order and skin picks
    #[arg(long)]
    seed: Option<u64>,

    /// List the available categories and exit
    #[arg(long)]
    list_tags: bool,

    /// Show splash URLs without checking that they load
    #[arg(long)]
    no_image_check: bool,

    /// Print diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

enum Command {
    Decide(Choice),
    Menu,
    Quit,
}

impl Command {
    fn parse(input: &str) -> Option<Command> {
        match input.trim().to_lowercase().as_str() {
            "s" | "smash" => Some(Command::Decide(Choice::Smash)),
            "p" | "pass" => Some(Command::Decide(Choice::Pass)),
            "m" | "menu" => Some(Command::Menu),
            "q" | "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if let Some(version) = args.version_pin {
        config.version = Some(version);
    }
    config.validate()?;

    let client = DataDragonClient::new(config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Loading champions...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let catalog = Catalog::load(&client);
    spinner.finish_and_clear();

    let catalog = catalog.map_err(|e| {
        tracing::error!(error = %e, "catalog load failed");
        AppError::CatalogLoad("champion data is unavailable right now, please try again later".to_string())
    })?;

    display_success(&format!(
        "Loaded {} champions (patch {}, {})",
        catalog.len(),
        catalog.version(),
        client.config().locale
    ));

    let tag_counts = catalog.tag_counts();
    if args.list_tags {
        display_categories(&tag_counts, catalog.len());
        return Ok(());
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let loader: &dyn ImageLoader = if args.no_image_check {
        &UncheckedImages
    } else {
        &client
    };
    let base_url = client.config().base_url.clone();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut session = Session::new(&catalog);
    let mut next_category = args.category;

    loop {
        // Setup
        let category = match next_category.take() {
            Some(category) => category,
            None => {
                display_categories(&tag_counts, catalog.len());
                match prompt(&mut input, "Pick a category (or q to quit): ")? {
                    Some(answer) if answer.eq_ignore_ascii_case("q") => return Ok(()),
                    Some(answer) if answer.is_empty() => ALL_CATEGORIES.to_string(),
                    Some(answer) => answer,
                    None => return Ok(()),
                }
            }
        };

        if category != ALL_CATEGORIES && !catalog.has_tag(&category) {
            display_warning(&AppError::UnknownCategory(category.clone()).to_string());
        }

        session.start(filter_champions(&catalog, &category, &mut rng))?;
        display_info(&format!(
            "{} champions in \"{}\". s = smash, p = pass, menu = back to menu, q = quit",
            session.total(),
            category
        ));

        // Playing
        let mut back_to_menu = false;
        let mut skipped = 0;
        while let Presentation::Card { record, image_url } =
            present_current(&mut session, loader, &base_url, &mut rng)?
        {
            if session.skipped() > skipped {
                display_warning(&format!(
                    "Skipped {} champion(s) with no loadable image",
                    session.skipped() - skipped
                ));
                skipped = session.skipped();
            }
            display_card(
                &record,
                &image_url,
                session.cursor() + 1,
                session.total(),
                session.accepted_count(),
            );

            let command = loop {
                let Some(answer) = prompt(&mut input, "> ")? else {
                    return Ok(());
                };
                match Command::parse(&answer) {
                    Some(command) => break command,
                    None => display_warning("Type s (smash), p (pass), menu or q"),
                }
            };

            match command {
                Command::Decide(choice) => {
                    session.decide(choice)?;
                }
                Command::Menu => {
                    back_to_menu = true;
                    break;
                }
                Command::Quit => return Ok(()),
            }
        }

        // Results
        if !back_to_menu {
            if let Some(results) = session.results() {
                display_results(&results, session.accepted());
            }
        }
        session.reset();
    }
}

/// Reads one trimmed line; `None` on end of input.
fn prompt(input: &mut impl BufRead, message: &str) -> anyhow::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
