use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use photo_facets::config;
use photo_facets::corpus::{self, Corpus};
use photo_facets::facets::RangeControls;
use photo_facets::filter::{FilterState, MissingValue, Range, TagLogic};
use photo_facets::gallery::{Gallery, Listing};
use photo_facets::output;
use photo_facets::search;
use photo_facets::sync::ViewSync;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "photo-facets")]
#[command(about = "Faceted filtering, tag logic and search over a photo corpus")]
#[command(long_about = "\
Faceted filtering, tag logic and search over a photo corpus

Reads the corpus JSON written by the content loader and answers the same
queries the gallery pages make: which photos survive a set of facet
controls, in what order, and which tags are still worth offering.

Listings:
  all              every photo, newest first on date ties
  album:<slug>     one album, oldest first on date ties
  tag:<tag>        photos carrying the tag

Ranges are MIN:MAX and inclusive. Shutter speeds accept fractions:
  --shutter 1/500:1/60   --aperture 1.8:4   --iso 100:800

Run 'photo-facets gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Corpus JSON file
    #[arg(long, default_value = "corpus.json", global = true)]
    corpus: PathBuf,

    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter a listing and print the ordered result
    Filter(FilterArgs),
    /// List tag, album and camera options with counts, plus range bounds
    Facets {
        /// Listing to scope the options to
        #[arg(long, default_value = "all")]
        listing: Listing,
    },
    /// Search photography (albums, then photos) or writing
    Search {
        /// Words that must all appear
        query: String,
        /// Search posts and projects instead of photography
        #[arg(long)]
        writing: bool,
    },
    /// Load the corpus and report dangling album references
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

/// Facet controls for the `filter` command.
#[derive(clap::Args)]
struct FilterArgs {
    /// all | album:<slug> | tag:<tag>
    #[arg(long, default_value = "all")]
    listing: Listing,

    /// Selected tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// How selected tags combine: and | or (default from config)
    #[arg(long)]
    logic: Option<TagLogic>,

    /// Selected album slug (repeatable)
    #[arg(long = "album")]
    albums: Vec<String>,

    /// Selected camera (repeatable)
    #[arg(long = "camera")]
    cameras: Vec<String>,

    /// Earliest date, YYYY-MM-DD
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Latest date, YYYY-MM-DD
    #[arg(long)]
    to: Option<NaiveDate>,

    /// f-number range, e.g. 1.8:4
    #[arg(long, value_parser = parse_range::<f64>)]
    aperture: Option<Range<f64>>,

    /// Shutter range in seconds, e.g. 1/500:1/60
    #[arg(long, value_parser = parse_shutter_range)]
    shutter: Option<Range<f64>>,

    /// ISO range, e.g. 100:800
    #[arg(long, value_parser = parse_range::<u32>)]
    iso: Option<Range<u32>>,

    /// Focal length range in mm, e.g. 24:35
    #[arg(long, value_parser = parse_range::<f64>)]
    focal: Option<Range<f64>>,

    /// Keep photos that lack a value under a narrowed range
    #[arg(long)]
    include_missing: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Filter(args) => {
            let gallery = load_gallery(&cli)?;
            let state = build_state(&gallery, args);
            let mut session = gallery.session(args.listing.clone(), ViewSync::default());
            let snapshot = session.apply(state);
            output::print_listing(
                &args.listing,
                &snapshot,
                gallery.corpus(),
                &gallery.config().output,
            );
        }
        Command::Facets { listing } => {
            let gallery = load_gallery(&cli)?;
            output::print_facets(&gallery.facets(listing));
        }
        Command::Search { query, writing } => {
            let gallery = load_gallery(&cli)?;
            let out = &gallery.config().output;
            if *writing {
                let hits = search::search_writing(query, gallery.corpus());
                output::print_writing(query, &hits, out);
            } else {
                let results = search::search_photography(query, gallery.corpus());
                output::print_search(query, &results, out);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.corpus.display());
            let corpus = corpus::load_corpus(&cli.corpus)?;
            config::load_config(&cli.config_dir)?;
            output::print_check(&corpus);
            println!("==> Corpus is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config and corpus, warning on stderr about albums that do not resolve.
fn load_gallery(cli: &Cli) -> Result<Gallery, Box<dyn std::error::Error>> {
    let config = config::load_config(&cli.config_dir)?;
    let corpus = corpus::load_corpus(&cli.corpus)?;
    warn_dangling(&corpus);
    Ok(Gallery::new(corpus, config))
}

fn warn_dangling(corpus: &Corpus) {
    let dangling = corpus.dangling_album_refs().len();
    if dangling > 0 {
        eprintln!("warning: {dangling} photo(s) reference a missing album (run 'photo-facets check')");
    }
}

/// Turn CLI flags into a filter state for the listing.
///
/// Ranges that still cover the listing's bounds stay inert.
fn build_state(gallery: &Gallery, args: &FilterArgs) -> FilterState {
    let mut state = gallery
        .initial_state()
        .with_tags(&args.tags)
        .with_albums(args.albums.iter().cloned())
        .with_cameras(args.cameras.iter().cloned());
    if let Some(logic) = args.logic {
        state = state.with_logic(logic);
    }
    if args.include_missing {
        state = state.with_missing_exif(MissingValue::Include);
    }

    let date = match (args.from, args.to) {
        (None, None) => None,
        (from, to) => Some(Range::new(
            from.unwrap_or(NaiveDate::MIN),
            to.unwrap_or(NaiveDate::MAX),
        )),
    };
    let sliders = RangeControls {
        date,
        aperture: args.aperture,
        shutter: args.shutter,
        iso: args.iso,
        focal_length: args.focal,
    };
    gallery.bounds(&args.listing).apply_ranges(sliders, state)
}

/// Parse `MIN:MAX`.
fn parse_range<T: FromStr + PartialOrd + Copy>(s: &str) -> Result<Range<T>, String> {
    parse_range_with(s, |v| v.parse::<T>().ok())
}

/// Parse `MIN:MAX` where either side may be a fraction like `1/500`.
fn parse_shutter_range(s: &str) -> Result<Range<f64>, String> {
    parse_range_with(s, |v| match v.split_once('/') {
        Some((num, den)) => {
            let (num, den) = (num.trim().parse::<f64>().ok()?, den.trim().parse::<f64>().ok()?);
            (den != 0.0).then(|| num / den)
        }
        None => v.parse().ok(),
    })
}

fn parse_range_with<T: PartialOrd + Copy>(
    s: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Range<T>, String> {
    let (min, max) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, got '{s}'"))?;
    let value = |v: &str| parse(v.trim()).ok_or_else(|| format!("invalid value '{}'", v.trim()));
    Ok(Range::new(value(min)?, value(max)?))
}
