use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use edu_app_directory::catalog::{Audience, Catalog, CatalogEntry, Category, PriceModel, Stage};
use edu_app_directory::config::Config;
use edu_app_directory::directory::{Directory, ReviewState};
use edu_app_directory::i18n::{Language, LanguageStrings, TranslationValidator};
use edu_app_directory::icon::{category_visual, IconSource};
use edu_app_directory::metrics::ReviewMetrics;
use edu_app_directory::report::Report;
use edu_app_directory::review::{AiReview, OpenAiReviewer};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "edu-directory", about = "Browse the educational app directory")]
struct Cli {
    /// Display language (es, eu). Overrides DEFAULT_LANGUAGE.
    #[arg(long, global = true, value_name = "LANG")]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List entries matching the given filters.
    List(ListArgs),
    /// Show one entry, resolving its icon through the fallback chain.
    Show {
        id: u32,
        /// Probe icon URLs over the network instead of assuming the first works.
        #[arg(long)]
        check_icons: bool,
    },
    /// Generate an AI review for one entry.
    Review {
        id: u32,
        /// Also export the report once the review resolves.
        #[arg(long)]
        export: bool,
    },
    /// Export an entry-only report without requesting a review.
    Export { id: u32 },
    /// Print every enum label in the active language.
    Labels,
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Case-insensitive text matched against names and both descriptions.
    #[arg(short, long, default_value = "")]
    query: String,
    #[arg(long = "category", value_name = "CATEGORY")]
    categories: Vec<Category>,
    #[arg(long = "stage", value_name = "STAGE")]
    stages: Vec<Stage>,
    #[arg(long = "role", value_name = "ROLE")]
    roles: Vec<Audience>,
    #[arg(long = "price", value_name = "PRICE")]
    prices: Vec<PriceModel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("edu_app_directory=info".parse()?)
                .add_directive("edu_directory=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let validation = TranslationValidator::validate_registry();
    if validation.has_errors() {
        bail!("Language bundles are incomplete: {:?}", validation.errors);
    }
    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(Path::new(path))
            .with_context(|| format!("Failed to load catalog from {}", path))?,
        None => Catalog::bundled().context("Bundled catalog is invalid")?,
    };

    let language = cli.lang.unwrap_or(config.default_language);
    let mut directory = Directory::new(catalog, language, config.favicon_service_url.clone());

    match cli.command {
        Commands::List(args) => list(&mut directory, args),
        Commands::Show { id, check_icons } => show(&mut directory, id, check_icons).await,
        Commands::Review { id, export } => review(&mut directory, &config, id, export).await,
        Commands::Export { id } => {
            open(&mut directory, id)?;
            export(&directory, &config);
            Ok(())
        }
        Commands::Labels => {
            print_labels(directory.language().strings());
            Ok(())
        }
    }
}

fn list(directory: &mut Directory, args: ListArgs) -> Result<()> {
    let selection = directory.selection_mut();
    selection.set_query(args.query);
    selection.categories.extend(args.categories);
    selection.stages.extend(args.stages);
    selection.roles.extend(args.roles);
    selection.prices.extend(args.prices);

    let strings = directory.language().strings();
    let language = directory.language();
    let entries = directory.visible_entries();

    println!("{}", strings.app_title);
    println!("{}", strings.format_results_count(entries.len()));
    if directory.selection().has_active_filters() {
        println!(
            "({} filters active; {})",
            directory.selection().active_filter_count(),
            strings.clear_filters
        );
    }
    println!();

    if entries.is_empty() {
        println!("{}", strings.no_results);
        return Ok(());
    }

    for entry in entries {
        print_summary_line(entry, language, strings);
    }

    Ok(())
}

fn open(directory: &mut Directory, id: u32) -> Result<()> {
    match directory.open_entry(id) {
        Some(_) => Ok(()),
        None => bail!("No catalog entry with id {}", id),
    }
}

async fn show(directory: &mut Directory, id: u32, check_icons: bool) -> Result<()> {
    open(directory, id)?;

    if check_icons {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .context("Failed to build HTTP client")?;
        resolve_icon(directory, &client).await;
    }

    let entry = directory
        .current_entry()
        .context("Detail view closed unexpectedly")?;
    print_detail(entry, directory.language());

    if let Some(detail) = directory.detail() {
        match detail.icon().current() {
            IconSource::Remote(url) => println!("Icon: {}", url),
            IconSource::Placeholder(visual) => {
                println!("Icon: {} ({})", visual.icon, visual.style)
            }
        }
    }

    Ok(())
}

/// Walk the icon chain until a source loads or the placeholder is reached.
async fn resolve_icon(directory: &mut Directory, client: &reqwest::Client) {
    loop {
        let Some(detail) = directory.detail() else {
            return;
        };
        let token = detail.icon().token();
        let url = match detail.icon().current() {
            IconSource::Remote(url) => url,
            IconSource::Placeholder(_) => return,
        };

        let loaded = match client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Icon request to {} failed: {}", url, e);
                false
            }
        };

        if loaded {
            info!("Icon loaded from {}", url);
            return;
        }
        if !directory.report_icon_failure(token) {
            return;
        }
    }
}

async fn review(directory: &mut Directory, config: &Config, id: u32, export_after: bool) -> Result<()> {
    let reviewer = OpenAiReviewer::new(reqwest::Client::new(), config)?;

    let request = match directory.open_entry(id) {
        Some(request) => request,
        None => bail!("No catalog entry with id {}", id),
    };

    let strings = directory.language().strings();
    if let Some(entry) = directory.current_entry() {
        print_detail(entry, directory.language());
    }
    println!("{}", strings.review_loading);

    directory.run_review(&reviewer, request).await;

    if let Some(detail) = directory.detail() {
        match detail.review() {
            ReviewState::Ready(review) => print_review(review, strings),
            ReviewState::Failed(reason) => {
                println!("{}", strings.review_error);
                warn!("Review unavailable: {}", reason);
            }
            ReviewState::Loading => {}
        }
    }

    if export_after {
        export(directory, config);
    }

    let metrics = ReviewMetrics::global().report();
    info!(
        "Review metrics: {} requests, {} ok, {} failed, {} discarded",
        metrics.requests, metrics.successes, metrics.failures, metrics.stale_discards
    );

    Ok(())
}

/// Export the open entry's report. Failures are reported, never fatal.
fn export(directory: &Directory, config: &Config) {
    let strings = directory.language().strings();
    let Some(report) = directory.current_report() else {
        return;
    };

    match report.write_to(Path::new(&config.export_dir)) {
        Ok(path) => println!("{}: {}", strings.export_button, path.display()),
        Err(e) => {
            warn!("Report export of {} failed: {}", report.file_name(), e);
            println!("{}", strings.export_failed.replace("{error}", &e.to_string()));
        }
    }
}

// ==================== Rendering ====================

fn print_summary_line(entry: &CatalogEntry, language: Language, strings: &LanguageStrings) {
    let visual = category_visual(entry.category);
    println!(
        "{} [{:>2}] {} · {} · {} · {}",
        visual.icon,
        entry.id,
        entry.name,
        strings.category_label(entry.category),
        strings.audience_label(entry.target_audience),
        strings.price_label(entry.price_model),
    );
    println!("        {}", entry.description(language));
}

fn print_detail(entry: &CatalogEntry, language: Language) {
    let strings = language.strings();
    let stages = entry
        .stages
        .iter()
        .map(|s| strings.stage_label(*s))
        .collect::<Vec<_>>()
        .join(", ");

    println!("{}", entry.name);
    println!("{}", entry.description(language));
    println!(
        "{}: {}",
        strings.filter_category,
        strings.category_label(entry.category)
    );
    println!(
        "{}: {}",
        strings.filter_role,
        strings.audience_label(entry.target_audience)
    );
    println!("{}: {}", strings.filter_stage, stages);
    println!(
        "{}: {}",
        strings.filter_price,
        strings.price_label(entry.price_model)
    );
    println!("{}", strings.format_min_age(entry.min_age));
    println!("{}: {}", strings.website_label, entry.website);
    println!("{}:", strings.features_title);
    for feature in entry.features_preview(language, 4) {
        println!("  - {}", feature);
    }
}

fn print_review(review: &AiReview, strings: &LanguageStrings) {
    println!();
    println!("== {} ==", strings.review_title);
    println!("{}: {}", strings.summary_title, review.summary);
    println!("{}: {}", strings.teacher_tip_title, review.teacher_tip);
    println!("{}: {}", strings.student_activity_title, review.student_activity);

    println!("{}:", strings.pros_title);
    for pro in &review.pros {
        println!("  + {}", pro);
    }
    println!("{}:", strings.cons_title);
    for con in &review.cons {
        println!("  - {}", con);
    }

    let privacy = &review.privacy;
    println!("{}:", strings.privacy_title);
    println!(
        "  {}",
        if privacy.gdpr_compliant {
            strings.gdpr_compliant
        } else {
            strings.gdpr_not_compliant
        }
    );
    println!("  {}: {}", strings.data_collected_title, privacy.data_collected);
    println!("  {}: {}", strings.age_warning_title, privacy.age_warning);
    println!("  {}", privacy.compliance_summary);
}

fn print_labels(strings: &LanguageStrings) {
    println!("{}:", strings.filter_category);
    for category in Category::ALL {
        println!("  {:<18} {}", category.as_str(), strings.category_label(category));
    }
    println!("{}:", strings.filter_stage);
    for stage in Stage::ALL {
        println!("  {:<18} {}", stage.as_str(), strings.stage_label(stage));
    }
    println!("{}:", strings.filter_role);
    for audience in Audience::ALL {
        println!("  {:<18} {}", audience.as_str(), strings.audience_label(audience));
    }
    println!("{}:", strings.filter_price);
    for price in PriceModel::ALL {
        println!("  {:<18} {}", price.as_str(), strings.price_label(price));
    }
}
