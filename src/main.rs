use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tejo_reader::{
    share_links, ArticleController, ArticleResolver, ArticleState, Config, FeedController,
    FeedState, FeedView, FetchOutcome, HttpTransport, Location, MetadataSurface,
    MetadataSynthesizer, NewsTransport,
};

#[derive(Parser)]
#[command(name = "tejo-reader", version, about = "Read translated news from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the catalog up to the given page
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search articles
    Search { term: String },
    /// Show one article by slug or id, with its page metadata
    Show { identifier: String },
    /// List the category vocabulary
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;
    let transport = Arc::new(HttpTransport::new(&config)?);
    tracing::debug!("Using API at {}", transport.base_url());

    match cli.command {
        Command::List { page } => list(transport, &config, page).await,
        Command::Search { term } => search(transport, &config, term).await,
        Command::Show { identifier } => show(transport, &config, &identifier).await,
        Command::Categories => {
            for category in transport.categories().await? {
                println!("{}", category);
            }
            Ok(())
        }
    }
}

async fn list(transport: Arc<HttpTransport>, config: &Config, pages: u32) -> anyhow::Result<()> {
    let feed = FeedController::new(transport, config.page_size);
    feed.reset().await;

    while feed
        .snapshot()
        .cursor()
        .is_some_and(|c| c.current_page < pages)
    {
        if feed.load_more().await != FetchOutcome::Applied {
            break;
        }
    }

    print_feed(&feed.snapshot())
}

async fn search(transport: Arc<HttpTransport>, config: &Config, term: String) -> anyhow::Result<()> {
    let feed = FeedController::new(transport, config.page_size);
    feed.set_query_from_location(Some(term)).await;
    print_feed(&feed.snapshot())
}

fn print_feed(state: &FeedState) -> anyhow::Result<()> {
    match state.view() {
        FeedView::Loading => bail!("catalog did not finish loading"),
        FeedView::Failed { message, has_items } => {
            if has_items {
                print_articles(state);
            }
            bail!("Erro ao carregar as notícias: {}", message)
        }
        FeedView::NoResults { query } => {
            println!("Nenhuma notícia encontrada para \"{}\".", query);
        }
        FeedView::Empty => println!("Nenhuma notícia encontrada."),
        FeedView::Articles(_) => print_articles(state),
    }
    Ok(())
}

fn print_articles(state: &FeedState) {
    for article in state.items() {
        let category = article
            .category
            .as_ref()
            .map(|c| format!(" [{}]", c))
            .unwrap_or_default();
        println!(
            "{}  {}{}  ({}, {})",
            article.route_identifier(),
            article.display_title(),
            category,
            article.source,
            article.formatted_date()
        );
    }
    if let Some(cursor) = state.cursor() {
        println!(
            "-- página {}/{}, {} artigos",
            cursor.current_page, cursor.total_pages, cursor.total_count
        );
    }
}

async fn show(
    transport: Arc<HttpTransport>,
    config: &Config,
    identifier: &str,
) -> anyhow::Result<()> {
    let location = Location::new(config.site_url()?).article_route(identifier);
    let article = ArticleController::new(
        ArticleResolver::new(transport, config.page_size),
        MetadataSynthesizer::from_config(config),
        MetadataSurface::new(),
    );

    article.open(identifier, location.url().clone()).await;

    let page = article.snapshot();
    match page.state() {
        ArticleState::Found(found) => {
            println!("{}\n", found.display_title());
            println!("{}\n", found.display_content());
            if let Some(original) = found.original_title() {
                println!("Título original: {}", original);
            }
            if let Some(url) = &found.url {
                println!("Ver original no {}: {}", found.source, url);
            }

            let metadata = article.metadata();
            println!("\n<title>{}</title>", metadata.title().unwrap_or_default());
            for tag in metadata.tags() {
                println!(
                    "<meta {}=\"{}\" content=\"{}\">",
                    tag.attribute.as_str(),
                    tag.key,
                    tag.content
                );
            }
            if let Some(block) = metadata.structured_data() {
                println!("{}", serde_json::to_string_pretty(block)?);
            }

            let links = share_links(found, location.href());
            println!("\n{}\n{}\n{}", links.twitter, links.facebook, links.whatsapp);
            Ok(())
        }
        ArticleState::NotFound => bail!("Artigo não encontrado: {}", identifier),
        ArticleState::Error(message) => bail!("Erro ao carregar o artigo: {}", message),
        ArticleState::Idle | ArticleState::Loading => bail!("article did not finish loading"),
    }
}
