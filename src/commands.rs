//! CLI command implementations

use std::path::{Path, PathBuf};

use warren_core::{Forest, JsonFile, Layout, LayoutParams, PageStore, Persistence, layout};
use warren_server::{ServerConfig, WarrenServer};

pub async fn serve(root: PathBuf, host: String, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let (persistence, store) = load_store(&root)?;
    tracing::info!("Loaded {} pages from {}", store.len(), persistence.path().display());
    tracing::info!("Starting Warren server on {}:{}", host, port);

    let config = ServerConfig { host: host.clone(), port };
    let server = WarrenServer::new(store, Box::new(persistence), config);

    if open_browser {
        let url = format!("http://{host}:{port}/api/layout");
        tokio::spawn(async move {
            // Give the listener a moment to bind
            tokio::time::sleep(std::time::Duration::from_millis(300)).await;
            if let Err(e) = open::that(&url) {
                tracing::warn!("could not open browser: {e}");
            }
        });
    }

    server.start().await
}

pub fn add(root: PathBuf, title: &str, parent: Option<&str>, url: Option<&str>) -> anyhow::Result<()> {
    let (persistence, mut store) = load_store(&root)?;
    store.add_page(title, parent, url)?;
    persistence.save(&store.snapshot())?;

    println!("Added: {title}");
    Ok(())
}

pub fn list(root: PathBuf) -> anyhow::Result<()> {
    let (_, store) = load_store(&root)?;
    if store.is_empty() {
        println!("No pages added yet.");
        return Ok(());
    }

    for record in store.pages() {
        match store.parent_of(&record.title) {
            Some(parent) => println!("{}  (from {})", record.title, parent),
            None => println!("{}", record.title),
        }
    }
    Ok(())
}

pub fn show(root: PathBuf, title: &str) -> anyhow::Result<()> {
    let (_, store) = load_store(&root)?;
    let page = store.get_page(title)?;

    println!("{}", page.title);
    if page.has_url() {
        println!("URL: {}", page.url);
    }
    println!("Visited: {}", page.visited_at.to_rfc3339());
    if !page.children.is_empty() {
        println!("Children: {}", page.children.join(", "));
    }
    Ok(())
}

pub fn tree(root: PathBuf) -> anyhow::Result<()> {
    let (_, store) = load_store(&root)?;
    if store.is_empty() {
        println!("No pages added yet.");
        return Ok(());
    }

    let forest = Forest::build(&store);
    let result = layout(&forest, &LayoutParams::default());
    for root_title in forest.roots() {
        print_subtree(&forest, &result, root_title, 0);
    }
    Ok(())
}

/// Print one subtree, depth-first, each node with its layout coordinate.
fn print_subtree(forest: &Forest<'_>, result: &Layout, title: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    match result.positions.get(title) {
        Some(point) => println!("{indent}{title}  ({:.2}, {:.2})", point.x, point.y),
        None => println!("{indent}{title}"),
    }
    for child in forest.children(title) {
        print_subtree(forest, result, child, depth + 1);
    }
}

pub fn open_page(root: PathBuf, title: &str) -> anyhow::Result<()> {
    let (_, store) = load_store(&root)?;
    let page = store.get_page(title)?;
    if !page.has_url() {
        anyhow::bail!("page {title:?} has no URL to open");
    }

    open::that(&page.url)?;
    tracing::info!("Opened {}", page.url);
    Ok(())
}

pub fn clear(root: PathBuf) -> anyhow::Result<()> {
    warren_core::clear_history(&root)?;

    tracing::info!("History cleared");
    Ok(())
}

/// Load the persisted history and rebuild the store, revalidating its links.
fn load_store(root: &Path) -> anyhow::Result<(JsonFile, PageStore)> {
    let persistence = JsonFile::new(root);
    let snapshot = persistence.load()?;
    let store = PageStore::restore(snapshot)?;
    Ok((persistence, store))
}
