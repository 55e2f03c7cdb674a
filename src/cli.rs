use std::error::Error;
use std::path::PathBuf;

use atty::Stream;
use clap::{Parser, Subcommand};
use pokedex_picker::catalog::{self, ALL_TYPES_OPTION};
use pokedex_picker::{
    BindingConfig, Location, Page, PageEvent, PageSession, navigation_path, load_page,
};
use serde_json::json;
use termimad::crossterm::style::Color;
use termimad::{FmtText, MadSkin, StyledChar, terminal_size};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "pokedex-picker",
    about = "Highlight and navigate the Pokémon types sidebar",
    version
)]
pub struct Cli {
    /// Emit JSON instead of human-readable tables.
    #[arg(long, global = true)]
    json: bool,

    /// Log binding activity at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file overriding class names, path prefix, or encoding.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON page snapshot. Defaults to the built-in types sidebar.
    #[arg(long, global = true)]
    page: Option<PathBuf>,

    /// Dropdown value for the built-in sidebar.
    #[arg(long, global = true, default_value = ALL_TYPES_OPTION)]
    selected: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show which sidebar entries are highlighted once the page is ready.
    Highlight,
    /// Change the dropdown once per value and report each navigation.
    Change {
        /// Values to select, in order.
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Print the navigation path for a dropdown value.
    Href {
        /// Dropdown value.
        value: String,
    },
    /// List the known Pokémon types.
    Types,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = match &cli.config {
        Some(path) => BindingConfig::load(path)?,
        None => BindingConfig::default(),
    };
    debug!(?config, "resolved binding config");
    match &cli.command {
        Command::Highlight => handle_highlight(&cli, config),
        Command::Change { values } => handle_change(&cli, config, values),
        Command::Href { value } => handle_href(&config, value, cli.json),
        Command::Types => handle_types(cli.json),
    }
}

fn init_logger(verbose: bool) {
    let fallback = if verbose {
        "pokedex_picker=debug,warn"
    } else {
        "pokedex_picker=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn resolve_page(cli: &Cli, config: &BindingConfig) -> Result<Page, Box<dyn Error>> {
    match &cli.page {
        Some(path) => Ok(load_page(path)?),
        None => Ok(catalog::sidebar_page(&cli.selected, config)),
    }
}

/// Sidebar entries after the page became ready.
#[derive(Debug, PartialEq, Eq)]
struct SidebarReport {
    selection: Option<String>,
    rows: Vec<(String, bool)>,
}

fn highlight_report(page: Page, config: BindingConfig) -> SidebarReport {
    let highlight_class = config.highlight_class.clone();
    let text_class = config.text_class.clone();
    let mut session = PageSession::new(page, config, Location::default());
    session.push(PageEvent::DomReady);
    session.run();

    let selection = session.highlight().map(|h| h.selection.clone());
    let rows = session
        .page()
        .text_nodes()
        .iter()
        .filter(|node| node.classes().contains(&text_class))
        .map(|node| {
            (
                node.text().to_string(),
                node.classes().contains(&highlight_class),
            )
        })
        .collect();
    SidebarReport { selection, rows }
}

/// Delivers one change per value and returns every href assigned. Values
/// must name an option of the first dropdown.
fn change_navigations(
    page: Page,
    config: BindingConfig,
    values: &[String],
) -> Result<Vec<String>, Box<dyn Error>> {
    let (_, dropdown) = page
        .first_select_with_class(&config.dropdown_class)
        .ok_or("Page has no types dropdown to change")?;
    if let Some(unknown) = values.iter().find(|value| !dropdown.has_option(value)) {
        return Err(format!("{unknown:?} is not an option of the types dropdown").into());
    }

    let location = Location::default();
    let mut session = PageSession::new(page, config, location.clone());
    session.push(PageEvent::DomReady);
    for value in values {
        session.push_change(value.clone());
    }
    session.run();
    Ok(location.history())
}

fn handle_highlight(cli: &Cli, config: BindingConfig) -> Result<(), Box<dyn Error>> {
    let page = resolve_page(cli, &config)?;
    let report = highlight_report(page, config);

    if cli.json {
        let payload = json!({
            "selection": report.selection,
            "highlighted": report.rows.iter().filter(|(_, on)| *on).map(|(text, _)| text).collect::<Vec<_>>(),
            "entries": report.rows.iter().map(|(text, on)| {
                json!({"text": text, "highlighted": on})
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match &report.selection {
        None => println!("No types dropdown on the page; nothing highlighted."),
        Some(selection) => print_sidebar(selection, &report.rows),
    }
    Ok(())
}

fn handle_change(
    cli: &Cli,
    config: BindingConfig,
    values: &[String],
) -> Result<(), Box<dyn Error>> {
    let page = resolve_page(cli, &config)?;
    let history = change_navigations(page, config, values)?;
    if cli.json {
        let payload = json!({
            "values": values,
            "navigations": history,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_navigation_table(values, &history);
    }
    Ok(())
}

fn handle_href(config: &BindingConfig, value: &str, as_json: bool) -> Result<(), Box<dyn Error>> {
    let href = navigation_path(&config.path_prefix, value, config.encoding);
    if as_json {
        let payload = json!({
            "value": value,
            "encoding": config.encoding.to_string(),
            "href": href,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{href}");
    }
    Ok(())
}

fn handle_types(as_json: bool) -> Result<(), Box<dyn Error>> {
    let types = catalog::sorted_types();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&types)?);
    } else {
        for name in types {
            println!("{name}");
        }
    }
    Ok(())
}

fn sidebar_markdown(rows: &[(String, bool)]) -> String {
    if rows.is_empty() {
        return "_No type entries._".to_string();
    }
    rows.iter()
        .map(|(text, highlighted)| {
            if *highlighted {
                format!("* **{text}**")
            } else {
                format!("* {text}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_navigation_table(values: &[String], hrefs: &[String]) {
    if hrefs.is_empty() {
        println!("No navigations were issued.");
        return;
    }
    let width = values
        .iter()
        .map(|value| value.len())
        .max()
        .unwrap_or(5)
        .max("VALUE".len());
    println!("{:<width$}  {}", "VALUE", "HREF", width = width);
    println!("{:-<width$}  {}", "", "----", width = width);
    for (value, href) in values.iter().zip(hrefs) {
        println!("{:<width$}  {}", value, href, width = width);
    }
}

/// Narrow column so the sidebar reads like the page's side panel.
fn sidebar_width() -> usize {
    let (width, _) = terminal_size();
    (width as usize).clamp(24, 48)
}

fn sidebar_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.bold.set_fg(Color::Yellow);
    skin.bullet = StyledChar::from_fg_char(Color::DarkGrey, '•');
    skin
}

fn print_sidebar(selection: &str, rows: &[(String, bool)]) {
    let body = format!("**Selected:** `{selection}`\n\n{}", sidebar_markdown(rows));
    if atty::is(Stream::Stdout) {
        let skin = sidebar_skin();
        println!("{}", FmtText::from(&skin, &body, Some(sidebar_width())));
    } else {
        println!("{body}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_change_values() {
        let cli = Cli::try_parse_from(["pokedex-picker", "--json", "change", "Fire", "fire water"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.selected, "All");
        match cli.command {
            Command::Change { values } => assert_eq!(values, vec!["Fire", "fire water"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn change_requires_a_value() {
        assert!(Cli::try_parse_from(["pokedex-picker", "change"]).is_err());
    }

    fn page_for(args: &[&str]) -> (Cli, Page) {
        let cli = Cli::try_parse_from(args).unwrap();
        let page = resolve_page(&cli, &BindingConfig::default()).unwrap();
        (cli, page)
    }

    #[test]
    fn highlight_with_selected_fire_marks_only_fire() {
        let (_, page) = page_for(&["pokedex-picker", "--selected", "Fire", "highlight"]);
        let report = highlight_report(page, BindingConfig::default());
        assert_eq!(report.selection.as_deref(), Some("Fire"));
        let marked: Vec<_> = report
            .rows
            .iter()
            .filter(|(_, on)| *on)
            .map(|(text, _)| text.as_str())
            .collect();
        assert_eq!(marked, vec!["Fire"]);
        assert_eq!(report.rows.len(), 18);
        let markdown = sidebar_markdown(&report.rows);
        assert!(markdown.contains("* **Fire**"));
        assert_eq!(markdown.matches("**").count(), 2);
    }

    #[test]
    fn highlight_on_home_page_marks_nothing() {
        let (_, page) = page_for(&["pokedex-picker", "highlight"]);
        let report = highlight_report(page, BindingConfig::default());
        assert_eq!(report.selection.as_deref(), Some("All"));
        assert!(report.rows.iter().all(|(_, on)| !*on));
    }

    #[test]
    fn change_navigates_once_per_value() {
        let (cli, page) = page_for(&["pokedex-picker", "change", "Fire", "Water", "Fire"]);
        let Command::Change { values } = &cli.command else {
            panic!("expected change command");
        };
        let hrefs = change_navigations(page, BindingConfig::default(), values).unwrap();
        assert_eq!(hrefs, vec!["/pokemon/Fire", "/pokemon/Water", "/pokemon/Fire"]);
    }

    #[test]
    fn change_rejects_values_outside_the_dropdown() {
        let (_, page) = page_for(&["pokedex-picker", "highlight"]);
        let values = vec!["Fire".to_string(), "fire water".to_string()];
        let err = change_navigations(page, BindingConfig::default(), &values).unwrap_err();
        assert!(err.to_string().contains("\"fire water\""));
    }

    #[test]
    fn change_without_dropdown_is_an_error() {
        let values = vec!["Fire".to_string()];
        let err = change_navigations(Page::new(), BindingConfig::default(), &values).unwrap_err();
        assert!(err.to_string().contains("no types dropdown"));
    }

    #[test]
    fn sidebar_markdown_bolds_highlighted_rows() {
        let rows = vec![("Fire".to_string(), true), ("Water".to_string(), false)];
        assert_eq!(sidebar_markdown(&rows), "* **Fire**\n* Water");
        assert_eq!(sidebar_markdown(&[]), "_No type entries._");
    }
}
