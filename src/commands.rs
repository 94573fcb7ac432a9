//! Client-side commands: capture and review from the terminal.

use std::sync::Arc;
use std::time::Duration;

use highlight_capture::{
    Capture, CaptureConfig, CaptureHost, PageInfo, SaveOutcome, Selection, StaticSelection,
    StaticViewport,
};
use highlight_config::Config;
use highlight_protocols::client::ServiceClient;
use highlight_review::{PanelView, ReviewPanel, SummaryView};

use crate::console::{confirm_on_stdin, ConsoleSurface};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn panel(client: Arc<dyn ServiceClient>, config: &Config) -> ReviewPanel<Arc<dyn ServiceClient>> {
    ReviewPanel::new(client).with_summarize_timeout(Duration::from_secs(
        config.review.summarize_timeout_seconds,
    ))
}

fn print_view(view: &PanelView, count: usize, status: &str) {
    match view {
        PanelView::Empty => println!("No highlights saved yet."),
        PanelView::Rows(rows) => {
            for row in rows {
                println!("{}  {}", row.date, row.source);
                println!("  {}", row.quoted_text);
                println!("  id: {}", row.id);
                println!();
            }
        }
    }
    println!("{} highlight(s) - {}", count, status);
}

pub(crate) async fn list(client: Arc<dyn ServiceClient>, config: &Config) -> CommandResult {
    let panel = panel(client, config);
    let view = panel.open().await?;
    print_view(&view, panel.count(), &panel.status());
    Ok(())
}

pub(crate) async fn delete(
    client: Arc<dyn ServiceClient>,
    config: &Config,
    id: &str,
) -> CommandResult {
    let panel = panel(client, config);
    panel.delete(id).await?;
    println!("{} ({} remaining)", panel.status(), panel.count());
    Ok(())
}

pub(crate) async fn clear(
    client: Arc<dyn ServiceClient>,
    config: &Config,
    yes: bool,
) -> CommandResult {
    let panel = panel(client, config);
    let cleared = if yes {
        panel.clear_all(&|_: &str| true).await?
    } else {
        panel.clear_all(&confirm_on_stdin).await?
    };

    if cleared {
        println!("{}", panel.status());
    } else {
        println!("Nothing cleared.");
    }
    Ok(())
}

pub(crate) async fn source(
    client: Arc<dyn ServiceClient>,
    config: &Config,
    id: &str,
) -> CommandResult {
    let panel = panel(client, config);
    panel.open().await?;
    match panel.source_url(id) {
        Some(url) => {
            println!("{}", url);
            Ok(())
        }
        None => Err(format!("Highlight ID not found: {}", id).into()),
    }
}

pub(crate) async fn summarize(client: Arc<dyn ServiceClient>, config: &Config) -> CommandResult {
    let panel = panel(client, config);
    println!("Generating summary...");

    match panel.summarize().await? {
        SummaryView::Ready { html, model } => {
            println!("{}", html);
            println!();
            println!("({})", model);
            Ok(())
        }
        SummaryView::Failed { message, .. } => Err(message.into()),
        SummaryView::Loading => Ok(()),
    }
}

pub(crate) async fn save(
    client: Arc<dyn ServiceClient>,
    config: &Config,
    text: String,
    url: String,
    title: Option<String>,
) -> CommandResult {
    let surface = Arc::new(ConsoleSurface::default());
    let host = CaptureHost {
        viewport: Arc::new(StaticViewport::default()),
        affordance: surface.clone(),
        marker: surface.clone(),
        notifier: surface,
    };
    let capture_config = CaptureConfig {
        save_timeout: Duration::from_millis(config.capture.save_timeout_ms),
        scroll_debounce: Duration::from_millis(config.capture.scroll_debounce_ms),
    };
    let capture = Capture::with_config(client, PageInfo::new(url, title), host, capture_config);

    let selection: Arc<dyn Selection> = Arc::new(StaticSelection::new(text));
    capture.on_selection_change(Some(selection));

    match capture.on_save().await {
        SaveOutcome::Saved { id } => {
            println!("id: {}", id);
            Ok(())
        }
        SaveOutcome::Rejected(reason) => Err(format!("Highlight rejected: {:?}", reason).into()),
        SaveOutcome::Failed(message) => Err(message.into()),
        SaveOutcome::TimedOut => Err("No acknowledgement from the service".into()),
        SaveOutcome::Busy => Err("A save is already in progress".into()),
    }
}
