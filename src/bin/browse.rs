//! Terminal browser for the worker catalog — a thin view over the
//! client store and fetch controller, for poking at a running server.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use workfinder::client::{FetchController, FilterState, HttpTransport, PriceRange, WorkersStore};
use workfinder::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let base_url =
        std::env::var("WORKFINDER_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

    eprintln!("🔎 Workfinder browser — {}", base_url);
    eprintln!("   Commands:");
    eprintln!("     service <name>     filter by category ('all' clears)");
    eprintln!("     price <min> <max>  filter by daily price");
    eprintln!("     search <text>      free-text search");
    eprintln!("     page <n> | next | prev");
    eprintln!("     services           list categories");
    eprintln!("     reset | retry | quit\n");

    let store = WorkersStore::new();
    let config = ClientConfig {
        base_url,
        ..Default::default()
    };
    let controller = FetchController::new(
        Arc::clone(&store),
        Arc::new(HttpTransport::new()),
        config,
    );

    // Render every settled state change.
    let mut rx = store.subscribe();
    tokio::spawn(async move {
        loop {
            if rx.changed().await.is_err() {
                break;
            }
            let state = rx.borrow().clone();
            if state.loading {
                continue;
            }
            if let Some(error) = &state.error {
                eprintln!("\n❌ {error} (type 'retry' to try again)");
                eprint!("> ");
                continue;
            }
            render(&state);
            eprint!("> ");
        }
    });

    controller.load();

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "quit" | "exit" => break,
            "service" if !rest.is_empty() => controller.set_service(rest.trim()),
            "search" => controller.set_search(rest.trim()),
            "price" => match parse_price(rest) {
                Some(range) => controller.set_price_range(range),
                None => {
                    eprintln!("Usage: price <min> <max>");
                    eprint!("> ");
                }
            },
            "page" => match rest.trim().parse::<usize>() {
                Ok(page) => controller.set_page(page),
                Err(_) => {
                    eprintln!("Usage: page <n>");
                    eprint!("> ");
                }
            },
            "next" => {
                let state = store.snapshot();
                if state.current_page < state.total_pages {
                    controller.set_page(state.current_page + 1);
                } else {
                    eprintln!("Already on the last page");
                    eprint!("> ");
                }
            }
            "prev" => {
                let state = store.snapshot();
                if state.current_page > 1 {
                    controller.set_page(state.current_page - 1);
                } else {
                    eprintln!("Already on the first page");
                    eprint!("> ");
                }
            }
            "reset" => controller.reset_filters(),
            "retry" => controller.retry(),
            "services" => {
                match controller.fetch_services().await {
                    Ok(services) => eprintln!("Services: {}", services.join(", ")),
                    Err(e) => eprintln!("❌ {e}"),
                }
                eprint!("> ");
            }
            _ => {
                eprintln!("Unknown command: {command}");
                eprint!("> ");
            }
        }
    }

    Ok(())
}

fn parse_price(rest: &str) -> Option<PriceRange> {
    let mut parts = rest.split_whitespace();
    let min = parts.next()?.parse().ok()?;
    let max = parts.next()?.parse().ok()?;
    (min <= max).then_some(PriceRange { min, max })
}

fn render(state: &FilterState) {
    if state.workers.is_empty() {
        println!("\nNo workers found matching your criteria (try 'reset')");
        return;
    }

    println!();
    for worker in &state.workers {
        println!(
            "  {:<24} {:<16} ${}/day",
            worker.name, worker.service, worker.price_per_day
        );
    }
    println!(
        "  — page {}/{} ({} workers total)",
        state.current_page,
        state.total_pages.max(1),
        state.total_items
    );
}
